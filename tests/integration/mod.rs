//! Integration tests for skin resolution and generator dispatch

mod dispatch;
mod log_levels;
mod test_utils;
