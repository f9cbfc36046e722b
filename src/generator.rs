//! Generators: the units that produce a report's artifacts.
//!
//! A generator is named in a skin's `singleton_list` or `generator_list`,
//! constructed through the [`GeneratorRegistry`] and driven by the
//! [`GeneratorRunner`]. The engine only knows the single entry point below.

use chrono::DateTime;

pub mod copy;
mod registry;
mod runner;

pub use registry::{GeneratorCreateFn, GeneratorFactory, GeneratorRegistry};
pub use runner::GeneratorRunner;

/// One report-production step.
///
/// Any error returned from `start` is treated as fatal for the whole run.
pub trait GeneratorUnit {
    fn start(&mut self) -> anyhow::Result<()>;
}

/// Inputs fixed for one engine run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunContext {
    gen_ts: Option<i64>,
    first_run: bool,
}

impl RunContext {
    /// `gen_ts` is the unix time output should be current for; `None` means
    /// the most recent data. `first_run` enables every `singleton_list`.
    pub fn new(gen_ts: Option<i64>, first_run: bool) -> Self {
        Self { gen_ts, first_run }
    }

    pub fn gen_ts(&self) -> Option<i64> {
        self.gen_ts
    }

    pub fn first_run(&self) -> bool {
        self.first_run
    }

    /// Human-readable reference time for log lines
    pub fn describe_time(&self) -> String {
        match self.gen_ts {
            Some(ts) => format_timestamp(ts),
            None => "latest time in the database".to_string(),
        }
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new(None, true)
    }
}

pub fn format_timestamp(ts: i64) -> String {
    match DateTime::from_timestamp(ts, 0) {
        Some(dt) => format!("{} ({})", dt.format("%Y-%m-%d %H:%M:%S UTC"), ts),
        None => format!("{} (out of range)", ts),
    }
}
