//! Document sources: the global configuration file and per-skin documents.

pub mod global_file;
pub mod skin_file;
