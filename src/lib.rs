//! Skinrun: skin-driven report generation
//!
//! Each configured report is bound to a skin. The skin's configuration
//! document, layered with station-wide and per-report overrides, names the
//! generators that produce the report. This crate resolves those layers,
//! looks generators up in a registry and runs them with a strict split between
//! recoverable wiring mistakes and fatal runtime failures.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod logging;
pub mod skin;

pub use config::{ConfigLoader, GlobalConfig};
pub use engine::{ReportEngine, ReportTask, RunSummary};
pub use error::{ReportError, Severity};
pub use generator::{GeneratorRegistry, GeneratorUnit, RunContext};
pub use skin::{ConfigResolver, SkinConfig};
