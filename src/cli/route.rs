//! CLI route: builds the engine from parsed flags and dispatches to it.

use crate::cli::parse::Cli;
use crate::cli::presentation::{format_generator_list, format_plan, format_run_summary};
use crate::config::{ConfigLoader, GlobalConfig};
use crate::engine::ReportEngine;
use crate::error::ReportError;
use crate::generator::{GeneratorRegistry, RunContext};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Runtime context for CLI execution: the loaded global configuration and the
/// generator registry.
pub struct CommandContext {
    global: Option<Arc<GlobalConfig>>,
    registry: Arc<GeneratorRegistry>,
}

impl CommandContext {
    /// Load the global configuration (when a path is given) and register the
    /// builtin generators.
    pub fn new(config_path: Option<&Path>) -> Result<Self, ReportError> {
        Self::with_registry(config_path, GeneratorRegistry::with_builtins())
    }

    pub fn with_registry(
        config_path: Option<&Path>,
        registry: GeneratorRegistry,
    ) -> Result<Self, ReportError> {
        let global = config_path
            .map(ConfigLoader::load_from_file)
            .transpose()?
            .map(Arc::new);
        Ok(Self {
            global,
            registry: Arc::new(registry),
        })
    }

    pub fn global(&self) -> Option<&GlobalConfig> {
        self.global.as_deref()
    }

    /// Execute the command line; returns the text to print.
    pub fn execute(&self, cli: &Cli) -> Result<String, ReportError> {
        if cli.list_generators {
            return format_generator_list(&self.registry.names(), &cli.format);
        }

        let global = self.global.clone().ok_or_else(|| {
            ReportError::Config("A global configuration file is required".to_string())
        })?;
        let context = RunContext::new(cli.timestamp, !cli.skip_singletons);
        let engine = ReportEngine::new(global, Arc::clone(&self.registry), context);

        if cli.dry_run {
            return format_plan(&engine.plan(), &cli.format);
        }

        let task = engine.spawn()?;
        info!("Report task started");
        let summary = task.join()?;
        format_run_summary(&summary, &cli.format)
    }
}
