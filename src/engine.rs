//! Report engine: the top-level dispatch loop.
//!
//! For every report in the global configuration, in declaration order, the
//! engine resolves the merged skin configuration, runs the skin's
//! `singleton_list` when this is the first run, then runs its
//! `generator_list`. Reports and generators are processed strictly one after
//! another. A report without a usable skin document is skipped; a generator
//! that fails while running ends the whole run.

use crate::config::GlobalConfig;
use crate::error::{panic_message, ReportError};
use crate::generator::{GeneratorRegistry, GeneratorRunner, RunContext};
use crate::skin::ConfigResolver;
use serde::Serialize;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info};

/// Name of the thread a spawned engine runs on.
pub const REPORT_THREAD_NAME: &str = "report-engine";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutedGenerator {
    pub report: String,
    pub generator: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedGenerator {
    pub report: String,
    pub generator: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedReport {
    pub report: String,
    pub reason: String,
}

/// What a successful run did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub completed_reports: Vec<String>,
    pub skipped_reports: Vec<SkippedReport>,
    pub executed: Vec<ExecutedGenerator>,
    pub skipped_generators: Vec<SkippedGenerator>,
}

impl RunSummary {
    pub fn record_executed(&mut self, report: &str, generator: &str) {
        self.executed.push(ExecutedGenerator {
            report: report.to_string(),
            generator: generator.to_string(),
        });
    }

    pub fn record_skipped_generator(&mut self, report: &str, generator: &str, err: &ReportError) {
        self.skipped_generators.push(SkippedGenerator {
            report: report.to_string(),
            generator: generator.to_string(),
            reason: err.to_string(),
        });
    }

    pub fn record_skipped_report(&mut self, report: &str, err: &ReportError) {
        self.skipped_reports.push(SkippedReport {
            report: report.to_string(),
            reason: err.to_string(),
        });
    }

    /// Executed generator identifiers, in execution order
    pub fn executed_generators(&self) -> Vec<&str> {
        self.executed.iter().map(|e| e.generator.as_str()).collect()
    }
}

/// What the engine would do for one report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportPlan {
    Ready {
        report: String,
        skin: String,
        document: String,
        singletons: Vec<String>,
        generators: Vec<String>,
        unknown: Vec<String>,
    },
    Skipped {
        report: String,
        reason: String,
    },
}

pub struct ReportEngine {
    global: Arc<GlobalConfig>,
    registry: Arc<GeneratorRegistry>,
    context: RunContext,
    resolver: ConfigResolver,
}

impl ReportEngine {
    pub fn new(
        global: Arc<GlobalConfig>,
        registry: Arc<GeneratorRegistry>,
        context: RunContext,
    ) -> Self {
        Self {
            global,
            registry,
            context,
            resolver: ConfigResolver::default(),
        }
    }

    pub fn with_resolver(mut self, resolver: ConfigResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn context(&self) -> &RunContext {
        &self.context
    }

    /// Run every report. Blocks until done; returns the first fatal error.
    pub fn run(&self) -> Result<RunSummary, ReportError> {
        debug!(time = %self.context.describe_time(), "Running reports");

        let runner = GeneratorRunner::new(&self.registry, &self.global, &self.context);
        let mut summary = RunSummary::default();

        // Declaration order; a skipped report never blocks the next one
        for report in self.global.report_names() {
            debug!(report = %report, "Running report");

            let skin = match self.resolver.resolve(&report, &self.global) {
                Ok(skin) => skin,
                Err(err) if err.is_recoverable() => {
                    info!(
                        report = %report,
                        error = %err,
                        "No skin configuration file for report; report ignored"
                    );
                    summary.record_skipped_report(&report, &err);
                    continue;
                }
                Err(err) => return Err(err),
            };

            // Singletons only on the first run, and always before the regular list
            if self.context.first_run() {
                if let Some(singletons) = skin.singleton_list() {
                    runner.run_all(&skin, &singletons, &mut summary)?;
                }
            }
            runner.run_all(&skin, &skin.generator_list(), &mut summary)?;

            summary.completed_reports.push(report);
        }

        info!(
            completed = summary.completed_reports.len(),
            skipped = summary.skipped_reports.len(),
            generators = summary.executed.len(),
            "Report run finished"
        );
        Ok(summary)
    }

    /// Resolve every report without running anything.
    pub fn plan(&self) -> Vec<ReportPlan> {
        self.global
            .report_names()
            .into_iter()
            .map(|report| match self.resolver.resolve(&report, &self.global) {
                Ok(skin) => {
                    let singletons = if self.context.first_run() {
                        skin.singleton_list().unwrap_or_default()
                    } else {
                        Vec::new()
                    };
                    let generators = skin.generator_list();
                    let unknown = singletons
                        .iter()
                        .chain(generators.iter())
                        .filter(|id| !self.registry.contains(id))
                        .cloned()
                        .collect();
                    ReportPlan::Ready {
                        report,
                        skin: skin.skin().to_string(),
                        document: skin.document_path().display().to_string(),
                        singletons,
                        generators,
                        unknown,
                    }
                }
                Err(err) => ReportPlan::Skipped {
                    report,
                    reason: err.to_string(),
                },
            })
            .collect()
    }

    /// Run on a background thread. Join the returned task to wait for the
    /// result, or drop it to let the run finish on its own.
    pub fn spawn(self) -> Result<ReportTask, ReportError> {
        let handle = thread::Builder::new()
            .name(REPORT_THREAD_NAME.to_string())
            .spawn(move || self.run())
            .map_err(ReportError::Spawn)?;
        Ok(ReportTask { handle })
    }
}

/// Handle to an engine running on its own thread
#[derive(Debug)]
pub struct ReportTask {
    handle: JoinHandle<Result<RunSummary, ReportError>>,
}

impl ReportTask {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the run completes.
    pub fn join(self) -> Result<RunSummary, ReportError> {
        match self.handle.join() {
            Ok(result) => result,
            Err(payload) => Err(ReportError::TaskPanicked(panic_message(payload.as_ref()))),
        }
    }
}
