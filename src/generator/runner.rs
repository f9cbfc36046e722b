//! Generator runner: runs one ordered generator list against one skin.
//!
//! Instantiation failures skip the generator. Anything that goes wrong once a
//! generator has started ends the run.

use crate::config::GlobalConfig;
use crate::engine::RunSummary;
use crate::error::{panic_message, ReportError, Severity};
use crate::generator::{GeneratorRegistry, GeneratorUnit, RunContext};
use crate::skin::SkinConfig;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error};

pub struct GeneratorRunner<'a> {
    registry: &'a GeneratorRegistry,
    global: &'a GlobalConfig,
    context: &'a RunContext,
}

impl<'a> GeneratorRunner<'a> {
    pub fn new(
        registry: &'a GeneratorRegistry,
        global: &'a GlobalConfig,
        context: &'a RunContext,
    ) -> Self {
        Self {
            registry,
            global,
            context,
        }
    }

    /// Run `generators` in order. Returns the first fatal error.
    pub fn run_all(
        &self,
        skin: &SkinConfig,
        generators: &[String],
        summary: &mut RunSummary,
    ) -> Result<(), ReportError> {
        for generator in generators {
            let mut unit =
                match self
                    .registry
                    .instantiate(generator, self.global, skin, self.context)
                {
                    Ok(unit) => unit,
                    Err(err) => {
                        self.handle_failure(skin, generator, err, summary)?;
                        continue;
                    }
                };

            debug!(report = %skin.report(), generator = %generator, "Running generator");
            match start_unit(skin.report(), generator, unit.as_mut()) {
                Ok(()) => summary.record_executed(skin.report(), generator),
                Err(err) => self.handle_failure(skin, generator, err, summary)?,
            }
        }
        Ok(())
    }

    fn handle_failure(
        &self,
        skin: &SkinConfig,
        generator: &str,
        err: ReportError,
        summary: &mut RunSummary,
    ) -> Result<(), ReportError> {
        match err.severity() {
            Severity::Recoverable => {
                error!(
                    report = %skin.report(),
                    generator = %generator,
                    error = %err,
                    "Unable to instantiate generator; generator ignored"
                );
                summary.record_skipped_generator(skin.report(), generator, &err);
                Ok(())
            }
            Severity::Fatal => {
                error!(
                    report = %skin.report(),
                    generator = %generator,
                    error = %err,
                    "Caught unrecoverable error in generator; report task exiting"
                );
                Err(err)
            }
        }
    }
}

fn start_unit(
    report: &str,
    generator: &str,
    unit: &mut dyn GeneratorUnit,
) -> Result<(), ReportError> {
    match panic::catch_unwind(AssertUnwindSafe(|| unit.start())) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(source)) => Err(ReportError::GeneratorFailed {
            report: report.to_string(),
            generator: generator.to_string(),
            source,
        }),
        Err(payload) => Err(ReportError::GeneratorPanicked {
            report: report.to_string(),
            generator: generator.to_string(),
            message: panic_message(payload.as_ref()),
        }),
    }
}
