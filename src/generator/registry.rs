//! Generator registry: identifier to factory.

use crate::config::GlobalConfig;
use crate::error::{panic_message, ReportError};
use crate::generator::{copy, GeneratorUnit, RunContext};
use crate::skin::SkinConfig;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Factory signature for builtin generators.
pub type GeneratorCreateFn =
    fn(&GlobalConfig, &SkinConfig, &RunContext) -> anyhow::Result<Box<dyn GeneratorUnit>>;

/// Factory stored in the registry. Closures may capture state.
pub type GeneratorFactory = Arc<
    dyn Fn(&GlobalConfig, &SkinConfig, &RunContext) -> anyhow::Result<Box<dyn GeneratorUnit>>
        + Send
        + Sync,
>;

/// Generators shipped with the crate.
const BUILTIN_GENERATORS: &[(&str, GeneratorCreateFn)] =
    &[(copy::GENERATOR_NAME, copy::create_copy_generator)];

/// Maps the identifiers written in skin documents to factories.
#[derive(Clone, Default)]
pub struct GeneratorRegistry {
    factories: HashMap<String, GeneratorFactory>,
}

impl GeneratorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the builtin generators
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, create) in BUILTIN_GENERATORS {
            registry.register(*name, *create);
        }
        registry
    }

    /// Register a factory, replacing any previous one under the same name
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&GlobalConfig, &SkinConfig, &RunContext) -> anyhow::Result<Box<dyn GeneratorUnit>>
            + Send
            + Sync
            + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered identifiers, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up and construct a generator.
    ///
    /// Unknown identifiers, factory errors and factory panics all come back as
    /// [`ReportError::Instantiation`].
    pub fn instantiate(
        &self,
        generator: &str,
        global: &GlobalConfig,
        skin: &SkinConfig,
        context: &RunContext,
    ) -> Result<Box<dyn GeneratorUnit>, ReportError> {
        let factory = self
            .factories
            .get(generator)
            .ok_or_else(|| ReportError::Instantiation {
                generator: generator.to_string(),
                reason: "no generator registered under this name".to_string(),
            })?;

        match panic::catch_unwind(AssertUnwindSafe(|| factory(global, skin, context))) {
            Ok(Ok(unit)) => Ok(unit),
            Ok(Err(e)) => Err(ReportError::Instantiation {
                generator: generator.to_string(),
                reason: format!("{:#}", e),
            }),
            Err(payload) => Err(ReportError::Instantiation {
                generator: generator.to_string(),
                reason: format!("constructor panicked: {}", panic_message(payload.as_ref())),
            }),
        }
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("generators", &self.names())
            .finish()
    }
}
