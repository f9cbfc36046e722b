//! Shared test utilities for integration tests
//!
//! A scratch station on disk plus a registry of recording generators, so
//! tests can assert exactly which generators ran and in what order.

use skinrun::config::GlobalConfig;
use skinrun::generator::{GeneratorRegistry, GeneratorUnit, RunContext};
use skinrun::skin::SkinConfig;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across tests
pub static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Execution log shared between recording generators and the test
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// How a recording generator behaves when started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Succeed,
    Fail,
}

struct Recording {
    label: String,
    log: CallLog,
    behavior: Behavior,
}

impl GeneratorUnit for Recording {
    fn start(&mut self) -> anyhow::Result<()> {
        self.log.lock().unwrap().push(self.label.clone());
        match self.behavior {
            Behavior::Succeed => Ok(()),
            Behavior::Fail => anyhow::bail!("{} failed mid-write", self.label),
        }
    }
}

/// Register a generator that appends `<report>:<name>` to `log` when started.
pub fn register_recorder(
    registry: &mut GeneratorRegistry,
    name: &str,
    log: &CallLog,
    behavior: Behavior,
) {
    let log = Arc::clone(log);
    let name_owned = name.to_string();
    registry.register(
        name,
        move |_: &GlobalConfig, skin: &SkinConfig, _: &RunContext| {
            let unit: Box<dyn GeneratorUnit> = Box::new(Recording {
                label: format!("{}:{}", skin.report(), name_owned),
                log: Arc::clone(&log),
                behavior,
            });
            Ok(unit)
        },
    );
}

/// Recording registry with every name succeeding
pub fn recording_registry(names: &[&str], log: &CallLog) -> GeneratorRegistry {
    let mut registry = GeneratorRegistry::new();
    for name in names {
        register_recorder(&mut registry, name, log, Behavior::Succeed);
    }
    registry
}

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// A station root in a temp directory
pub struct Station {
    pub dir: TempDir,
}

impl Station {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn skin_dir(&self, skin: &str) -> PathBuf {
        self.root().join("skins").join(skin)
    }

    /// Write `skins/<skin>/skin.conf`
    pub fn write_skin(&self, skin: &str, body: &str) -> &Self {
        let dir = self.skin_dir(skin);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("skin.conf"), body).unwrap();
        self
    }

    pub fn write_file(&self, relative: &str, body: &str) -> PathBuf {
        let path = self.root().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, body).unwrap();
        path
    }

    /// Global document text with this station as root, followed by `rest`
    pub fn global_text(&self, rest: &str) -> String {
        format!(
            "[station]\nroot = {:?}\n\n{}",
            self.root().to_string_lossy(),
            rest
        )
    }

    /// Parse the global document. Holds [`ENV_MUTEX`] so environment
    /// overrides set by other tests cannot leak in.
    pub fn global(&self, rest: &str) -> GlobalConfig {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        GlobalConfig::from_toml_str(&self.global_text(rest)).unwrap()
    }

    /// Write the global document to `station.toml` and return its path
    pub fn write_global(&self, rest: &str) -> PathBuf {
        let text = self.global_text(rest);
        self.write_file("station.toml", &text)
    }
}
