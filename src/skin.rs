//! Skins: merged per-report configuration.
//!
//! A [`SkinConfig`] is built fresh for every report by the [`ConfigResolver`]
//! and dropped once the report has run. Only `singleton_list` and
//! `generator_list` mean anything to the engine; every other key is passed
//! through to generators untouched.

use crate::config::DEFAULT_HTML_ROOT;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

pub mod merge;
mod resolver;

pub use resolver::ConfigResolver;

/// Key holding generators that run only on the first invocation.
pub const SINGLETON_LIST_KEY: &str = "singleton_list";

/// Key holding generators that run on every invocation.
pub const GENERATOR_LIST_KEY: &str = "generator_list";

/// Merged configuration for one report+skin pair
#[derive(Debug, Clone, PartialEq)]
pub struct SkinConfig {
    report: String,
    skin: String,
    skin_dir: PathBuf,
    document_path: PathBuf,
    table: Table,
    default_html_root: String,
}

impl SkinConfig {
    pub fn new(
        report: impl Into<String>,
        skin: impl Into<String>,
        document_path: PathBuf,
        table: Table,
    ) -> Self {
        let skin_dir = document_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            report: report.into(),
            skin: skin.into(),
            skin_dir,
            document_path,
            table,
            default_html_root: DEFAULT_HTML_ROOT.to_string(),
        }
    }

    /// Output directory used when no layer sets `html_root`
    pub fn with_default_html_root(mut self, html_root: impl Into<String>) -> Self {
        self.default_html_root = html_root.into();
        self
    }

    pub fn default_html_root(&self) -> &str {
        &self.default_html_root
    }

    pub fn report(&self) -> &str {
        &self.report
    }

    pub fn skin(&self) -> &str {
        &self.skin
    }

    /// Directory holding the skin's document and assets
    pub fn skin_dir(&self) -> &Path {
        &self.skin_dir
    }

    pub fn document_path(&self) -> &Path {
        &self.document_path
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.table.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.table.get(key).and_then(Value::as_str)
    }

    /// Follow a path of nested tables, e.g. `["Files", "Copy", "copy_once"]`.
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        let (last, parents) = path.split_last()?;
        let mut table = &self.table;
        for key in parents {
            table = table.get(*key)?.as_table()?;
        }
        table.get(*last)
    }

    /// Read a key as a list of strings. Missing is empty, a lone value is a
    /// one-element list, and non-string entries are rendered as text.
    pub fn as_list(&self, key: &str) -> Vec<String> {
        self.table.get(key).map(value_as_list).unwrap_or_default()
    }

    pub fn singleton_list(&self) -> Option<Vec<String>> {
        self.has_key(SINGLETON_LIST_KEY)
            .then(|| self.as_list(SINGLETON_LIST_KEY))
    }

    pub fn generator_list(&self) -> Vec<String> {
        self.as_list(GENERATOR_LIST_KEY)
    }
}

pub(crate) fn value_as_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(value_as_text).collect(),
        other => vec![value_as_text(other)],
    }
}

fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
