//! Copy generator: copies skin assets into the station's HTML root.
//!
//! Reads `[Files.Copy] copy_once` from the merged skin config. Patterns are
//! relative to the skin directory and follow shell glob rules: `*`, `?` and
//! `[...]` classes match within one path segment, and wildcards skip names
//! starting with `.` unless the pattern segment starts with `.` too.
//! A pattern that matches a directory copies everything below it.

use crate::config::GlobalConfig;
use crate::generator::{GeneratorUnit, RunContext};
use crate::skin::{value_as_list, SkinConfig};
use anyhow::Context;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

pub const GENERATOR_NAME: &str = "Copy";

const COPY_ONCE_PATH: &[&str] = &["Files", "Copy", "copy_once"];

pub struct CopyGenerator {
    patterns: Vec<String>,
    skin_dir: PathBuf,
    html_dest: PathBuf,
}

pub fn create_copy_generator(
    global: &GlobalConfig,
    skin: &SkinConfig,
    _context: &RunContext,
) -> anyhow::Result<Box<dyn GeneratorUnit>> {
    let patterns = skin
        .lookup(COPY_ONCE_PATH)
        .map(value_as_list)
        .unwrap_or_default();
    let html_root = match skin.get("html_root") {
        None => skin.default_html_root(),
        Some(value) => value
            .as_str()
            .context("'html_root' must be a string")?,
    };

    Ok(Box::new(CopyGenerator {
        patterns,
        skin_dir: skin.skin_dir().to_path_buf(),
        html_dest: global.station_root().join(html_root),
    }))
}

impl GeneratorUnit for CopyGenerator {
    fn start(&mut self) -> anyhow::Result<()> {
        if self.patterns.is_empty() {
            debug!("No copy_once list; nothing to copy");
            return Ok(());
        }

        let mut ncopy = 0usize;
        for pattern in &self.patterns {
            for relative in expand_pattern(&self.skin_dir, pattern)? {
                let source = self.skin_dir.join(&relative);
                let dest = self.html_dest.join(&relative);
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create directory {}", parent.display())
                    })?;
                }
                fs::copy(&source, &dest).with_context(|| {
                    format!("Failed to copy {} to {}", source.display(), dest.display())
                })?;
                ncopy += 1;
            }
        }

        debug!(
            copied = ncopy,
            dest = %self.html_dest.display(),
            "Copied skin files"
        );
        Ok(())
    }
}

/// Files under `root` matched by `pattern`, relative to `root`, sorted.
fn expand_pattern(root: &Path, pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let matcher = CopyPattern::new(pattern)?;
    let mut matched_dirs: Vec<PathBuf> = Vec::new();
    let mut files = BTreeSet::new();

    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        let relative = entry.path().strip_prefix(root)?.to_path_buf();
        let normalized = relative.to_string_lossy().replace('\\', "/");
        let hit = matcher.matches(&normalized);

        if entry.file_type().is_dir() {
            if hit {
                matched_dirs.push(relative);
            }
        } else if entry.file_type().is_file()
            && (hit || matched_dirs.iter().any(|dir| relative.starts_with(dir)))
        {
            files.insert(relative);
        }
    }

    Ok(files.into_iter().collect())
}

/// One `copy_once` entry compiled for matching `/`-separated relative paths
struct CopyPattern {
    regex: Regex,
    /// Per segment: may a name starting with `.` match?
    dot_segments: Vec<bool>,
}

impl CopyPattern {
    fn new(pattern: &str) -> anyhow::Result<Self> {
        let pattern = pattern
            .trim()
            .replace('\\', "/")
            .trim_start_matches("./")
            .trim_end_matches('/')
            .to_string();

        let mut expr = String::from("^");
        let mut dot_segments = Vec::new();
        for (index, segment) in pattern.split('/').enumerate() {
            if index > 0 {
                expr.push('/');
            }
            dot_segments.push(segment.starts_with('.'));
            translate_segment(segment, &mut expr);
        }
        expr.push('$');

        let regex =
            Regex::new(&expr).with_context(|| format!("Invalid copy pattern '{}'", pattern))?;
        Ok(Self {
            regex,
            dot_segments,
        })
    }

    fn matches(&self, relative: &str) -> bool {
        self.regex.is_match(relative)
            && relative
                .split('/')
                .zip(&self.dot_segments)
                .all(|(name, dot_ok)| *dot_ok || !name.starts_with('.'))
    }
}

fn translate_segment(segment: &str, expr: &mut String) {
    let chars: Vec<char> = segment.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => expr.push_str("[^/]*"),
            '?' => expr.push_str("[^/]"),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    push_class(&chars[i + 1..end], expr);
                    i = end;
                }
                // Unclosed bracket is a literal
                None => expr.push_str("\\["),
            },
            other => push_literal(other, expr),
        }
        i += 1;
    }
}

/// Index of the `]` closing the class opened at `open`. A `]` right after
/// `[` or `[!` is part of the class.
fn class_end(chars: &[char], open: usize) -> Option<usize> {
    let mut j = open + 1;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    chars[j.min(chars.len())..]
        .iter()
        .position(|&c| c == ']')
        .map(|offset| j + offset)
}

fn push_class(body: &[char], expr: &mut String) {
    let (negated, body) = match body.split_first() {
        Some(('!', rest)) => (true, rest),
        _ => (false, body),
    };

    expr.push('[');
    if negated {
        expr.push_str("^/");
    }
    for (index, &ch) in body.iter().enumerate() {
        let is_range = ch == '-' && index > 0 && index + 1 < body.len();
        if is_range {
            expr.push('-');
        } else {
            push_literal(ch, expr);
        }
    }
    expr.push(']');
}

fn push_literal(ch: char, expr: &mut String) {
    expr.push_str(&regex::escape(ch.encode_utf8(&mut [0u8; 4])));
}
