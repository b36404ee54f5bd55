//! Extra imports requested by generated functions.

use std::collections::BTreeSet;

/// Deduplicated set of `use` paths, rendered in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    paths: BTreeSet<String>,
}

impl DependencySet {
    /// Add every whitespace-separated path in `deps`.
    pub fn add(&mut self, deps: &str) {
        for path in deps.split_whitespace() {
            self.paths.insert(path.to_string());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// One `use` line per path; empty when nothing was added.
    pub fn render(&self) -> String {
        self.paths.iter().map(|p| format!("use {p};\n")).collect()
    }
}
