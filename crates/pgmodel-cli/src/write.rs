//! Committing rendered modules to disk.
//!
//! Stale outputs are first staged as temporary files next to their targets. Targets are
//! only replaced once every file is staged, so an I/O failure while staging leaves all
//! outputs as they were. Dropped staging files remove themselves.

use anyhow::Context;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A rendered module, not yet on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub content: String,
}

impl OutputFile {
    /// Missing or different on disk.
    fn is_stale(&self) -> bool {
        std::fs::read_to_string(&self.path).ok().as_deref() != Some(self.content.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Replace stale files.
    Write,
    /// List stale files.
    DryRun,
    /// Fail when any file is stale.
    Check,
}

impl WriteMode {
    pub fn from_flags(dry_run: bool, check: bool) -> Self {
        match (dry_run, check) {
            (true, _) => Self::DryRun,
            (_, true) => Self::Check,
            _ => Self::Write,
        }
    }
}

#[derive(Debug, Default)]
pub struct Report {
    /// Outputs whose content differs from disk, sorted by path.
    pub stale: Vec<PathBuf>,
    pub written: Vec<PathBuf>,
}

pub fn commit(files: &[OutputFile], mode: WriteMode) -> anyhow::Result<Report> {
    let mut stale: Vec<&OutputFile> = files.iter().filter(|f| f.is_stale()).collect();
    stale.sort_by(|a, b| a.path.cmp(&b.path));
    tracing::debug!(
        outputs = files.len(),
        stale = stale.len(),
        ?mode,
        "comparing outputs"
    );

    let mut report = Report {
        stale: stale.iter().map(|f| f.path.clone()).collect(),
        written: Vec::new(),
    };

    match mode {
        WriteMode::DryRun => {
            for path in &report.stale {
                println!("would write {}", path.display());
            }
        }
        WriteMode::Check => {
            for path in &report.stale {
                eprintln!("out of date: {}", path.display());
            }
            if !report.stale.is_empty() {
                anyhow::bail!("{} generated file(s) are out of date", report.stale.len());
            }
        }
        WriteMode::Write => {
            let staged = stale
                .iter()
                .map(|f| stage(f).map(|tmp| (&f.path, tmp)))
                .collect::<anyhow::Result<Vec<_>>>()?;

            for (path, tmp) in staged {
                tmp.persist(path)
                    .with_context(|| format!("failed to replace {}", path.display()))?;
                println!("wrote {}", path.display());
                report.written.push(path.clone());
            }
        }
    }

    Ok(report)
}

/// Write `file` to a temporary sibling of its target.
fn stage(file: &OutputFile) -> anyhow::Result<NamedTempFile> {
    let dir = match file.path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory {}", dir.display()))?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".pgmodel-")
        .suffix(".rs.tmp")
        .tempfile_in(dir)
        .with_context(|| format!("failed to stage {}", file.path.display()))?;
    tmp.write_all(file.content.as_bytes())
        .with_context(|| format!("failed to stage {}", file.path.display()))?;
    Ok(tmp)
}
