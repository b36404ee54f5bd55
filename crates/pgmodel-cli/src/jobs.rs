use crate::config::ProjectConfig;
use crate::write::OutputFile;
use anyhow::Context;
use heck::ToSnakeCase;
use pgmodel_codegen::GenerateRequest;
use std::collections::HashSet;
use std::path::PathBuf;

/// One model to generate.
#[derive(Debug, Clone)]
pub struct Job {
    /// Source file to read.
    pub source: PathBuf,
    /// Source path as written in the generated header.
    pub source_label: String,
    pub module: String,
    pub output: PathBuf,
    pub prefix: String,
    pub table: String,
    pub model: String,
    pub queries: Vec<String>,
}

/// Explicit prefix, or the model name in snake_case.
pub fn resolve_prefix(prefix: Option<&str>, model: &str) -> String {
    prefix.map_or_else(|| model.to_snake_case(), str::to_string)
}

/// Jobs of every `[[models]]` entry, paths resolved against the config directory.
pub fn jobs_from_config(project: &ProjectConfig) -> Vec<Job> {
    project
        .file
        .models
        .iter()
        .map(|m| Job {
            source: project.resolve_path(&m.source),
            source_label: m.source.clone(),
            module: m.module.clone(),
            output: project.resolve_path(&m.output),
            prefix: resolve_prefix(m.prefix.as_deref(), &m.model),
            table: m.table.clone(),
            model: m.model.clone(),
            queries: m.queries.clone(),
        })
        .collect()
}

/// Compile and render every job. Nothing is written; the first failure aborts the run.
pub fn compile_jobs(jobs: &[Job]) -> anyhow::Result<Vec<OutputFile>> {
    let mut outputs = HashSet::new();
    let mut files = Vec::with_capacity(jobs.len());

    for job in jobs {
        if !outputs.insert(job.output.clone()) {
            anyhow::bail!("output {} is generated twice", job.output.display());
        }

        let span = tracing::info_span!("job", model = %job.model, table = %job.table);
        let _enter = span.enter();

        let source = std::fs::read_to_string(&job.source)
            .with_context(|| format!("failed to read source file {}", job.source.display()))?;

        let generated = pgmodel_codegen::generate(
            &source,
            &GenerateRequest {
                source_path: &job.source_label,
                module: &job.module,
                prefix: &job.prefix,
                table: &job.table,
                model: &job.model,
                queries: &job.queries,
            },
        )
        .with_context(|| {
            format!(
                "failed to generate model {} from {}",
                job.model,
                job.source.display()
            )
        })?;

        for function in &generated.functions {
            tracing::trace!(%function, "generated function");
        }

        files.push(OutputFile {
            path: job.output.clone(),
            content: generated.content,
        });
    }

    Ok(files)
}
