mod cli;
mod config;
mod jobs;
mod logging;
mod write;

use clap::Parser;
use clap::error::ErrorKind;
use std::ffi::OsString;

/// Parse `args` (program name first) and run the selected command.
pub fn run<I, T>(args: I) -> anyhow::Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let output = *cli.command.output();
    logging::init(output.verbose);

    let jobs = match cli.command {
        cli::Command::Model(args) => vec![jobs::Job {
            source_label: args.source.display().to_string(),
            source: args.source,
            module: args.module,
            output: args.output,
            prefix: jobs::resolve_prefix(args.prefix.as_deref(), &args.model),
            table: args.table,
            model: args.model,
            queries: args.queries,
        }],
        cli::Command::Build(args) => {
            let project = config::ProjectConfig::load(&args.config)?;
            jobs::jobs_from_config(&project)
        }
    };

    let files = jobs::compile_jobs(&jobs)?;
    let mode = write::WriteMode::from_flags(output.dry_run, output.check);
    let report = write::commit(&files, mode)?;

    tracing::info!(
        jobs = jobs.len(),
        stale = report.stale.len(),
        written = report.written.len(),
        "done"
    );
    Ok(())
}
