use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pgmodel")]
#[command(version, about = "Generate tokio-postgres data-access code from annotated structs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate one data-access module from a model and its query structs
    Model(ModelArgs),

    /// Generate every module listed in a config file
    Build(BuildArgs),
}

impl Command {
    pub fn output(&self) -> &OutputArgs {
        match self {
            Self::Model(args) => &args.output_opts,
            Self::Build(args) => &args.output_opts,
        }
    }
}

#[derive(Args, Debug)]
pub struct ModelArgs {
    /// Rust source file declaring the structs
    #[arg(long, env = "PGMODEL_SOURCE")]
    pub source: PathBuf,

    /// Module path the generated file imports the structs from (e.g. `super`, `crate::models`)
    #[arg(long, env = "PGMODEL_MODULE")]
    pub module: String,

    /// Generated file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Function name prefix (defaults to the model name in snake_case)
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Table name
    #[arg(short, long)]
    pub table: String,

    /// Model struct
    #[arg(short, long)]
    pub model: String,

    /// Query struct (repeatable)
    #[arg(short, long = "query")]
    pub queries: Vec<String>,

    #[command(flatten)]
    pub output_opts: OutputArgs,
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Config file
    #[arg(short, long, default_value = "pgmodel.toml")]
    pub config: PathBuf,

    #[command(flatten)]
    pub output_opts: OutputArgs,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct OutputArgs {
    /// Log every detected field
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the files that would change without writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Fail if any generated file is out of date
    #[arg(long, conflicts_with = "dry_run")]
    pub check: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_model_command() {
        let cli = Cli::try_parse_from([
            "pgmodel", "model", "--source", "src/models.rs", "--module", "super", "-o",
            "src/user_model.rs", "--table", "users", "--model", "User", "-q", "UserInfo", "-q",
            "UserName", "--verbose",
        ])
        .unwrap();

        let Command::Model(args) = cli.command else {
            panic!("expected model command");
        };
        assert_eq!(args.source, PathBuf::from("src/models.rs"));
        assert_eq!(args.queries, vec!["UserInfo", "UserName"]);
        assert_eq!(args.prefix, None);
        assert!(args.output_opts.verbose);
        assert!(!args.output_opts.check);
    }

    #[test]
    fn build_defaults_config_path() {
        let cli = Cli::try_parse_from(["pgmodel", "build", "--check"]).unwrap();
        let Command::Build(args) = cli.command else {
            panic!("expected build command");
        };
        assert_eq!(args.config, PathBuf::from("pgmodel.toml"));
        assert!(args.output_opts.check);
    }

    #[test]
    fn check_and_dry_run_conflict() {
        assert!(Cli::try_parse_from(["pgmodel", "build", "--check", "--dry-run"]).is_err());
    }
}
