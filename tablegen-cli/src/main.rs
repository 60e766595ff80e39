//! tablegen CLI
//!
//! Generates model, mapper, service and controller sources for one or more
//! tables, using the settings file given with `--config`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process;
use tablegen::{
    GenerationContext, GenerationOrchestrator, GenerationReport, HandlebarsProcessor,
    NamingPolicy, PostgresColumnSource, TemplatedSchemaGenerator,
};

#[derive(Parser)]
#[command(name = "tablegen")]
#[command(about = "Generate layered Java/MyBatis sources from database tables")]
#[command(version)]
struct Cli {
    /// Settings file
    #[arg(long, default_value = "config/generator.toml")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// gen_test_demo → Demo, in module test
    Simple {
        #[arg(required = true)]
        tables: Vec<String>,
    },

    /// gen_test_demo → GenTestDemo, in module test
    Detail {
        #[arg(required = true)]
        tables: Vec<String>,
    },

    /// One table with an explicit model name
    Custom {
        table: String,
        model_name: String,
    },

    /// tb_app_page → TbAppPage, no module
    Flat {
        #[arg(required = true)]
        tables: Vec<String>,
    },
}

impl Commands {
    fn into_batch(self) -> (NamingPolicy, Vec<String>) {
        match self {
            Commands::Simple { tables } => (NamingPolicy::Simple, tables),
            Commands::Detail { tables } => (NamingPolicy::Detail, tables),
            Commands::Custom { table, model_name } => (NamingPolicy::Custom(model_name), vec![table]),
            Commands::Flat { tables } => (NamingPolicy::NoModule, tables),
        }
    }
}

fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let quiet = cli.quiet;
    match run(cli) {
        Ok((ctx, report)) => {
            if !quiet {
                print_report(&ctx.project_root, &report);
            }
        }
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<(GenerationContext, GenerationReport)> {
    log::debug!("Loading settings from {}", cli.config.display());
    let ctx = GenerationContext::load(&cli.config)?;
    let (policy, tables) = cli.command.into_batch();
    log::debug!(
        "Templates from {}, {} naming for {:?}",
        ctx.template_root.display(),
        policy,
        tables
    );

    let templates = HandlebarsProcessor::new(&ctx.template_root);
    let columns = PostgresColumnSource::new(ctx.jdbc.clone());
    let schema = TemplatedSchemaGenerator::new(columns, &templates);

    let report = GenerationOrchestrator::new(&ctx, &schema, &templates)
        .run(&policy, &tables)
        .with_context(|| format!("generation stopped ({} naming)", policy))?;

    Ok((ctx, report))
}

fn print_report(project_root: &Path, report: &GenerationReport) {
    for file in &report.files {
        let path = file.path.strip_prefix(project_root).unwrap_or(&file.path);
        if file.is_written() {
            println!("  {} {}", "written".green(), path.display());
        } else {
            println!("  {} {}", "kept".yellow(), path.display());
        }
    }
    println!(
        "{} {} table(s): {} written, {} kept",
        "done:".bold(),
        report.tables.len(),
        report.written().count(),
        report.kept().count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_custom_takes_one_table() {
        let cli = Cli::try_parse_from(["tablegen", "custom", "gen_test_demo", "IDemo"]).unwrap();
        let (policy, tables) = cli.command.into_batch();
        assert_eq!(policy, NamingPolicy::Custom("IDemo".to_string()));
        assert_eq!(tables, vec!["gen_test_demo".to_string()]);
    }

    #[test]
    fn test_batch_requires_a_table() {
        assert!(Cli::try_parse_from(["tablegen", "simple"]).is_err());
    }

    #[test]
    fn test_config_default() {
        let cli = Cli::try_parse_from(["tablegen", "flat", "tb_app_page"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("config/generator.toml"));
        assert!(!cli.verbose && !cli.quiet);
    }
}
