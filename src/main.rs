// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use lesson_catalog::utils::logging::{format_success, format_warning};
use lesson_catalog::{
    Config, FileType, GradeLevel, ImportOutcome, IndexStore, ListFilter, Orchestrator, Subject,
};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "lesson_catalog")]
#[command(version = "0.1.0")]
#[command(about = "Curriculum document ingestion and catalog indexing", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a single lesson file into the library
    Import {
        file: PathBuf,

        /// Copy the file instead of moving it
        #[arg(long)]
        copy: bool,
    },

    /// Import every eligible file under a directory
    Batch {
        directory: PathBuf,

        #[arg(long)]
        copy: bool,
    },

    /// Print records matching the given filters
    List {
        #[arg(long)]
        grade: Option<GradeLevel>,

        #[arg(long)]
        subject: Option<Subject>,

        #[arg(long = "type")]
        file_type: Option<FileType>,

        #[arg(long)]
        search: Option<String>,
    },

    /// Regenerate the catalog from the current index
    Index,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    lesson_catalog::utils::logging::init_logger(cli.color, cli.verbose);

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Import { file, copy } => cmd_import(&config, &file, copy)?,
        Commands::Batch { directory, copy } => cmd_batch(&config, &directory, copy)?,
        Commands::List {
            grade,
            subject,
            file_type,
            search,
        } => cmd_list(
            &config,
            ListFilter {
                grade,
                subject,
                file_type,
                search,
            },
        ),
        Commands::Index => cmd_index(&config)?,
    }

    Ok(())
}

fn cmd_import(config: &Config, file: &PathBuf, copy: bool) -> Result<()> {
    let mut orchestrator = Orchestrator::new(config.clone())?;

    match orchestrator
        .import_file(file, copy)
        .with_context(|| format!("Failed to import {}", file.display()))?
    {
        ImportOutcome::Imported(record) => {
            println!(
                "{}",
                format_success(&format!("Imported '{}' (id {})", record.title, record.id))
            );
        }
        ImportOutcome::Duplicate { existing_title } => {
            println!(
                "{}",
                format_warning(&format!("Already exists: '{}'", existing_title))
            );
        }
    }

    Ok(())
}

fn cmd_batch(config: &Config, directory: &PathBuf, copy: bool) -> Result<()> {
    let mut orchestrator = Orchestrator::new(config.clone())?;

    let stats = orchestrator
        .import_directory(directory, copy)
        .with_context(|| format!("Batch import of {} failed", directory.display()))?;

    println!("{}", format_success(&stats.summary()));
    Ok(())
}

fn cmd_list(config: &Config, filter: ListFilter) {
    let index = IndexStore::open(config.index_path());
    let records = index.query(&filter);

    if records.is_empty() {
        println!("No matching lessons.");
        return;
    }

    println!(
        "{:>4}  {:<40} {:<9} {:<22} {:<24} {}",
        "id", "title", "type", "grades", "subjects", "added"
    );
    for record in &records {
        let grades = record
            .grade_levels
            .iter()
            .map(|g| g.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let subjects = record
            .subjects
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(",");

        println!(
            "{:>4}  {:<40} {:<9} {:<22} {:<24} {}",
            record.id,
            truncate_column(&record.title, 40),
            record.file_type,
            truncate_column(&grades, 22),
            truncate_column(&subjects, 24),
            record.date_added
        );
    }
    println!("\n{} lesson(s)", records.len());
}

fn cmd_index(config: &Config) -> Result<()> {
    let orchestrator = Orchestrator::new(config.clone())?;
    let artifact = orchestrator.refresh_catalog()?;

    info!("Catalog written to {}", artifact.display());
    println!("{}", format_success(&format!("Catalog: {}", artifact.display())));
    Ok(())
}

fn truncate_column(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
