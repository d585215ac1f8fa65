//! Formsmith CLI
//!
//! Command-line front end for building and managing form schemas.
//!
//! # Usage
//!
//! ```bash
//! formsmith forms list
//! formsmith forms export 3 --out ./schemas
//! formsmith forms import ./schemas/Contact_Us.json
//! formsmith draft new signup.json --title "Event signup"
//! formsmith draft add-field signup.json --type select --label "Meal"
//! formsmith draft add-option signup.json 0 --label Veggie --value veg
//! formsmith draft save signup.json
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use formsmith_core::FieldKind;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "formsmith")]
#[command(version)]
#[command(about = "Formsmith Command Line Interface", long_about = None)]
struct Cli {
    /// API endpoint URL
    #[arg(long, env = "FORMSMITH_API_URL")]
    api_url: Option<String>,

    /// Output format
    #[arg(long, short)]
    format: Option<output::OutputFormat>,

    /// Apply every validation rule before saving
    #[arg(long)]
    strict: bool,

    /// Profile name from config file
    #[arg(long, short)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage stored forms
    Forms {
        #[command(subcommand)]
        action: FormCommands,
    },
    /// Edit a local form document
    Draft {
        #[command(subcommand)]
        action: DraftCommands,
    },
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum FormCommands {
    /// List all forms, newest first
    List,
    /// Show one stored form
    Get { id: i64 },
    /// Delete a stored form
    Delete { id: i64 },
    /// Download a stored form as a JSON document
    Export {
        id: i64,
        /// Directory to write into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Upload a JSON document (updates when it carries an id)
    Import { file: PathBuf },
    /// Render a stored form as HTML
    Preview { id: i64 },
}

#[derive(Subcommand)]
enum DraftCommands {
    /// Start a new document
    New {
        file: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        submit_label: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Change title, description or submit label
    Meta {
        file: PathBuf,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        submit_label: Option<String>,
    },
    /// Append a field (text unless --type is given)
    AddField {
        file: PathBuf,
        #[command(flatten)]
        edit: FieldEdit,
    },
    /// Change attributes of a field
    SetField {
        file: PathBuf,
        index: usize,
        #[command(flatten)]
        edit: FieldEdit,
    },
    /// Remove a field
    RemoveField { file: PathBuf, index: usize },
    /// Append an option to a select/radio field
    AddOption {
        file: PathBuf,
        field: usize,
        #[arg(long)]
        label: String,
        #[arg(long)]
        value: String,
    },
    /// Change one option of a field
    SetOption {
        file: PathBuf,
        field: usize,
        option: usize,
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        value: Option<String>,
    },
    /// Remove one option of a field
    RemoveOption { file: PathBuf, field: usize, option: usize },
    /// Report validation issues
    Validate { file: PathBuf },
    /// Save the document to the server and record its id
    Save { file: PathBuf },
    /// Render the document as HTML
    Preview { file: PathBuf },
}

/// Field attributes settable from the command line
#[derive(clap::Args, Debug, Default)]
pub struct FieldEdit {
    #[arg(long = "type", value_parser = parse_kind)]
    pub kind: Option<FieldKind>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub label: Option<String>,
    #[arg(long)]
    pub required: Option<bool>,
    #[arg(long)]
    pub placeholder: Option<String>,
    #[arg(long)]
    pub pattern: Option<String>,
    #[arg(long)]
    pub default_value: Option<bool>,
}

fn parse_kind(s: &str) -> Result<FieldKind, String> {
    s.parse::<FieldKind>().map_err(|e| e.to_string())
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
    /// Initialize configuration
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = config::Config::load(cli.profile.as_deref()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config not loaded, using defaults");
        config::Config::default()
    });
    let ctx = commands::Context::new(&config, cli.api_url.as_deref(), cli.format, cli.strict);
    tracing::debug!(api_url = %ctx.api_url, strict = ctx.strict, "using form service");

    let result = match cli.command {
        Commands::Forms { action } => commands::forms::handle(action, &ctx).await,
        Commands::Draft { action } => commands::draft::handle(action, &ctx).await,
        Commands::Config { action } => commands::config::handle(action, cli.profile.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
