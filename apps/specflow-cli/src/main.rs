//! Specflow CLI - spec-driven feature workflow manager.
//!
//! Command-line interface over the specflow core service: create feature
//! specs, update phase documents with explicit approval, and inspect
//! workflow status.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use specflow_core::{Phase, SpecService, SpecflowConfig};
use tracing::error;

/// Specflow - walk feature specs through requirements, design, and tasks.
///
/// Phase advancement always requires the explicit `--approve` flag; writing
/// a document never advances a spec by itself.
#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the specs (defaults to $SPECFLOW_SPECS_DIR or ./specs)
    #[arg(long, global = true)]
    specs_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available specflow commands
#[derive(Subcommand)]
enum Commands {
    /// Create a new feature spec
    ///
    /// Derives a kebab-case identifier from the name and initializes the
    /// spec in the requirements phase with no documents written.
    Create {
        /// Human-readable feature name (e.g. "User Auth")
        name: String,

        /// Free-text description of the feature
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Update the document for the spec's current phase
    ///
    /// Writes the document content; with --approve the spec also advances
    /// exactly one phase. Without it the phase never changes.
    Update {
        /// Feature identifier
        feature_name: String,

        /// Target phase (must match the spec's current phase)
        #[arg(long)]
        phase: String,

        /// Document content as a literal string
        #[arg(long, conflicts_with = "file")]
        content: Option<String>,

        /// Read document content from a file
        #[arg(long)]
        file: Option<PathBuf>,

        /// Approve the current phase and advance to the next one
        #[arg(long)]
        approve: bool,
    },

    /// Show a spec's phase and written documents
    Status {
        /// Feature identifier
        feature_name: String,

        /// Emit the status payload as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all specs
    List,

    /// Print a phase document
    Read {
        /// Feature identifier
        feature_name: String,

        /// Document phase to read
        #[arg(long)]
        phase: String,
    },

    /// Print a starter document for a phase
    ///
    /// Renders the scaffold template for the spec's current phase (or the
    /// one named with --phase) without persisting anything.
    Scaffold {
        /// Feature identifier
        feature_name: String,

        /// Phase to scaffold (defaults to the spec's current phase)
        #[arg(long)]
        phase: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let service = build_service(cli.specs_dir)?;

    if let Err(e) = run_command(&service, cli.command) {
        error!("Command failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Initialize tracing subscriber for structured logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = if verbose {
        EnvFilter::new("specflow=debug,specflow_core=debug,specflow_templates=debug")
    } else {
        EnvFilter::new("specflow=info,specflow_core=info,specflow_templates=info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Build the spec service from the resolved specs directory
fn build_service(specs_dir: Option<PathBuf>) -> Result<SpecService> {
    let config = match specs_dir {
        Some(dir) => SpecflowConfig::with_specs_dir(dir),
        None => SpecflowConfig::from_env(),
    };

    SpecService::new(&config).context("Failed to initialize spec service")
}

fn parse_phase(phase: &str) -> Result<Phase> {
    Phase::from_str(phase).map_err(|e| anyhow::anyhow!(e))
}

/// Execute the specified command
fn run_command(service: &SpecService, command: Commands) -> Result<()> {
    match command {
        Commands::Create { name, description } => run_create(service, &name, &description),
        Commands::Update {
            feature_name,
            phase,
            content,
            file,
            approve,
        } => run_update(service, &feature_name, &phase, content, file, approve),
        Commands::Status { feature_name, json } => run_status(service, &feature_name, json),
        Commands::List => run_list(service),
        Commands::Read {
            feature_name,
            phase,
        } => run_read(service, &feature_name, &phase),
        Commands::Scaffold {
            feature_name,
            phase,
        } => run_scaffold(service, &feature_name, phase.as_deref()),
    }
}

fn run_create(service: &SpecService, name: &str, description: &str) -> Result<()> {
    let created = service
        .create_spec(name, description)
        .context("Failed to create spec")?;

    println!("✔ Created spec: {}", created.feature_name);
    println!("  Phase: {}", created.current_phase);
    println!("\nNext steps:");
    println!(
        "  specflow scaffold {}                 Print a requirements starter",
        created.feature_name
    );
    println!(
        "  specflow update {} --phase requirements --file <path>",
        created.feature_name
    );

    Ok(())
}

fn run_update(
    service: &SpecService,
    feature_name: &str,
    phase: &str,
    content: Option<String>,
    file: Option<PathBuf>,
    approve: bool,
) -> Result<()> {
    let phase = parse_phase(phase)?;

    let content = match (content, file) {
        (Some(content), None) => content,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        _ => anyhow::bail!("Provide document content with either --content or --file"),
    };

    let outcome = service
        .update_spec_document(feature_name, phase, &content, approve)
        .context("Failed to update document")?;

    println!("✔ Updated {} document: {}", phase, feature_name);
    if outcome.advanced {
        println!("✔ Phase advanced to: {}", outcome.current_phase);
    } else {
        println!("  Phase unchanged: {}", outcome.current_phase);
    }
    if outcome.requires_approval {
        println!("\nRe-run with --approve to advance to the next phase.");
    }

    Ok(())
}

fn run_status(service: &SpecService, feature_name: &str, json: bool) -> Result<()> {
    let status = service
        .get_status(feature_name)
        .context("Failed to read spec status")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("Spec: {}", status.feature_name);
    println!("Phase: {}", status.current_phase);
    let documents = if status.documents.is_empty() {
        "(none)".to_string()
    } else {
        status
            .documents
            .iter()
            .map(Phase::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("Documents: {}", documents);
    if status.requires_approval {
        println!("Approval required to advance.");
    }

    Ok(())
}

fn run_list(service: &SpecService) -> Result<()> {
    let specs = service.list_specs().context("Failed to list specs")?;

    if specs.is_empty() {
        println!("No specs found.");
        return Ok(());
    }

    for spec in &specs {
        let docs = [
            (spec.has_requirements, "R"),
            (spec.has_design, "D"),
            (spec.has_tasks, "T"),
        ]
        .iter()
        .map(|(present, label)| if *present { *label } else { "-" })
        .collect::<String>();
        println!("{:<12} [{}] {}", spec.current_phase, docs, spec.feature_name);
    }
    println!("\n{} spec(s)", specs.len());

    Ok(())
}

fn run_read(service: &SpecService, feature_name: &str, phase: &str) -> Result<()> {
    let phase = parse_phase(phase)?;
    let content = service
        .read_document(feature_name, phase)
        .context("Failed to read document")?;

    print!("{}", content);
    if !content.ends_with('\n') {
        println!();
    }

    Ok(())
}

fn run_scaffold(service: &SpecService, feature_name: &str, phase: Option<&str>) -> Result<()> {
    let phase = phase.map(parse_phase).transpose()?;
    let scaffold = service
        .document_scaffold(feature_name, phase)
        .context("Failed to render scaffold")?;

    print!("{}", scaffold);
    if !scaffold.ends_with('\n') {
        println!();
    }

    Ok(())
}
