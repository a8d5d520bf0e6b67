mod display;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use caseboard_core::{CaseStatus, CaseUpdate, NewCase};
use caseboard_report::ReportingService;
use caseboard_store::SnapshotStore;
use caseboard_sync::{CaseClient, DocumentClient};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportKind {
    /// Mean compliance score per quarter
    Trend,
    /// Case count per risk category
    Risk,
    /// Mean resolution days per month
    Resolution,
}

/// Case management dashboard and reporting.
#[derive(Parser)]
#[command(name = "caseboard", version, about = "Case management dashboard and reporting")]
struct Cli {
    /// Base URL of the case API
    #[arg(
        long,
        global = true,
        env = "CASEBOARD_API_URL",
        default_value = "http://localhost:8787"
    )]
    api_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "CASEBOARD_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show headline metrics and every chart series
    Dashboard {
        /// Report from a snapshot file instead of the live API
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },

    /// Show a single chart series
    Report {
        #[arg(value_enum)]
        kind: ReportKind,
        /// Report from a snapshot file instead of the live API
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },

    /// Manage cases
    Cases {
        #[command(subcommand)]
        command: CaseCommands,
    },
}

#[derive(Subcommand)]
enum CaseCommands {
    /// List all cases
    List,

    /// Show a single case
    Show { id: String },

    /// Create a case
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "OPEN")]
        status: CaseStatus,
        #[arg(long, default_value = "unassigned")]
        assigned_to: String,
    },

    /// Update fields of an existing case
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<CaseStatus>,
        #[arg(long)]
        assigned_to: Option<String>,
    },

    /// Delete a case
    Delete { id: String },

    /// Capture the current cases and documents into a snapshot file
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("caseboard v{}", env!("CARGO_PKG_VERSION"));
    let timeout = Duration::from_secs(cli.timeout_secs);

    match cli.command {
        Commands::Dashboard { snapshot } => {
            let service = reporting_service(&cli.api_url, timeout, snapshot.as_deref())?;
            let report = service.dashboard_report().await;
            match cli.output {
                OutputFormat::Json => print_json(&report)?,
                OutputFormat::Text => display::print_report(&report),
            }
        }
        Commands::Report { kind, snapshot } => {
            let service = reporting_service(&cli.api_url, timeout, snapshot.as_deref())?;
            let (header, field, points) = match kind {
                ReportKind::Trend => (
                    "Compliance Trend (by quarter)",
                    "score",
                    service.compliance_trend_data().await,
                ),
                ReportKind::Risk => (
                    "Risk Distribution",
                    "value",
                    service.risk_distribution_data().await,
                ),
                ReportKind::Resolution => (
                    "Case Resolution Time (days, by month closed)",
                    "days",
                    service.case_resolution_data().await,
                ),
            };
            match cli.output {
                OutputFormat::Json => print_json(&points)?,
                OutputFormat::Text => display::print_series(header, &points, field),
            }
        }
        Commands::Cases { command } => {
            let client = CaseClient::with_timeout(&cli.api_url, timeout)
                .context("building case API client")?;
            run_case_command(&client, &cli.api_url, timeout, command, cli.output).await?;
        }
    }

    Ok(())
}

/// Build the reporting service over a snapshot file or the live API.
fn reporting_service(
    api_url: &str,
    timeout: Duration,
    snapshot: Option<&Path>,
) -> anyhow::Result<ReportingService> {
    if let Some(path) = snapshot {
        let store = Arc::new(
            SnapshotStore::open(path)
                .with_context(|| format!("loading snapshot {}", path.display()))?,
        );
        return Ok(ReportingService::new(store.clone(), store));
    }

    let cases = CaseClient::with_timeout(api_url, timeout).context("building case API client")?;
    let documents =
        DocumentClient::with_timeout(api_url, timeout).context("building document API client")?;
    Ok(ReportingService::new(Arc::new(cases), Arc::new(documents)))
}

async fn run_case_command(
    client: &CaseClient,
    api_url: &str,
    timeout: Duration,
    command: CaseCommands,
    output: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        CaseCommands::List => {
            let cases = client.list_cases().await.context("failed to fetch cases")?;
            match output {
                OutputFormat::Json => print_json(&cases)?,
                OutputFormat::Text => display::print_case_table(&cases),
            }
        }
        CaseCommands::Show { id } => {
            let case = client
                .get_case(&id)
                .await
                .with_context(|| format!("failed to fetch case {id}"))?;
            match output {
                OutputFormat::Json => print_json(&case)?,
                OutputFormat::Text => display::print_case_card(&case),
            }
        }
        CaseCommands::Create {
            title,
            description,
            status,
            assigned_to,
        } => {
            let new_case = NewCase {
                title,
                description,
                status,
                assigned_to,
                ..Default::default()
            };
            let case = client
                .create_case(&new_case)
                .await
                .context("failed to create case")?;
            match output {
                OutputFormat::Json => print_json(&case)?,
                OutputFormat::Text => println!("Case created successfully: {}", case.id),
            }
        }
        CaseCommands::Update {
            id,
            title,
            description,
            status,
            assigned_to,
        } => {
            let update = CaseUpdate {
                title,
                description,
                status,
                assigned_to,
                ..Default::default()
            };
            if update.is_empty() {
                anyhow::bail!("nothing to update: pass at least one field");
            }
            let case = client
                .update_case(&id, &update)
                .await
                .with_context(|| format!("failed to update case {id}"))?;
            match output {
                OutputFormat::Json => print_json(&case)?,
                OutputFormat::Text => println!("Case updated successfully: {}", case.id),
            }
        }
        CaseCommands::Delete { id } => {
            client
                .delete_case(&id)
                .await
                .with_context(|| format!("failed to delete case {id}"))?;
            if output == OutputFormat::Text {
                println!("Case deleted successfully: {id}");
            }
        }
        CaseCommands::Export { path } => {
            let documents_client = DocumentClient::with_timeout(api_url, timeout)
                .context("building document API client")?;
            let (cases, documents) =
                tokio::join!(client.list_cases(), documents_client.list_documents());
            let cases = cases.context("failed to fetch cases")?;
            let documents = documents.unwrap_or_else(|e| {
                warn!(error = %e, "documents unavailable, exporting cases only");
                Vec::new()
            });
            let store = SnapshotStore::new(cases, documents);
            store
                .save(&path)
                .with_context(|| format!("writing snapshot {}", path.display()))?;
            info!(
                cases = store.cases().len(),
                documents = store.documents().len(),
                "snapshot exported"
            );
            if output == OutputFormat::Text {
                println!(
                    "Exported {} case(s) and {} document(s) to {}",
                    store.cases().len(),
                    store.documents().len(),
                    path.display()
                );
            }
        }
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
