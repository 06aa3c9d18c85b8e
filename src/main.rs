//! BPJS Antrean Client — Diagnostic Entry Point
//!
//! Loads configuration, initializes logging, builds the signed client
//! and runs one antrean call, printing the normalized JSON result.
//!
//! Wiring sequence:
//! 1. Load config.toml + env overrides + validate
//! 2. Init tracing (text or JSON, `RUST_LOG` wins over `log_level`)
//! 3. Create SignedApiClient (reqwest transport + HMAC auth)
//! 4. Dispatch the command to its service
//! 5. Print `{...}` or `{error, message, code}`; exit 1 on error

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use bpjs_antrol::adapters::api::client::SignedApiClient;
use bpjs_antrol::config::{AppConfig, LogFormat, loader};
use bpjs_antrol::domain::{ApiResult, ApiResultExt};
use bpjs_antrol::usecases::{DashboardService, QueueService, ReferenceService, WaitTimeBasis};

#[derive(Parser)]
#[command(name = "bpjs-antrol", version)]
#[command(about = "Signed calls against the BPJS antrean online API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file path
    #[arg(short, long, env = "BPJS_CONFIG", default_value = "config.toml")]
    config: PathBuf,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// List polyclinics
    Poli,

    /// Doctors for a polyclinic on a date
    Dokter {
        kodepoli: String,
        /// YYYY-MM-DD
        tanggal: String,
    },

    /// Doctor schedules for a polyclinic on a date
    Jadwal {
        kodepoli: String,
        /// YYYY-MM-DD
        tanggal: String,
    },

    /// Queues not yet served
    Aktif,

    /// Queues registered on a date
    Antrean {
        /// YYYY-MM-DD
        tanggal: String,
    },

    /// Queue by booking code
    Booking { kodebooking: String },

    /// Task timeline for a booking
    Tasks { kodebooking: String },

    /// Waiting times for a day
    DashboardTanggal {
        /// YYYY-MM-DD
        tanggal: String,
        #[arg(value_enum, default_value_t)]
        waktu: WaitTimeBasis,
    },

    /// Waiting times for a month
    DashboardBulan {
        /// MM
        bulan: String,
        /// YYYY
        tahun: String,
        #[arg(value_enum, default_value_t)]
        waktu: WaitTimeBasis,
    },

    /// Cancel a queue
    Batal {
        kodebooking: String,
        keterangan: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // ── 1. Load configuration ───────────────────────────────
    let config = loader::load_config(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    // ── 2. Initialize logging ───────────────────────────────
    init_tracing(&config);

    info!(
        env = %config.env,
        version = env!("CARGO_PKG_VERSION"),
        command = ?cli.command,
        "Starting BPJS antrean client"
    );

    // ── 3. Create signed client ─────────────────────────────
    let client = Arc::new(
        SignedApiClient::new(config.credentials(), config.client_config())
            .context("Failed to create BPJS client")?,
    );

    // ── 4. Dispatch ─────────────────────────────────────────
    let result = dispatch(&client, cli.command).await;
    let failed = result.is_err();

    // ── 5. Print ────────────────────────────────────────────
    let rendered = serde_json::to_string_pretty(&result.into_json())
        .context("Failed to render result")?;
    println!("{rendered}");

    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

async fn dispatch(client: &Arc<SignedApiClient>, command: Command) -> ApiResult {
    let reference = ReferenceService::new(Arc::clone(client));
    let dashboard = DashboardService::new(Arc::clone(client));
    let queue = QueueService::new(Arc::clone(client));

    match command {
        Command::Poli => reference.polyclinics().await,
        Command::Dokter { kodepoli, tanggal } => reference.doctors(&kodepoli, &tanggal).await,
        Command::Jadwal { kodepoli, tanggal } => {
            reference.doctor_schedule(&kodepoli, &tanggal).await
        }
        Command::Aktif => dashboard.pending_queues().await,
        Command::Antrean { tanggal } => dashboard.queues_by_date(&tanggal).await,
        Command::Booking { kodebooking } => dashboard.queue_by_booking_code(&kodebooking).await,
        Command::Tasks { kodebooking } => dashboard.list_task_times(&kodebooking).await,
        Command::DashboardTanggal { tanggal, waktu } => {
            dashboard.dashboard_by_date(&tanggal, waktu).await
        }
        Command::DashboardBulan { bulan, tahun, waktu } => {
            dashboard.dashboard_by_month(&bulan, &tahun, waktu).await
        }
        Command::Batal { kodebooking, keterangan } => {
            queue.cancel_queue(&kodebooking, &keterangan).await
        }
    }
}
