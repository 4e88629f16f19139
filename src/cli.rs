use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::artifact_loader::{load_artifacts, ArtifactStatus, LoadReport};
use crate::config::AdvisorConfig;
use crate::crop_catalog;
use crate::feature_vector::SoilReadings;
use crate::prediction_service::PredictionService;
use crate::result_exporter::{render_display, render_export, write_export};

/// Top-level CLI interface for the crop advisor
#[derive(Parser, Debug)]
#[command(
    name = "crop_advisor",
    version,
    about = "Crop recommendation from soil and weather readings"
)]
pub struct Cli {
    /// Path to a TOML config file (default: crop_advisor.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict the recommended crop for one set of readings
    Predict {
        #[command(flatten)]
        readings: ReadingArgs,
        /// Directory to write crop_prediction.txt into
        #[arg(long)]
        export: Option<PathBuf>,
        /// Print the result as JSON instead of the text block
        #[arg(long)]
        json: bool,
    },

    /// Serve the HTTP API (predict, export, status, health)
    Serve {
        /// Host/IP to bind, overrides config
        #[arg(long)]
        host: Option<String>,
        /// Port to bind, overrides config
        #[arg(long)]
        port: Option<u16>,
    },

    /// Show which artifacts were loaded
    Status,

    /// List the crop catalog
    Catalog,

    /// Print the effective configuration as TOML
    Config,
}

/// The seven readings; omitted values default to 0.0
#[derive(Args, Debug, Clone, Copy)]
pub struct ReadingArgs {
    /// Nitrogen
    #[arg(short = 'n', long = "n", default_value_t = 0.0, allow_negative_numbers = true)]
    pub n: f64,
    /// Phosphorus
    #[arg(short = 'p', long = "p", default_value_t = 0.0, allow_negative_numbers = true)]
    pub p: f64,
    /// Potassium
    #[arg(short = 'k', long = "k", default_value_t = 0.0, allow_negative_numbers = true)]
    pub k: f64,
    /// Temperature (°C)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub temperature: f64,
    /// Humidity (%)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub humidity: f64,
    /// pH value
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub ph: f64,
    /// Rainfall (mm)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub rainfall: f64,
}

impl From<ReadingArgs> for SoilReadings {
    fn from(args: ReadingArgs) -> Self {
        SoilReadings::new(
            args.n,
            args.p,
            args.k,
            args.temperature,
            args.humidity,
            args.ph,
            args.rainfall,
        )
    }
}

fn build_service(config: &AdvisorConfig) -> PredictionService {
    PredictionService::new(Arc::new(load_artifacts(&config.artifacts)))
}

pub fn dispatch(cli: Cli, config: AdvisorConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Predict {
            readings,
            export,
            json,
        } => {
            let service = build_service(&config);
            let output = predict_output(
                &service,
                &SoilReadings::from(readings),
                export.as_deref(),
                json,
            )?;
            println!("{output}");
        }

        Commands::Serve { host, port } => {
            let mut config = config;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(&config)?;
        }

        Commands::Status => {
            let service = build_service(&config);
            print_report(service.report());
        }

        Commands::Catalog => {
            for entry in crop_catalog::entries() {
                println!("{:>3}  {}", entry.id, entry.name);
            }
        }

        Commands::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

/// Run one prediction and render what the command prints. The export is
/// written first so a failed export leaves nothing on stdout.
fn predict_output(
    service: &PredictionService,
    readings: &SoilReadings,
    export: Option<&Path>,
    json: bool,
) -> anyhow::Result<String> {
    let result = match service.predict(readings) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("❌ Error during prediction: {e}");
            return Err(e.into());
        }
    };

    let saved = match export {
        Some(dir) => Some(
            write_export(&render_export(&result), dir)
                .context("Prediction succeeded but the export could not be written")?,
        ),
        None => None,
    };

    let mut output = if json {
        serde_json::to_string_pretty(&result)?
    } else {
        render_display(&result)
    };
    if let Some(path) = saved {
        output.push_str(&format!("\n📥 Result saved to {}", path.display()));
    }
    Ok(output)
}

fn print_report(report: &LoadReport) {
    for (name, artifact) in [("Model", &report.classifier), ("Scaler", &report.scaler)] {
        match &artifact.status {
            ArtifactStatus::Loaded {
                description,
                sha256,
            } => println!(
                "✅ {name} loaded: {} ({description}, sha256 {sha256})",
                artifact.path.display()
            ),
            ArtifactStatus::Missing => {
                println!("⚠️ {name} not found: {}", artifact.path.display())
            }
            ArtifactStatus::Rejected { reason } => println!("❌ {name} rejected: {reason}"),
        }
    }
    if report.ready() {
        println!("Predictions enabled.");
    } else {
        println!("Predictions disabled: no classifier loaded.");
    }
}

fn serve(config: &AdvisorConfig) -> anyhow::Result<()> {
    let service = build_service(config);
    if !service.is_ready() {
        tracing::warn!("Serving without a classifier; /api/predict will answer 503");
    }
    let app = crate::web::build_router(service);
    let addr = config.bind_address();

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(addr.as_str())
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        info!("HTTP server listening on http://{addr}");
        axum::serve(listener, app)
            .await
            .context("Server error")
    })
}
