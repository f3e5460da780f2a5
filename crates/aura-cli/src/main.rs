use anyhow::Result;
use aura_client::{ClientConfig, GeminiClient};
use aura_core::intake::{load_image, Angle, DEFAULT_MAX_IMAGE_BYTES};
use aura_core::session::{run_analysis, Session, ANALYSIS_FAILED_MESSAGE};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

mod render;

#[derive(Parser)]
#[command(name = "aura", about = "Aura facial aesthetics analysis CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze three face photographs and print the report
    Analyze {
        /// Frontal (正脸) photograph
        #[arg(long)]
        frontal: Option<PathBuf>,
        /// 45° oblique (斜位) photograph
        #[arg(long)]
        oblique: Option<PathBuf>,
        /// Profile (侧脸) photograph
        #[arg(long)]
        side: Option<PathBuf>,
        /// Print the raw report as JSON instead of the rendered view
        #[arg(long)]
        json: bool,
    },
    /// Check whether a file passes the image intake guard
    Inspect {
        /// Photograph to inspect
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            frontal,
            oblique,
            side,
            json,
        } => analyze(frontal, oblique, side, json).await,
        Commands::Inspect { path } => inspect(&path),
    }
}

async fn analyze(
    frontal: Option<PathBuf>,
    oblique: Option<PathBuf>,
    side: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let max_bytes = max_image_bytes();
    let mut session = Session::new();

    let uploads = [
        (Angle::Frontal, frontal),
        (Angle::Oblique, oblique),
        (Angle::Side, side),
    ];
    for (angle, path) in uploads {
        // A missing flag is simply no upload; the submit gate reports it.
        if let Some(path) = path {
            session.upload_image(angle, load_image(&path, max_bytes));
        }
    }

    let client = GeminiClient::new(ClientConfig::from_env())?;
    run_analysis(&mut session, &client).await;

    let state = session.state();
    match &state.report {
        Some(report) => {
            if json {
                println!("{}", serde_json::to_string_pretty(report)?);
            } else {
                print!("{}", render::render_report(report));
            }
            Ok(())
        }
        None => {
            let advisory = state
                .error
                .clone()
                .unwrap_or_else(|| ANALYSIS_FAILED_MESSAGE.to_string());
            anyhow::bail!(advisory)
        }
    }
}

fn inspect(path: &Path) -> Result<()> {
    match load_image(path, max_image_bytes()) {
        Ok(image) => {
            println!(
                "{}: {} ({} base64 bytes)",
                path.display(),
                image.mime_type,
                image.data.len()
            );
            Ok(())
        }
        Err(err) => anyhow::bail!("{}: {err}", path.display()),
    }
}

fn max_image_bytes() -> usize {
    std::env::var("AURA_MAX_IMAGE_BYTES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_IMAGE_BYTES)
}
