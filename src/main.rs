// irix-assembler/src/main.rs

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use irix_assembler::config::Config;
use irix_assembler::models::UploadRequest;
use irix_assembler::validate::SchemaGate;
use irix_assembler::ReportPipeline;

fn main() -> Result<()> {
    // Print to stderr BEFORE logging initialization to catch early failures
    eprintln!("Starting irix-assembler...");

    let config = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("FATAL: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.service.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!(
        service = %config.service.name,
        version = env!("CARGO_PKG_VERSION"),
        "Starting IRIX assembler"
    );

    let mut args = std::env::args().skip(1);
    let request_path = match args.next() {
        Some(p) => PathBuf::from(p),
        None => {
            error!("Usage: irix-assembler <request.json> [output.xml]");
            std::process::exit(2);
        }
    };
    let output_path = args.next().map(PathBuf::from);

    let raw = std::fs::read_to_string(&request_path)
        .with_context(|| format!("Failed to read request file {}", request_path.display()))?;
    let request: UploadRequest =
        serde_json::from_str(&raw).context("Failed to parse upload request")?;

    let schema_paths: Vec<PathBuf> = config.schemas.paths.iter().map(PathBuf::from).collect();
    let gate = SchemaGate::from_files(&schema_paths).context("Failed to load schemas")?;

    let pipeline = ReportPipeline::new(gate);
    let assembled = match pipeline.process(&request, None) {
        Ok(assembled) => assembled,
        Err(e) => {
            error!(error = %e, error_type = e.error_type(), "Assembly failed");
            std::process::exit(1);
        }
    };

    let output_path = output_path.unwrap_or_else(|| {
        PathBuf::from(&config.output.dir)
            .join(format!("{}.xml", assembled.report.identification.report_uuid))
    });
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }
    std::fs::write(&output_path, assembled.xml.as_bytes())
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    info!(
        output = %output_path.display(),
        report_uuid = %assembled.report.identification.report_uuid,
        binding_failures = assembled.binding.failures.len(),
        "Report written"
    );

    Ok(())
}
