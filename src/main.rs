use std::path::PathBuf;

use anyhow::{Context, Result};
use dispatch_optimiser::{
    config::Config,
    domain::{InputRecord, TimeSeriesInput},
    service::DispatchService,
    telemetry::init_tracing,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cfg = Config::load()?;

    let input_path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| cfg.run.input_path.clone())
        .context("no input file given: pass a path or set DISPATCH__RUN__INPUT_PATH")?;

    let raw = tokio::fs::read_to_string(&input_path)
        .await
        .with_context(|| format!("reading {}", input_path.display()))?;
    let records: Vec<InputRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing input records from {}", input_path.display()))?;

    info!(path = %input_path.display(), records = records.len(), "loaded optimiser inputs");

    let service = DispatchService::new(&cfg);
    let response = match service.run(TimeSeriesInput::new(records), cfg.battery).await {
        Ok(response) => response,
        Err(e) => {
            error!(kind = e.error_type(), client_error = e.is_client_error(), error = %e, "optimisation failed");
            return Err(e.into());
        }
    };

    let body = serde_json::to_string_pretty(&response)?;
    match &cfg.run.output_path {
        Some(path) => {
            tokio::fs::write(path, body)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), periods = response.schedule.len(), "wrote dispatch plan");
        }
        None => println!("{body}"),
    }

    Ok(())
}
