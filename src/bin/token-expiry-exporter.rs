use clap::Parser;
use token_expiry_exporter::config::args::Args;
use token_expiry_exporter::observability::metrics::ExporterMetrics;
use token_expiry_exporter::server;
use token_expiry_exporter::utils::{logging, shutdown};
use token_expiry_exporter::{PollLoop, TokenClient};
use anyhow::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Read settings, init logging
    // -------------------------------

    let settings = Args::parse().into_settings();
    logging::init_logging(&settings.logging);
    info!(
        api_url = %settings.api.base_url,
        access_token_set = settings.api.has_access_token(),
        poll_interval_seconds = settings.poll_interval.as_secs(),
        "Service starting..."
    );

    // -------------------------------
    // 2. Registry and token client
    // -------------------------------

    let metrics = ExporterMetrics::new()?;
    let client = TokenClient::new(&settings.api, metrics.clone())?;

    // -------------------------------
    // 3. Shutdown on ctrl-c
    // -------------------------------

    let (shutdown_tx, shutdown_rx) = shutdown::channel();
    tokio::spawn(shutdown::on_ctrl_c(shutdown_tx));

    // -------------------------------
    // 4. Metrics endpoint and poll loop
    // -------------------------------

    let http_server = server::server::start(&settings, metrics.clone(), shutdown_rx.clone());
    let poller = PollLoop::new(client, metrics, settings.poll_interval).run(shutdown_rx);

    tokio::try_join!(http_server, poller)?;
    info!("Service stopped");
    Ok(())
}
