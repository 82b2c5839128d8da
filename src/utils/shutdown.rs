use tokio::sync::watch::{self, Receiver, Sender};
use tracing::{error, info};

/// Shutdown signal shared by the poll loop and the HTTP server.
/// `true` means stop.
pub fn channel() -> (Sender<bool>, Receiver<bool>) {
    watch::channel(false)
}

/// Resolves once shutdown was requested or every sender is gone.
pub async fn wait(mut shutdown: Receiver<bool>) {
    while !*shutdown.borrow_and_update() {
        if shutdown.changed().await.is_err() {
            return;
        }
    }
}

/// Flip the shutdown signal on ctrl-c.
pub async fn on_ctrl_c(tx: Sender<bool>) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            info!("shutdown signal received");
            let _ = tx.send(true);
        }
        Err(err) => {
            // dropping the sender would stop the service
            let _tx = tx;
            error!("unable to listen for shutdown signal: {}", err);
            std::future::pending::<()>().await;
        }
    }
}
