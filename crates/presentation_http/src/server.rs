//! Server lifecycle
//!
//! Serves the router until a shutdown signal arrives, then drains open
//! connections for at most the configured timeout.

use std::{future::IntoFuture, io, sync::Arc, time::Duration};

use axum::Router;
use tokio::{net::TcpListener, sync::Notify};
use tracing::{info, warn};

/// Serve `app` until `signal` completes
///
/// After the signal, in-flight requests get `drain_timeout` to finish;
/// whatever is still open after that is dropped.
pub async fn serve_until<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    drain_timeout: Duration,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let shutdown_started = Arc::new(Notify::new());
    let signal = {
        let shutdown_started = Arc::clone(&shutdown_started);
        async move {
            signal.await;
            shutdown_started.notify_one();
        }
    };

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => result,
        () = shutdown_started.notified() => {
            info!("Waiting up to {:?} for connections to close...", drain_timeout);
            match tokio::time::timeout(drain_timeout, &mut server).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(?drain_timeout, "Connections still open after shutdown timeout");
                    Ok(())
                },
            }
        }
    }
}
