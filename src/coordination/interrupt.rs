//! Whole-run interrupt: Ctrl+C (and SIGTERM on unix) cancels the run token.

use log::{error, info, warn};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Cancel `token` when the process receives a termination signal.
///
/// Handlers are installed before this returns, so a signal arriving before
/// the watcher task is first polled still cancels the run. Must be called
/// from within a tokio runtime.
pub fn watch_for_interrupt(token: CancellationToken) -> JoinHandle<()> {
    let signals = Signals::register();
    tokio::spawn(async move {
        tokio::select! {
            _ = signals.recv() => {
                warn!("Run interrupted by operator");
                token.cancel();
            }
            _ = token.cancelled() => {}
        }
    })
}

#[cfg(unix)]
enum Signals {
    Registered {
        sigterm: tokio::signal::unix::Signal,
        sigint: tokio::signal::unix::Signal,
    },
    CtrlC,
}

#[cfg(unix)]
impl Signals {
    fn register() -> Self {
        use tokio::signal::unix::{SignalKind, signal};

        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(sigterm), Ok(sigint)) => Signals::Registered { sigterm, sigint },
            (Err(e), _) | (_, Err(e)) => {
                warn!("Could not register signal handlers ({}), using ctrl_c fallback", e);
                Signals::CtrlC
            }
        }
    }

    async fn recv(self) {
        match self {
            Signals::Registered {
                mut sigterm,
                mut sigint,
            } => {
                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM signal"),
                    _ = sigint.recv() => info!("Received SIGINT signal (Ctrl+C)"),
                }
            }
            Signals::CtrlC => ctrl_c().await,
        }
    }
}

#[cfg(not(unix))]
struct Signals;

#[cfg(not(unix))]
impl Signals {
    fn register() -> Self {
        Signals
    }

    async fn recv(self) {
        ctrl_c().await
    }
}

async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C signal"),
        Err(e) => {
            error!("Failed to listen for Ctrl+C signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
