use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_error, engine_info, engine_warn};
use tokio_util::sync::CancellationToken;

use crate::client::{ClientSettings, ReqwestSummaryClient, SummaryClient};
use crate::{EngineEvent, FailureKind, FetchError, RequestId};

enum EngineCommand {
    Summarize { request_id: RequestId, url: String },
    Cancel { request_id: RequestId },
    CheckHealth,
}

/// Handle to the background engine thread.
///
/// Every `summarize` produces exactly one `EngineEvent::SummaryCompleted`,
/// whether the request succeeds, fails or is cancelled.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, FetchError> {
        let client = ReqwestSummaryClient::new(settings)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    pub fn with_client(client: Arc<dyn SummaryClient>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    engine_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            let mut in_flight: HashMap<RequestId, CancellationToken> = HashMap::new();
            while let Ok(command) = cmd_rx.recv() {
                // Finished requests cancel their own token, so this prunes them.
                in_flight.retain(|_, token| !token.is_cancelled());
                handle_command(
                    &runtime,
                    client.clone(),
                    command,
                    &mut in_flight,
                    event_tx.clone(),
                );
            }
            engine_info!("Engine command channel closed; shutting down");
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn summarize(&self, request_id: RequestId, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Summarize {
            request_id,
            url: url.into(),
        });
    }

    pub fn cancel(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { request_id });
    }

    pub fn check_health(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CheckHealth);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    client: Arc<dyn SummaryClient>,
    command: EngineCommand,
    in_flight: &mut HashMap<RequestId, CancellationToken>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Summarize { request_id, url } => {
            let token = CancellationToken::new();
            in_flight.insert(request_id, token.clone());
            runtime.spawn(async move {
                engine_info!("Summary request {} started url={}", request_id, url);
                let result = tokio::select! {
                    _ = token.cancelled() => {
                        Err(FetchError::new(FailureKind::Cancelled, "request cancelled"))
                    }
                    result = client.summarize(&url) => result,
                };
                token.cancel();
                if let Err(err) = &result {
                    engine_warn!("Summary request {} failed: {}", request_id, err);
                }
                let _ = event_tx.send(EngineEvent::SummaryCompleted { request_id, result });
            });
        }
        EngineCommand::Cancel { request_id } => {
            if let Some(token) = in_flight.remove(&request_id) {
                engine_info!("Cancelling summary request {}", request_id);
                token.cancel();
            }
        }
        EngineCommand::CheckHealth => {
            runtime.spawn(async move {
                let online = match client.health().await {
                    Ok(online) => online,
                    Err(err) => {
                        engine_warn!("Backend health probe failed: {}", err);
                        false
                    }
                };
                let _ = event_tx.send(EngineEvent::HealthChecked { online });
            });
        }
    }
}
