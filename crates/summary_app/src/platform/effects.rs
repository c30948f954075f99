use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use summary_core::{Effect, Msg, SummaryOutcome};
use summary_engine::{EngineEvent, EngineHandle, FetchError, SummaryResponse};

use super::clipboard::Clipboard;

pub struct EffectRunner {
    engine: EngineHandle,
    clipboard: Box<dyn Clipboard>,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        clipboard: Box<dyn Clipboard>,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        let runner = Self {
            engine,
            clipboard,
            msg_tx,
        };
        runner.spawn_event_loop();
        runner
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RequestSummary { request_id, url } => {
                    engine_info!("RequestSummary request_id={} url={}", request_id, url);
                    self.engine.summarize(request_id, url);
                }
                Effect::CancelSummary { request_id } => {
                    self.engine.cancel(request_id);
                }
                Effect::CopyToClipboard { text } => {
                    let ok = match self.clipboard.set_text(&text) {
                        Ok(()) => true,
                        Err(err) => {
                            engine_warn!("Copy to clipboard failed: {}", err);
                            false
                        }
                    };
                    let _ = self.msg_tx.send(Msg::CopyFinished { ok });
                }
                Effect::CheckHealth => {
                    self.engine.check_health();
                }
            }
        }
    }

    fn spawn_event_loop(&self) {
        let engine = self.engine.clone();
        let msg_tx = self.msg_tx.clone();
        thread::spawn(move || loop {
            let Some(event) = engine.try_recv() else {
                thread::sleep(Duration::from_millis(20));
                continue;
            };
            let msg = match event {
                EngineEvent::SummaryCompleted { request_id, result } => Msg::SummaryFinished {
                    request_id,
                    outcome: summary_outcome(result),
                },
                EngineEvent::HealthChecked { online } => Msg::BackendChecked { online },
            };
            if msg_tx.send(msg).is_err() {
                break;
            }
        });
    }
}

fn summary_outcome(result: Result<SummaryResponse, FetchError>) -> SummaryOutcome {
    match result {
        Ok(response) if response.is_success() => SummaryOutcome::Succeeded {
            summary: response.summary_text(),
        },
        Ok(response) => SummaryOutcome::Rejected {
            error: response.error_text(),
        },
        Err(err) => {
            engine_warn!("Summary request failed: {}", err);
            SummaryOutcome::Unreachable
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use summary_engine::SummaryClient;

    use super::*;
    use crate::platform::clipboard::ClipboardError;

    struct EchoClient;

    #[async_trait::async_trait]
    impl SummaryClient for EchoClient {
        async fn summarize(&self, video_url: &str) -> Result<SummaryResponse, FetchError> {
            SummaryResponse::from_json(json!({"success": true, "summary": video_url}))
        }

        async fn health(&self) -> Result<bool, FetchError> {
            Ok(true)
        }
    }

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Access(arboard::Error::ClipboardNotSupported))
        }
    }

    #[derive(Default)]
    struct MemoryClipboard {
        copied: Vec<String>,
    }

    impl Clipboard for MemoryClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.copied.push(text.to_string());
            Ok(())
        }
    }

    fn runner_with(clipboard: Box<dyn Clipboard>) -> (EffectRunner, mpsc::Receiver<Msg>) {
        let (msg_tx, msg_rx) = mpsc::channel();
        let engine = EngineHandle::with_client(Arc::new(EchoClient));
        (EffectRunner::new(engine, clipboard, msg_tx), msg_rx)
    }

    #[test]
    fn request_round_trips_to_summary_message() {
        let (mut runner, msg_rx) = runner_with(Box::new(MemoryClipboard::default()));
        runner.enqueue(vec![Effect::RequestSummary {
            request_id: 4,
            url: "https://www.bilibili.com/video/BV1".to_string(),
        }]);

        let msg = msg_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(
            msg,
            Msg::SummaryFinished {
                request_id: 4,
                outcome: SummaryOutcome::Succeeded {
                    summary: "https://www.bilibili.com/video/BV1".to_string(),
                },
            }
        );
    }

    #[test]
    fn health_check_is_forwarded() {
        let (mut runner, msg_rx) = runner_with(Box::new(MemoryClipboard::default()));
        runner.enqueue(vec![Effect::CheckHealth]);

        let msg = msg_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(msg, Msg::BackendChecked { online: true });
    }

    #[test]
    fn clipboard_failure_is_reported_not_swallowed() {
        let (mut runner, msg_rx) = runner_with(Box::new(BrokenClipboard));
        runner.enqueue(vec![Effect::CopyToClipboard {
            text: "# Hi".to_string(),
        }]);

        assert_eq!(msg_rx.try_recv().unwrap(), Msg::CopyFinished { ok: false });
    }

    #[test]
    fn clipboard_success_is_reported() {
        let (mut runner, msg_rx) = runner_with(Box::new(MemoryClipboard::default()));
        runner.enqueue(vec![Effect::CopyToClipboard {
            text: "# Hi".to_string(),
        }]);

        assert_eq!(msg_rx.try_recv().unwrap(), Msg::CopyFinished { ok: true });
    }

    #[test]
    fn outcomes_follow_response_body() {
        let ok = SummaryResponse::from_json(json!({"success": 1, "summary": "# Hi"})).unwrap();
        assert_eq!(
            summary_outcome(Ok(ok)),
            SummaryOutcome::Succeeded {
                summary: "# Hi".to_string()
            }
        );

        let rejected = SummaryResponse::from_json(json!({"success": false, "error": "boom"})).unwrap();
        assert_eq!(
            summary_outcome(Ok(rejected)),
            SummaryOutcome::Rejected {
                error: Some("boom".to_string())
            }
        );

        let decode_failure = SummaryResponse::from_json(serde_json::Value::Null).unwrap_err();
        assert_eq!(
            summary_outcome(Err(decode_failure)),
            SummaryOutcome::Unreachable
        );
    }
}
