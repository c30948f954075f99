use std::time::{Duration, Instant};

use crate::debounce::Debouncer;
use crate::strings::{INVALID_URL_HINT, NETWORK_ERROR, SUMMARY_FAILED_FALLBACK};
use crate::validate::is_valid_video_url;
use crate::view_model::{AppViewModel, Panel};
use crate::SummaryOutcome;

pub type RequestId = u64;

/// Where the current submission stands. Exactly one of these holds at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Submission {
    #[default]
    Idle,
    Loading {
        request_id: RequestId,
    },
    Failed(String),
    Succeeded(String),
}

impl Submission {
    pub fn is_loading(&self) -> bool {
        matches!(self, Submission::Loading { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendStatus {
    #[default]
    Unknown,
    Online,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    debouncer: Debouncer<String>,
    debounced: String,
    validation_error: Option<String>,
    submission: Submission,
    next_request_id: RequestId,
    backend: BackendStatus,
    notice: Option<String>,
    torn_down: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State whose URL input settles after `delay` instead of the default window.
    pub fn with_debounce(delay: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(delay),
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            input: self.input.clone(),
            validation_error: self.validation_error.clone(),
            panel: Panel::select(&self.submission),
            submit_enabled: self.submit_enabled(),
            backend: self.backend,
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn debounced_url(&self) -> &str {
        &self.debounced
    }

    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn submit_enabled(&self) -> bool {
        !self.submission.is_loading()
            && !self.debounced.is_empty()
            && self.validation_error.is_none()
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn edit_input(&mut self, text: String, at: Instant) {
        if text == self.input {
            return;
        }
        self.input = text.clone();
        self.debouncer.push(text, at);
        self.mark_dirty();
    }

    pub(crate) fn settle_input(&mut self, now: Instant) {
        let Some(settled) = self.debouncer.poll(now) else {
            return;
        };
        if settled == self.debounced {
            return;
        }
        self.debounced = settled;
        let validation_error = if self.debounced.is_empty() || is_valid_video_url(&self.debounced)
        {
            None
        } else {
            Some(INVALID_URL_HINT.to_string())
        };
        self.validation_error = validation_error;
        self.mark_dirty();
    }

    pub(crate) fn fail_submission(&mut self, message: &str) {
        self.submission = Submission::Failed(message.to_string());
        self.mark_dirty();
    }

    /// Enters `Loading` for a fresh request, discarding any previous outcome.
    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.submission = Submission::Loading { request_id };
        self.mark_dirty();
        request_id
    }

    /// Applies a completion if it belongs to the request currently loading.
    pub(crate) fn finish_request(&mut self, request_id: RequestId, outcome: SummaryOutcome) {
        match self.submission {
            Submission::Loading { request_id: current } if current == request_id => {}
            _ => return,
        }
        self.submission = match outcome {
            SummaryOutcome::Succeeded { summary } => Submission::Succeeded(summary),
            SummaryOutcome::Rejected { error } => Submission::Failed(
                error
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| SUMMARY_FAILED_FALLBACK.to_string()),
            ),
            SummaryOutcome::Unreachable => Submission::Failed(NETWORK_ERROR.to_string()),
        };
        self.mark_dirty();
    }

    pub(crate) fn set_backend(&mut self, status: BackendStatus) {
        if self.backend != status {
            self.backend = status;
            self.mark_dirty();
        }
    }

    pub(crate) fn show_notice(&mut self, text: &str) {
        self.notice = Some(text.to_string());
        self.mark_dirty();
    }

    pub(crate) fn dismiss_notice(&mut self) {
        if self.notice.take().is_some() {
            self.mark_dirty();
        }
    }

    /// Stops all future changes. Returns the request still in flight, if any.
    pub(crate) fn tear_down(&mut self) -> Option<RequestId> {
        self.debouncer.cancel();
        self.torn_down = true;
        match self.submission {
            Submission::Loading { request_id } => Some(request_id),
            _ => None,
        }
    }
}
