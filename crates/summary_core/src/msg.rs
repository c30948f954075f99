use std::time::Instant;

use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Platform finished setting up the screen.
    Started,
    /// User edited the URL input box (raw text, not yet debounced).
    InputEdited { text: String, at: Instant },
    /// Clock tick; settles the debounced input once it has been quiet long enough.
    Tick { now: Instant },
    /// User submitted the form.
    SubmitPressed,
    /// Engine completion for a summary request.
    SummaryFinished {
        request_id: RequestId,
        outcome: SummaryOutcome,
    },
    /// User asked to copy the summary.
    CopyPressed,
    /// Platform finished the clipboard write.
    CopyFinished { ok: bool },
    /// User acknowledged the current notice.
    NoticeDismissed,
    /// Engine result of a backend health probe.
    BackendChecked { online: bool },
    /// User asked to probe the backend again.
    RecheckBackend,
    /// The view is going away; nothing may change after this.
    Shutdown,
    /// Fallback for placeholder wiring.
    NoOp,
}

/// What the backend (or the transport) made of a summary request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// Body reported success; `summary` is the markdown text (possibly empty).
    Succeeded { summary: String },
    /// Body reported failure, with the server message if it sent one.
    Rejected { error: Option<String> },
    /// The request never produced a usable JSON body.
    Unreachable,
}
