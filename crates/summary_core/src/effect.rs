use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the URL to the summary endpoint.
    RequestSummary { request_id: RequestId, url: String },
    /// Abort an in-flight summary request.
    CancelSummary { request_id: RequestId },
    /// Put the raw summary markdown on the system clipboard.
    CopyToClipboard { text: String },
    /// Probe the backend health endpoint.
    CheckHealth,
}
