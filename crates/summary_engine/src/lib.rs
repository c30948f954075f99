//! Summary engine: backend client, background request execution and markdown layout.
mod client;
mod engine;
mod markdown;
mod types;

pub use client::{
    ClientSettings, ReqwestSummaryClient, SummaryClient, HEALTH_PATH, SUMMARY_PATH,
};
pub use engine::EngineHandle;
pub use markdown::{layout_markdown, BlockKind, InlineStyle, StyledLine, StyledSpan};
pub use types::{
    is_truthy, EngineEvent, FailureKind, FetchError, RequestId, SummaryRequest, SummaryResponse,
};
