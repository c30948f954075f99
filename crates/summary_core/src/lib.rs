//! Summary core: pure state machine and view-model helpers.
mod debounce;
mod effect;
mod msg;
mod state;
pub mod strings;
mod update;
mod validate;
mod view_model;

pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use effect::Effect;
pub use msg::{Msg, SummaryOutcome};
pub use state::{AppState, BackendStatus, RequestId, Submission};
pub use update::update;
pub use validate::{is_valid_video_url, VIDEO_URL_PREFIX};
pub use view_model::{AppViewModel, Panel};
