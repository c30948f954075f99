use crate::strings::{COPY_FAILED_NOTICE, COPY_OK_NOTICE, EMPTY_URL_ERROR, INVALID_URL_ERROR};
use crate::validate::is_valid_video_url;
use crate::{AppState, BackendStatus, Effect, Msg, Panel};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if state.is_torn_down() {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Started | Msg::RecheckBackend => {
            state.set_backend(BackendStatus::Unknown);
            vec![Effect::CheckHealth]
        }
        Msg::InputEdited { text, at } => {
            state.edit_input(text, at);
            Vec::new()
        }
        Msg::Tick { now } => {
            state.settle_input(now);
            Vec::new()
        }
        Msg::SubmitPressed => submit(&mut state),
        Msg::SummaryFinished {
            request_id,
            outcome,
        } => {
            state.finish_request(request_id, outcome);
            Vec::new()
        }
        Msg::CopyPressed => match Panel::select(state.submission()) {
            Panel::Summary(text) => vec![Effect::CopyToClipboard { text }],
            _ => Vec::new(),
        },
        Msg::CopyFinished { ok } => {
            state.show_notice(if ok { COPY_OK_NOTICE } else { COPY_FAILED_NOTICE });
            Vec::new()
        }
        Msg::NoticeDismissed => {
            state.dismiss_notice();
            Vec::new()
        }
        Msg::BackendChecked { online } => {
            state.set_backend(if online {
                BackendStatus::Online
            } else {
                BackendStatus::Offline
            });
            Vec::new()
        }
        Msg::Shutdown => state
            .tear_down()
            .map(|request_id| Effect::CancelSummary { request_id })
            .into_iter()
            .collect(),
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    // One request at a time; the submit control is disabled meanwhile.
    if state.submission().is_loading() {
        return Vec::new();
    }
    let url = state.debounced_url().to_string();
    if url.is_empty() {
        state.fail_submission(EMPTY_URL_ERROR);
        return Vec::new();
    }
    if !is_valid_video_url(&url) {
        state.fail_submission(INVALID_URL_ERROR);
        return Vec::new();
    }
    let request_id = state.begin_request();
    vec![Effect::RequestSummary { request_id, url }]
}
