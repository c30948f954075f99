use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use summary_core::strings::{NETWORK_ERROR, SUMMARY_FAILED_FALLBACK};
use summary_core::{update, AppState, Effect, Msg, Panel, Submission, SummaryOutcome};

const VIDEO: &str = "https://www.bilibili.com/video/BV1xx411c7mD";

/// Settles a valid URL and submits it; returns the state in `Loading`.
fn loading_state() -> (AppState, u64) {
    let start = Instant::now();
    let (state, _) = update(
        AppState::new(),
        Msg::InputEdited {
            text: VIDEO.to_string(),
            at: start,
        },
    );
    let (state, _) = update(
        state,
        Msg::Tick {
            now: start + Duration::from_millis(300),
        },
    );
    let (state, effects) = update(state, Msg::SubmitPressed);
    let request_id = match effects.as_slice() {
        [Effect::RequestSummary { request_id, url }] => {
            assert_eq!(url, VIDEO);
            *request_id
        }
        other => panic!("expected a single request, got {other:?}"),
    };
    (state, request_id)
}

fn finish(state: AppState, request_id: u64, outcome: SummaryOutcome) -> AppState {
    let (state, effects) = update(
        state,
        Msg::SummaryFinished {
            request_id,
            outcome,
        },
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn submit_enters_loading_and_shows_spinner() {
    let (state, _) = loading_state();
    let view = state.view();

    assert_eq!(view.panel, Panel::Spinner);
    assert!(!view.submit_enabled);
}

#[test]
fn second_submit_while_loading_is_ignored() {
    let (state, request_id) = loading_state();
    let (state, effects) = update(state, Msg::SubmitPressed);

    assert!(effects.is_empty());
    assert_eq!(state.submission(), &Submission::Loading { request_id });
}

#[test]
fn success_ends_in_summary_panel() {
    let (state, request_id) = loading_state();
    let state = finish(
        state,
        request_id,
        SummaryOutcome::Succeeded {
            summary: "# Hi".to_string(),
        },
    );

    let view = state.view();
    assert_eq!(view.panel, Panel::Summary("# Hi".to_string()));
    assert!(!state.submission().is_loading());
    assert!(view.panel.can_copy());
    assert!(view.submit_enabled);
}

#[test]
fn backend_failure_shows_server_message() {
    let (state, request_id) = loading_state();
    let state = finish(
        state,
        request_id,
        SummaryOutcome::Rejected {
            error: Some("boom".to_string()),
        },
    );

    assert_eq!(state.view().panel, Panel::Error("boom".to_string()));
    assert!(!state.submission().is_loading());
}

#[test]
fn backend_failure_without_message_uses_fallback() {
    for error in [None, Some(String::new())] {
        let (state, request_id) = loading_state();
        let state = finish(state, request_id, SummaryOutcome::Rejected { error });
        assert_eq!(
            state.view().panel,
            Panel::Error(SUMMARY_FAILED_FALLBACK.to_string())
        );
    }
}

#[test]
fn transport_failure_shows_network_message() {
    let (state, request_id) = loading_state();
    let state = finish(state, request_id, SummaryOutcome::Unreachable);

    assert_eq!(
        state.view().panel,
        Panel::Error(NETWORK_ERROR.to_string())
    );
    assert!(!state.submission().is_loading());
}

#[test]
fn empty_summary_falls_back_to_form_panel() {
    let (state, request_id) = loading_state();
    let state = finish(
        state,
        request_id,
        SummaryOutcome::Succeeded {
            summary: String::new(),
        },
    );
    assert_eq!(state.view().panel, Panel::Form);
}

#[test]
fn resubmitting_discards_previous_outcome() {
    let (state, request_id) = loading_state();
    let state = finish(
        state,
        request_id,
        SummaryOutcome::Rejected {
            error: Some("boom".to_string()),
        },
    );

    let (state, effects) = update(state, Msg::SubmitPressed);
    assert_eq!(
        effects,
        vec![Effect::RequestSummary {
            request_id: request_id + 1,
            url: VIDEO.to_string(),
        }]
    );
    assert_eq!(state.view().panel, Panel::Spinner);
}

#[test]
fn stale_completion_is_ignored() {
    let (mut state, request_id) = loading_state();
    assert!(state.consume_dirty());

    let (mut state, _) = update(
        state,
        Msg::SummaryFinished {
            request_id: request_id + 7,
            outcome: SummaryOutcome::Unreachable,
        },
    );
    assert_eq!(state.submission(), &Submission::Loading { request_id });
    assert!(!state.consume_dirty());
}

#[test]
fn shutdown_cancels_in_flight_request_and_freezes_state() {
    let (state, request_id) = loading_state();
    let (state, effects) = update(state, Msg::Shutdown);
    assert_eq!(effects, vec![Effect::CancelSummary { request_id }]);
    assert!(state.is_torn_down());

    let frozen = state.clone();
    let (state, effects) = update(
        state,
        Msg::SummaryFinished {
            request_id,
            outcome: SummaryOutcome::Succeeded {
                summary: "late".to_string(),
            },
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state, frozen);
}

#[test]
fn shutdown_drops_pending_debounce() {
    let start = Instant::now();
    let (state, _) = update(
        AppState::new(),
        Msg::InputEdited {
            text: VIDEO.to_string(),
            at: start,
        },
    );
    let (state, effects) = update(state, Msg::Shutdown);
    assert!(effects.is_empty());

    let (state, _) = update(
        state,
        Msg::Tick {
            now: start + Duration::from_secs(5),
        },
    );
    assert_eq!(state.debounced_url(), "");
}
