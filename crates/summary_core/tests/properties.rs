//! Property-based tests for validation, debouncing and panel selection.

use std::time::{Duration, Instant};

use proptest::prelude::*;
use summary_core::{
    is_valid_video_url, update, AppState, Msg, Panel, Submission, VIDEO_URL_PREFIX,
};

fn arb_submission() -> impl Strategy<Value = Submission> {
    prop_oneof![
        Just(Submission::Idle),
        any::<u64>().prop_map(|request_id| Submission::Loading { request_id }),
        ".{0,12}".prop_map(Submission::Failed),
        ".{0,12}".prop_map(Submission::Succeeded),
    ]
}

proptest! {
    #[test]
    fn prefix_plus_any_suffix_is_valid(suffix in ".{0,64}") {
        let url = format!("{VIDEO_URL_PREFIX}{suffix}");
        prop_assert!(is_valid_video_url(&url));
    }

    #[test]
    fn strings_without_prefix_are_invalid(url in ".{0,64}") {
        prop_assume!(!url.starts_with(VIDEO_URL_PREFIX));
        prop_assert!(!is_valid_video_url(&url));
    }

    /// Edits arriving faster than the quiet window only ever settle on the last one.
    #[test]
    fn rapid_edits_settle_on_final_value(
        edits in prop::collection::vec(("[a-z]{1,8}", 0u64..300), 1..12),
    ) {
        let start = Instant::now();
        let mut state = AppState::new();
        let mut at = start;
        // Each edit differs from the one before it; repeats do not restart the window.
        let texts: Vec<String> = edits
            .iter()
            .enumerate()
            .map(|(i, (text, _))| format!("{text}{i}"))
            .collect();
        for (text, (_, gap_ms)) in texts.iter().zip(&edits) {
            at += Duration::from_millis(*gap_ms);
            // Ticks between edits fall inside the window and must not settle anything.
            let (next, _) = update(state, Msg::Tick { now: at });
            prop_assert_eq!(next.debounced_url(), "");
            prop_assert_eq!(next.validation_error(), None);
            let (next, _) = update(next, Msg::InputEdited { text: text.clone(), at });
            state = next;
        }
        let (state, _) = update(state, Msg::Tick { now: at + Duration::from_millis(300) });
        let last = &texts[texts.len() - 1];
        prop_assert_eq!(state.debounced_url(), last.as_str());
    }

    /// The panel follows loading > error > summary > nothing.
    #[test]
    fn panel_selection_is_exclusive(submission in arb_submission()) {
        let panel = Panel::select(&submission);
        match &submission {
            Submission::Loading { .. } => prop_assert_eq!(panel, Panel::Spinner),
            Submission::Failed(m) if !m.is_empty() => prop_assert_eq!(panel, Panel::Error(m.clone())),
            Submission::Succeeded(s) if !s.is_empty() => prop_assert_eq!(panel, Panel::Summary(s.clone())),
            _ => prop_assert_eq!(panel, Panel::Form),
        }
    }
}
