//! User-facing messages produced by the state machine.

/// Submit pressed while the debounced input is empty.
pub const EMPTY_URL_ERROR: &str = "please enter a video URL";
/// Submit pressed with a URL that fails the prefix check.
pub const INVALID_URL_ERROR: &str = "invalid URL format";
/// Inline hint shown under the input once the debounced URL fails the prefix check.
pub const INVALID_URL_HINT: &str =
    "please enter a valid Bilibili video URL (https://www.bilibili.com/video/...)";
/// Backend reported failure without a message of its own.
pub const SUMMARY_FAILED_FALLBACK: &str = "summary generation failed";
/// Transport or decode failure.
pub const NETWORK_ERROR: &str = "network request failed, check whether the server is running";
pub const COPY_OK_NOTICE: &str = "summary copied to clipboard";
pub const COPY_FAILED_NOTICE: &str = "could not access the clipboard";
