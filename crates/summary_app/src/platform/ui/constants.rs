pub const APP_TITLE: &str = " Bilibili Video Summary ";
pub const INPUT_TITLE: &str = " Video URL ";
pub const INPUT_PLACEHOLDER: &str = "https://www.bilibili.com/video/BV...";
pub const SUBMIT_LABEL: &str = "[ Summarize ]";
pub const LOADING_TEXT: &str = "Summarizing... downloading, transcribing and summarizing can take a few minutes.";
pub const ERROR_TITLE: &str = " Error ";
pub const SUMMARY_TITLE: &str = " Summary ";
pub const NOTICE_TITLE: &str = " Notice ";
pub const NOTICE_HINT: &str = "press any key";
pub const HELP_TEXT: &str = "Enter submit | Ctrl+Y copy | PgUp/PgDn scroll | Ctrl+R recheck | Esc quit";
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
pub const INPUT_HINT: &str = "Paste a Bilibili video link and press Enter";
