use crate::{BackendStatus, Submission};

/// The one result panel shown below the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Panel {
    /// Nothing below the form.
    #[default]
    Form,
    Spinner,
    Error(String),
    /// Raw markdown of the summary.
    Summary(String),
}

impl Panel {
    /// Picks the panel for a submission: loading, then error, then summary, then none.
    pub fn select(submission: &Submission) -> Panel {
        match submission {
            Submission::Loading { .. } => Panel::Spinner,
            Submission::Failed(message) if !message.is_empty() => Panel::Error(message.clone()),
            Submission::Succeeded(summary) if !summary.is_empty() => {
                Panel::Summary(summary.clone())
            }
            _ => Panel::Form,
        }
    }

    pub fn can_copy(&self) -> bool {
        matches!(self, Panel::Summary(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub validation_error: Option<String>,
    pub panel: Panel,
    pub submit_enabled: bool,
    pub backend: BackendStatus,
    pub notice: Option<String>,
    pub dirty: bool,
}
