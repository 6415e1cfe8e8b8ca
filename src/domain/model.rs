/// Lifecycle of one grabbed link, from queueing through a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadState {
    Waiting,
    Downloading,
    Failed,
    Cancelled,
    Disabled,
    Finished,
    Parsing,
    Duplicate,
}

impl DownloadState {
    /// Stable lowercase name, suitable as a style class or log token.
    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadState::Waiting => "waiting",
            DownloadState::Downloading => "downloading",
            DownloadState::Failed => "failed",
            DownloadState::Cancelled => "cancelled",
            DownloadState::Disabled => "disabled",
            DownloadState::Finished => "finished",
            DownloadState::Parsing => "parse",
            DownloadState::Duplicate => "dupe",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DownloadState::Failed
                | DownloadState::Cancelled
                | DownloadState::Finished
                | DownloadState::Duplicate
        )
    }
}

impl std::fmt::Display for DownloadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_names_are_stable() {
        assert_eq!(DownloadState::Waiting.as_str(), "waiting");
        assert_eq!(DownloadState::Parsing.as_str(), "parse");
        assert_eq!(DownloadState::Duplicate.to_string(), "dupe");
    }

    #[test]
    fn terminal_states() {
        assert!(DownloadState::Finished.is_terminal());
        assert!(DownloadState::Failed.is_terminal());
        assert!(!DownloadState::Downloading.is_terminal());
        assert!(!DownloadState::Waiting.is_terminal());
    }
}
