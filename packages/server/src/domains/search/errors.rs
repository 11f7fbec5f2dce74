use thiserror::Error;

/// Why a search produced no result list
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Please enter a location")]
    LocationRequired,

    #[error("No therapists found matching your criteria. Try broadening your search.")]
    NoResults,

    #[error("Failed to fetch therapists: {0}")]
    Backend(String),
}

impl SearchError {
    /// Text shown in the search page notification
    pub fn user_message(&self) -> String {
        match self {
            SearchError::Backend(_) => {
                "Failed to fetch therapists. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}
