use reqwest::StatusCode;
use thiserror::Error;

pub const VALIDATION_MESSAGE: &str = "Please select a file and an option.";
pub const INVALID_OPTION_MESSAGE: &str = "Invalid option selected.";
pub const REQUEST_FAILED_MESSAGE: &str = "Failed to fetch the data. Please try again.";
pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";
pub const INVALID_IMAGE_MESSAGE: &str = "Received data is not a valid image.";

/// Reasons a single send attempt ends without a preview image.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no file or no operation selected")]
    Validation,

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("ML service answered with status {0}")]
    RequestFailed(StatusCode),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("ML service reported an error: {0}")]
    ServerReported(String),

    #[error("response is not a decodable image: {0}")]
    InvalidImage(String),
}

impl DispatchError {
    /// Text for the error line under the Send button.
    pub fn user_message(&self) -> String {
        match self {
            DispatchError::Validation => VALIDATION_MESSAGE.to_string(),
            DispatchError::InvalidOption(_) => INVALID_OPTION_MESSAGE.to_string(),
            DispatchError::RequestFailed(_) => REQUEST_FAILED_MESSAGE.to_string(),
            DispatchError::Transport(message) | DispatchError::ServerReported(message) => {
                if message.trim().is_empty() {
                    FALLBACK_MESSAGE.to_string()
                } else {
                    message.clone()
                }
            }
            DispatchError::InvalidImage(_) => INVALID_IMAGE_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for DispatchError {
    fn from(e: reqwest::Error) -> Self {
        DispatchError::Transport(e.to_string())
    }
}
