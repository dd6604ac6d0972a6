//! Error and result types shared across the crate.
//!
//! `ApiError` is what the REST client reports; everything above the client
//! (terminal setup, config files, the event loop) uses `anyhow`.

pub type Result<T> = anyhow::Result<T>;

/// Failure of a single call against the user directory API.
///
/// Transport failures, non-success statuses and undecodable bodies are all
/// surfaced to the caller the same way; callers only log them.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected status {status}{}", status_suffix(.body))]
    Status { status: u16, body: String },
    #[error("invalid response payload: {0}")]
    Decode(String),
    #[error("record has no identifier")]
    MissingId,
    #[error("base url cannot carry path segments: {0}")]
    InvalidBaseUrl(String),
}

fn status_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_includes_body_preview_only_when_present() {
        let bare = ApiError::Status { status: 404, body: String::new() };
        assert_eq!(bare.to_string(), "unexpected status 404");

        let with_body = ApiError::Status { status: 500, body: "boom".into() };
        assert_eq!(with_body.to_string(), "unexpected status 500: boom");
    }
}
