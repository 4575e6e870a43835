use reqwest::StatusCode;
use thiserror::Error;

/// Why a weather document could not be obtained.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Network response was not ok: {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed weather response")]
    Malformed(#[from] serde_json::Error),

    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// Transport-level failures, as opposed to a body that arrived but made no sense.
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport { .. } | FetchError::Status { .. })
    }
}

/// Render `err` followed by each of its causes, `": "` separated.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        text.push_str(": ");
        text.push_str(&inner.to_string());
        cause = inner.source();
    }
    text
}

/// Cut an error body down to something that fits in one log line.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_is_untouched() {
        assert_eq!(truncate_body("not found"), "not found");
    }

    #[test]
    fn long_body_is_cut_on_char_boundary() {
        let body = "°".repeat(150);
        let cut = truncate_body(&body);

        assert!(cut.ends_with("..."));
        assert!(cut.len() <= 203);
        assert!(cut.trim_end_matches("...").chars().all(|c| c == '°'));
    }

    #[test]
    fn status_error_message() {
        let err = FetchError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: "down".into(),
        };
        assert_eq!(err.to_string(), "Network response was not ok: 503 Service Unavailable: down");
        assert!(err.is_transport());
    }

    #[test]
    fn chain_lists_causes_once() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let detail = parse.to_string();
        let err = FetchError::from(parse);

        assert_eq!(err.to_string(), "malformed weather response");
        assert_eq!(error_chain(&err), format!("malformed weather response: {detail}"));
    }

    #[test]
    fn malformed_is_not_transport() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(!FetchError::from(parse).is_transport());
    }
}
