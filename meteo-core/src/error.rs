use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Failure of a single request against an Open-Meteo endpoint.
///
/// Every failure a user action can run into is one of these: the request
/// never completed, the server answered with a non-success status, or the
/// body could not be decoded into the expected shape.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} request failed with status {status}: {reason}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        reason: String,
    },

    #[error("failed to decode {endpoint} response: {detail}")]
    Decode {
        endpoint: &'static str,
        detail: String,
    },
}

impl NetworkError {
    /// Short human-readable reason, suitable for showing next to a form.
    pub fn reason(&self) -> String {
        match self {
            NetworkError::Transport { source, .. } => source.to_string(),
            NetworkError::Status { reason, .. } => reason.clone(),
            NetworkError::Decode { detail, .. } => detail.clone(),
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            NetworkError::Transport { endpoint, .. }
            | NetworkError::Status { endpoint, .. }
            | NetworkError::Decode { endpoint, .. } => endpoint,
        }
    }

    pub(crate) fn decode(endpoint: &'static str, detail: impl Into<String>) -> Self {
        NetworkError::Decode { endpoint, detail: detail.into() }
    }

    /// Build a `Status` error from a failed response body.
    ///
    /// Open-Meteo answers errors with `{"error": true, "reason": "..."}`; when
    /// the body has no usable reason the generic message is used instead.
    pub(crate) fn from_status(endpoint: &'static str, status: StatusCode, body: &str) -> Self {
        let reason = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.reason)
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| {
                let body = truncate_body(body);
                if body.is_empty() {
                    format!("Failed to fetch {endpoint} data from Open-Meteo API")
                } else {
                    format!("Failed to fetch {endpoint} data from Open-Meteo API ({body})")
                }
            });

        NetworkError::Status { endpoint, status, reason }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    reason: Option<String>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    let body = body.trim();
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
