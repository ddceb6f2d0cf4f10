//! Generation failure taxonomy

use thiserror::Error;

/// Any failure of the outbound completion call.
///
/// Every variant keeps the raw message from the service or transport so it
/// can be shown to the user unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationFailure {
    #[error("{0}")]
    Authentication(String),
    #[error("{0}")]
    RateLimited(String),
    #[error("{0}")]
    Network(String),
    #[error("{0}")]
    EmptyResponse(String),
    #[error("{0}")]
    Api(String),
}

impl GenerationFailure {
    /// Classify a raw error message from the API client.
    ///
    /// Rate-limit wording wins over authentication wording, and status codes
    /// only match as whole tokens (`6401` is not `401`).
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();

        if lower.contains("rate limit")
            || lower.contains("quota")
            || lower.contains("too many requests")
            || has_status_code(&lower, "429")
        {
            Self::RateLimited(message)
        } else if lower.contains("api key")
            || lower.contains("unauthorized")
            || lower.contains("authentication")
            || has_status_code(&lower, "401")
        {
            Self::Authentication(message)
        } else if lower.contains("error sending request")
            || lower.contains("connection")
            || lower.contains("dns")
            || lower.contains("timed out")
        {
            Self::Network(message)
        } else {
            Self::Api(message)
        }
    }

    /// Raw underlying description
    pub fn message(&self) -> &str {
        match self {
            Self::Authentication(m)
            | Self::RateLimited(m)
            | Self::Network(m)
            | Self::EmptyResponse(m)
            | Self::Api(m) => m,
        }
    }

    /// Short category name used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Authentication(_) => "authentication",
            Self::RateLimited(_) => "rate_limited",
            Self::Network(_) => "network",
            Self::EmptyResponse(_) => "empty_response",
            Self::Api(_) => "api",
        }
    }

    /// Message shown to the user for this failure
    pub fn user_message(&self) -> String {
        format!(
            "Une erreur est survenue lors de l'appel à l'API OpenAI : {}",
            self.message()
        )
    }
}

fn has_status_code(text: &str, code: &str) -> bool {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .any(|token| token == code)
}
