use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::error::Error as _;
use thiserror::Error;

use crate::metrics::UPSTREAM_FAILURES;
use crate::models::ErrorBody;

pub const VALIDATION_MESSAGE: &str = "symptoms (string) required in body";
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests. Please try again later.";
pub const EMPTY_UPSTREAM_MESSAGE: &str = "No response from AI model.";
pub const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("symptoms (string) required in body")]
    Validation,

    #[error("Too many requests. Please try again later.")]
    RateLimited,

    #[error("No response from AI model.")]
    EmptyUpstream,

    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Http(#[from] reqwest::Error),
}

impl AdvisorError {
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::EmptyUpstream | Self::Upstream(_) | Self::Http(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    // message plus every source in the chain, reqwest hides the cause otherwise
    pub fn details(&self) -> String {
        let mut text = match self {
            Self::Http(e) if e.is_timeout() => format!("request timed out: {}", self),
            _ => self.to_string(),
        };
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !text.contains(&cause_text) {
                text.push_str(": ");
                text.push_str(&cause_text);
            }
            source = cause.source();
        }
        text
    }

    fn body(&self) -> ErrorBody {
        match self {
            Self::Upstream(_) | Self::Http(_) => ErrorBody {
                error: INTERNAL_MESSAGE.to_string(),
                details: Some(self.details()),
            },
            _ => ErrorBody {
                error: self.to_string(),
                details: None,
            },
        }
    }
}

impl IntoResponse for AdvisorError {
    fn into_response(self) -> Response {
        match &self {
            Self::Upstream(_) | Self::Http(_) => {
                UPSTREAM_FAILURES.inc();
                tracing::error!(error = %self.details(), "advice request failed");
            }
            Self::EmptyUpstream => {
                UPSTREAM_FAILURES.inc();
                tracing::warn!("completion returned no content");
            }
            _ => {}
        }
        (self.status(), Json(self.body())).into_response()
    }
}
