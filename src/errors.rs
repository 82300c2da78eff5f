// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: One variant per failure class in the pipeline
/// Each variant maps to a fixed client-facing error label and HTTP status
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Transport- or status-level failure talking to the Places API
    #[error("Google Maps API error: {0}")]
    UpstreamSearch(String),

    /// Missing candidate/part or unparseable JSON in the Gemini reply
    #[error("Gemini analysis error: {0}")]
    EnrichmentFailed(String),

    #[error("Unexpected server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Fixed `error` label used in the response body
    /// The Maps label is part of the client contract and must not change
    pub fn label(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "Invalid request",
            ApiError::UpstreamSearch(_) => "Google Maps API Error",
            ApiError::EnrichmentFailed(_) => "Gemini analysis error",
            ApiError::Internal(_) => "An unexpected server error occurred",
        }
    }

    /// Detail message carried alongside the label
    pub fn details(&self) -> &str {
        match self {
            ApiError::Validation(msg)
            | ApiError::UpstreamSearch(msg)
            | ApiError::EnrichmentFailed(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
}

/// Convert ApiError to HTTP response
/// DOCUMENTATION: Every error renders as the fixed {error, details} JSON body
impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "error": self.label(),
            "details": self.details(),
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamSearch(_) => StatusCode::BAD_GATEWAY,
            ApiError::EnrichmentFailed(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_search_error_shape() {
        let err = ApiError::UpstreamSearch("connection refused".to_string());

        assert_eq!(err.label(), "Google Maps API Error");
        assert_eq!(err.details(), "connection refused");
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_enrichment_error_is_surfaced_not_swallowed() {
        let err = ApiError::EnrichmentFailed("reply was not valid JSON".to_string());

        assert_eq!(err.label(), "Gemini analysis error");
        assert!(err.status_code().is_server_error());
    }

    #[test]
    fn test_validation_error_is_client_error() {
        let err = ApiError::Validation("lat out of range".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_rendered_body_for_upstream_variants() {
        let cases = [
            (
                ApiError::UpstreamSearch("connection refused".to_string()),
                "Google Maps API Error",
            ),
            (
                ApiError::EnrichmentFailed("reply was not valid JSON".to_string()),
                "Gemini analysis error",
            ),
        ];

        for (err, label) in cases {
            let details = err.details().to_string();
            let response = err.error_response();
            assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

            let bytes = actix_web::body::to_bytes(response.into_body())
                .await
                .unwrap();
            let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["error"], label);
            assert_eq!(body["details"], details);
        }
    }
}
