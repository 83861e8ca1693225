//! Response handling for the NSX Policy API

use super::common::ApiErrorDetails;
use super::ApiError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

pub struct NsxResponseHandler;

impl NsxResponseHandler {
    pub async fn extract_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let text = response.text().await?;
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(Self::extract_error(status, text));
        }

        serde_json::from_str::<T>(&text).map_err(|e| {
            tracing::error!("Failed to parse response: {}, body: {}", e, text);
            ApiError::ParseError(format!("Failed to parse response: {}", e))
        })
    }

    pub async fn extract_empty_response(response: reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status.is_success() {
            return Ok(());
        }

        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(Self::extract_error(status, text))
    }

    fn extract_error(status: StatusCode, text: String) -> ApiError {
        let details = serde_json::from_str::<ApiErrorDetails>(&text).ok();
        let message = details
            .as_ref()
            .and_then(ApiErrorDetails::full_message)
            .unwrap_or(text);

        match status {
            StatusCode::NOT_FOUND => ApiError::NotFound { message },
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ApiError::AuthError(status.as_u16())
            }
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited,
            StatusCode::SERVICE_UNAVAILABLE => ApiError::ServiceUnavailable,
            _ => ApiError::ApiError {
                status: status.as_u16(),
                message,
                details: details.map(Box::new),
            },
        }
    }
}
