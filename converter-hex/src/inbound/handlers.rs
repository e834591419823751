//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};

use converter_types::{
    AppError, ConversionRepository, ConvertRequest, HistoricalRatesQuery, LatestRatesQuery,
    RateGateway,
};

use crate::ConversionService;

/// Application state shared across handlers.
pub struct AppState<R: ConversionRepository, G: RateGateway> {
    pub service: ConversionService<R, G>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(AppError::InvalidInput(rejection.body_text()))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(AppError::InvalidInput(rejection.body_text()))
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::RateNotFound(_) => StatusCode::NOT_FOUND,
            AppError::RatesUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::UpstreamRejected { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            AppError::UpstreamRejected { message, .. } => message.clone(),
            other => other.to_string(),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.0, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self.0, "request rejected");
        }

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Latest rates.
#[tracing::instrument(skip(state, query))]
pub async fn latest_rates<R: ConversionRepository, G: RateGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    query: Result<Query<LatestRatesQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let quotes = state.service.latest_rates(query).await?;
    Ok(Json(quotes))
}

/// Rates on a past date.
#[tracing::instrument(skip(state, query))]
pub async fn historical_rates<R: ConversionRepository, G: RateGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    query: Result<Query<HistoricalRatesQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let quotes = state.service.historical_rates(query).await?;
    Ok(Json(quotes))
}

/// Convert an amount and record it.
#[tracing::instrument(skip(state, req))]
pub async fn convert<R: ConversionRepository, G: RateGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    req: Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = req?;
    tracing::debug!(amount = req.amount, from = %req.from, to = %req.to, "converting");
    let outcome = state.service.convert(req).await?;
    Ok(Json(outcome))
}

/// Recent conversions, newest first.
#[tracing::instrument(skip(state))]
pub async fn history<R: ConversionRepository, G: RateGateway>(
    State(state): State<Arc<AppState<R, G>>>,
) -> Result<impl IntoResponse, ApiError> {
    let records = state.service.history().await?;
    Ok(Json(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use converter_types::CurrencyCode;

    fn status_of(err: AppError) -> StatusCode {
        ApiError(err).status()
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            status_of(AppError::InvalidInput("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::RateNotFound(CurrencyCode::parse("XYZ").unwrap())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::RatesUnavailable("empty".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AppError::UpstreamUnavailable("timeout".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(AppError::Internal("db".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_rejection_keeps_error_status() {
        let rejected = |status| AppError::UpstreamRejected {
            status,
            message: "nope".into(),
        };

        assert_eq!(status_of(rejected(429)), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(status_of(rejected(500)), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_of(rejected(302)), StatusCode::BAD_GATEWAY);
        assert_eq!(status_of(rejected(42)), StatusCode::BAD_GATEWAY);
    }
}
