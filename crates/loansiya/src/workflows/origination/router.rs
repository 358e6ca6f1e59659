use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;

use super::domain::ClientId;
use super::policy::LoanRequest;
use super::repository::{ClientStore, StoreError};
use super::scoring::{MetricError, ScoringError};
use super::service::{OriginationError, OriginationService};

/// Router builder exposing the scoring and recommendation endpoints.
pub fn origination_router<S>(service: Arc<OriginationService<S>>) -> Router
where
    S: ClientStore + 'static,
{
    Router::new()
        .route("/clients", get(clients_handler::<S>))
        .route("/client/:cid", get(client_handler::<S>))
        .route("/metrics/:cid", post(metrics_handler::<S>))
        .route("/score/:cid", post(score_handler::<S>))
        .route("/loan/:cid/recommendation", post(recommendation_handler::<S>))
        .with_state(service)
}

/// Optional evaluation-date override for metric and scoring passes. Replays
/// and tests pin the date; live traffic omits it and gets today.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EvaluationParams {
    #[serde(default)]
    pub(crate) as_of: Option<NaiveDate>,
}

impl EvaluationParams {
    fn as_of_or_today(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Local::now().date_naive())
    }
}

pub(crate) async fn clients_handler<S>(
    State(service): State<Arc<OriginationService<S>>>,
) -> Response
where
    S: ClientStore + 'static,
{
    match service.clients() {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn client_handler<S>(
    State(service): State<Arc<OriginationService<S>>>,
    Path(cid): Path<String>,
) -> Response
where
    S: ClientStore + 'static,
{
    match service.client(&ClientId(cid)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn metrics_handler<S>(
    State(service): State<Arc<OriginationService<S>>>,
    Path(cid): Path<String>,
    params: Option<axum::Json<EvaluationParams>>,
) -> Response
where
    S: ClientStore + 'static,
{
    let params = params.map(|axum::Json(inner)| inner).unwrap_or_default();
    match service.process_metrics(&ClientId(cid), params.as_of_or_today()) {
        Ok(metrics) => (StatusCode::OK, axum::Json(metrics)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn score_handler<S>(
    State(service): State<Arc<OriginationService<S>>>,
    Path(cid): Path<String>,
    params: Option<axum::Json<EvaluationParams>>,
) -> Response
where
    S: ClientStore + 'static,
{
    let params = params.map(|axum::Json(inner)| inner).unwrap_or_default();
    match service.score_client(&ClientId(cid), params.as_of_or_today(), Utc::now()) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recommendation_handler<S>(
    State(service): State<Arc<OriginationService<S>>>,
    Path(cid): Path<String>,
    axum::Json(request): axum::Json<LoanRequest>,
) -> Response
where
    S: ClientStore + 'static,
{
    match service.recommend_loan(&ClientId(cid), &request) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: OriginationError) -> Response {
    let status = match &error {
        OriginationError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        OriginationError::Store(StoreError::Unavailable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        OriginationError::Metric(MetricError::NonFinite)
        | OriginationError::Scoring(ScoringError::NonFinite) => StatusCode::INTERNAL_SERVER_ERROR,
        OriginationError::Metric(_) | OriginationError::Policy(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        OriginationError::Eligibility(_) => StatusCode::CONFLICT,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
