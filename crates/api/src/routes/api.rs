use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::error;

use common::{CompanyInfo, Error};
use service::SeriesResult;

use crate::AppState;

pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/companies", get(list_companies))
        .route("/stocks/:symbol", get(get_stock))
}

/// All tracked companies for the dashboard's symbol picker.
async fn list_companies(State(state): State<AppState>) -> Result<Json<Vec<CompanyInfo>>, ApiError> {
    let companies = state.service.list_companies().await?;
    Ok(Json(companies))
}

/// Full cached series, summary statistics, and indicators for one symbol.
async fn get_stock(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<SeriesResult>, ApiError> {
    let result = state.service.get_series(&symbol).await?;
    Ok(Json(result))
}

/// Maps the domain error taxonomy onto HTTP statuses: missing data is the
/// client's problem, everything else is ours.
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::NoDataFound { .. } => (StatusCode::NOT_FOUND, "No data found".to_string()),
            other => {
                error!(error = %other, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
