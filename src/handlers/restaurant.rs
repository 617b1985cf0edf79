use axum::{
    Router,
    extract::{Path, State},
    response::Json,
    routing::get,
};
use tracing::instrument;

use crate::error::ApiError;
use crate::models::{ApiErrorResponse, Restaurant, RestaurantSummary};

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route("/restaurants/{id}", get(get_restaurant))
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "All restaurants with their dish counts", body = [RestaurantSummary]),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(State(state): State<AppState>) -> Json<Vec<RestaurantSummary>> {
    Json(state.catalog.restaurant_summaries())
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    params(
        ("id" = String, Path, description = "Restaurant identifier"),
    ),
    responses(
        (status = 200, description = "Restaurant details", body = Restaurant),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Restaurant>, ApiError> {
    state
        .catalog
        .restaurant(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("restaurant {id} not found")))
}
