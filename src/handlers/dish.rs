use axum::{
    Router,
    extract::{Path, State},
    response::Json,
    routing::{get, post},
};
use tracing::instrument;

use crate::error::ApiError;
use crate::models::{ApiErrorResponse, Dish, DishSearchRequest};

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dishes", get(list_dishes))
        .route("/dishes/search", post(search_dishes))
        .route("/dishes/{id}", get(get_dish))
}

#[utoipa::path(
    get,
    path = "/dishes",
    responses(
        (status = 200, description = "All dishes", body = [Dish]),
    ),
    tag = "dishes"
)]
#[instrument(skip(state))]
pub async fn list_dishes(State(state): State<AppState>) -> Json<Vec<Dish>> {
    Json(state.catalog.dishes().to_vec())
}

#[utoipa::path(
    post,
    path = "/dishes/search",
    request_body = DishSearchRequest,
    responses(
        (status = 200, description = "Dishes matching every supplied filter", body = [Dish]),
    ),
    tag = "dishes"
)]
#[instrument(skip(state))]
pub async fn search_dishes(
    State(state): State<AppState>,
    Json(filter): Json<DishSearchRequest>,
) -> Json<Vec<Dish>> {
    Json(state.catalog.search(&filter))
}

#[utoipa::path(
    get,
    path = "/dishes/{id}",
    params(
        ("id" = String, Path, description = "Dish identifier"),
    ),
    responses(
        (status = 200, description = "Dish details", body = Dish),
        (status = 404, description = "Dish not found", body = ApiErrorResponse),
    ),
    tag = "dishes"
)]
#[instrument(skip(state))]
pub async fn get_dish(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Dish>, ApiError> {
    state
        .catalog
        .dish(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("dish {id} not found")))
}
