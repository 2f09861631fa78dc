//! Trainer handlers.

use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Router,
};

use common::{AppResult, ResultResponse};
use domain::{CreateTrainer, Trainer, TrainerDetailDto};

use crate::api::extractors::AppJson;
use crate::api::AppState;
use crate::service::aspects::Caller;

/// Create trainer routes
pub fn trainer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trainers).post(add_trainer))
        .route("/details", get(list_trainer_details))
        .route(
            "/:id",
            get(get_trainer).put(update_trainer).delete(delete_trainer),
        )
}

/// List all trainers
#[utoipa::path(
    get,
    path = "/trainers",
    tag = "Trainers",
    responses(
        (status = 200, description = "All trainers", body = [Trainer])
    )
)]
pub async fn list_trainers(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> AppResult<ResultResponse<Vec<Trainer>>> {
    let result = state.services.trainers(caller).get_all().await?;
    Ok(ResultResponse::ok(result))
}

/// List trainers with their member counts
#[utoipa::path(
    get,
    path = "/trainers/details",
    tag = "Trainers",
    responses(
        (status = 200, description = "Trainer details", body = [TrainerDetailDto])
    )
)]
pub async fn list_trainer_details(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> AppResult<ResultResponse<Vec<TrainerDetailDto>>> {
    let result = state
        .services
        .trainers(caller)
        .get_trainer_details()
        .await?;
    Ok(ResultResponse::ok(result))
}

/// Get trainer by ID
#[utoipa::path(
    get,
    path = "/trainers/{id}",
    tag = "Trainers",
    params(("id" = i32, Path, description = "Trainer ID")),
    responses(
        (status = 200, description = "The trainer, or null data when absent", body = Trainer)
    )
)]
pub async fn get_trainer(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
) -> AppResult<ResultResponse<Option<Trainer>>> {
    let result = state.services.trainers(caller).get_by_id(id).await?;
    Ok(ResultResponse::ok(result))
}

/// Hire a trainer
#[utoipa::path(
    post,
    path = "/trainers",
    tag = "Trainers",
    request_body = CreateTrainer,
    responses(
        (status = 201, description = "Trainer added", body = Trainer),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Caller lacks admin or trainer.admin"),
        (status = 409, description = "Email already used by another trainer")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_trainer(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    AppJson(payload): AppJson<CreateTrainer>,
) -> AppResult<ResultResponse<Trainer>> {
    let result = state.services.trainers(caller).add(payload).await?;
    Ok(ResultResponse::created(result))
}

/// Update a trainer; the path ID takes precedence over the body
#[utoipa::path(
    put,
    path = "/trainers/{id}",
    tag = "Trainers",
    params(("id" = i32, Path, description = "Trainer ID")),
    request_body = Trainer,
    responses(
        (status = 200, description = "Trainer updated", body = Trainer),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Caller lacks admin or trainer.admin"),
        (status = 404, description = "Trainer not found"),
        (status = 409, description = "Email already used by another trainer")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_trainer(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
    AppJson(mut payload): AppJson<Trainer>,
) -> AppResult<ResultResponse<Trainer>> {
    payload.id = id;
    let result = state.services.trainers(caller).update(payload).await?;
    Ok(ResultResponse::ok(result))
}

/// Delete a trainer; their members are kept without a trainer
#[utoipa::path(
    delete,
    path = "/trainers/{id}",
    tag = "Trainers",
    params(("id" = i32, Path, description = "Trainer ID")),
    responses(
        (status = 200, description = "Trainer deleted"),
        (status = 401, description = "Caller lacks admin or trainer.admin"),
        (status = 404, description = "Trainer not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_trainer(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
) -> AppResult<ResultResponse<()>> {
    let result = state.services.trainers(caller).delete(id).await?;
    Ok(ResultResponse::ok(result))
}
