//! Member handlers.

use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Router,
};

use common::{AppResult, ResultResponse};
use domain::{CreateMember, Member, MemberCampaignDetailDto, MemberDetailDto};

use crate::api::extractors::AppJson;
use crate::api::AppState;
use crate::service::aspects::Caller;

/// Create member routes
pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_members).post(add_member))
        .route("/details", get(list_member_details))
        .route("/campaigns", get(list_member_campaigns))
        .route(
            "/:id",
            get(get_member).put(update_member).delete(delete_member),
        )
        .route("/:id/details", get(get_member_details))
        .route("/:id/campaigns", get(get_member_campaigns))
}

/// List all members
#[utoipa::path(
    get,
    path = "/members",
    tag = "Members",
    responses(
        (status = 200, description = "All members", body = [Member])
    )
)]
pub async fn list_members(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> AppResult<ResultResponse<Vec<Member>>> {
    let result = state.services.members(caller).get_all().await?;
    Ok(ResultResponse::ok(result))
}

/// List members with their trainer's name
#[utoipa::path(
    get,
    path = "/members/details",
    tag = "Members",
    responses(
        (status = 200, description = "Member details", body = [MemberDetailDto])
    )
)]
pub async fn list_member_details(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> AppResult<ResultResponse<Vec<MemberDetailDto>>> {
    let result = state.services.members(caller).get_member_details().await?;
    Ok(ResultResponse::ok(result))
}

/// List campaign enrolments of all members
#[utoipa::path(
    get,
    path = "/members/campaigns",
    tag = "Members",
    responses(
        (status = 200, description = "Campaign enrolments", body = [MemberCampaignDetailDto])
    )
)]
pub async fn list_member_campaigns(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> AppResult<ResultResponse<Vec<MemberCampaignDetailDto>>> {
    let result = state
        .services
        .members(caller)
        .get_member_campaign_details()
        .await?;
    Ok(ResultResponse::ok(result))
}

/// Get member by ID
#[utoipa::path(
    get,
    path = "/members/{id}",
    tag = "Members",
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "The member, or null data when absent", body = Member)
    )
)]
pub async fn get_member(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
) -> AppResult<ResultResponse<Option<Member>>> {
    let result = state.services.members(caller).get_by_id(id).await?;
    Ok(ResultResponse::ok(result))
}

/// Get detail rows of one member
#[utoipa::path(
    get,
    path = "/members/{id}/details",
    tag = "Members",
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member details, empty when absent", body = [MemberDetailDto])
    )
)]
pub async fn get_member_details(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
) -> AppResult<ResultResponse<Vec<MemberDetailDto>>> {
    let result = state
        .services
        .members(caller)
        .get_member_details_by_id(id)
        .await?;
    Ok(ResultResponse::ok(result))
}

/// Get campaign enrolments of one member
#[utoipa::path(
    get,
    path = "/members/{id}/campaigns",
    tag = "Members",
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Campaign enrolments", body = [MemberCampaignDetailDto])
    )
)]
pub async fn get_member_campaigns(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
) -> AppResult<ResultResponse<Vec<MemberCampaignDetailDto>>> {
    let result = state
        .services
        .members(caller)
        .get_member_campaign_details_by_member(id)
        .await?;
    Ok(ResultResponse::ok(result))
}

/// Register a member
#[utoipa::path(
    post,
    path = "/members",
    tag = "Members",
    request_body = CreateMember,
    responses(
        (status = 201, description = "Member added", body = Member),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Caller lacks admin or member.admin"),
        (status = 409, description = "Identity number already exists")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_member(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    AppJson(payload): AppJson<CreateMember>,
) -> AppResult<ResultResponse<Member>> {
    let result = state.services.members(caller).add(payload).await?;
    Ok(ResultResponse::created(result))
}

/// Update a member; the path ID takes precedence over the body
#[utoipa::path(
    put,
    path = "/members/{id}",
    tag = "Members",
    params(("id" = i32, Path, description = "Member ID")),
    request_body = Member,
    responses(
        (status = 200, description = "Member updated", body = Member),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Caller lacks admin or member.admin"),
        (status = 404, description = "Member not found"),
        (status = 409, description = "Identity number already exists")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_member(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
    AppJson(mut payload): AppJson<Member>,
) -> AppResult<ResultResponse<Member>> {
    payload.id = id;
    let result = state.services.members(caller).update(payload).await?;
    Ok(ResultResponse::ok(result))
}

/// Delete a member
#[utoipa::path(
    delete,
    path = "/members/{id}",
    tag = "Members",
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member deleted"),
        (status = 401, description = "Caller lacks admin or member.admin"),
        (status = 404, description = "Member not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_member(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i32>,
) -> AppResult<ResultResponse<()>> {
    let result = state.services.members(caller).delete(id).await?;
    Ok(ResultResponse::ok(result))
}
