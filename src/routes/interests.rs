use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::interests::{CreateInterestRequest, ReplaceInterestRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Interest, InterestWithListing},
    response::ApiResponse,
    services::interest_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_interests).post(create_interest))
        .route("/usuario", get(list_my_interests))
        .route(
            "/{id}",
            get(get_interest).put(replace_interest).delete(delete_interest),
        )
}

#[utoipa::path(
    get,
    path = "/api/interesse",
    responses(
        (status = 200, description = "All interests (admin only)", body = ApiResponse<Vec<Interest>>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Interesses"
)]
pub async fn list_interests(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<Interest>>>> {
    let resp = interest_service::list_all(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/interesse/usuario",
    responses(
        (status = 200, description = "Interests of the authenticated user with listing details", body = ApiResponse<Vec<InterestWithListing>>),
    ),
    security(("bearer_auth" = [])),
    tag = "Interesses"
)]
pub async fn list_my_interests(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<InterestWithListing>>>> {
    let resp = interest_service::list_for_user(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/interesse/{id}",
    params(
        ("id" = Uuid, Path, description = "Interest ID")
    ),
    responses(
        (status = 200, description = "Interest", body = ApiResponse<Interest>),
        (status = 404, description = "Interesse não encontrado."),
    ),
    security(("bearer_auth" = [])),
    tag = "Interesses"
)]
pub async fn get_interest(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Interest>>> {
    let resp = interest_service::get_interest(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/interesse",
    request_body = CreateInterestRequest,
    responses(
        (status = 200, description = "Interest registered", body = ApiResponse<Interest>),
        (status = 400, description = "Bad Request"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Interesses"
)]
pub async fn create_interest(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateInterestRequest>,
) -> AppResult<Json<ApiResponse<Interest>>> {
    let resp = interest_service::create_interest(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/interesse/{id}",
    params(
        ("id" = Uuid, Path, description = "Interest ID")
    ),
    request_body = ReplaceInterestRequest,
    responses(
        (status = 200, description = "Interest replaced", body = ApiResponse<Interest>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Interesse não encontrado."),
    ),
    security(("bearer_auth" = [])),
    tag = "Interesses"
)]
pub async fn replace_interest(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReplaceInterestRequest>,
) -> AppResult<Json<ApiResponse<Interest>>> {
    let resp = interest_service::replace_interest(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/interesse/{id}",
    params(
        ("id" = Uuid, Path, description = "Interest ID")
    ),
    responses(
        (status = 200, description = "Deleted interest", body = ApiResponse<Interest>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Interesse não encontrado."),
    ),
    security(("bearer_auth" = [])),
    tag = "Interesses"
)]
pub async fn delete_interest(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Interest>>> {
    let resp = interest_service::delete_interest(&state, &user, id).await?;
    Ok(Json(resp))
}
