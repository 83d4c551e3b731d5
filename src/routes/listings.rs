use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State, multipart::MultipartRejection},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::listings::{CreateListingForm, ListingFormData},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{ListingDetail, ListingHome},
    response::ApiResponse,
    routes::params::{AdminListingQuery, HomeQuery},
    services::listing_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_home)
                .post(create_listing)
                .layer(DefaultBodyLimit::disable()),
        )
        .route("/adm", get(list_admin))
        .route("/{id}", get(get_listing))
}

#[utoipa::path(
    get,
    path = "/api/classificado",
    params(HomeQuery),
    responses(
        (status = 200, description = "Name, first image and price of matching listings", body = ApiResponse<Vec<ListingHome>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Classificados"
)]
pub async fn list_home(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<HomeQuery>,
) -> AppResult<Json<ApiResponse<Vec<ListingHome>>>> {
    let resp = listing_service::list_home(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/classificado/adm",
    params(AdminListingQuery),
    responses(
        (status = 200, description = "Full listings, searched and sorted (admin only)", body = ApiResponse<Vec<ListingDetail>>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Classificados"
)]
pub async fn list_admin(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<AdminListingQuery>,
) -> AppResult<Json<ApiResponse<Vec<ListingDetail>>>> {
    let resp = listing_service::list_admin(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/classificado/{id}",
    params(
        ("id" = Uuid, Path, description = "Listing ID")
    ),
    responses(
        (status = 200, description = "Listing with equipment and images", body = ApiResponse<ListingDetail>),
        (status = 404, description = "Classificado não encontrado."),
    ),
    security(("bearer_auth" = [])),
    tag = "Classificados"
)]
pub async fn get_listing(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ListingDetail>>> {
    let resp = listing_service::get_listing(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/classificado",
    request_body(content = CreateListingForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Created listing with its images", body = ApiResponse<ListingDetail>),
        (status = 400, description = "Favor informar ao menos uma imagem."),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal Server Error"),
    ),
    security(("bearer_auth" = [])),
    tag = "Classificados"
)]
pub async fn create_listing(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<ApiResponse<ListingDetail>>> {
    // Role check precedes body parsing.
    ensure_admin(&user)?;
    let multipart = multipart.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let form = ListingFormData::read(multipart).await?.validate()?;
    let resp = listing_service::create_listing(&state, &user, form).await?;
    Ok(Json(resp))
}
