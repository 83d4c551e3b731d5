use sea_orm::EntityTrait;
use uuid::Uuid;

use crate::{
    dto::interests::{CreateInterestRequest, ReplaceInterestRequest},
    entity::{Listings, Users},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin, ensure_common, ensure_owner_or_admin},
    models::{Interest, InterestWithListing},
    repositories::{InterestRepository, NewInterest},
    response::{ApiResponse, Meta},
    services::listing_service::LISTING_NOT_FOUND,
    state::AppState,
};

pub const INTEREST_NOT_FOUND: &str = "Interesse não encontrado.";
pub const USER_NOT_FOUND: &str = "Usuário não encontrado.";

pub async fn list_all(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Vec<Interest>>> {
    ensure_admin(user)?;
    let items = InterestRepository::new(&state.orm).get().await?;
    Ok(ApiResponse::list("Interesses", items))
}

pub async fn list_for_user(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<Vec<InterestWithListing>>> {
    let items = InterestRepository::new(&state.orm)
        .get_list_interesse(user.user_id)
        .await?;
    Ok(ApiResponse::list("Interesses", items))
}

pub async fn get_interest(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Interest>> {
    let interest = find_or_not_found(state, id).await?;
    Ok(ApiResponse::success("Interesse", interest, None))
}

pub async fn create_interest(
    state: &AppState,
    user: &AuthUser,
    payload: CreateInterestRequest,
) -> AppResult<ApiResponse<Interest>> {
    ensure_common(user)?;
    ensure_listing_exists(state, payload.listing_id).await?;

    let interest = InterestRepository::new(&state.orm)
        .post(NewInterest {
            user_id: user.user_id,
            listing_id: payload.listing_id,
        })
        .await?;

    tracing::info!(interest_id = %interest.id, listing_id = %interest.listing_id, "interest created");

    Ok(ApiResponse::success(
        "Interesse registrado",
        interest,
        Some(Meta::empty()),
    ))
}

pub async fn replace_interest(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: ReplaceInterestRequest,
) -> AppResult<ApiResponse<Interest>> {
    let existing = find_or_not_found(state, id).await?;
    ensure_owner_or_admin(user, existing.user_id)?;
    if !user.is_admin() && payload.user_id != user.user_id {
        return Err(AppError::Forbidden);
    }
    ensure_user_exists(state, payload.user_id).await?;
    ensure_listing_exists(state, payload.listing_id).await?;

    let interest = InterestRepository::new(&state.orm)
        .put(Interest {
            id: existing.id,
            user_id: payload.user_id,
            listing_id: payload.listing_id,
            created_at: existing.created_at,
        })
        .await?;

    tracing::info!(interest_id = %interest.id, "interest replaced");

    Ok(ApiResponse::success(
        "Interesse atualizado",
        interest,
        Some(Meta::empty()),
    ))
}

pub async fn delete_interest(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Interest>> {
    let existing = find_or_not_found(state, id).await?;
    ensure_owner_or_admin(user, existing.user_id)?;

    let interest = InterestRepository::new(&state.orm).delete(existing).await?;

    tracing::info!(interest_id = %interest.id, "interest deleted");

    Ok(ApiResponse::success(
        "Interesse removido",
        interest,
        Some(Meta::empty()),
    ))
}

async fn find_or_not_found(state: &AppState, id: Uuid) -> AppResult<Interest> {
    InterestRepository::new(&state.orm)
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(INTEREST_NOT_FOUND))
}

async fn ensure_listing_exists(state: &AppState, listing_id: Uuid) -> AppResult<()> {
    if Listings::find_by_id(listing_id).one(&state.orm).await?.is_none() {
        return Err(AppError::Validation(LISTING_NOT_FOUND.into()));
    }
    Ok(())
}

async fn ensure_user_exists(state: &AppState, user_id: Uuid) -> AppResult<()> {
    if Users::find_by_id(user_id).one(&state.orm).await?.is_none() {
        return Err(AppError::Validation(USER_NOT_FOUND.into()));
    }
    Ok(())
}
