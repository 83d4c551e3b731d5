use uuid::Uuid;

use crate::{
    dto::listings::CreateListingForm,
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin, ensure_common},
    models::{ListingDetail, ListingHome},
    repositories::{ListingRepository, listing_repository::NO_IMAGE_MESSAGE},
    response::{ApiResponse, Meta},
    routes::params::{AdminListingQuery, HomeQuery},
    state::AppState,
    upload::{LISTING_IMAGE_FOLDER, remove_uploads, save_upload},
};

pub const LISTING_NOT_FOUND: &str = "Classificado não encontrado.";

pub async fn list_home(
    state: &AppState,
    user: &AuthUser,
    query: HomeQuery,
) -> AppResult<ApiResponse<Vec<ListingHome>>> {
    ensure_common(user)?;
    let items = ListingRepository::new(&state.orm)
        .get_list_home(
            query.busca.as_deref(),
            query.marca.as_deref(),
            query.categoria.as_deref(),
            query.ordenacao,
        )
        .await?;
    Ok(ApiResponse::list("Classificados", items))
}

pub async fn list_admin(
    state: &AppState,
    user: &AuthUser,
    query: AdminListingQuery,
) -> AppResult<ApiResponse<Vec<ListingDetail>>> {
    ensure_admin(user)?;
    let items = ListingRepository::new(&state.orm)
        .get_list_adm(query.busca.as_deref(), query.sort())
        .await?;
    Ok(ApiResponse::list("Classificados", items))
}

pub async fn get_listing(state: &AppState, id: Uuid) -> AppResult<ApiResponse<ListingDetail>> {
    let listing = ListingRepository::new(&state.orm)
        .get_page_product(id)
        .await?
        .ok_or_else(|| AppError::not_found(LISTING_NOT_FOUND))?;
    Ok(ApiResponse::success("Classificado", listing, None))
}

/// Stores every uploaded image and persists the listing with them. Stored
/// files are removed again if the listing cannot be saved.
pub async fn create_listing(
    state: &AppState,
    user: &AuthUser,
    mut form: CreateListingForm,
) -> AppResult<ApiResponse<ListingDetail>> {
    ensure_admin(user)?;
    if form.images.is_empty() {
        return Err(AppError::Validation(NO_IMAGE_MESSAGE.into()));
    }

    let images = std::mem::take(&mut form.images);
    let mut stored = Vec::with_capacity(images.len());
    for file in images {
        let saved = save_upload(
            &state.config.upload_root,
            Some(LISTING_IMAGE_FOLDER),
            &file.file_name,
            &file.bytes,
        )
        .await;
        match saved {
            Ok(Some(path)) => stored.push(path),
            Ok(None) => tracing::warn!(file = %file.file_name, "skipping empty upload"),
            Err(err) => {
                remove_uploads(&stored).await;
                return Err(err.into());
            }
        }
    }

    if stored.is_empty() {
        return Err(AppError::Validation(NO_IMAGE_MESSAGE.into()));
    }

    let image_paths = stored
        .iter()
        .map(|path| path.to_string_lossy().into_owned())
        .collect();
    let listing = match ListingRepository::new(&state.orm)
        .post(form.into_new_listing(image_paths))
        .await
    {
        Ok(listing) => listing,
        Err(err) => {
            tracing::warn!(files = stored.len(), "listing not saved, removing stored images");
            remove_uploads(&stored).await;
            return Err(err);
        }
    };

    tracing::info!(
        listing_id = %listing.id,
        images = listing.images.len(),
        user_id = %user.user_id,
        "listing created"
    );

    Ok(ApiResponse::success(
        "Classificado criado",
        listing,
        Some(Meta::empty()),
    ))
}
