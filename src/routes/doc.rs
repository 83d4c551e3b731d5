use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        interests::{CreateInterestRequest, ReplaceInterestRequest},
        listings::CreateListingForm,
    },
    models::{Equipment, Interest, InterestWithListing, ListingDetail, ListingHome, ListingImage, User},
    response::Meta,
    routes::{auth, health, interests, listings, params},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        listings::list_home,
        listings::list_admin,
        listings::get_listing,
        listings::create_listing,
        interests::list_interests,
        interests::list_my_interests,
        interests::get_interest,
        interests::create_interest,
        interests::replace_interest,
        interests::delete_interest
    ),
    components(
        schemas(
            User,
            Equipment,
            ListingImage,
            ListingHome,
            ListingDetail,
            Interest,
            InterestWithListing,
            CreateListingForm,
            CreateInterestRequest,
            ReplaceInterestRequest,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            params::HomeQuery,
            params::AdminListingQuery,
            health::HealthData,
            Meta
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Classificados", description = "Listing search and management"),
        (name = "Interesses", description = "User interest in listings"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
