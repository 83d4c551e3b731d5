#![allow(dead_code)]

use std::path::Path;

use chrono::Utc;
use classificados_api::{
    config::AppConfig,
    entity::{Equipment, Interests, ListingImages, Listings, Users, users::ActiveModel as UserActive},
    models::ListingDetail,
    repositories::{ListingRepository, NewEquipment, NewListing},
    services::auth_service::issue_token,
    state::AppState,
};
use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema, Set,
};
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-secret";

/// Application state over a private in-memory SQLite database.
pub async fn sqlite_state(upload_root: &Path) -> AppState {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // One connection keeps every query on the same in-memory database.
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    let orm = Database::connect(options).await.unwrap();
    create_schema(&orm).await;

    let config = AppConfig {
        database_url: "sqlite::memory:".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: JWT_SECRET.into(),
        upload_root: upload_root.to_path_buf(),
        max_upload_bytes: 5 * 1024 * 1024,
    };

    AppState::new(orm, config)
}

async fn create_schema(orm: &DatabaseConnection) {
    let backend = orm.get_database_backend();
    let schema = Schema::new(backend);
    let statements = [
        backend.build(&schema.create_table_from_entity(Users)),
        backend.build(&schema.create_table_from_entity(Equipment)),
        backend.build(&schema.create_table_from_entity(Listings)),
        backend.build(&schema.create_table_from_entity(ListingImages)),
        backend.build(&schema.create_table_from_entity(Interests)),
    ];
    for statement in statements {
        orm.execute(statement).await.unwrap();
    }
}

pub async fn create_user(state: &AppState, role: &str) -> Uuid {
    let id = Uuid::new_v4();
    UserActive {
        id: Set(id),
        email: Set(format!("{id}@example.com")),
        password_hash: Set("dummy".into()),
        role: Set(role.into()),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await
    .unwrap();
    id
}

pub fn token_for(user_id: Uuid, role: &str) -> String {
    issue_token(JWT_SECRET, user_id, role).unwrap()
}

pub struct ListingSeed<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price: i64,
    pub brand: &'a str,
    pub category: &'a str,
    pub code: &'a str,
    pub serial_number: &'a str,
    pub images: usize,
}

impl Default for ListingSeed<'_> {
    fn default() -> Self {
        Self {
            name: "Notebook",
            description: None,
            price: 1000,
            brand: "dell",
            category: "notebook",
            code: "CL-1",
            serial_number: "SN-1",
            images: 1,
        }
    }
}

pub async fn seed_listing(state: &AppState, seed: ListingSeed<'_>) -> ListingDetail {
    let image_paths = (0..seed.images)
        .map(|i| format!("/srv/img/{}-{i}.png", seed.code))
        .collect();
    ListingRepository::new(&state.orm)
        .post(NewListing {
            name: seed.name.into(),
            description: seed.description.map(str::to_string),
            price: seed.price,
            category: seed.category.into(),
            brand: seed.brand.into(),
            code: seed.code.into(),
            serial_number: seed.serial_number.into(),
            equipment: NewEquipment {
                name: format!("{} equipment", seed.name),
                kind: seed.category.into(),
                specifications: Some("8GB RAM".into()),
            },
            image_paths,
        })
        .await
        .unwrap()
}
