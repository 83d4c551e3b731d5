mod common;

use axum::http::StatusCode;
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use classificados_api::{
    app::build_app,
    middleware::auth::{ROLE_ADMIN, ROLE_COMMON},
    state::AppState,
    upload::LISTING_IMAGE_FOLDER,
};
use common::{ListingSeed, create_user, seed_listing, sqlite_state, token_for};
use sea_orm::ConnectionTrait;
use serde_json::{Value, json};
use uuid::Uuid;

async fn server(state: AppState) -> TestServer {
    TestServer::new(build_app(state)).unwrap()
}

fn listing_form() -> MultipartForm {
    MultipartForm::new()
        .add_text("name", "Notebook Dell")
        .add_text("description", "Tela 15 polegadas")
        .add_text("price", "350000")
        .add_text("category", "notebook")
        .add_text("brand", "dell")
        .add_text("code", "CL-01")
        .add_text("serial_number", "SN-01")
        .add_text("equipment_name", "Inspiron 15")
        .add_text("equipment_kind", "notebook")
}

#[tokio::test]
async fn unknown_listing_is_404_with_fixed_message() {
    let dir = tempfile::tempdir().unwrap();
    let state = sqlite_state(dir.path()).await;
    let user = create_user(&state, ROLE_COMMON).await;
    let server = server(state).await;

    let response = server
        .get(&format!("/api/classificado/{}", Uuid::new_v4()))
        .authorization_bearer(token_for(user, ROLE_COMMON))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body = response.json::<Value>();
    assert_eq!(body["message"], "Classificado não encontrado.");
}

#[tokio::test]
async fn requests_without_token_are_unauthorized() {
    let dir = tempfile::tempdir().unwrap();
    let state = sqlite_state(dir.path()).await;
    let server = server(state).await;

    let response = server.get("/api/classificado").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn common_user_is_rejected_from_admin_listing() {
    let dir = tempfile::tempdir().unwrap();
    let state = sqlite_state(dir.path()).await;
    let user = create_user(&state, ROLE_COMMON).await;
    let token = token_for(user, ROLE_COMMON);
    let server = server(state).await;

    let response = server
        .get("/api/classificado/adm?ordNomeE=true")
        .authorization_bearer(&token)
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = server
        .post("/api/classificado/adm")
        .authorization_bearer(&token)
        .multipart(listing_form())
        .await;
    assert!(response.status_code().is_client_error());
}

#[tokio::test]
async fn create_without_files_is_a_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let state = sqlite_state(dir.path()).await;
    let admin = create_user(&state, ROLE_ADMIN).await;
    let server = server(state).await;

    let response = server
        .post("/api/classificado")
        .authorization_bearer(token_for(admin, ROLE_ADMIN))
        .multipart(listing_form())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["message"], "Favor informar ao menos uma imagem.");
}

#[tokio::test]
async fn common_user_cannot_create_listing_even_with_valid_payload() {
    let dir = tempfile::tempdir().unwrap();
    let state = sqlite_state(dir.path()).await;
    let user = create_user(&state, ROLE_COMMON).await;
    let server = server(state).await;

    let form = listing_form().add_part(
        "images",
        Part::bytes(b"png-bytes".to_vec())
            .file_name("foto.png")
            .mime_type("image/png"),
    );
    let response = server
        .post("/api/classificado")
        .authorization_bearer(token_for(user, ROLE_COMMON))
        .multipart(form)
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert!(!dir.path().join(LISTING_IMAGE_FOLDER).exists());
}

#[tokio::test]
async fn admin_creates_listing_with_uploaded_images() {
    let dir = tempfile::tempdir().unwrap();
    let state = sqlite_state(dir.path()).await;
    let admin = create_user(&state, ROLE_ADMIN).await;
    let token = token_for(admin, ROLE_ADMIN);
    let server = server(state).await;

    let form = listing_form()
        .add_part(
            "images",
            Part::bytes(b"first".to_vec())
                .file_name("frente.png")
                .mime_type("image/png"),
        )
        .add_part(
            "images",
            Part::bytes(b"second".to_vec())
                .file_name("verso.png")
                .mime_type("image/png"),
        );

    let response = server
        .post("/api/classificado")
        .authorization_bearer(&token)
        .multipart(form)
        .await;
    response.assert_status_ok();

    let created = response.json::<Value>();
    let images = created["data"]["images"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    let stored = dir.path().join(LISTING_IMAGE_FOLDER).join("frente.png");
    assert_eq!(images[0]["path"], stored.to_string_lossy().as_ref());
    assert_eq!(std::fs::read(&stored).unwrap(), b"first");
    assert_eq!(created["data"]["equipment"]["name"], "Inspiron 15");

    let id = created["data"]["id"].as_str().unwrap();
    let response = server
        .get(&format!("/api/classificado/{id}"))
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();
    let fetched = response.json::<Value>();
    assert_eq!(fetched["data"]["images"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn empty_uploads_alone_do_not_create_a_listing() {
    let dir = tempfile::tempdir().unwrap();
    let state = sqlite_state(dir.path()).await;
    let admin = create_user(&state, ROLE_ADMIN).await;
    let server = server(state).await;

    let form = listing_form().add_part(
        "images",
        Part::bytes(Vec::new())
            .file_name("vazio.png")
            .mime_type("image/png"),
    );
    let response = server
        .post("/api/classificado")
        .authorization_bearer(token_for(admin, ROLE_ADMIN))
        .multipart(form)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_fields_are_rejected_before_any_image_is_stored() {
    let dir = tempfile::tempdir().unwrap();
    let state = sqlite_state(dir.path()).await;
    let admin = create_user(&state, ROLE_ADMIN).await;
    let server = server(state).await;

    let form = MultipartForm::new().add_text("price", "350000").add_part(
        "images",
        Part::bytes(b"png-bytes".to_vec())
            .file_name("orfa.png")
            .mime_type("image/png"),
    );
    let response = server
        .post("/api/classificado")
        .authorization_bearer(token_for(admin, ROLE_ADMIN))
        .multipart(form)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(!dir.path().join(LISTING_IMAGE_FOLDER).join("orfa.png").exists());
}

#[tokio::test]
async fn stored_images_are_removed_when_listing_cannot_be_saved() {
    let dir = tempfile::tempdir().unwrap();
    let state = sqlite_state(dir.path()).await;
    let admin = create_user(&state, ROLE_ADMIN).await;
    state
        .orm
        .execute_unprepared("DROP TABLE listing_images")
        .await
        .unwrap();
    let server = server(state).await;

    let form = listing_form().add_part(
        "images",
        Part::bytes(b"png-bytes".to_vec())
            .file_name("falha.png")
            .mime_type("image/png"),
    );
    let response = server
        .post("/api/classificado")
        .authorization_bearer(token_for(admin, ROLE_ADMIN))
        .multipart(form)
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!dir.path().join(LISTING_IMAGE_FOLDER).join("falha.png").exists());
}

#[tokio::test]
async fn home_search_returns_projection_sorted_by_price() {
    let dir = tempfile::tempdir().unwrap();
    let state = sqlite_state(dir.path()).await;
    let user = create_user(&state, ROLE_COMMON).await;
    for (code, price) in [("A", 300), ("B", 100), ("C", 200)] {
        seed_listing(
            &state,
            ListingSeed {
                name: "Notebook Dell",
                code,
                price,
                ..Default::default()
            },
        )
        .await;
    }
    let server = server(state).await;

    let response = server
        .get("/api/classificado?busca=DELL&marca=dell&ordenacao=true")
        .authorization_bearer(token_for(user, ROLE_COMMON))
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    let prices: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["price"].as_i64().unwrap())
        .collect();
    assert_eq!(prices, vec![100, 200, 300]);
    assert_eq!(body["meta"]["total"], 3);
    assert!(body["data"][0].get("image").is_some());
    assert!(body["data"][0].get("brand").is_none());
}

#[tokio::test]
async fn interest_lifecycle_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let state = sqlite_state(dir.path()).await;
    let user = create_user(&state, ROLE_COMMON).await;
    let stranger = create_user(&state, ROLE_COMMON).await;
    let listing = seed_listing(&state, ListingSeed::default()).await;
    let token = token_for(user, ROLE_COMMON);
    let server = server(state).await;

    let response = server
        .post("/api/interesse")
        .authorization_bearer(&token)
        .json(&json!({ "listing_id": listing.id }))
        .await;
    response.assert_status_ok();
    let interest_id = response.json::<Value>()["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = server
        .get("/api/interesse/usuario")
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();
    let mine = response.json::<Value>();
    assert_eq!(mine["data"].as_array().unwrap().len(), 1);
    assert_eq!(mine["data"][0]["listing"]["id"], listing.id.to_string());

    let response = server
        .delete(&format!("/api/interesse/{interest_id}"))
        .authorization_bearer(token_for(stranger, ROLE_COMMON))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = server
        .delete(&format!("/api/interesse/{interest_id}"))
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();

    let response = server
        .get(&format!("/api/interesse/{interest_id}"))
        .authorization_bearer(&token)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "Interesse não encontrado.");
}

#[tokio::test]
async fn interest_for_unknown_listing_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let state = sqlite_state(dir.path()).await;
    let user = create_user(&state, ROLE_COMMON).await;
    let server = server(state).await;

    let response = server
        .post("/api/interesse")
        .authorization_bearer(token_for(user, ROLE_COMMON))
        .json(&json!({ "listing_id": Uuid::new_v4() }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "Classificado não encontrado.");
}

#[tokio::test]
async fn admin_replacing_interest_with_unknown_user_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let state = sqlite_state(dir.path()).await;
    let user = create_user(&state, ROLE_COMMON).await;
    let admin = create_user(&state, ROLE_ADMIN).await;
    let listing = seed_listing(&state, ListingSeed::default()).await;
    let server = server(state).await;

    let response = server
        .post("/api/interesse")
        .authorization_bearer(token_for(user, ROLE_COMMON))
        .json(&json!({ "listing_id": listing.id }))
        .await;
    response.assert_status_ok();
    let interest_id = response.json::<Value>()["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let admin_token = token_for(admin, ROLE_ADMIN);
    let response = server
        .put(&format!("/api/interesse/{interest_id}"))
        .authorization_bearer(&admin_token)
        .json(&json!({ "user_id": Uuid::new_v4(), "listing_id": listing.id }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "Usuário não encontrado.");

    let response = server
        .get(&format!("/api/interesse/{interest_id}"))
        .authorization_bearer(&admin_token)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["user_id"], user.to_string());
}
