use chrono::Utc;
use classificados_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{Listings, users::{ActiveModel as UserActive, Column as UserCol, Entity as Users}},
    middleware::auth::{ROLE_ADMIN, ROLE_COMMON},
    repositories::{ListingRepository, NewEquipment, NewListing},
    services::auth_service::hash_password,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let admin_id = ensure_user(&orm, "admin@example.com", "admin123", ROLE_ADMIN).await?;
    let user_id = ensure_user(&orm, "user@example.com", "user123", ROLE_COMMON).await?;
    seed_listings(&orm, &config).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    orm: &DatabaseConnection,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    if let Some(existing) = Users::find()
        .filter(UserCol::Email.eq(email))
        .one(orm)
        .await?
    {
        println!("User {email} already present");
        return Ok(existing.id);
    }

    let password_hash = hash_password(password)?;
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password_hash: Set(password_hash),
        role: Set(role.to_string()),
        created_at: Set(Utc::now().into()),
    }
    .insert(orm)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(user.id)
}

async fn seed_listings(orm: &DatabaseConnection, config: &AppConfig) -> anyhow::Result<()> {
    if Listings::find().count(orm).await? > 0 {
        println!("Listings already seeded");
        return Ok(());
    }

    let placeholder = config
        .upload_root
        .join("Imagens/ClassificadoImagens/placeholder.png")
        .to_string_lossy()
        .into_owned();

    let listings = vec![
        ("Notebook Dell Inspiron 15", "dell", "notebook", 350_000, "CL-0001", "DL-15-001"),
        ("Monitor LG 24\" Full HD", "lg", "monitor", 89_900, "CL-0002", "LG-24-778"),
        ("Teclado Mecânico Redragon", "redragon", "periferico", 24_990, "CL-0003", "RD-K552"),
    ];

    let repo = ListingRepository::new(orm);
    for (name, brand, category, price, code, serial) in listings {
        repo.post(NewListing {
            name: name.to_string(),
            description: Some(format!("{name} em ótimo estado")),
            price,
            category: category.to_string(),
            brand: brand.to_string(),
            code: code.to_string(),
            serial_number: serial.to_string(),
            equipment: NewEquipment {
                name: name.to_string(),
                kind: category.to_string(),
                specifications: None,
            },
            image_paths: vec![placeholder.clone()],
        })
        .await?;
    }

    println!("Seeded listings");
    Ok(())
}
