use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction,
    EntityTrait, LoaderTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity::{
        equipment::{ActiveModel as EquipmentActive, Entity as Equipment, Model as EquipmentModel},
        listing_images::{
            ActiveModel as ImageActive, Column as ImageCol, Entity as ListingImages,
            Model as ImageModel,
        },
        listings::{ActiveModel as ListingActive, Column, Entity as Listings, Model as ListingModel},
    },
    error::{AppError, AppResult},
    models::{Equipment as EquipmentDto, ListingDetail, ListingHome, ListingImage},
    routes::params::{AdminSort, SortDirection},
};

pub const NO_IMAGE_MESSAGE: &str = "Favor informar ao menos uma imagem.";

#[derive(Debug, Clone)]
pub struct NewEquipment {
    pub name: String,
    pub kind: String,
    pub specifications: Option<String>,
}

/// A listing ready to be persisted. `image_paths` keeps upload order, which
/// becomes the image position.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub category: String,
    pub brand: String,
    pub code: String,
    pub serial_number: String,
    pub equipment: NewEquipment,
    pub image_paths: Vec<String>,
}

pub struct ListingRepository<'a> {
    conn: &'a DatabaseConnection,
}

impl<'a> ListingRepository<'a> {
    pub fn new(conn: &'a DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Home page search: text match on name/description, exact brand and
    /// category filters, ordered by price.
    pub async fn get_list_home(
        &self,
        search: Option<&str>,
        brand: Option<&str>,
        category: Option<&str>,
        ascending: bool,
    ) -> AppResult<Vec<ListingHome>> {
        let mut condition = Condition::all();

        if let Some(term) = non_empty(search) {
            condition = condition.add(contains_ignore_case(term, &[Column::Name, Column::Description]));
        }
        if let Some(brand) = non_empty(brand) {
            condition = condition.add(Column::Brand.eq(brand));
        }
        if let Some(category) = non_empty(category) {
            condition = condition.add(Column::Category.eq(category));
        }

        let mut finder = Listings::find().filter(condition);
        finder = if ascending {
            finder.order_by_asc(Column::Price)
        } else {
            finder.order_by_desc(Column::Price)
        };

        let listings = finder.order_by_asc(Column::Id).all(self.conn).await?;
        if listings.is_empty() {
            return Ok(Vec::new());
        }
        let images = listings
            .load_many(
                ListingImages::find().order_by_asc(ImageCol::Position),
                self.conn,
            )
            .await?;

        let items = listings
            .into_iter()
            .zip(images)
            .map(|(listing, images)| ListingHome {
                id: listing.id,
                name: listing.name,
                image: images
                    .into_iter()
                    .min_by_key(|image| image.position)
                    .map(|image| image.path),
                price: listing.price,
            })
            .collect();

        Ok(items)
    }

    /// Admin search over name, description, code and serial number.
    pub async fn get_list_adm(
        &self,
        search: Option<&str>,
        sort: AdminSort,
    ) -> AppResult<Vec<ListingDetail>> {
        let mut finder = Listings::find();

        if let Some(term) = non_empty(search) {
            finder = finder.filter(contains_ignore_case(
                term,
                &[
                    Column::Name,
                    Column::Description,
                    Column::Code,
                    Column::SerialNumber,
                ],
            ));
        }

        let keys = [
            (Column::Name, sort.name),
            (Column::Code, sort.code),
            (Column::SerialNumber, sort.serial_number),
        ];
        for (column, direction) in keys {
            finder = match direction {
                SortDirection::Ascending => finder.order_by_asc(column),
                SortDirection::Descending => finder.order_by_desc(column),
                SortDirection::Unspecified => finder,
            };
        }

        let listings = finder.order_by_asc(Column::Id).all(self.conn).await?;
        self.hydrate(listings).await
    }

    pub async fn get_page_product(&self, id: Uuid) -> AppResult<Option<ListingDetail>> {
        let Some(listing) = Listings::find_by_id(id).one(self.conn).await? else {
            return Ok(None);
        };
        Ok(self.hydrate(vec![listing]).await?.pop())
    }

    /// Persists the equipment, the listing and every image in one transaction.
    pub async fn post(&self, new: NewListing) -> AppResult<ListingDetail> {
        if new.image_paths.is_empty() {
            return Err(AppError::Validation(NO_IMAGE_MESSAGE.into()));
        }

        let txn = self.conn.begin().await?;
        match insert_graph(&txn, new).await {
            Ok(detail) => {
                txn.commit().await?;
                Ok(detail)
            }
            Err(err) => {
                txn.rollback().await?;
                Err(err)
            }
        }
    }

    /// Loads equipment and images for each listing, keeping the input order.
    pub(crate) async fn hydrate(&self, listings: Vec<ListingModel>) -> AppResult<Vec<ListingDetail>> {
        if listings.is_empty() {
            return Ok(Vec::new());
        }

        let equipment = listings.load_one(Equipment, self.conn).await?;
        let images = listings
            .load_many(
                ListingImages::find().order_by_asc(ImageCol::Position),
                self.conn,
            )
            .await?;

        let details = listings
            .into_iter()
            .zip(equipment)
            .zip(images)
            .map(|((listing, equipment), images)| listing_detail(listing, equipment, images))
            .collect();

        Ok(details)
    }
}

/// Inserts equipment, listing and images on `txn`. The caller commits.
async fn insert_graph(txn: &DatabaseTransaction, new: NewListing) -> AppResult<ListingDetail> {
    let now = Utc::now();

    let equipment = EquipmentActive {
        id: Set(Uuid::new_v4()),
        name: Set(new.equipment.name),
        kind: Set(new.equipment.kind),
        specifications: Set(new.equipment.specifications),
    }
    .insert(txn)
    .await?;

    let listing = ListingActive {
        id: Set(Uuid::new_v4()),
        name: Set(new.name),
        description: Set(new.description),
        price: Set(new.price),
        category: Set(new.category),
        brand: Set(new.brand),
        code: Set(new.code),
        serial_number: Set(new.serial_number),
        equipment_id: Set(equipment.id),
        created_at: Set(now.into()),
    }
    .insert(txn)
    .await?;

    let mut images = Vec::with_capacity(new.image_paths.len());
    for (position, path) in new.image_paths.into_iter().enumerate() {
        let image = ImageActive {
            id: Set(Uuid::new_v4()),
            listing_id: Set(listing.id),
            path: Set(path),
            position: Set(position as i32),
            created_at: Set(now.into()),
        }
        .insert(txn)
        .await?;
        images.push(image);
    }

    Ok(listing_detail(listing, Some(equipment), images))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// `LOWER(col) LIKE '%term%' ESCAPE '\'` over any of the given columns.
/// `%` and `_` in `term` match themselves.
fn contains_ignore_case(term: &str, columns: &[Column]) -> Condition {
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
    columns.iter().fold(Condition::any(), |condition, column| {
        condition.add(
            Expr::expr(Func::lower(Expr::col(*column)))
                .like(LikeExpr::new(pattern.clone()).escape('\\')),
        )
    })
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn listing_detail(
    listing: ListingModel,
    equipment: Option<EquipmentModel>,
    mut images: Vec<ImageModel>,
) -> ListingDetail {
    images.sort_by_key(|image| image.position);
    ListingDetail {
        id: listing.id,
        name: listing.name,
        description: listing.description,
        price: listing.price,
        category: listing.category,
        brand: listing.brand,
        code: listing.code,
        serial_number: listing.serial_number,
        created_at: listing.created_at.with_timezone(&Utc),
        equipment: equipment.map(equipment_from_entity),
        images: images.into_iter().map(image_from_entity).collect(),
    }
}

fn equipment_from_entity(model: EquipmentModel) -> EquipmentDto {
    EquipmentDto {
        id: model.id,
        name: model.name,
        kind: model.kind,
        specifications: model.specifications,
    }
}

fn image_from_entity(model: ImageModel) -> ListingImage {
    ListingImage {
        id: model.id,
        listing_id: model.listing_id,
        path: model.path,
        position: model.position,
    }
}
