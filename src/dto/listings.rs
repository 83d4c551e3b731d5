use axum::extract::{Multipart, multipart::MultipartError};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    repositories::{NewEquipment, NewListing},
};

/// Multipart body accepted by `POST /api/classificado`, once every required
/// field is present. Every part carrying a file name is an image, whatever
/// its field name.
#[derive(Debug, ToSchema)]
pub struct CreateListingForm {
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub category: String,
    pub brand: String,
    pub code: String,
    pub serial_number: String,
    pub equipment_name: String,
    pub equipment_kind: String,
    pub equipment_specifications: Option<String>,
    #[schema(value_type = Vec<String>)]
    pub images: Vec<UploadedFile>,
}

impl CreateListingForm {
    /// Builds the listing to persist once the images have been stored.
    pub fn into_new_listing(self, image_paths: Vec<String>) -> NewListing {
        NewListing {
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            brand: self.brand,
            code: self.code,
            serial_number: self.serial_number,
            equipment: NewEquipment {
                name: self.equipment_name,
                kind: self.equipment_kind,
                specifications: self.equipment_specifications,
            },
            image_paths,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Raw multipart content, before required fields are checked.
#[derive(Debug, Default)]
pub struct ListingFormData {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub code: Option<String>,
    pub serial_number: Option<String>,
    pub equipment_name: Option<String>,
    pub equipment_kind: Option<String>,
    pub equipment_specifications: Option<String>,
    pub files: Vec<UploadedFile>,
}

impl ListingFormData {
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = ListingFormData::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();

            if let Some(file_name) = field.file_name().map(str::to_string) {
                let bytes = field.bytes().await.map_err(multipart_error)?;
                form.files.push(UploadedFile {
                    file_name,
                    bytes: bytes.to_vec(),
                });
                continue;
            }

            let value = field.text().await.map_err(multipart_error)?;
            let slot = match name.as_str() {
                "name" => &mut form.name,
                "description" => &mut form.description,
                "price" => &mut form.price,
                "category" => &mut form.category,
                "brand" => &mut form.brand,
                "code" => &mut form.code,
                "serial_number" => &mut form.serial_number,
                "equipment_name" => &mut form.equipment_name,
                "equipment_kind" => &mut form.equipment_kind,
                "equipment_specifications" => &mut form.equipment_specifications,
                other => {
                    tracing::debug!(field = other, "ignoring unknown form field");
                    continue;
                }
            };
            *slot = Some(value);
        }

        Ok(form)
    }

    /// Checks required fields and the price. Nothing has touched the disk yet.
    pub fn validate(self) -> AppResult<CreateListingForm> {
        let price = required(self.price, "price")?;
        let price = price
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::BadRequest("price must be an integer".into()))?;

        Ok(CreateListingForm {
            name: required(self.name, "name")?,
            description: optional(self.description),
            price,
            category: required(self.category, "category")?,
            brand: required(self.brand, "brand")?,
            code: required(self.code, "code")?,
            serial_number: required(self.serial_number, "serial_number")?,
            equipment_name: required(self.equipment_name, "equipment_name")?,
            equipment_kind: required(self.equipment_kind, "equipment_kind")?,
            equipment_specifications: optional(self.equipment_specifications),
            images: self.files,
        })
    }
}

fn required(value: Option<String>, field: &str) -> AppResult<String> {
    optional(value).ok_or_else(|| AppError::BadRequest(format!("missing field `{field}`")))
}

fn optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn multipart_error(err: MultipartError) -> AppError {
    AppError::BadRequest(err.body_text())
}
