use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::{
    entity::{
        interests::{ActiveModel, Column, Entity as Interests, Model as InterestModel},
        listings::Entity as Listings,
    },
    error::AppResult,
    models::{Interest, InterestWithListing},
    repositories::ListingRepository,
};

#[derive(Debug, Clone)]
pub struct NewInterest {
    pub user_id: Uuid,
    pub listing_id: Uuid,
}

pub struct InterestRepository<'a> {
    conn: &'a DatabaseConnection,
}

impl<'a> InterestRepository<'a> {
    pub fn new(conn: &'a DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Interests of one user, each with its listing, equipment and images.
    pub async fn get_list_interesse(&self, user_id: Uuid) -> AppResult<Vec<InterestWithListing>> {
        let interests = Interests::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(self.conn)
            .await?;
        if interests.is_empty() {
            return Ok(Vec::new());
        }

        let listings = interests.load_one(Listings, self.conn).await?;
        let (interests, listings): (Vec<_>, Vec<_>) = interests
            .into_iter()
            .zip(listings)
            .filter_map(|(interest, listing)| listing.map(|listing| (interest, listing)))
            .unzip();

        let details = ListingRepository::new(self.conn).hydrate(listings).await?;

        let items = interests
            .into_iter()
            .zip(details)
            .map(|(interest, listing)| InterestWithListing {
                id: interest.id,
                user_id: interest.user_id,
                listing_id: interest.listing_id,
                created_at: interest.created_at.with_timezone(&Utc),
                listing,
            })
            .collect();

        Ok(items)
    }

    pub async fn get(&self) -> AppResult<Vec<Interest>> {
        let items = Interests::find()
            .order_by_asc(Column::CreatedAt)
            .all(self.conn)
            .await?
            .into_iter()
            .map(interest_from_entity)
            .collect();
        Ok(items)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Interest>> {
        let interest = Interests::find_by_id(id)
            .one(self.conn)
            .await?
            .map(interest_from_entity);
        Ok(interest)
    }

    pub async fn post(&self, new: NewInterest) -> AppResult<Interest> {
        let interest = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(new.user_id),
            listing_id: Set(new.listing_id),
            created_at: Set(Utc::now().into()),
        }
        .insert(self.conn)
        .await?;
        Ok(interest_from_entity(interest))
    }

    /// Full replace: every column of the record is written.
    pub async fn put(&self, interest: Interest) -> AppResult<Interest> {
        let updated = ActiveModel {
            id: Set(interest.id),
            user_id: Set(interest.user_id),
            listing_id: Set(interest.listing_id),
            created_at: Set(interest.created_at.into()),
        }
        .update(self.conn)
        .await?;
        Ok(interest_from_entity(updated))
    }

    /// Removes a record the caller has already fetched and hands it back.
    pub async fn delete(&self, interest: Interest) -> AppResult<Interest> {
        Interests::delete_by_id(interest.id).exec(self.conn).await?;
        Ok(interest)
    }
}

fn interest_from_entity(model: InterestModel) -> Interest {
    Interest {
        id: model.id,
        user_id: model.user_id,
        listing_id: model.listing_id,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
