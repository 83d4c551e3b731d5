pub mod equipment;
pub mod interests;
pub mod listing_images;
pub mod listings;
pub mod users;

pub use equipment::Entity as Equipment;
pub use interests::Entity as Interests;
pub use listing_images::Entity as ListingImages;
pub use listings::Entity as Listings;
pub use users::Entity as Users;
