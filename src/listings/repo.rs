use uuid::Uuid;

use crate::listings::repo_types::Listing;
use crate::store::{load_collection, save_collection, RecordStore, LISTINGS};

impl Listing {
    pub async fn load_all(store: &dyn RecordStore) -> anyhow::Result<Vec<Listing>> {
        load_collection(store, LISTINGS).await
    }

    pub async fn save_all(store: &dyn RecordStore, rows: &[Listing]) -> anyhow::Result<()> {
        save_collection(store, LISTINGS, rows).await
    }

    pub async fn find_by_id(store: &dyn RecordStore, id: Uuid) -> anyhow::Result<Option<Listing>> {
        let listings = Self::load_all(store).await?;
        Ok(listings.into_iter().find(|l| l.id == id))
    }

    /// All listings posted by one owner, in insertion order.
    pub async fn find_by_owner(
        store: &dyn RecordStore,
        owner_id: Uuid,
    ) -> anyhow::Result<Vec<Listing>> {
        let listings = Self::load_all(store).await?;
        Ok(listings
            .into_iter()
            .filter(|l| l.owner_id == owner_id)
            .collect())
    }

    pub async fn append(store: &dyn RecordStore, listing: &Listing) -> anyhow::Result<()> {
        let mut listings = Self::load_all(store).await?;
        listings.push(listing.clone());
        Self::save_all(store, &listings).await
    }

    /// Remove by id. Returns whether a record was actually removed.
    pub async fn remove_by_id(store: &dyn RecordStore, id: Uuid) -> anyhow::Result<bool> {
        let mut listings = Self::load_all(store).await?;
        let before = listings.len();
        listings.retain(|l| l.id != id);
        if listings.len() == before {
            return Ok(false);
        }
        Self::save_all(store, &listings).await?;
        Ok(true)
    }
}
