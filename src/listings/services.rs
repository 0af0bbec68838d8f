use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::auth::PublicAccount;
use crate::error::{Error, Result};
use crate::listings::dto::{CreateListingRequest, ListingFilter};
use crate::listings::repo_types::{Listing, ListingKind, CATEGORIES, CONDITIONS};
use crate::state::AppState;

/// Create a listing owned by the acting account. Approved members only.
pub async fn create_listing(
    state: &AppState,
    owner: &PublicAccount,
    req: CreateListingRequest,
) -> Result<Listing> {
    if !owner.is_authenticated() {
        return Err(Error::PermissionDenied("approval required to post listings"));
    }

    let title = req.title.trim();
    let description = req.description.trim();
    if title.is_empty() {
        return Err(Error::validation("Title is required"));
    }
    if description.is_empty() {
        return Err(Error::validation("Description is required"));
    }
    if !req.price.is_finite() || req.price < 0.0 {
        return Err(Error::validation("Price must be zero or positive"));
    }
    if !CATEGORIES.contains(&req.category.as_str()) {
        return Err(Error::validation(format!(
            "Unknown category: {}",
            req.category
        )));
    }

    // Shared items carry no condition, whatever the form submitted.
    let condition = match req.kind {
        ListingKind::Share => None,
        _ => req.condition,
    };
    if let Some(cond) = &condition {
        if !CONDITIONS.contains(&cond.as_str()) {
            return Err(Error::validation(format!("Unknown condition: {cond}")));
        }
    }

    let listing = Listing {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: description.to_string(),
        price: req.price,
        kind: req.kind,
        category: req.category,
        condition,
        owner_id: owner.id,
        owner_name: owner.name.clone(),
        created_at: OffsetDateTime::now_utc(),
        image: req.image,
    };
    Listing::append(state.store.as_ref(), &listing).await?;
    info!(listing_id = %listing.id, owner_id = %owner.id, "listing created");
    Ok(listing)
}

pub async fn list_listings(state: &AppState) -> Result<Vec<Listing>> {
    Ok(Listing::load_all(state.store.as_ref()).await?)
}

/// The dashboard view: only the acting account's own listings.
pub async fn listings_for_owner(state: &AppState, owner_id: Uuid) -> Result<Vec<Listing>> {
    Ok(Listing::find_by_owner(state.store.as_ref(), owner_id).await?)
}

pub async fn get_listing(state: &AppState, id: Uuid) -> Result<Listing> {
    Listing::find_by_id(state.store.as_ref(), id)
        .await?
        .ok_or(Error::NotFound("listing"))
}

/// Filter pipeline, in order: case-insensitive substring over title and
/// description, exact category ("All Categories" skips), exact kind
/// ("all" skips). Pure and deterministic.
pub fn filter_listings(listings: &[Listing], filter: &ListingFilter) -> Vec<Listing> {
    let needle = filter.search_term.trim().to_lowercase();
    listings
        .iter()
        .filter(|l| {
            needle.is_empty()
                || l.title.to_lowercase().contains(&needle)
                || l.description.to_lowercase().contains(&needle)
        })
        .filter(|l| filter.category == "All Categories" || l.category == filter.category)
        .filter(|l| filter.kind == "all" || l.kind.as_str() == filter.kind)
        .cloned()
        .collect()
}

/// Delete a listing: the owner may remove their own, admins may remove any.
pub async fn delete_listing(state: &AppState, actor: &PublicAccount, id: Uuid) -> Result<()> {
    let listing = get_listing(state, id).await?;
    if listing.owner_id != actor.id && !actor.is_admin() {
        return Err(Error::PermissionDenied("only the owner can delete a listing"));
    }
    Listing::remove_by_id(state.store.as_ref(), id).await?;
    info!(listing_id = %id, actor_id = %actor.id, "listing deleted");
    Ok(())
}
