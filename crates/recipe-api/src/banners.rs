// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! In-memory banner store.
//!
//! Promotional banners shown on the storefront. At most one banner is the
//! hero banner at any time.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult, ValidationErrors};

// =============================================================================
// Types
// =============================================================================

/// A promotional banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    /// Banner ID.
    pub id: Uuid,
    /// Headline.
    pub title: String,
    /// Optional secondary text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Location of the banner image.
    pub image_url: String,
    /// Optional click-through target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    /// Whether this is the current hero banner.
    pub is_hero: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a banner.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBanner {
    /// Headline.
    pub title: String,
    /// Optional secondary text.
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Location of the banner image.
    pub image_url: String,
    /// Optional click-through target.
    #[serde(default)]
    pub link_url: Option<String>,
}

impl NewBanner {
    /// Validates required fields.
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = ValidationErrors::new();
        if self.title.trim().is_empty() {
            errors.add("title", "must not be empty");
        }
        if self.image_url.trim().is_empty() {
            errors.add("imageUrl", "must not be empty");
        }
        errors.into_result(())
    }
}

/// Partial update of a banner. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerUpdate {
    /// New headline.
    #[serde(default)]
    pub title: Option<String>,
    /// New secondary text.
    #[serde(default)]
    pub subtitle: Option<String>,
    /// New image location.
    #[serde(default)]
    pub image_url: Option<String>,
    /// New click-through target.
    #[serde(default)]
    pub link_url: Option<String>,
}

impl BannerUpdate {
    /// Validates the fields that are present.
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = ValidationErrors::new();
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            errors.add("title", "must not be empty");
        }
        if self.image_url.as_deref().is_some_and(|u| u.trim().is_empty()) {
            errors.add("imageUrl", "must not be empty");
        }
        errors.into_result(())
    }

    fn apply(self, banner: &mut Banner) {
        if let Some(title) = self.title {
            banner.title = title;
        }
        if let Some(subtitle) = self.subtitle {
            banner.subtitle = Some(subtitle);
        }
        if let Some(image_url) = self.image_url {
            banner.image_url = image_url;
        }
        if let Some(link_url) = self.link_url {
            banner.link_url = Some(link_url);
        }
        banner.updated_at = Utc::now();
    }
}

// =============================================================================
// BannerStore
// =============================================================================

/// Concurrent banner store.
///
/// The hero pointer is guarded separately; every operation that reads or
/// changes it takes the lock so the single-hero invariant holds.
#[derive(Debug, Default)]
pub struct BannerStore {
    banners: DashMap<Uuid, Banner>,
    hero: Mutex<Option<Uuid>>,
}

impl BannerStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a banner.
    pub fn create(&self, new: NewBanner) -> ApiResult<Banner> {
        new.validate()?;

        let now = Utc::now();
        let banner = Banner {
            id: Uuid::now_v7(),
            title: new.title,
            subtitle: new.subtitle,
            image_url: new.image_url,
            link_url: new.link_url,
            is_hero: false,
            created_at: now,
            updated_at: now,
        };
        self.banners.insert(banner.id, banner.clone());

        tracing::info!(banner_id = %banner.id, "Banner created");
        Ok(banner)
    }

    /// Applies a partial update.
    pub fn update(&self, id: Uuid, update: BannerUpdate) -> ApiResult<Banner> {
        update.validate()?;

        let mut entry = self
            .banners
            .get_mut(&id)
            .ok_or_else(|| ApiError::not_found(format!("Banner {}", id)))?;
        update.apply(entry.value_mut());
        let banner = entry.value().clone();
        drop(entry);

        tracing::info!(banner_id = %id, "Banner updated");
        Ok(banner)
    }

    /// Deletes a banner. Deleting the hero leaves no hero.
    pub fn delete(&self, id: Uuid) -> ApiResult<Banner> {
        let mut hero = self.hero.lock();
        let (_, banner) = self
            .banners
            .remove(&id)
            .ok_or_else(|| ApiError::not_found(format!("Banner {}", id)))?;

        if *hero == Some(id) {
            *hero = None;
            tracing::info!(banner_id = %id, "Hero banner deleted, no hero remains");
        } else {
            tracing::info!(banner_id = %id, "Banner deleted");
        }
        Ok(banner)
    }

    /// Returns a banner by ID.
    pub fn get(&self, id: Uuid) -> ApiResult<Banner> {
        self.banners
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ApiError::not_found(format!("Banner {}", id)))
    }

    /// Returns all banners, newest first.
    pub fn list(&self) -> Vec<Banner> {
        let mut banners: Vec<Banner> = self.banners.iter().map(|e| e.value().clone()).collect();
        banners.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        banners
    }

    /// Makes the given banner the hero, demoting the previous one.
    pub fn set_hero(&self, id: Uuid) -> ApiResult<Banner> {
        let mut hero = self.hero.lock();

        if !self.banners.contains_key(&id) {
            return Err(ApiError::not_found(format!("Banner {}", id)));
        }

        if let Some(previous) = hero.take() {
            if let Some(mut banner) = self.banners.get_mut(&previous) {
                banner.is_hero = false;
            }
        }

        let mut entry = self
            .banners
            .get_mut(&id)
            .ok_or_else(|| ApiError::not_found(format!("Banner {}", id)))?;
        entry.is_hero = true;
        entry.updated_at = Utc::now();
        let banner = entry.value().clone();
        drop(entry);

        *hero = Some(id);
        tracing::info!(banner_id = %id, "Hero banner set");
        Ok(banner)
    }

    /// Returns the current hero banner.
    pub fn hero(&self) -> Option<Banner> {
        let hero = self.hero.lock();
        hero.and_then(|id| self.banners.get(&id).map(|e| e.value().clone()))
    }

    /// Returns the number of banners.
    pub fn len(&self) -> usize {
        self.banners.len()
    }

    /// Returns `true` if there are no banners.
    pub fn is_empty(&self) -> bool {
        self.banners.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn new_banner(title: &str) -> NewBanner {
        NewBanner {
            title: title.to_string(),
            subtitle: None,
            image_url: format!("/images/{}.png", title),
            link_url: None,
        }
    }

    #[test]
    fn test_create_and_get() {
        let store = BannerStore::new();
        let banner = store.create(new_banner("spring")).unwrap();

        assert_eq!(store.get(banner.id).unwrap(), banner);
        assert!(!banner.is_hero);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_create_validates() {
        let store = BannerStore::new();
        let mut bad = new_banner("x");
        bad.title = "   ".into();

        assert!(matches!(store.create(bad), Err(ApiError::Validation { .. })));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update() {
        let store = BannerStore::new();
        let banner = store.create(new_banner("spring")).unwrap();

        let updated = store
            .update(
                banner.id,
                BannerUpdate {
                    title: Some("summer".into()),
                    link_url: Some("/recipes/summer".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.title, "summer");
        assert_eq!(updated.image_url, banner.image_url);
        assert_eq!(updated.link_url.as_deref(), Some("/recipes/summer"));
        assert!(matches!(
            store.update(Uuid::now_v7(), BannerUpdate::default()),
            Err(ApiError::NotFound { .. })
        ));
    }

    #[test]
    fn test_single_hero() {
        let store = BannerStore::new();
        let first = store.create(new_banner("first")).unwrap();
        let second = store.create(new_banner("second")).unwrap();

        assert!(store.hero().is_none());

        store.set_hero(first.id).unwrap();
        assert_eq!(store.hero().unwrap().id, first.id);

        store.set_hero(second.id).unwrap();
        assert_eq!(store.hero().unwrap().id, second.id);
        assert!(!store.get(first.id).unwrap().is_hero);
        assert_eq!(store.list().iter().filter(|b| b.is_hero).count(), 1);
    }

    #[test]
    fn test_set_hero_unknown() {
        let store = BannerStore::new();
        let banner = store.create(new_banner("kept")).unwrap();
        store.set_hero(banner.id).unwrap();

        assert!(store.set_hero(Uuid::now_v7()).is_err());
        assert_eq!(store.hero().unwrap().id, banner.id);
    }

    #[test]
    fn test_delete_hero_clears_it() {
        let store = BannerStore::new();
        let banner = store.create(new_banner("gone")).unwrap();
        store.set_hero(banner.id).unwrap();

        store.delete(banner.id).unwrap();

        assert!(store.hero().is_none());
        assert!(store.get(banner.id).is_err());
        assert!(store.delete(banner.id).is_err());
    }

    #[test]
    fn test_list_newest_first() {
        let store = BannerStore::new();
        let a = store.create(new_banner("a")).unwrap();
        let b = store.create(new_banner("b")).unwrap();

        let ids: Vec<Uuid> = store.list().into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }
}
