// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! In-memory recipe category store.
//!
//! Categories group recipes; each sub-category belongs to exactly one
//! category. A category cannot be deleted while sub-categories reference it.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult, ValidationErrors};

// =============================================================================
// Category Types
// =============================================================================

/// A recipe category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category ID.
    pub id: Uuid,
    /// Display name, unique ignoring case.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional image location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a category.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional image location.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewCategory {
    /// Validates required fields.
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = ValidationErrors::new();
        if self.name.trim().is_empty() {
            errors.add("name", "must not be empty");
        }
        errors.into_result(())
    }
}

/// Partial update of a category.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New image location.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CategoryUpdate {
    /// Validates the fields that are present.
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = ValidationErrors::new();
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            errors.add("name", "must not be empty");
        }
        errors.into_result(())
    }
}

// =============================================================================
// Sub-category Types
// =============================================================================

/// A sub-category within a recipe category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    /// Sub-category ID.
    pub id: Uuid,
    /// Parent category.
    pub category_id: Uuid,
    /// Display name, unique within the parent ignoring case.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional image location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// A sub-category together with its parent's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryView {
    /// The sub-category.
    #[serde(flatten)]
    pub sub_category: SubCategory,
    /// Name of the parent category.
    pub category_name: String,
}

/// Payload for creating a sub-category.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubCategory {
    /// Parent category.
    pub category_id: Uuid,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional image location.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Partial update of a sub-category. Setting `categoryId` moves it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryUpdate {
    /// New parent category.
    #[serde(default)]
    pub category_id: Option<Uuid>,
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New image location.
    #[serde(default)]
    pub image_url: Option<String>,
}

// =============================================================================
// CategoryStore
// =============================================================================

/// Concurrent category and sub-category store.
///
/// Writes that touch the parent/child relation (category delete,
/// sub-category create or move, renames) hold `writes`, so a sub-category
/// never points at a deleted category and names stay unique.
#[derive(Debug, Default)]
pub struct CategoryStore {
    categories: DashMap<Uuid, Category>,
    sub_categories: DashMap<Uuid, SubCategory>,
    writes: Mutex<()>,
}

impl CategoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Categories
    // -------------------------------------------------------------------------

    /// Creates a category.
    pub fn create_category(&self, new: NewCategory) -> ApiResult<Category> {
        new.validate()?;
        let name = new.name.trim().to_string();

        let _guard = self.writes.lock();
        self.ensure_category_name_free(&name, None)?;

        let now = Utc::now();
        let category = Category {
            id: Uuid::now_v7(),
            name,
            description: new.description,
            image_url: new.image_url,
            created_at: now,
            updated_at: now,
        };
        self.categories.insert(category.id, category.clone());

        tracing::info!(category_id = %category.id, "Category created");
        Ok(category)
    }

    /// Applies a partial update to a category.
    pub fn update_category(&self, id: Uuid, update: CategoryUpdate) -> ApiResult<Category> {
        update.validate()?;

        let _guard = self.writes.lock();
        if let Some(ref name) = update.name {
            self.ensure_category_name_free(name.trim(), Some(id))?;
        }

        let mut entry = self
            .categories
            .get_mut(&id)
            .ok_or_else(|| category_not_found(id))?;
        let category = entry.value_mut();
        if let Some(name) = update.name {
            category.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            category.description = Some(description);
        }
        if let Some(image_url) = update.image_url {
            category.image_url = Some(image_url);
        }
        category.updated_at = Utc::now();
        let category = category.clone();
        drop(entry);

        tracing::info!(category_id = %id, "Category updated");
        Ok(category)
    }

    /// Deletes a category. Fails while sub-categories still reference it.
    pub fn delete_category(&self, id: Uuid) -> ApiResult<Category> {
        let _guard = self.writes.lock();

        if !self.categories.contains_key(&id) {
            return Err(category_not_found(id));
        }
        let children = self
            .sub_categories
            .iter()
            .filter(|e| e.category_id == id)
            .count();
        if children > 0 {
            return Err(ApiError::conflict(format!(
                "Category has {} sub-categories; delete them first",
                children
            )));
        }

        let (_, category) = self
            .categories
            .remove(&id)
            .ok_or_else(|| category_not_found(id))?;

        tracing::info!(category_id = %id, "Category deleted");
        Ok(category)
    }

    /// Returns a category by ID.
    pub fn category(&self, id: Uuid) -> ApiResult<Category> {
        self.categories
            .get(&id)
            .map(|e| e.value().clone())
            .ok_or_else(|| category_not_found(id))
    }

    /// Returns all categories ordered by name.
    pub fn categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> =
            self.categories.iter().map(|e| e.value().clone()).collect();
        categories.sort_by_cached_key(|c| c.name.to_lowercase());
        categories
    }

    // -------------------------------------------------------------------------
    // Sub-categories
    // -------------------------------------------------------------------------

    /// Creates a sub-category under an existing category.
    pub fn create_sub_category(&self, new: NewSubCategory) -> ApiResult<SubCategoryView> {
        let mut errors = ValidationErrors::new();
        if new.name.trim().is_empty() {
            errors.add("name", "must not be empty");
        }
        errors.into_result(())?;
        let name = new.name.trim().to_string();

        let _guard = self.writes.lock();
        let parent = self.parent(new.category_id)?;
        self.ensure_sub_category_name_free(new.category_id, &name, None)?;

        let now = Utc::now();
        let sub_category = SubCategory {
            id: Uuid::now_v7(),
            category_id: new.category_id,
            name,
            description: new.description,
            image_url: new.image_url,
            created_at: now,
            updated_at: now,
        };
        self.sub_categories.insert(sub_category.id, sub_category.clone());

        tracing::info!(
            sub_category_id = %sub_category.id,
            category_id = %sub_category.category_id,
            "Sub-category created"
        );
        Ok(SubCategoryView {
            sub_category,
            category_name: parent.name,
        })
    }

    /// Applies a partial update to a sub-category.
    pub fn update_sub_category(&self, id: Uuid, update: SubCategoryUpdate) -> ApiResult<SubCategoryView> {
        if update.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            let mut errors = ValidationErrors::new();
            errors.add("name", "must not be empty");
            errors.into_result(())?;
        }

        let _guard = self.writes.lock();
        let current = self.sub_category_raw(id)?;
        let category_id = update.category_id.unwrap_or(current.category_id);
        let parent = self.parent(category_id)?;
        let name = update
            .name
            .as_deref()
            .map(str::trim)
            .unwrap_or(&current.name)
            .to_string();
        self.ensure_sub_category_name_free(category_id, &name, Some(id))?;

        let mut entry = self
            .sub_categories
            .get_mut(&id)
            .ok_or_else(|| sub_category_not_found(id))?;
        let sub_category = entry.value_mut();
        sub_category.category_id = category_id;
        sub_category.name = name;
        if let Some(description) = update.description {
            sub_category.description = Some(description);
        }
        if let Some(image_url) = update.image_url {
            sub_category.image_url = Some(image_url);
        }
        sub_category.updated_at = Utc::now();
        let sub_category = sub_category.clone();
        drop(entry);

        tracing::info!(sub_category_id = %id, "Sub-category updated");
        Ok(SubCategoryView {
            sub_category,
            category_name: parent.name,
        })
    }

    /// Deletes a sub-category.
    pub fn delete_sub_category(&self, id: Uuid) -> ApiResult<SubCategory> {
        let (_, sub_category) = self
            .sub_categories
            .remove(&id)
            .ok_or_else(|| sub_category_not_found(id))?;

        tracing::info!(sub_category_id = %id, "Sub-category deleted");
        Ok(sub_category)
    }

    /// Returns a sub-category with its parent's name.
    pub fn sub_category(&self, id: Uuid) -> ApiResult<SubCategoryView> {
        let sub_category = self.sub_category_raw(id)?;
        Ok(self.view(sub_category))
    }

    /// Returns all sub-categories, optionally restricted to one category,
    /// ordered by name.
    pub fn sub_categories(&self, category_id: Option<Uuid>) -> ApiResult<Vec<SubCategoryView>> {
        if let Some(category_id) = category_id {
            self.parent(category_id)?;
        }

        let mut views: Vec<SubCategoryView> = self
            .sub_categories
            .iter()
            .filter(|e| category_id.is_none_or(|id| e.category_id == id))
            .map(|e| self.view(e.value().clone()))
            .collect();
        views.sort_by_cached_key(|v| v.sub_category.name.to_lowercase());
        Ok(views)
    }

    /// Returns the number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Returns `true` if there are no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn sub_category_raw(&self, id: Uuid) -> ApiResult<SubCategory> {
        self.sub_categories
            .get(&id)
            .map(|e| e.value().clone())
            .ok_or_else(|| sub_category_not_found(id))
    }

    /// Resolves a parent category, reporting a missing one as a field error.
    fn parent(&self, category_id: Uuid) -> ApiResult<Category> {
        self.categories
            .get(&category_id)
            .map(|e| e.value().clone())
            .ok_or_else(|| {
                let mut errors = ValidationErrors::new();
                errors.add("categoryId", format!("unknown category {}", category_id));
                ApiError::validation_with_errors("Validation failed", errors)
            })
    }

    fn view(&self, sub_category: SubCategory) -> SubCategoryView {
        let category_name = self
            .categories
            .get(&sub_category.category_id)
            .map(|e| e.name.clone())
            .unwrap_or_default();
        SubCategoryView {
            sub_category,
            category_name,
        }
    }

    fn ensure_category_name_free(&self, name: &str, except: Option<Uuid>) -> ApiResult<()> {
        let taken = self
            .categories
            .iter()
            .any(|e| Some(e.id) != except && e.name.eq_ignore_ascii_case(name));
        if taken {
            return Err(ApiError::conflict(format!("Category '{}' already exists", name)));
        }
        Ok(())
    }

    fn ensure_sub_category_name_free(
        &self,
        category_id: Uuid,
        name: &str,
        except: Option<Uuid>,
    ) -> ApiResult<()> {
        let taken = self.sub_categories.iter().any(|e| {
            Some(e.id) != except && e.category_id == category_id && e.name.eq_ignore_ascii_case(name)
        });
        if taken {
            return Err(ApiError::conflict(format!(
                "Sub-category '{}' already exists in this category",
                name
            )));
        }
        Ok(())
    }
}

fn category_not_found(id: Uuid) -> ApiError {
    ApiError::not_found(format!("Category {}", id))
}

fn sub_category_not_found(id: Uuid) -> ApiError {
    ApiError::not_found(format!("Sub-category {}", id))
}

// =============================================================================
// Tests
// =============================================================================
