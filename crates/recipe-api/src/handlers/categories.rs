// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Recipe category and sub-category handlers. All admin-only.

use std::sync::Arc;

use axum::extract::State;

use crate::categories::{
    Category, CategoryStore, CategoryUpdate, NewCategory, NewSubCategory, SubCategoryUpdate,
    SubCategoryView,
};
use crate::error::ApiResult;
use crate::extractors::{Auth, IdPath, ValidatedJson};
use crate::response::ApiResponse;

// =============================================================================
// Categories
// =============================================================================

/// POST /api/v1/categories
pub async fn create_category(
    State(store): State<Arc<CategoryStore>>,
    Auth(auth_ctx): Auth,
    ValidatedJson(new): ValidatedJson<NewCategory>,
) -> ApiResult<ApiResponse<Category>> {
    let category = store.create_category(new)?;

    tracing::debug!(user_id = %auth_ctx.id(), category_id = %category.id, "Category created by admin");

    Ok(ApiResponse::created(category).with_message("Category created successfully"))
}

/// GET /api/v1/categories
pub async fn list_categories(State(store): State<Arc<CategoryStore>>) -> ApiResponse<Vec<Category>> {
    ApiResponse::success(store.categories())
}

/// GET /api/v1/categories/{id}
pub async fn get_category(
    State(store): State<Arc<CategoryStore>>,
    IdPath(id): IdPath,
) -> ApiResult<ApiResponse<Category>> {
    Ok(ApiResponse::success(store.category(id)?))
}

/// PUT /api/v1/categories/{id}
pub async fn update_category(
    State(store): State<Arc<CategoryStore>>,
    IdPath(id): IdPath,
    ValidatedJson(update): ValidatedJson<CategoryUpdate>,
) -> ApiResult<ApiResponse<Category>> {
    let category = store.update_category(id, update)?;
    Ok(ApiResponse::success(category).with_message("Category updated successfully"))
}

/// DELETE /api/v1/categories/{id}
pub async fn delete_category(
    State(store): State<Arc<CategoryStore>>,
    IdPath(id): IdPath,
) -> ApiResult<ApiResponse<()>> {
    store.delete_category(id)?;
    Ok(ApiResponse::message("Category deleted successfully"))
}

/// GET /api/v1/categories/{id}/subcategories
pub async fn list_category_sub_categories(
    State(store): State<Arc<CategoryStore>>,
    IdPath(id): IdPath,
) -> ApiResult<ApiResponse<Vec<SubCategoryView>>> {
    Ok(ApiResponse::success(store.sub_categories(Some(id))?))
}

// =============================================================================
// Sub-categories
// =============================================================================

/// POST /api/v1/subcategories
pub async fn create_sub_category(
    State(store): State<Arc<CategoryStore>>,
    Auth(auth_ctx): Auth,
    ValidatedJson(new): ValidatedJson<NewSubCategory>,
) -> ApiResult<ApiResponse<SubCategoryView>> {
    let view = store.create_sub_category(new)?;

    tracing::debug!(
        user_id = %auth_ctx.id(),
        sub_category_id = %view.sub_category.id,
        "Sub-category created by admin"
    );

    Ok(ApiResponse::created(view).with_message("Sub-category created successfully"))
}

/// GET /api/v1/subcategories
pub async fn list_sub_categories(
    State(store): State<Arc<CategoryStore>>,
) -> ApiResult<ApiResponse<Vec<SubCategoryView>>> {
    Ok(ApiResponse::success(store.sub_categories(None)?))
}

/// GET /api/v1/subcategories/{id}
pub async fn get_sub_category(
    State(store): State<Arc<CategoryStore>>,
    IdPath(id): IdPath,
) -> ApiResult<ApiResponse<SubCategoryView>> {
    Ok(ApiResponse::success(store.sub_category(id)?))
}

/// PUT /api/v1/subcategories/{id}
pub async fn update_sub_category(
    State(store): State<Arc<CategoryStore>>,
    IdPath(id): IdPath,
    ValidatedJson(update): ValidatedJson<SubCategoryUpdate>,
) -> ApiResult<ApiResponse<SubCategoryView>> {
    let view = store.update_sub_category(id, update)?;
    Ok(ApiResponse::success(view).with_message("Sub-category updated successfully"))
}

/// DELETE /api/v1/subcategories/{id}
pub async fn delete_sub_category(
    State(store): State<Arc<CategoryStore>>,
    IdPath(id): IdPath,
) -> ApiResult<ApiResponse<()>> {
    store.delete_sub_category(id)?;
    Ok(ApiResponse::message("Sub-category deleted successfully"))
}
