// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Banner management handlers.
//!
//! Everything except [`get_hero_banner`] is mounted behind the admin role
//! check.

use std::sync::Arc;

use axum::extract::State;

use crate::banners::{Banner, BannerStore, BannerUpdate, NewBanner};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{Auth, IdPath, ValidatedJson};
use crate::response::ApiResponse;

/// POST /api/v1/banners
pub async fn create_banner(
    State(banners): State<Arc<BannerStore>>,
    Auth(auth_ctx): Auth,
    ValidatedJson(new): ValidatedJson<NewBanner>,
) -> ApiResult<ApiResponse<Banner>> {
    let banner = banners.create(new)?;

    tracing::debug!(user_id = %auth_ctx.id(), banner_id = %banner.id, "Banner created by admin");

    Ok(ApiResponse::created(banner).with_message("Banner created successfully"))
}

/// GET /api/v1/banners
pub async fn list_banners(State(banners): State<Arc<BannerStore>>) -> ApiResponse<Vec<Banner>> {
    ApiResponse::success(banners.list())
}

/// GET /api/v1/banners/{id}
pub async fn get_banner(
    State(banners): State<Arc<BannerStore>>,
    IdPath(id): IdPath,
) -> ApiResult<ApiResponse<Banner>> {
    Ok(ApiResponse::success(banners.get(id)?))
}

/// PUT /api/v1/banners/{id}
pub async fn update_banner(
    State(banners): State<Arc<BannerStore>>,
    IdPath(id): IdPath,
    ValidatedJson(update): ValidatedJson<BannerUpdate>,
) -> ApiResult<ApiResponse<Banner>> {
    let banner = banners.update(id, update)?;
    Ok(ApiResponse::success(banner).with_message("Banner updated successfully"))
}

/// DELETE /api/v1/banners/{id}
pub async fn delete_banner(
    State(banners): State<Arc<BannerStore>>,
    IdPath(id): IdPath,
) -> ApiResult<ApiResponse<()>> {
    banners.delete(id)?;
    Ok(ApiResponse::message("Banner deleted successfully"))
}

/// POST /api/v1/banners/{id}/set-hero
pub async fn set_hero_banner(
    State(banners): State<Arc<BannerStore>>,
    IdPath(id): IdPath,
) -> ApiResult<ApiResponse<Banner>> {
    let banner = banners.set_hero(id)?;
    Ok(ApiResponse::success(banner).with_message("Hero banner updated"))
}

/// GET /api/v1/banners/hero
///
/// Public: the storefront renders this without signing in.
pub async fn get_hero_banner(State(banners): State<Arc<BannerStore>>) -> ApiResult<ApiResponse<Banner>> {
    banners
        .hero()
        .map(ApiResponse::success)
        .ok_or_else(|| ApiError::not_found("Hero banner"))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthContext, Claims, Identity, Role};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    fn store() -> Arc<BannerStore> {
        Arc::new(BannerStore::new())
    }

    fn admin() -> Auth {
        Auth(AuthContext::from_identity(Identity::verified(Claims::new(
            "u1",
            "a@example.com",
            Role::Admin,
            3600,
        ))))
    }

    fn new_banner() -> NewBanner {
        NewBanner {
            title: "Autumn soups".into(),
            subtitle: Some("Warm up".into()),
            image_url: "/images/soups.png".into(),
            link_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_hero() {
        let store = store();

        let response = create_banner(State(store.clone()), admin(), ValidatedJson(new_banner()))
            .await
            .unwrap();
        let id = response.data.as_ref().unwrap().id;
        assert_eq!(response.into_response().status(), StatusCode::CREATED);

        assert!(get_hero_banner(State(store.clone())).await.is_err());

        set_hero_banner(State(store.clone()), IdPath(id)).await.unwrap();
        let hero = get_hero_banner(State(store)).await.unwrap();
        assert_eq!(hero.data.unwrap().id, id);
    }

    #[tokio::test]
    async fn test_get_unknown_banner() {
        let store = store();
        let err = get_banner(State(store), IdPath(uuid::Uuid::now_v7()))
            .await
            .err()
            .unwrap();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_banner() {
        let store = store();
        let banner = store.create(new_banner()).unwrap();

        delete_banner(State(store.clone()), IdPath(banner.id)).await.unwrap();
        assert!(list_banners(State(store)).await.data.unwrap().is_empty());
    }
}
