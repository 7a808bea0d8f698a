// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Declarative route bindings.
//!
//! Every endpoint is listed once in [`ROUTES`] together with the access it
//! requires. The router is built by folding that table, so an endpoint
//! cannot be mounted without the checks it declares.

use std::fmt;

use axum::{
    Router,
    routing::{MethodFilter, MethodRouter, on},
};
use tower::ServiceBuilder;

use crate::auth::{Role, RoleRequirement};
use crate::handlers;
use crate::middleware::{AuthLayer, RoleLayer};
use crate::state::AppState;

// =============================================================================
// Types
// =============================================================================

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Returns the axum method filter.
    pub fn filter(self) -> MethodFilter {
        match self {
            HttpMethod::Get => MethodFilter::GET,
            HttpMethod::Post => MethodFilter::POST,
            HttpMethod::Put => MethodFilter::PUT,
            HttpMethod::Delete => MethodFilter::DELETE,
        }
    }

    /// Returns the method name.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access an endpoint requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No credential needed.
    Public,
    /// Any verified credential.
    Authenticated,
    /// A verified credential whose role is in the set.
    Roles(&'static [Role]),
}

impl Access {
    /// Admin-only access.
    pub const ADMIN: Access = Access::Roles(&[Role::Admin]);

    /// Returns the role requirement, if any.
    pub fn requirement(&self) -> Option<RoleRequirement> {
        match self {
            Access::Roles(roles) => Some(RoleRequirement::from(*roles)),
            Access::Public | Access::Authenticated => None,
        }
    }

    /// Returns `true` if the endpoint needs a credential.
    pub fn requires_credential(&self) -> bool {
        !matches!(self, Access::Public)
    }
}

/// Operations exposed over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Liveness check.
    Health,
    /// Identity of the signed-in user.
    CurrentUser,
    /// Clear the credential cookie.
    Logout,
    /// Create a banner.
    CreateBanner,
    /// List banners.
    ListBanners,
    /// Read the hero banner.
    GetHeroBanner,
    /// Read a banner.
    GetBanner,
    /// Update a banner.
    UpdateBanner,
    /// Delete a banner.
    DeleteBanner,
    /// Make a banner the hero.
    SetHeroBanner,
    /// Create a recipe category.
    CreateCategory,
    /// List recipe categories.
    ListCategories,
    /// Read a recipe category.
    GetCategory,
    /// Update a recipe category.
    UpdateCategory,
    /// Delete a recipe category.
    DeleteCategory,
    /// List the sub-categories of one category.
    ListCategorySubCategories,
    /// Create a sub-category.
    CreateSubCategory,
    /// List all sub-categories.
    ListSubCategories,
    /// Read a sub-category.
    GetSubCategory,
    /// Update a sub-category.
    UpdateSubCategory,
    /// Delete a sub-category.
    DeleteSubCategory,
}

impl Operation {
    /// Returns the handler for this operation, routed on `filter`.
    pub fn endpoint(self, filter: MethodFilter) -> MethodRouter<AppState> {
        match self {
            Operation::Health => on(filter, handlers::health),
            Operation::CurrentUser => on(filter, handlers::current_user),
            Operation::Logout => on(filter, handlers::logout),
            Operation::CreateBanner => on(filter, handlers::create_banner),
            Operation::ListBanners => on(filter, handlers::list_banners),
            Operation::GetHeroBanner => on(filter, handlers::get_hero_banner),
            Operation::GetBanner => on(filter, handlers::get_banner),
            Operation::UpdateBanner => on(filter, handlers::update_banner),
            Operation::DeleteBanner => on(filter, handlers::delete_banner),
            Operation::SetHeroBanner => on(filter, handlers::set_hero_banner),
            Operation::CreateCategory => on(filter, handlers::create_category),
            Operation::ListCategories => on(filter, handlers::list_categories),
            Operation::GetCategory => on(filter, handlers::get_category),
            Operation::UpdateCategory => on(filter, handlers::update_category),
            Operation::DeleteCategory => on(filter, handlers::delete_category),
            Operation::ListCategorySubCategories => on(filter, handlers::list_category_sub_categories),
            Operation::CreateSubCategory => on(filter, handlers::create_sub_category),
            Operation::ListSubCategories => on(filter, handlers::list_sub_categories),
            Operation::GetSubCategory => on(filter, handlers::get_sub_category),
            Operation::UpdateSubCategory => on(filter, handlers::update_sub_category),
            Operation::DeleteSubCategory => on(filter, handlers::delete_sub_category),
        }
    }
}

/// One endpoint and the checks it requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteBinding {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path pattern.
    pub path: &'static str,
    /// Operation served.
    pub operation: Operation,
    /// Required access.
    pub access: Access,
}

impl RouteBinding {
    const fn new(method: HttpMethod, path: &'static str, operation: Operation, access: Access) -> Self {
        Self {
            method,
            path,
            operation,
            access,
        }
    }

    /// Returns the guarded method router for this binding.
    ///
    /// Checks run in order: authentication gate, then role check. They wrap
    /// the declared method only, so other methods still get 405.
    pub fn method_router(&self, gate: &AuthLayer) -> MethodRouter<AppState> {
        let endpoint = self.operation.endpoint(self.method.filter());

        match self.access {
            Access::Public => endpoint,
            Access::Authenticated => endpoint.route_layer(gate.clone()),
            Access::Roles(roles) => endpoint.route_layer(
                ServiceBuilder::new()
                    .layer(gate.clone())
                    .layer(RoleLayer::allow(roles)),
            ),
        }
    }
}

// =============================================================================
// Route table
// =============================================================================

/// All endpoints served by the API.
pub const ROUTES: &[RouteBinding] = &[
    RouteBinding::new(HttpMethod::Get, "/health", Operation::Health, Access::Public),
    // Session
    RouteBinding::new(
        HttpMethod::Get,
        "/api/v1/auth/me",
        Operation::CurrentUser,
        Access::Roles(&[Role::User, Role::Admin]),
    ),
    RouteBinding::new(
        HttpMethod::Post,
        "/api/v1/auth/logout",
        Operation::Logout,
        Access::Authenticated,
    ),
    // Banners
    RouteBinding::new(HttpMethod::Post, "/api/v1/banners", Operation::CreateBanner, Access::ADMIN),
    RouteBinding::new(HttpMethod::Get, "/api/v1/banners", Operation::ListBanners, Access::ADMIN),
    RouteBinding::new(
        HttpMethod::Get,
        "/api/v1/banners/hero",
        Operation::GetHeroBanner,
        Access::Public,
    ),
    RouteBinding::new(HttpMethod::Get, "/api/v1/banners/{id}", Operation::GetBanner, Access::ADMIN),
    RouteBinding::new(HttpMethod::Put, "/api/v1/banners/{id}", Operation::UpdateBanner, Access::ADMIN),
    RouteBinding::new(
        HttpMethod::Delete,
        "/api/v1/banners/{id}",
        Operation::DeleteBanner,
        Access::ADMIN,
    ),
    RouteBinding::new(
        HttpMethod::Post,
        "/api/v1/banners/{id}/set-hero",
        Operation::SetHeroBanner,
        Access::ADMIN,
    ),
    // Recipe categories
    RouteBinding::new(
        HttpMethod::Post,
        "/api/v1/categories",
        Operation::CreateCategory,
        Access::ADMIN,
    ),
    RouteBinding::new(
        HttpMethod::Get,
        "/api/v1/categories",
        Operation::ListCategories,
        Access::ADMIN,
    ),
    RouteBinding::new(
        HttpMethod::Get,
        "/api/v1/categories/{id}",
        Operation::GetCategory,
        Access::ADMIN,
    ),
    RouteBinding::new(
        HttpMethod::Put,
        "/api/v1/categories/{id}",
        Operation::UpdateCategory,
        Access::ADMIN,
    ),
    RouteBinding::new(
        HttpMethod::Delete,
        "/api/v1/categories/{id}",
        Operation::DeleteCategory,
        Access::ADMIN,
    ),
    RouteBinding::new(
        HttpMethod::Get,
        "/api/v1/categories/{id}/subcategories",
        Operation::ListCategorySubCategories,
        Access::ADMIN,
    ),
    // Sub-categories
    RouteBinding::new(
        HttpMethod::Post,
        "/api/v1/subcategories",
        Operation::CreateSubCategory,
        Access::ADMIN,
    ),
    RouteBinding::new(
        HttpMethod::Get,
        "/api/v1/subcategories",
        Operation::ListSubCategories,
        Access::ADMIN,
    ),
    RouteBinding::new(
        HttpMethod::Get,
        "/api/v1/subcategories/{id}",
        Operation::GetSubCategory,
        Access::ADMIN,
    ),
    RouteBinding::new(
        HttpMethod::Put,
        "/api/v1/subcategories/{id}",
        Operation::UpdateSubCategory,
        Access::ADMIN,
    ),
    RouteBinding::new(
        HttpMethod::Delete,
        "/api/v1/subcategories/{id}",
        Operation::DeleteSubCategory,
        Access::ADMIN,
    ),
];

/// Builds a router from bindings, each guarded by its declared checks.
pub fn build_router(bindings: &[RouteBinding], gate: &AuthLayer) -> Router<AppState> {
    bindings.iter().fold(Router::new(), |router, binding| {
        tracing::trace!(
            method = %binding.method,
            path = binding.path,
            access = ?binding.access,
            "Binding route"
        );
        router.route(binding.path, binding.method_router(gate))
    })
}

/// Returns the binding for a method and path pattern.
pub fn find_binding(method: HttpMethod, path: &str) -> Option<&'static RouteBinding> {
    ROUTES
        .iter()
        .find(|binding| binding.method == method && binding.path == path)
}

// =============================================================================
// Tests
// =============================================================================
