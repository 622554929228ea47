//! # Tyche - Schema-Driven Fake Data
//!
//! Tyche inspects a declared record schema and synthesizes plausible fake
//! instances of it, then optionally exposes those instances through an
//! in-memory mock REST API.
//!
//! ## Features
//!
//! - **Schema-driven synthesis**: primitives, optionals, unions, enums,
//!   literals, lists, mappings, and nested schemas
//! - **Constraint-aware**: numeric bounds, multiple-of, length bounds,
//!   example-value overrides
//! - **Semantic field names**: `email`, `first_name`, `zip_code` and
//!   friends get realistic values, with locale support
//! - **Reproducible**: one seeded random stream drives a whole run
//! - **Mock REST API**: list/get/create/update/delete with query filtering
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tyche::faker::{generate_instances, FakeProvider};
//! use tyche::schema::loader;
//!
//! fn main() -> anyhow::Result<()> {
//!     let handle = loader::resolve("schemas.yaml:User")?;
//!     let mut provider = FakeProvider::new(None, Some(42))?;
//!     let instances = generate_instances(&handle, 5, &mut provider)?;
//!     println!("{}", serde_json::to_string_pretty(&instances)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Schema**: document model and reference resolution
//! - **Faker**: classification, constraints, provider, synthesis
//! - **Adapters**: the mock store, REST handlers, output writing
//! - **Config**: layered settings

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod faker;
pub mod schema;

use crate::adapters::api_handler::{self, AppState};
use axum::routing::get;
use axum::Router;

/// Creates the Axum application router for one serving session.
///
/// Routes follow the mock-API contract: the resource name is the schema
/// name lower-cased and pluralized, and every other resource path is a 404.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api_handler::health))
        .route(
            "/:resource",
            get(api_handler::list_items).post(api_handler::create_item),
        )
        .route(
            "/:resource/:id",
            get(api_handler::get_item)
                .put(api_handler::update_item)
                .delete(api_handler::delete_item),
        )
        .with_state(state)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
}
