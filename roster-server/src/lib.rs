//! # Roster Server
//!
//! HTTP resource for the roster member directory.
//!
//! ## Overview
//!
//! The server exposes the member CRUD surface and the free-text search
//! passthrough:
//!
//! - **Member Resource**: create, update, page, fetch and delete members
//!   under `/api/members`
//! - **Search**: `/_search/members/{query}` forwarded to the full-text index
//! - **Pagination Headers**: `X-Total-Count` and RFC 5988 `Link` relations
//! - **Alert Headers**: symbolic outcome keys for the UI layer
//!
//! ## Architecture
//!
//! The server is built on Axum. The store and index backends are constructed
//! explicitly in `main` and handed to the service; the service handle rides
//! in [`AppState`]. No component is resolved implicitly.

pub mod alerts;
pub mod app_state;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod pagination;
pub mod routes;

pub use app_state::AppState;
pub use config::Config;
pub use routes::create_app;
