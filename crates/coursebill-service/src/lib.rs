//! Coursebill billing service - HTTP API for course payments.
//!
//! This crate provides the remote-callable billing surface, consumed by the
//! marketplace's gateway service:
//!
//! - Payment creation (redirect-based charge at the provider + local
//!   `pending` purchase record)
//! - Webhook reconciliation (provider confirmations applied to the store)
//!
//! # Authentication
//!
//! Payment creation is a service-to-service call: the gateway service has
//! already authenticated the end user and passes the user id along with a
//! shared API key. Webhooks are delivered directly by the payment provider.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers need async for consistency

pub mod auth;
pub mod billing;
pub mod config;
pub mod error;
pub mod handlers;
pub mod reconcile;
pub mod routes;
pub mod state;

pub use billing::{BillingError, BillingFacade};
pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
