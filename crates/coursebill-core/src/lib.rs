//! Core types for the coursebill billing service.
//!
//! This crate provides the foundational types used throughout coursebill:
//!
//! - **Identifiers**: `BillingId`, the provider-issued charge identifier
//! - **Purchases**: `PurchaseRecord`, `PurchaseStatus`
//! - **Webhooks**: `PaymentNotification`, `WebhookOutcome`
//!
//! # Purchase lifecycle
//!
//! A purchase record is created `Pending` once the payment provider accepts
//! a charge, and moves to `Success` when the provider's webhook confirms it.
//! The status is monotonic: no transition leaves `Success`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ids;
pub mod purchase;
pub mod webhook;

pub use ids::{BillingId, IdError};
pub use purchase::{PurchaseRecord, PurchaseStatus, UnknownStatus};
pub use webhook::{PaymentNotification, WebhookError, WebhookOutcome};
