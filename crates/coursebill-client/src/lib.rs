//! Coursebill Client SDK.
//!
//! This crate provides a client library for services to call the coursebill
//! billing API. The typical consumer is the marketplace gateway service: it
//! authenticates the buyer, then asks billing for a payment confirmation URL
//! to redirect them to.
//!
//! # Example
//!
//! ```no_run
//! use coursebill_client::{BillingClient, CreatePayment};
//!
//! # async fn example() -> Result<(), coursebill_client::ClientError> {
//! let client = BillingClient::new(
//!     "http://coursebill.billing.svc:8080",
//!     "your-service-api-key",
//! );
//!
//! let payment = client.create_payment(CreatePayment {
//!     return_url: "https://market.example/return".into(),
//!     user_id: 7,
//!     course_id: 3,
//!     course_title: "Go Basics".into(),
//!     amount: 1999,
//! }).await?;
//!
//! println!("redirect buyer to {}", payment.confirmation_url);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::BillingClient;
pub use error::ClientError;
pub use types::{CreatePayment, PaymentCreated};
