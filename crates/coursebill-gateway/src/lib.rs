//! Payment provider client for coursebill.
//!
//! Creates redirect-based charges against the provider's payments API. The
//! caller receives a confirmation URL to send the buyer to; the charge's
//! final state arrives later via webhook.
//!
//! Every call mints a fresh idempotency key: this client always wants a new
//! charge, never a retried one, so two logically distinct purchase attempts
//! are never coalesced by the provider.
//!
//! # Example
//!
//! ```no_run
//! use coursebill_gateway::{ChargeRequest, GatewayClient, GatewayConfig};
//!
//! # async fn example() -> Result<(), coursebill_gateway::GatewayError> {
//! let config = GatewayConfig::new("https://api.provider.example", "shop-1", "sk_secret");
//! let client = GatewayClient::new(config)?;
//!
//! let charge = client
//!     .create_payment(&ChargeRequest {
//!         return_url: "https://market.example/return".into(),
//!         course_title: "Go Basics".into(),
//!         user_id: 7,
//!         course_id: 3,
//!         amount: 1999,
//!     })
//!     .await?;
//!
//! println!("redirect buyer to {}", charge.confirmation_url);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod config;
mod error;
mod types;

pub use client::{ChargeRequest, GatewayClient, NewCharge};
pub use config::GatewayConfig;
pub use error::GatewayError;
