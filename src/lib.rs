//! # Raide
//!
//! Client library for the Raide bug-report ticketing API and its traffic
//! API, plus an MCP (Model Context Protocol) server exposing both to AI
//! assistants.
//!
//! ## Features
//!
//! - **Tickets**: get, search, submit, update status, delete and comment
//! - **Traffic**: submit queue batches recorded by the Raide logger
//! - **Typed failures**: 401, 403, service-reported and unknown errors are
//!   distinct [`RaideError`](error::RaideError) variants
//! - **Security**: TLS certificates verified by default; the API secret is
//!   never logged or shown in error messages
//!
//! ## Architecture
//!
//! Every operation runs the same pipeline:
//!
//! - [`params`] - turns an operation's inputs into method, path and parameters
//! - [`executor`] - sends the authenticated request, returns status and body
//! - [`interpreter`] - classifies status and body into payload or error
//!
//! on top of:
//!
//! - [`credentials`] - account id, key and secret; the `Authentication` header
//! - [`form`] - wire parameter encoding
//! - [`models`] - ticket references, requesters, search filters, envelope
//! - [`config`] - configuration loading from environment variables
//! - [`error`] - the error type
//!
//! The public operations live in [`client`] and [`traffic`]; [`server`] and
//! [`tools`] adapt them to MCP.
//!
//! ## Configuration
//!
//! The binary reads:
//!
//! - `RAIDE_ACCOUNT_ID`, `RAIDE_API_KEY`, `RAIDE_API_SECRET` (required)
//! - `RAIDE_BASE_URL`, `RAIDE_TRAFFIC_BASE_URL`, `RAIDE_VERIFY_CERTIFICATES` (optional)
//! - `RUST_LOG`: Log level (e.g., `raide=debug`)
//!
//! ## Example
//!
//! ```ignore
//! use raide::client::RaideClient;
//! use raide::models::{DataType, SearchParams, TicketRef, TicketStatus};
//!
//! async fn example() -> Result<(), raide::error::RaideError> {
//!     let client = RaideClient::new(7, "api-key", "api-secret")?;
//!
//!     let open = client
//!         .search(&SearchParams::new().with_status("2").with_limit(10))
//!         .await?;
//!     println!("{}", open);
//!
//!     let ticket = client.get(&TicketRef::external("crm-41"), DataType::Json).await?;
//!     println!("{}", ticket);
//!
//!     client.update(42, TicketStatus::Solved).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod executor;
pub mod form;
pub mod interpreter;
pub mod models;
pub mod params;
pub mod server;
pub mod tools;
pub mod traffic;
