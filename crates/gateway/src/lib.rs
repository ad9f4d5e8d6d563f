//! Remote data gateway.
//!
//! The backend-as-a-service is consumed through two narrow contracts: a
//! generic table API ([`table::TableGateway`]) and blob storage
//! ([`storage::BlobStorage`]). [`rest`] implements both against a
//! PostgREST-dialect HTTP backend; [`memory`] implements them in process for
//! tests and local development. [`stores`] layers typed per-entity
//! operations on top.

pub mod error;
pub mod memory;
pub mod rest;
pub mod storage;
pub mod stores;
pub mod table;

pub use error::GatewayError;
pub use storage::BlobStorage;
pub use table::{Direction, Filter, Order, TableGateway};
