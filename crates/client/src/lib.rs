//! Market Client - data cache over the REST surface.
//!
//! [`ApiClient`] speaks the gateway's JSON protocol and holds the auth
//! cookies; [`CatalogCache`] mirrors the product and category collections
//! and keeps the mirror consistent with confirmed server state.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cache;

pub use api::{ApiClient, ClientError};
pub use cache::{CatalogCache, LoadState};
