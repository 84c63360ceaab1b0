//! # Zendesk
//!
//! A typed async client for the Zendesk Support REST API (`/api/v2`).
//!
//! ## Features
//!
//! - **One request pipeline**: header and credential injection, per-verb
//!   success statuses, and a structured error for every rejection
//! - **Authentication**: HTTP Basic (password or API token) or OAuth bearer
//! - **Pagination**: offset (`page`/`per_page`) and cursor (`page[size]`,
//!   `page[after]`) listings, plus a lazy iterator over all pages
//! - **Escape hatch**: raw `get`/`post`/`put`/`patch`/`delete` for endpoints
//!   without a typed method
//! - **Security**: credential secrets are never logged or shown in `Debug`
//!
//! The client never retries, caches, or rate limits. One failed attempt is
//! one reported error.
//!
//! ## Architecture
//!
//! - [`config`] - Configuration loading from environment variables
//! - [`credential`] - Basic and bearer credentials
//! - [`error`] - Transport errors and the structured [`ApiError`]
//! - [`client`] - The request pipeline and its builder
//! - [`query`] - Query strings from typed option structs
//! - [`envelope`] - Single-key JSON envelopes
//! - [`pagination`] - Offset/cursor types and [`PageIterator`]
//! - [`models`] - Resource payloads
//!
//! ## Example
//!
//! ```ignore
//! use zendesk::{Client, Credential, Group, PaginationOptions};
//!
//! async fn example() -> Result<(), zendesk::ZendeskError> {
//!     let client = Client::builder()
//!         .subdomain("acme")
//!         .credential(Credential::api_token("agent@acme.com", "token"))
//!         .build()?;
//!
//!     let created = client.create_group(&Group::new("Tier 2")).await?;
//!
//!     let mut groups = client.groups_iter(PaginationOptions::default());
//!     while let Some(group) = groups.next().await? {
//!         println!("{:?}: {}", group.id, group.name);
//!     }
//!
//!     if let Some(id) = created.id {
//!         client.delete_group(id).await?;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod credential;
pub mod envelope;
pub mod error;
mod groups;
pub mod models;
pub mod pagination;
pub mod query;

pub use client::{Client, ClientBuilder};
pub use config::{Config, Endpoint};
pub use credential::Credential;
pub use error::{ApiError, ZendeskError};
pub use models::{Group, GroupListOptions};
pub use pagination::{
    CommonOptions, CursorOptions, CursorPagination, CursorPaginationMeta, OffsetOptions, Page,
    PageIterator, PageOptions, PaginationOptions, Strategy,
};
