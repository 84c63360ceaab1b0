//! Data models for the Zendesk API.
//!
//! Plain records mirroring the API's JSON shapes. Fields the API treats as
//! optional are omitted from outgoing JSON while unset.

pub(crate) mod common;
mod group;

pub use group::*;
