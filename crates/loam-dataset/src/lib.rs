//! Capability interface over categorical grid datasets.
//!
//! The editing core never talks to a concrete dataset library. It
//! depends on two object-safe traits: [`GridStore`] opens a named
//! dataset, and [`GridHandle`] reads, writes, and syncs its categorical
//! grid plus the textual legend attribute. The NetCDF driver that backs
//! these traits in production is an external collaborator; tests use the
//! in-memory store from `loam-test-utils`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod handle;

pub use error::DatasetError;
pub use handle::{GridHandle, GridStore};
