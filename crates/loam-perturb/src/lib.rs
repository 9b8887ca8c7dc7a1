//! Randomized region perturbation for categorical grids.
//!
//! The kernel here is the heart of the ensemble editing workflow:
//! [`perturb`] reassigns a uniformly drawn subset of cells inside a
//! rectangle to a target category. Every invocation draws fresh, so
//! replaying the same change spec against each ensemble member gives
//! every member its own independent perturbation pattern.
//!
//! [`census`] is the read-only companion: a per-category cell count over
//! a selection, backing the selection summary of the interactive layer.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod census;
pub mod kernel;

pub use census::census;
pub use kernel::{perturb, perturb_spec, perturb_with_rng};
