//! Loam: ensemble land-use editing and setup for regional climate model
//! preprocessing.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Loam sub-crates. For most users, adding `loam` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use loam::prelude::*;
//!
//! // A 10x10 grid of short grass (category 2).
//! let mut grid = Grid::filled(10, 10, 2);
//!
//! // Reassign a uniformly drawn 25% of the whole grid to urban (7).
//! let region = Region::new(0, 0, 9, 9);
//! let changed = perturb(&mut grid, region, 7, 25.0);
//! assert_eq!(changed, 25);
//!
//! // Per-category counts over the same selection.
//! let counts = census(&grid, region);
//! assert_eq!(counts[&7], 25);
//! assert_eq!(counts[&2], 75);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `loam-core` | Grid, legend, regions, change specs, namelist extraction |
//! | [`dataset`] | `loam-dataset` | Dataset access traits and errors |
//! | [`perturb`] | `loam-perturb` | The perturbation kernel and census |
//! | [`ensemble`] | `loam-ensemble` | Member discovery, change ledger, bulk propagation, sessions |
//! | [`pipeline`] | `loam-pipeline` | Two-phase setup orchestration and workflow state |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`loam-core`).
///
/// The categorical [`types::Grid`], code-to-name [`types::Legend`],
/// rectangular [`types::Region`] selections, the [`types::ChangeSpec`]
/// edit record, and the [`types::namelist`] configuration extractor.
pub use loam_core as types;

/// Dataset access traits (`loam-dataset`).
///
/// [`dataset::GridStore`] opens a named dataset and
/// [`dataset::GridHandle`] reads and writes its grid and legend.
pub use loam_dataset as dataset;

/// Randomized perturbation and census (`loam-perturb`).
///
/// [`perturb::perturb`] reassigns a drawn subset of a region;
/// [`perturb::census`] counts categories over a selection.
pub use loam_perturb as perturb;

/// Ensemble discovery, bookkeeping, and propagation (`loam-ensemble`).
///
/// Scan member configurations with [`ensemble::Registry`], edit one
/// dataset through an [`ensemble::Session`], and fan bulk-staged edits
/// out with [`ensemble::propagate`].
pub use loam_ensemble as ensemble;

/// Two-phase setup orchestration (`loam-pipeline`).
///
/// [`pipeline::begin`] generates member configurations and runs the
/// terrain pass; [`pipeline::resume`] finishes the paused run and
/// writes job scripts; [`pipeline::ensemble_mean`] averages the
/// completed members' surface output.
pub use loam_pipeline as pipeline;

/// Common imports for typical Loam usage.
///
/// ```rust
/// use loam::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use loam_core::{ChangeSpec, ClampedRegion, Grid, Legend, Region};

    // Core errors
    pub use loam_core::{ChangeError, GridError, LegendError};

    // Dataset access
    pub use loam_dataset::{DatasetError, GridHandle, GridStore};

    // Perturbation
    pub use loam_perturb::{census, perturb, perturb_spec, perturb_with_rng};

    // Ensemble
    pub use loam_ensemble::{
        check_gate, propagate, ChangeLedger, DomainConfig, EnsembleMember, PropagationReport,
        Registry, Scope, Session,
    };
    pub use loam_ensemble::{ConfigError, PropagateError, SessionError};

    // Pipeline
    pub use loam_pipeline::{
        begin, ensemble_mean, resume, submit_all, AnalysisReport, CommandRunner, JobTemplate,
        PipelineError, ProcessRunner, StateError, StateStore, WorkflowState,
    };
}
