//! Core types for the Loam land-use editing toolkit.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! fundamental abstractions used throughout the Loam workspace: the
//! categorical [`Grid`], the code-to-name [`Legend`], rectangular
//! [`Region`] selections, the [`ChangeSpec`] edit record, and the
//! line-oriented [`namelist`] key-value extractor used to read model
//! configuration files.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod change;
pub mod error;
pub mod grid;
pub mod legend;
pub mod namelist;
pub mod region;

pub use change::ChangeSpec;
pub use error::{ChangeError, GridError, LegendError};
pub use grid::Grid;
pub use legend::Legend;
pub use region::{ClampedRegion, Region};
