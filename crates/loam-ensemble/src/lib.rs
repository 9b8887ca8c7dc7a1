//! Ensemble discovery, change bookkeeping, and bulk propagation.
//!
//! An *ensemble* is a set of independent run configurations sharing a
//! common base scenario, each backed by its own domain dataset. This
//! crate discovers the members ([`Registry`]), tracks the edits applied
//! in a session ([`ChangeLedger`]), and replays the bulk-staged edits
//! against every other member with an independent random draw per
//! member ([`propagate`]). The [`Session`] object ties these together
//! around one open dataset.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod ledger;
pub mod member;
pub mod propagate;
pub mod registry;
pub mod session;

pub use config::{find_config, DomainConfig};
pub use error::{ConfigError, PropagateError, SessionError};
pub use ledger::{ChangeLedger, Scope};
pub use member::EnsembleMember;
pub use propagate::{check_gate, propagate, MemberFailure, MemberOutcome, PropagationReport};
pub use registry::Registry;
pub use session::Session;
