//! The session change ledger.

use std::fmt::Write as _;

use loam_core::ChangeSpec;

/// Whether a recorded change targets the current member only or is
/// staged for every ensemble member.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    /// Applied to the current member only.
    Single,
    /// Staged for propagation to every ensemble member.
    Bulk,
}

/// Append-only record of every change applied in a session.
///
/// Two views are kept: the full ledger (everything, for single-file
/// replay) and the bulk subset (for cross-member propagation). A bulk
/// entry is always also a full-ledger entry. Nothing is ever removed or
/// reordered for the session lifetime.
#[derive(Clone, Debug, Default)]
pub struct ChangeLedger {
    all: Vec<ChangeSpec>,
    bulk: Vec<ChangeSpec>,
}

impl ChangeLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an applied change.
    pub fn record(&mut self, spec: ChangeSpec, scope: Scope) {
        self.all.push(spec);
        if scope == Scope::Bulk {
            self.bulk.push(spec);
        }
    }

    /// Every recorded change, in application order.
    pub fn entries(&self) -> &[ChangeSpec] {
        &self.all
    }

    /// The bulk-staged changes, in application order.
    pub fn bulk_entries(&self) -> &[ChangeSpec] {
        &self.bulk
    }

    /// Whether any change at all has been recorded.
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Whether any bulk change has been staged.
    pub fn has_bulk(&self) -> bool {
        !self.bulk.is_empty()
    }

    /// Render the full ledger as a repeatable command line, so the exact
    /// edit sequence can be reapplied to a different dataset
    /// non-interactively (with fresh randomization).
    pub fn render_replay(&self, script: &str) -> String {
        let mut out = format!("{script} <other_config.in>");
        for spec in &self.all {
            // Infallible on String.
            let _ = write!(out, " --apply {spec}");
        }
        out
    }
}
