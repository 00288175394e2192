//! Ingestion state for corpus bootstrap.
//!
//! Bootstrap is decided by observing the store, not by remembering past
//! runs: a collection that exists and holds documents is `Ready`, anything
//! else `NeedsBootstrap`. This makes bootstrap naturally idempotent - a
//! second run against a populated store fetches nothing and writes nothing.

/// Whether the corpus collection needs to be populated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngestState {
    /// The collection is missing or empty; titles must be fetched,
    /// embedded, and indexed before queries are useful.
    NeedsBootstrap,

    /// The collection already holds documents; bootstrap is a no-op.
    Ready,
}

impl IngestState {
    /// Returns `true` when bootstrap work is required.
    pub fn needs_bootstrap(self) -> bool {
        matches!(self, IngestState::NeedsBootstrap)
    }
}

/// What a bootstrap run actually did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Titles were fetched and indexed; holds the number of documents
    /// written.
    Populated(usize),

    /// The collection already held documents; nothing was fetched.
    AlreadyPopulated,

    /// The source returned zero titles; the collection stays empty and
    /// the next bootstrap will try again.
    NothingToIngest,
}

impl BootstrapOutcome {
    /// Returns the number of documents written by this run.
    pub fn documents_written(self) -> usize {
        match self {
            BootstrapOutcome::Populated(n) => n,
            BootstrapOutcome::AlreadyPopulated | BootstrapOutcome::NothingToIngest => 0,
        }
    }
}
