//! Title acquisition abstraction.
//!
//! A [`TitleSource`] supplies the corpus titles ingested during bootstrap.
//! Sources are injected so the engine stays agnostic of where titles come
//! from - a scraper, an API client, a file, or a fixed list for tests.

use crate::error::Result;

/// Supplies the raw corpus titles for ingestion.
///
/// A source is consulted only when the collection needs bootstrapping;
/// an already-populated store never triggers a fetch.
pub trait TitleSource: Send + Sync {
    /// Fetches all titles, in corpus order.
    ///
    /// The returned order is significant: document ids are assigned from
    /// batch position, so a source should yield a stable ordering.
    fn fetch_all(&self) -> Result<Vec<String>>;
}

/// A title source backed by a fixed in-memory list.
///
/// Useful for tests and for callers that acquire titles out of band.
#[derive(Debug, Clone, Default)]
pub struct StaticTitles {
    titles: Vec<String>,
}

impl StaticTitles {
    /// Creates a source from a list of titles.
    pub fn new(titles: Vec<String>) -> Self {
        Self { titles }
    }
}

impl TitleSource for StaticTitles {
    fn fetch_all(&self) -> Result<Vec<String>> {
        Ok(self.titles.clone())
    }
}

impl<S: Into<String>> FromIterator<S> for StaticTitles {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
