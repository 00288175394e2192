//! Search operations for the recommendation engine.
//!
//! This module provides keyword filtering for similarity queries. The filter
//! is applied *during* index traversal (not as a post-filter), so a query
//! can retrieve all matching documents before any non-matching fill.

mod filter;

pub use filter::KeywordFilter;
