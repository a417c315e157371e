//! Core domain concepts shared across all subdomains.
//!
//! - [`query::Query`] - the raw user query for one run
//! - [`language::Language`] - language tag detected from the query
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod language;
pub mod query;
