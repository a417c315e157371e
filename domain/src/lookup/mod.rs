//! Flight lookup domain
//!
//! Classification and filter extraction for flight queries, plus the
//! record type the record store hands back.

pub mod extractor;
pub mod filter;
pub mod record;
pub mod rules;
