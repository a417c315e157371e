//! Prompt domain
//!
//! Templates for the style A / style B responder stages and the aggregation stage.

mod template;

pub use template::{PromptSubject, PromptTemplate};
