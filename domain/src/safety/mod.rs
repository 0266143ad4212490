//! Content safety classification domain: the category taxonomy, the guard
//! prompt format and the verdict parser

pub mod prompt;
pub mod taxonomy;
pub mod verdict;
