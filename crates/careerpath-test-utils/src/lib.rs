//! Shared fixtures for careerpath tests: a reference student, and small
//! deterministic artifacts written as JSON.

pub mod fixtures;

pub use pretty_assertions;
