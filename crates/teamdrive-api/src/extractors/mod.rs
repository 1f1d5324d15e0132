//! Custom Axum extractors.

pub mod team;

pub use team::TeamSession;
