//! Named sequence counters

pub mod repository;

pub use repository::*;
