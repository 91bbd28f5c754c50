//! Facade over the devstrap layers, so front ends depend on one crate.

pub use application;
pub use domain;
pub use infrastructure;
