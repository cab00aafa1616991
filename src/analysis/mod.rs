//! Derived views over a finished analysis.

pub mod aggregator;
pub mod keywords;

pub use aggregator::*;
pub use keywords::*;
