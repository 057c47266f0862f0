//! Core Module - Classification, Disambiguation & Risk Pipeline
//!
//! Address format matching, hint resolution, cache-aware risk analysis and
//! response composition. Collaborators (stores, provider) are traits.

pub mod analyzer;
pub mod composer;
pub mod disambiguator;
pub mod matcher;
pub mod service;
pub mod traits;

pub use analyzer::*;
pub use composer::*;
pub use disambiguator::*;
pub use matcher::*;
pub use service::*;
pub use traits::*;
