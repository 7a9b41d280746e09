//! Converter adapters.
//!
//! Each adapter walks one framework-specific routing or specification
//! structure and emits the canonical [`EndpointSet`]. The adapters here cover
//! the two source shapes: [`openapi`] for document-shaped specifications and
//! [`route_tree`] for tree-shaped routing structures. Both uphold the same
//! contract: fail eagerly at construction over an unusable source, convert
//! lazily exactly once, skip what they do not understand.

mod error;
mod features;
pub mod openapi;
pub mod route_tree;

pub use error::EndpointConverterError;
pub use features::{Feature, SupportedFeatures};

use crate::endpoint::EndpointSet;

/// Snapshot of one adapter run: the converted endpoints together with the
/// features the adapter was able to observe. This is the unit the comparator
/// consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionResult {
    pub endpoints: EndpointSet,
    pub features: SupportedFeatures,
}

impl ConversionResult {
    pub fn new(endpoints: EndpointSet, features: SupportedFeatures) -> Self {
        ConversionResult {
            endpoints,
            features,
        }
    }
}

/// Contract every converter adapter implements.
pub trait EndpointConverter {
    /// Features this adapter is capable of extracting. Fixed per adapter
    /// type, known at adapter-authoring time.
    fn supported_features(&self) -> &SupportedFeatures;

    /// The converted endpoints.
    ///
    /// Computed on first access and memoized for the adapter's lifetime:
    /// repeated reads yield the same set without re-walking the source.
    /// Never fails; sources unusable enough to prevent conversion are
    /// rejected at adapter construction.
    fn conversion_result(&self) -> &EndpointSet;

    /// Snapshot for use with [`compare`](crate::compare::compare).
    fn conversion(&self) -> ConversionResult {
        ConversionResult::new(
            self.conversion_result().clone(),
            self.supported_features().clone(),
        )
    }
}
