use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An [`Endpoint`](crate::endpoint::Endpoint) attribute an adapter is capable
/// of extracting from its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Feature {
    PathParameters,
    QueryParameters,
    HeaderParameters,
    Consumes,
    Produces,
    Responses,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::PathParameters,
        Feature::QueryParameters,
        Feature::HeaderParameters,
        Feature::Consumes,
        Feature::Produces,
        Feature::Responses,
    ];
}

/// The set of features an adapter declares it can populate.
///
/// Static per adapter type, not per call. The comparator intersects the
/// declared sets of both sides and restricts endpoint equality to that
/// intersection, so a feature only one side can observe never produces a
/// spurious mismatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedFeatures(BTreeSet<Feature>);

impl SupportedFeatures {
    pub fn new(features: impl IntoIterator<Item = Feature>) -> Self {
        SupportedFeatures(features.into_iter().collect())
    }

    /// Every feature; for adapters over sources as expressive as the model.
    pub fn all() -> Self {
        SupportedFeatures::new(Feature::ALL)
    }

    pub fn contains(&self, feature: Feature) -> bool {
        self.0.contains(&feature)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Features declared by both `self` and `other`.
    pub fn intersection(&self, other: &SupportedFeatures) -> SupportedFeatures {
        SupportedFeatures(self.0.intersection(&other.0).copied().collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Feature> for SupportedFeatures {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        SupportedFeatures::new(iter)
    }
}
