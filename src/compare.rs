//! Feature-aware comparison of two conversion results.
//!
//! Equality is restricted to the features both converters declare: a field
//! only one side can observe is excluded from comparison on both sides,
//! because treating an unobservable field as empty-set evidence would produce
//! spurious mismatches. Mismatches are data in the report, never errors.

use crate::converter::{ConversionResult, Feature, SupportedFeatures};
use crate::endpoint::{Endpoint, EndpointSet};
use serde::Serialize;
use tracing::debug;

/// The diff between a specified and an implemented endpoint set.
///
/// Purely informational; an external presentation layer renders it. No
/// ordering is guaranteed beyond that of a set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    /// Endpoints present on both sides under the checked features.
    pub matching: EndpointSet,
    /// Specified but not implemented.
    pub only_specified: EndpointSet,
    /// Implemented but not specified.
    pub only_implemented: EndpointSet,
    /// The feature intersection the comparison was restricted to — what was
    /// actually checked, as opposed to what either side declared.
    pub checked_features: SupportedFeatures,
}

impl MatchReport {
    /// `true` when both surfaces agree on every endpoint.
    pub fn is_clean(&self) -> bool {
        self.only_specified.is_empty() && self.only_implemented.is_empty()
    }
}

type EndpointFilter = Box<dyn Fn(&Endpoint) -> bool + Send + Sync>;

/// Comparison tuning supplied by the embedding application.
///
/// Filters exclude endpoints from both sides before comparison, for routes
/// that are deliberately outside the contract (health probes, metrics,
/// framework-injected endpoints).
#[derive(Default)]
pub struct CompareConfig {
    filters: Vec<EndpointFilter>,
}

impl CompareConfig {
    pub fn new() -> Self {
        CompareConfig::default()
    }

    /// Exclude every endpoint for which `predicate` returns `true`.
    pub fn ignore<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Endpoint) -> bool + Send + Sync + 'static,
    {
        self.filters.push(Box::new(predicate));
        self
    }

    /// Exclude a literal path on both sides, e.g. `/health`.
    pub fn ignore_path(self, path: &str) -> Self {
        let path = path.to_string();
        self.ignore(move |endpoint| endpoint.path == path)
    }

    fn keeps(&self, endpoint: &Endpoint) -> bool {
        !self.filters.iter().any(|filter| filter(endpoint))
    }
}

/// Compare a specified against an implemented endpoint set.
pub fn compare(specified: &ConversionResult, implemented: &ConversionResult) -> MatchReport {
    compare_with_config(specified, implemented, &CompareConfig::default())
}

/// [`compare`], with endpoint filters applied to both sides first.
pub fn compare_with_config(
    specified: &ConversionResult,
    implemented: &ConversionResult,
    config: &CompareConfig,
) -> MatchReport {
    let checked_features = specified.features.intersection(&implemented.features);

    let specified_set = restrict(&specified.endpoints, &checked_features, config);
    let implemented_set = restrict(&implemented.endpoints, &checked_features, config);

    let report = MatchReport {
        matching: specified_set
            .intersection(&implemented_set)
            .cloned()
            .collect(),
        only_specified: specified_set
            .difference(&implemented_set)
            .cloned()
            .collect(),
        only_implemented: implemented_set
            .difference(&specified_set)
            .cloned()
            .collect(),
        checked_features,
    };

    debug!(
        matching = report.matching.len(),
        only_specified = report.only_specified.len(),
        only_implemented = report.only_implemented.len(),
        "endpoint sets compared"
    );
    report
}

fn restrict(
    endpoints: &EndpointSet,
    features: &SupportedFeatures,
    config: &CompareConfig,
) -> EndpointSet {
    endpoints
        .iter()
        .filter(|endpoint| config.keeps(endpoint))
        .map(|endpoint| project(endpoint, features))
        .collect()
}

/// Project an endpoint down to the fields covered by `features`. Fields
/// outside the set are treated as absent.
fn project(endpoint: &Endpoint, features: &SupportedFeatures) -> Endpoint {
    Endpoint {
        path: endpoint.path.clone(),
        method: endpoint.method.clone(),
        path_parameters: if features.contains(Feature::PathParameters) {
            endpoint.path_parameters.clone()
        } else {
            Default::default()
        },
        query_parameters: if features.contains(Feature::QueryParameters) {
            endpoint.query_parameters.clone()
        } else {
            Default::default()
        },
        header_parameters: if features.contains(Feature::HeaderParameters) {
            endpoint.header_parameters.clone()
        } else {
            Default::default()
        },
        consumes: if features.contains(Feature::Consumes) {
            endpoint.consumes.clone()
        } else {
            Default::default()
        },
        produces: if features.contains(Feature::Produces) {
            endpoint.produces.clone()
        } else {
            Default::default()
        },
        responses: if features.contains(Feature::Responses) {
            endpoint.responses.clone()
        } else {
            Default::default()
        },
    }
}
