//! # specdiff
//!
//! **specdiff** checks the documented API surface of a service (its OpenAPI
//! specification) against its actually-implemented routes (mirrored from a
//! web framework's routing structure) and reports the mismatches.
//!
//! ## Overview
//!
//! Both sides of the check are reduced to one canonical model: a set of
//! [`Endpoint`] values — path, method, parameters, media types and response
//! status codes, with paths normalized so that equivalent routes written in
//! different framework syntaxes compare equal. A converter adapter produces
//! that set from a framework-specific source; the comparator diffs two such
//! sets, restricted to the features both adapters were able to observe.
//!
//! ## Architecture
//!
//! - **[`endpoint`]** - the canonical endpoint model shared by all converters
//!   and the comparator
//! - **[`normalizer`]** - path canonicalization: segment merging, `{name}`
//!   placeholders, optional-parameter expansion
//! - **[`converter`]** - the adapter contract plus the two reference
//!   adapters: [`OpenApiConverter`] for document-shaped specifications and
//!   [`RouteTreeConverter`] for tree-shaped routing structures
//! - **[`compare`]** - the feature-aware set comparison and its
//!   [`MatchReport`]
//!
//! Rendering a report, walking real framework reflection APIs and test-runner
//! integration are the embedding application's concern; this crate is the
//! conversion and matching engine only.
//!
//! ## Quick Start
//!
//! ```
//! use http::Method;
//! use specdiff::{compare, EndpointConverter, OpenApiConverter, RouteTree, RouteTreeConverter};
//!
//! # fn main() -> Result<(), specdiff::EndpointConverterError> {
//! // Mirror of the implemented routing structure.
//! let mut tree = RouteTree::new();
//! let todos = tree.route(tree.root(), "/todos");
//! tree.method(todos, Method::GET);
//! let implementation = RouteTreeConverter::new(tree)?;
//!
//! // The documented surface.
//! let specification = OpenApiConverter::new(
//!     r#"
//! openapi: 3.1.0
//! info: { title: Todo API, version: "1.0.0" }
//! paths:
//!   /todos:
//!     get:
//!       responses:
//!         "200": { description: OK }
//! "#,
//! )?;
//!
//! let report = compare(&specification.conversion(), &implementation.conversion());
//! assert!(report.is_clean());
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature-aware comparison
//!
//! A route tree cannot know response status codes; some specification formats
//! cannot express header matching. Every adapter therefore declares a
//! [`SupportedFeatures`] set, and a comparison is restricted to the
//! intersection of both declarations. The report carries the intersection
//! that was actually checked, so a "clean" result is honest about its scope.
//!
//! ## Failure model
//!
//! Constructing an adapter over an empty, blank or unparseable source fails
//! eagerly with [`EndpointConverterError`]; a constructed adapter never fails.
//! Constructs an adapter does not recognize are skipped so partial results
//! remain available, and the comparator reports mismatches as data, never as
//! errors.
//!
//! Conversion results are immutable once computed and every conversion is an
//! independent in-memory pass, so separate conversions can safely run on
//! separate workers.

pub mod compare;
pub mod converter;
pub mod endpoint;
pub mod normalizer;

pub use compare::{compare, compare_with_config, CompareConfig, MatchReport};
pub use converter::openapi::OpenApiConverter;
pub use converter::route_tree::{NodeId, RouteSelector, RouteTree, RouteTreeConverter};
pub use converter::{
    ConversionResult, EndpointConverter, EndpointConverterError, Feature, SupportedFeatures,
};
pub use endpoint::{
    Endpoint, EndpointSet, HeaderParameter, HttpMethod, PathParameter, QueryParameter,
};
