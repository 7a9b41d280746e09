use super::{HeaderParameter, HttpMethod, PathParameter, QueryParameter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of canonical endpoints produced by one adapter run.
///
/// Ordered so conversion results are deterministic regardless of the order in
/// which a source was walked.
pub type EndpointSet = BTreeSet<Endpoint>;

/// Canonical, framework-independent description of one routable operation.
///
/// Two endpoints are equal iff path, method and every parameter, media type
/// and response set are equal as sets. All collection fields are ordered sets,
/// so equality and hashing are insensitive to the order a source was walked in.
///
/// Construction is permissive: an adapter may leave any field unset, and the
/// defaults are explicit sentinels (empty sets, `OPTIONS` method), never a
/// guess. Endpoints are built once per conversion and not mutated afterwards.
///
/// ```
/// use specdiff::{Endpoint, HttpMethod, QueryParameter};
///
/// let endpoint = Endpoint {
///     query_parameters: [QueryParameter::new("limit", true)].into(),
///     ..Endpoint::new("/todos", HttpMethod::Get)
/// };
/// assert_eq!(endpoint.path, "/todos");
/// ```
#[derive(
    Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Endpoint {
    /// Normalized path: leading `/`, no trailing slash except for the root
    /// path, parameter segments written as `{name}`.
    pub path: String,
    pub method: HttpMethod,
    pub path_parameters: BTreeSet<PathParameter>,
    pub query_parameters: BTreeSet<QueryParameter>,
    pub header_parameters: BTreeSet<HeaderParameter>,
    /// Media types the operation accepts.
    pub consumes: BTreeSet<String>,
    /// Media types the operation can respond with.
    pub produces: BTreeSet<String>,
    /// Response status-code tokens, including the literal `"default"`.
    pub responses: BTreeSet<String>,
}

impl Endpoint {
    /// An endpoint with the given path and method and everything else unset.
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Endpoint {
            path: path.into(),
            method,
            ..Endpoint::default()
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}
