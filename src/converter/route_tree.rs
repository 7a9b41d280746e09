//! Route-tree adapter.
//!
//! Converts a tree-shaped routing structure, as built by nested framework
//! routing declarations (Ktor-style `route { method { ... } }` blocks), into
//! the canonical [`EndpointSet`].
//!
//! The embedding application mirrors its framework's routing structure into a
//! [`RouteTree`]: an arena of parent-indexed nodes, each carrying one
//! [`RouteSelector`]. A leaf is a node with no children and represents one
//! concrete, fully-qualified route. Conversion walks every leaf toward the
//! root, accumulating path segments, the HTTP method and all parameter
//! selectors encountered on the way.

use super::{EndpointConverter, EndpointConverterError, Feature, SupportedFeatures};
use crate::endpoint::{
    Endpoint, EndpointSet, HeaderParameter, HttpMethod, PathParameter, QueryParameter,
};
use crate::normalizer::{merge_segments, normalize_path};
use http::Method;
use once_cell::sync::{Lazy, OnceCell};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

static FEATURES: Lazy<SupportedFeatures> = Lazy::new(|| {
    SupportedFeatures::new([
        Feature::PathParameters,
        Feature::QueryParameters,
        Feature::HeaderParameters,
        Feature::Consumes,
        Feature::Produces,
    ])
});

/// Identifier of a node within a [`RouteTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One routing decision contributed by a tree node.
///
/// A closed enumeration of the selector kinds the adapter understands, each
/// carrying its payload. [`RouteSelector::Unrecognized`] is the single
/// explicit ignore arm: selectors a framework mirror cannot express in these
/// terms are carried for diagnostics and skipped during the walk, so partial
/// results stay available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteSelector {
    /// Synthetic root of the tree. Contributes nothing to any route.
    Root,
    /// Path text: static segments and `{name}` / `{name?}` placeholders, with
    /// or without separators (`"/todos"`, `"todos/{id}"`).
    Path(String),
    /// HTTP method selector.
    Method(Method),
    /// Query parameter the route requires.
    QueryParameter(String),
    /// Query parameter the route matches but does not require.
    OptionalQueryParameter(String),
    /// Header the route matches on. A route matched by header only exists for
    /// requests carrying it, so header parameters are always required.
    Header(String),
    /// Request content type the route accepts.
    ContentType(String),
    /// Response media type the route produces.
    Accept(String),
    /// Selector kind the adapter does not understand, with a label for the
    /// skip diagnostic.
    Unrecognized(String),
}

#[derive(Debug, Clone)]
struct RouteNode {
    selector: RouteSelector,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed routing tree handle supplied by the embedding application.
///
/// Nodes refer to their parents by index, so the leaf-to-root walk needs no
/// back-pointers. The tree is append-only; routes cannot be removed.
#[derive(Debug, Clone)]
pub struct RouteTree {
    nodes: Vec<RouteNode>,
}

impl Default for RouteTree {
    fn default() -> Self {
        RouteTree::new()
    }
}

impl RouteTree {
    /// A tree containing only the synthetic root.
    pub fn new() -> Self {
        RouteTree {
            nodes: vec![RouteNode {
                selector: RouteSelector::Root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a child node under `parent` and return its id.
    pub fn add(&mut self, parent: NodeId, selector: RouteSelector) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(RouteNode {
            selector,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Append a path node, mirroring a `route("...")` declaration.
    pub fn route(&mut self, parent: NodeId, path: &str) -> NodeId {
        self.add(parent, RouteSelector::Path(path.to_string()))
    }

    /// Append a method node, mirroring a `method(...)` declaration.
    pub fn method(&mut self, parent: NodeId, method: Method) -> NodeId {
        self.add(parent, RouteSelector::Method(method))
    }

    /// Append a required query parameter node.
    pub fn query_param(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.add(parent, RouteSelector::QueryParameter(name.to_string()))
    }

    /// Append an optional query parameter node.
    pub fn optional_query_param(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.add(
            parent,
            RouteSelector::OptionalQueryParameter(name.to_string()),
        )
    }

    /// Append a header selector node.
    pub fn header(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.add(parent, RouteSelector::Header(name.to_string()))
    }

    /// Whether the tree declares no routes at all.
    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.children.is_empty() && node.parent.is_some())
            .map(|(idx, _)| NodeId(idx))
    }
}

/// Adapter over a [`RouteTree`].
///
/// Construction fails with [`EndpointConverterError::EmptySource`] when the
/// tree declares no routes; conversion is lazy and memoized.
pub struct RouteTreeConverter {
    tree: RouteTree,
    result: OnceCell<EndpointSet>,
}

impl RouteTreeConverter {
    pub fn new(tree: RouteTree) -> Result<Self, EndpointConverterError> {
        if tree.is_empty() {
            return Err(EndpointConverterError::EmptySource);
        }
        Ok(RouteTreeConverter {
            tree,
            result: OnceCell::new(),
        })
    }

    fn convert(&self) -> EndpointSet {
        // Endpoints from sibling branches that normalize to the same path and
        // method are merged by unioning their attribute sets.
        let mut grouped: BTreeMap<(String, HttpMethod), Endpoint> = BTreeMap::new();

        for leaf in self.tree.leaves() {
            let Some(walk) = self.walk_leaf(leaf) else {
                continue;
            };
            for endpoint in walk.into_endpoints() {
                debug!(endpoint = %endpoint, "converted leaf route");
                match grouped.entry((endpoint.path.clone(), endpoint.method.clone())) {
                    Entry::Vacant(slot) => {
                        slot.insert(endpoint);
                    }
                    Entry::Occupied(mut slot) => {
                        let merged = slot.get_mut();
                        merged.path_parameters.extend(endpoint.path_parameters);
                        merged.query_parameters.extend(endpoint.query_parameters);
                        merged.header_parameters.extend(endpoint.header_parameters);
                        merged.consumes.extend(endpoint.consumes);
                        merged.produces.extend(endpoint.produces);
                    }
                }
            }
        }

        let endpoints: EndpointSet = grouped.into_values().collect();
        info!(endpoint_count = endpoints.len(), "route tree converted");
        endpoints
    }

    /// Walk one leaf toward the root, accumulating everything encountered.
    ///
    /// Returns `None` for leaves with no method selector anywhere on their
    /// walk: such a branch declares no routable operation.
    fn walk_leaf(&self, leaf: NodeId) -> Option<LeafWalk> {
        let mut walk = LeafWalk::default();
        let mut current = Some(leaf);

        while let Some(id) = current {
            let node = &self.tree.nodes[id.0];
            match &node.selector {
                RouteSelector::Path(segment) => {
                    walk.path = merge_segments(&walk.path, segment);
                }
                // Last-seen during the walk wins when a branch declares more
                // than one method selector.
                RouteSelector::Method(method) => {
                    walk.method = Some(HttpMethod::from(method));
                }
                RouteSelector::QueryParameter(name) => {
                    walk.query_parameters.insert(QueryParameter::new(name, true));
                }
                RouteSelector::OptionalQueryParameter(name) => {
                    walk.query_parameters
                        .insert(QueryParameter::new(name, false));
                }
                RouteSelector::Header(name) => {
                    walk.header_parameters
                        .insert(HeaderParameter::new(name, true));
                }
                RouteSelector::ContentType(media_type) => {
                    walk.consumes.insert(media_type.clone());
                }
                RouteSelector::Accept(media_type) => {
                    walk.produces.insert(media_type.clone());
                }
                RouteSelector::Root => {}
                RouteSelector::Unrecognized(kind) => {
                    debug!(kind = %kind, "skipping unrecognized selector");
                }
            }
            current = node.parent;
        }

        walk.method.is_some().then_some(walk)
    }
}

impl EndpointConverter for RouteTreeConverter {
    fn supported_features(&self) -> &SupportedFeatures {
        &FEATURES
    }

    fn conversion_result(&self) -> &EndpointSet {
        self.result.get_or_init(|| self.convert())
    }
}

/// Mutable accumulator for a single leaf's walk. Local to that walk and
/// finalized into immutable endpoints; never shared across leaves.
#[derive(Debug, Default)]
struct LeafWalk {
    path: String,
    method: Option<HttpMethod>,
    query_parameters: BTreeSet<QueryParameter>,
    header_parameters: BTreeSet<HeaderParameter>,
    consumes: BTreeSet<String>,
    produces: BTreeSet<String>,
}

impl LeafWalk {
    fn into_endpoints(self) -> Vec<Endpoint> {
        let method = self.method.unwrap_or_default();
        let normalized = normalize_path(&self.path);

        normalized
            .expand()
            .into_iter()
            .map(|variant| Endpoint {
                path: variant.path,
                method: method.clone(),
                path_parameters: variant
                    .parameters
                    .iter()
                    .map(PathParameter::new)
                    .collect(),
                query_parameters: self.query_parameters.clone(),
                header_parameters: self.header_parameters.clone(),
                consumes: self.consumes.clone(),
                produces: self.produces.clone(),
                responses: BTreeSet::new(),
            })
            .collect()
    }
}
