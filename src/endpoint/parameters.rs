use serde::{Deserialize, Serialize};

/// A `{name}` placeholder in an endpoint path, e.g. `id` in `/todos/{id}`.
///
/// Optionality never appears here: an optional placeholder is expanded into
/// two endpoints before parameters are recorded (see [`crate::normalizer`]).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PathParameter {
    pub name: String,
}

impl PathParameter {
    pub fn new(name: impl Into<String>) -> Self {
        PathParameter { name: name.into() }
    }
}

/// A query string parameter and whether the route requires it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QueryParameter {
    pub name: String,
    pub required: bool,
}

impl QueryParameter {
    pub fn new(name: impl Into<String>, required: bool) -> Self {
        QueryParameter {
            name: name.into(),
            required,
        }
    }
}

/// A request header parameter and whether the route requires it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HeaderParameter {
    pub name: String,
    pub required: bool,
}

impl HeaderParameter {
    pub fn new(name: impl Into<String>, required: bool) -> Self {
        HeaderParameter {
            name: name.into(),
            required,
        }
    }
}
