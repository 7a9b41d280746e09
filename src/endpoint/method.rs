use http::Method;
use serde::{Deserialize, Serialize};

/// HTTP method of an [`Endpoint`](super::Endpoint).
///
/// A fixed enumeration of the standard request methods plus [`Custom`](HttpMethod::Custom)
/// for anything non-standard a framework routes on (e.g. WebDAV verbs).
///
/// `Options` doubles as the sentinel for "method unknown or unset": a permissive
/// [`Endpoint`](super::Endpoint) construction defaults to it rather than guessing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
    /// Non-standard method, carried verbatim.
    Custom(String),
}

impl Default for HttpMethod {
    fn default() -> Self {
        HttpMethod::Options
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Patch => write!(f, "PATCH"),
            HttpMethod::Delete => write!(f, "DELETE"),
            HttpMethod::Head => write!(f, "HEAD"),
            HttpMethod::Options => write!(f, "OPTIONS"),
            HttpMethod::Trace => write!(f, "TRACE"),
            HttpMethod::Custom(name) => write!(f, "{name}"),
        }
    }
}

impl From<&Method> for HttpMethod {
    fn from(method: &Method) -> Self {
        match method.as_str() {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "PATCH" => HttpMethod::Patch,
            "DELETE" => HttpMethod::Delete,
            "HEAD" => HttpMethod::Head,
            "OPTIONS" => HttpMethod::Options,
            "TRACE" => HttpMethod::Trace,
            other => HttpMethod::Custom(other.to_string()),
        }
    }
}

impl From<Method> for HttpMethod {
    fn from(method: Method) -> Self {
        HttpMethod::from(&method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_methods_convert() {
        assert_eq!(HttpMethod::from(&Method::GET), HttpMethod::Get);
        assert_eq!(HttpMethod::from(&Method::TRACE), HttpMethod::Trace);
    }

    #[test]
    fn test_non_standard_method_becomes_custom() {
        let purge = Method::from_bytes(b"PURGE").unwrap();
        assert_eq!(
            HttpMethod::from(&purge),
            HttpMethod::Custom("PURGE".to_string())
        );
        assert_eq!(HttpMethod::Custom("PURGE".to_string()).to_string(), "PURGE");
    }

    #[test]
    fn test_default_is_options_sentinel() {
        assert_eq!(HttpMethod::default(), HttpMethod::Options);
    }
}
