//! OpenAPI document adapter.
//!
//! Converts an OpenAPI 3.x specification into the canonical [`EndpointSet`].
//! The document already associates method with path, so no tree walk or merge
//! step is needed: one endpoint per operation, built directly from the
//! declared parameters, media types and response status keys.

use super::{EndpointConverter, EndpointConverterError, SupportedFeatures};
use crate::endpoint::{
    Endpoint, EndpointSet, HeaderParameter, HttpMethod, PathParameter, QueryParameter,
};
use crate::normalizer::normalize_path;
use oas3::spec::{ObjectOrReference, Operation, Parameter, ParameterIn};
use oas3::OpenApiV3Spec;
use once_cell::sync::{Lazy, OnceCell};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info};

static FEATURES: Lazy<SupportedFeatures> = Lazy::new(SupportedFeatures::all);

/// Adapter over an OpenAPI 3.x document (YAML or JSON).
///
/// Construction parses the document eagerly and fails with
/// [`EndpointConverterError`] on an empty, unreadable or unparseable source.
/// Conversion itself is lazy and memoized; constructs the adapter does not
/// understand (unknown verbs, unresolvable references) are skipped.
pub struct OpenApiConverter {
    spec: OpenApiV3Spec,
    result: OnceCell<EndpointSet>,
}

impl OpenApiConverter {
    /// Build a converter from inline YAML or JSON text.
    pub fn new(content: &str) -> Result<Self, EndpointConverterError> {
        if content.trim().is_empty() {
            return Err(EndpointConverterError::EmptySource);
        }
        Ok(Self::from_spec(parse_document(content)?))
    }

    /// Build a converter from a specification file (`.yaml`, `.yml` or `.json`).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EndpointConverterError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| EndpointConverterError::Unreadable {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(&content)
    }

    /// Build a converter from an already parsed specification.
    pub fn from_spec(spec: OpenApiV3Spec) -> Self {
        OpenApiConverter {
            spec,
            result: OnceCell::new(),
        }
    }

    fn convert(&self) -> EndpointSet {
        let mut endpoints = EndpointSet::new();

        if let Some(paths_map) = self.spec.paths.as_ref() {
            for (path, item) in paths_map {
                for (method, operation) in item.methods() {
                    let mut parameters = Vec::new();
                    parameters.extend(resolve_parameters(&self.spec, &item.parameters));
                    parameters.extend(resolve_parameters(&self.spec, &operation.parameters));

                    for endpoint in
                        build_endpoints(path, &HttpMethod::from(&method), operation, &parameters)
                    {
                        debug!(endpoint = %endpoint, "converted operation");
                        endpoints.insert(endpoint);
                    }
                }
            }
        }

        info!(
            endpoint_count = endpoints.len(),
            "OpenAPI specification converted"
        );
        endpoints
    }
}

impl EndpointConverter for OpenApiConverter {
    fn supported_features(&self) -> &SupportedFeatures {
        &FEATURES
    }

    fn conversion_result(&self) -> &EndpointSet {
        self.result.get_or_init(|| self.convert())
    }
}

/// Parse document text as JSON or YAML into the typed spec.
///
/// Unknown verbs under path items are stripped first so foreign keys cannot
/// break deserialization of the paths the adapter does understand.
fn parse_document(content: &str) -> Result<OpenApiV3Spec, EndpointConverterError> {
    let mut value: serde_json::Value = if content.trim_start().starts_with('{') {
        serde_json::from_str(content)?
    } else {
        serde_yaml::from_str(content)?
    };

    strip_unknown_verbs(&mut value);
    Ok(serde_json::from_value(value)?)
}

fn strip_unknown_verbs(val: &mut serde_json::Value) {
    const METHODS: [&str; 8] = [
        "get", "post", "put", "delete", "patch", "options", "head", "trace",
    ];

    if let Some(serde_json::Value::Object(paths_map)) = val.get_mut("paths") {
        for item in paths_map.values_mut() {
            if let serde_json::Value::Object(obj) = item {
                let keys: Vec<String> = obj.keys().cloned().collect();
                for k in keys {
                    let lk = k.to_ascii_lowercase();
                    let keep = match lk.as_str() {
                        "summary" | "description" | "servers" | "parameters" | "$ref" => true,
                        m if METHODS.contains(&m) => true,
                        _ => k.starts_with("x-"),
                    };
                    if !keep {
                        debug!(key = %k, "skipping unrecognized path item key");
                        obj.remove(&k);
                    }
                }
            }
        }
    }
}

/// Build the endpoints for one operation.
///
/// A single operation yields more than one endpoint only when the path
/// carries an optional placeholder, which OpenAPI itself cannot express but a
/// hand-written document occasionally contains after a framework migration.
fn build_endpoints(
    path: &str,
    method: &HttpMethod,
    operation: &Operation,
    parameters: &[ResolvedParameter],
) -> Vec<Endpoint> {
    let normalized = normalize_path(path);

    let mut query_parameters = BTreeSet::new();
    let mut header_parameters = BTreeSet::new();

    for parameter in parameters {
        match parameter.location {
            // The path's placeholders are the ground truth for path
            // parameters; a declaration without a placeholder is a document
            // bug and is skipped.
            ParameterIn::Path => {}
            ParameterIn::Query => {
                query_parameters.insert(QueryParameter::new(&parameter.name, parameter.required));
            }
            ParameterIn::Header => {
                header_parameters.insert(HeaderParameter::new(&parameter.name, parameter.required));
            }
            // Cookie parameters have no counterpart in the endpoint model.
            ParameterIn::Cookie => {}
        }
    }

    let consumes = extract_consumes(operation);
    let (produces, responses) = extract_responses(operation);

    normalized
        .expand()
        .into_iter()
        .map(|variant| {
            Endpoint {
                path: variant.path,
                method: method.clone(),
                path_parameters: variant
                    .parameters
                    .iter()
                    .map(PathParameter::new)
                    .collect(),
                query_parameters: query_parameters.clone(),
                header_parameters: header_parameters.clone(),
                consumes: consumes.clone(),
                produces: produces.clone(),
                responses: responses.clone(),
            }
        })
        .collect()
}

/// Media types the operation accepts, from the request body content keys.
fn extract_consumes(operation: &Operation) -> BTreeSet<String> {
    operation
        .request_body
        .as_ref()
        .and_then(|r| match r {
            ObjectOrReference::Object(req_body) => {
                Some(req_body.content.keys().cloned().collect())
            }
            _ => None,
        })
        .unwrap_or_default()
}

/// Media types the operation responds with and its status-code tokens.
///
/// Status keys are kept verbatim, including the literal `default`.
fn extract_responses(operation: &Operation) -> (BTreeSet<String>, BTreeSet<String>) {
    let mut produces = BTreeSet::new();
    let mut responses = BTreeSet::new();

    if let Some(responses_map) = operation.responses.as_ref() {
        for (status, resp_ref) in responses_map {
            responses.insert(status.clone());
            if let ObjectOrReference::Object(resp_obj) = resp_ref {
                produces.extend(resp_obj.content.keys().cloned());
            }
        }
    }

    (produces, responses)
}

struct ResolvedParameter {
    name: String,
    location: ParameterIn,
    required: bool,
}

fn resolve_parameter_ref<'a>(spec: &'a OpenApiV3Spec, ref_path: &str) -> Option<&'a Parameter> {
    if let Some(name) = ref_path.strip_prefix("#/components/parameters/") {
        spec.components
            .as_ref()?
            .parameters
            .get(name)
            .and_then(|param_ref| match param_ref {
                ObjectOrReference::Object(param) => Some(param),
                _ => None,
            })
    } else {
        None
    }
}

/// Resolve a parameter list, following `#/components/parameters/` references.
/// Unresolvable references are skipped.
fn resolve_parameters(
    spec: &OpenApiV3Spec,
    params: &[ObjectOrReference<Parameter>],
) -> Vec<ResolvedParameter> {
    let mut out = Vec::new();
    for p in params {
        let param = match p {
            ObjectOrReference::Object(obj) => Some(obj),
            ObjectOrReference::Ref { ref_path, .. } => resolve_parameter_ref(spec, ref_path),
        };

        if let Some(param) = param {
            out.push(ResolvedParameter {
                name: param.name.clone(),
                location: param.location,
                required: param.required.unwrap_or(false),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_unknown_verbs() {
        let mut v = json!({
            "paths": {
                "/x": { "get": {}, "patch": {}, "unknown": {}, "x-audit": true }
            }
        });
        strip_unknown_verbs(&mut v);
        assert!(v["paths"]["/x"].get("unknown").is_none());
        assert!(v["paths"]["/x"].get("get").is_some());
        assert!(v["paths"]["/x"].get("x-audit").is_some());
    }
}
