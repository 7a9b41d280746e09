#![allow(clippy::unwrap_used, clippy::expect_used)]

use specdiff::{
    Endpoint, EndpointConverter, EndpointConverterError, HeaderParameter, HttpMethod,
    OpenApiConverter, PathParameter, QueryParameter,
};
use std::io::Write;

fn convert(yaml: &str) -> Vec<Endpoint> {
    OpenApiConverter::new(yaml)
        .expect("spec should be usable")
        .conversion_result()
        .iter()
        .cloned()
        .collect()
}

#[test]
fn test_two_different_paths() {
    let endpoints = convert(
        r#"
openapi: 3.1.0
info: { title: Todo API, version: "1.0.0" }
paths:
  /todos:
    get:
      responses:
        "200": { description: OK }
  /tags:
    get:
      responses:
        "200": { description: OK }
"#,
    );

    let expected = vec![
        Endpoint {
            responses: ["200".to_string()].into(),
            ..Endpoint::new("/tags", HttpMethod::Get)
        },
        Endpoint {
            responses: ["200".to_string()].into(),
            ..Endpoint::new("/todos", HttpMethod::Get)
        },
    ];
    assert_eq!(endpoints, expected);
}

#[test]
fn test_nested_paths_stay_distinct() {
    let endpoints = convert(
        r#"
openapi: 3.1.0
info: { title: Todo API, version: "1.0.0" }
paths:
  /todos:
    get:
      responses:
        "200": { description: OK }
  /todos/query:
    get:
      responses:
        "200": { description: OK }
"#,
    );

    let paths: Vec<&str> = endpoints.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["/todos", "/todos/query"]);
}

#[test]
fn test_all_http_methods_yield_one_endpoint_each() {
    let endpoints = convert(
        r#"
openapi: 3.1.0
info: { title: Todo API, version: "1.0.0" }
paths:
  /todos:
    get:
      responses:
        "200": { description: OK }
    post:
      responses:
        "200": { description: OK }
    put:
      responses:
        "200": { description: OK }
    patch:
      responses:
        "200": { description: OK }
    delete:
      responses:
        "200": { description: OK }
    head:
      responses:
        "200": { description: OK }
    options:
      responses:
        "200": { description: OK }
    trace:
      responses:
        "200": { description: OK }
"#,
    );

    assert_eq!(endpoints.len(), 8);
    for method in [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Trace,
    ] {
        let endpoint = endpoints
            .iter()
            .find(|e| e.method == method)
            .unwrap_or_else(|| panic!("missing {method}"));
        assert_eq!(endpoint.path, "/todos");
        assert_eq!(endpoint.responses, ["200".to_string()].into());
    }
}

#[test]
fn test_parameters_from_operation_and_path_item() {
    let endpoints = convert(
        r#"
openapi: 3.1.0
info: { title: Todo API, version: "1.0.0" }
components:
  parameters:
    TagParam:
      name: tag
      in: query
      required: true
      schema: { type: string }
paths:
  /todos/{id}:
    parameters:
      - name: id
        in: path
        required: true
        schema: { type: string }
      - name: x-trace
        in: header
        required: false
        schema: { type: string }
    get:
      parameters:
        - $ref: '#/components/parameters/TagParam'
        - name: verbose
          in: query
          schema: { type: boolean }
      responses:
        "200": { description: OK }
"#,
    );

    assert_eq!(endpoints.len(), 1);
    let endpoint = &endpoints[0];
    assert_eq!(endpoint.path, "/todos/{id}");
    assert_eq!(endpoint.path_parameters, [PathParameter::new("id")].into());
    assert_eq!(
        endpoint.query_parameters,
        [
            QueryParameter::new("tag", true),
            QueryParameter::new("verbose", false),
        ]
        .into()
    );
    assert_eq!(
        endpoint.header_parameters,
        [HeaderParameter::new("x-trace", false)].into()
    );
}

#[test]
fn test_consumes_and_produces_from_content_keys() {
    let endpoints = convert(
        r#"
openapi: 3.1.0
info: { title: Todo API, version: "1.0.0" }
paths:
  /todos:
    post:
      requestBody:
        content:
          application/json:
            schema: { type: object }
          application/xml:
            schema: { type: object }
      responses:
        "201":
          description: Created
          content:
            application/json:
              schema: { type: object }
"#,
    );

    assert_eq!(endpoints.len(), 1);
    let endpoint = &endpoints[0];
    assert_eq!(
        endpoint.consumes,
        ["application/json".to_string(), "application/xml".to_string()].into()
    );
    assert_eq!(endpoint.produces, ["application/json".to_string()].into());
    assert_eq!(endpoint.responses, ["201".to_string()].into());
}

#[test]
fn test_default_response_token_is_kept_verbatim() {
    let endpoints = convert(
        r#"
openapi: 3.1.0
info: { title: Todo API, version: "1.0.0" }
paths:
  /todos:
    get:
      responses:
        "200": { description: OK }
        default:
          description: Anything else
          content:
            text/plain:
              schema: { type: string }
"#,
    );

    assert_eq!(endpoints.len(), 1);
    assert_eq!(
        endpoints[0].responses,
        ["200".to_string(), "default".to_string()].into()
    );
    assert_eq!(endpoints[0].produces, ["text/plain".to_string()].into());
}

#[test]
fn test_empty_source_fails_at_construction() {
    assert!(matches!(
        OpenApiConverter::new(""),
        Err(EndpointConverterError::EmptySource)
    ));
    assert!(matches!(
        OpenApiConverter::new("   \n\t  "),
        Err(EndpointConverterError::EmptySource)
    ));
}

#[test]
fn test_unreadable_file_fails_at_construction() {
    let result = OpenApiConverter::from_file("/nonexistent/openapi.yaml");
    assert!(matches!(
        result,
        Err(EndpointConverterError::Unreadable { .. })
    ));
}

#[test]
fn test_non_empty_source_never_fails_lazily() {
    // Construction succeeded, so result access must not fail either; an
    // operation without recognizable content just yields a bare endpoint.
    let converter = OpenApiConverter::new(
        r#"
openapi: 3.1.0
info: { title: Sparse API, version: "1.0.0" }
paths:
  /ping:
    get:
      responses: {}
"#,
    )
    .expect("spec should be usable");

    let endpoints = converter.conversion_result();
    assert_eq!(endpoints.len(), 1);
}

#[test]
fn test_conversion_result_is_memoized() {
    let converter = OpenApiConverter::new(
        r#"
openapi: 3.1.0
info: { title: Todo API, version: "1.0.0" }
paths:
  /todos:
    get:
      responses:
        "200": { description: OK }
"#,
    )
    .expect("spec should be usable");

    let first = converter.conversion_result();
    let second = converter.conversion_result();
    assert!(std::ptr::eq(first, second));
}

#[test]
fn test_json_document() {
    let endpoints = convert(
        r#"{
  "openapi": "3.1.0",
  "info": { "title": "Todo API", "version": "1.0.0" },
  "paths": {
    "/todos": {
      "get": { "responses": { "200": { "description": "OK" } } }
    }
  }
}"#,
    );

    assert_eq!(
        endpoints,
        vec![Endpoint {
            responses: ["200".to_string()].into(),
            ..Endpoint::new("/todos", HttpMethod::Get)
        }]
    );
}

#[test]
fn test_file_based_construction() {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("temp file");
    write!(
        file,
        r#"
openapi: 3.1.0
info: {{ title: Todo API, version: "1.0.0" }}
paths:
  /todos:
    get:
      responses:
        "200": {{ description: OK }}
"#
    )
    .expect("write temp spec");

    let converter = OpenApiConverter::from_file(file.path()).expect("spec should be usable");
    assert_eq!(converter.conversion_result().len(), 1);
}

#[test]
fn test_unknown_path_item_keys_are_skipped() {
    let endpoints = convert(
        r#"
openapi: 3.1.0
info: { title: Todo API, version: "1.0.0" }
paths:
  /todos:
    get:
      responses:
        "200": { description: OK }
    subscribe:
      responses:
        "200": { description: OK }
"#,
    );

    assert_eq!(endpoints.len(), 1);
    assert_eq!(endpoints[0].method, HttpMethod::Get);
}
