//! Integration tests for multipart requests following the upload convention.
//!
//! The HTTP layer hands over already-parsed form fields; these tests check
//! that the `operations` field is decoded and that `variables.<path>` fields
//! land in the variables the executor receives.

mod common;

use std::sync::Mutex;

use graphql_http::{
    ExecutionContext, ExecutionParams, ExecutionResult, Executor, ExecutorFault, GraphqlHttp,
    IncomingRequest, RequestOptions,
};
use http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

/// Echoes the resolved variables back as `data`.
struct Echo {
    seen: Mutex<Vec<ExecutionParams>>,
}

impl Executor for Echo {
    type Schema = ();
    type RootValue = ();
    type Middleware = ();

    fn execute(&self, ctx: ExecutionContext<'_, Self>) -> Result<ExecutionResult, ExecutorFault> {
        self.seen.lock().unwrap().push(ctx.params.clone());
        Ok(ExecutionResult::from_data(json!({
            "variables": ctx.params.variables.clone().unwrap_or(Value::Null)
        })))
    }
}

fn echo() -> GraphqlHttp<Echo> {
    let options = RequestOptions::<Echo>::builder().schema(()).build().unwrap();
    GraphqlHttp::new(
        Echo {
            seen: Mutex::new(Vec::new()),
        },
        options,
    )
}

fn multipart(fields: &[(&str, &str)]) -> IncomingRequest {
    fields
        .iter()
        .fold(
            IncomingRequest::builder(Method::POST)
                .content_type("multipart/form-data; boundary=----graphql"),
            |builder, (name, value)| builder.form_field(*name, *value),
        )
        .build()
}

const UPLOAD_MUTATION: &str = "mutation($file: Upload!) { singleUpload(file: $file) }";

// ============================================================================
// Operations Field
// ============================================================================

#[test]
fn test_operations_field_supplies_query_and_variables() {
    let operations = json!({
        "query": UPLOAD_MUTATION,
        "variables": {"file": null},
        "operationName": "upload"
    })
    .to_string();
    let binding = echo();

    let response = binding.handle(&multipart(&[
        ("operations", operations.as_str()),
        ("variables.file", "file-0"),
    ]));

    assert_eq!(response.status, StatusCode::OK);
    let seen = binding.executor().seen.lock().unwrap();
    assert_eq!(
        seen.as_slice(),
        &[ExecutionParams {
            query: UPLOAD_MUTATION.to_string(),
            variables: Some(json!({"file": "file-0"})),
            operation_name: Some("upload".to_string()),
        }]
    );
}

#[test]
fn test_missing_operations_field_is_rejected() {
    let response = echo().handle(&multipart(&[("variables.file", "file-0")]));

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body_json().unwrap(),
        json!({"errors": [{"message": "Multipart request is missing the \"operations\" field."}]})
    );
}

#[test]
fn test_malformed_operations_field_is_rejected() {
    let response = echo().handle(&multipart(&[("operations", "{\"query\":")]));

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body_json().unwrap(),
        json!({"errors": [{"message": "Multipart \"operations\" field sent invalid JSON."}]})
    );
}

#[test]
fn test_operations_without_query_is_rejected() {
    let operations = json!({"variables": {"file": null}}).to_string();
    let response = echo().handle(&multipart(&[("operations", operations.as_str())]));

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body_json().unwrap(),
        json!({"errors": [{"message": "Must provide query string."}]})
    );
}

// ============================================================================
// Variable Paths
// ============================================================================

#[test]
fn test_nested_paths_fill_lists() {
    let operations = json!({
        "query": "mutation($files: [Upload!]!) { multipleUpload(files: $files) }",
        "variables": {"input": {"files": [null, null]}}
    })
    .to_string();

    let response = echo().handle(&multipart(&[
        ("operations", operations.as_str()),
        ("variables.input.files.0", "file-0"),
        ("variables.input.files.1", "file-1"),
    ]));

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body_json().unwrap(),
        json!({"data": {"variables": {"input": {"files": ["file-0", "file-1"]}}}})
    );
}

#[test]
fn test_upload_fields_create_variables_when_absent() {
    let operations = json!({"query": UPLOAD_MUTATION}).to_string();

    let response = echo().handle(&multipart(&[
        ("operations", operations.as_str()),
        ("variables.file", "file-0"),
    ]));

    assert_eq!(
        response.body_json().unwrap(),
        json!({"data": {"variables": {"file": "file-0"}}})
    );
}

#[test]
fn test_fields_without_prefix_are_ignored() {
    let operations = json!({"query": UPLOAD_MUTATION, "variables": {"file": null}}).to_string();

    let response = echo().handle(&multipart(&[
        ("operations", operations.as_str()),
        ("map", "{\"0\":[\"variables.file\"]}"),
        ("0", "file-0"),
    ]));

    assert_eq!(
        response.body_json().unwrap(),
        json!({"data": {"variables": {"file": null}}})
    );
}

#[test]
fn test_index_past_end_of_list_is_rejected() {
    let operations = json!({
        "query": UPLOAD_MUTATION,
        "variables": {"files": [null]}
    })
    .to_string();

    let response = echo().handle(&multipart(&[
        ("operations", operations.as_str()),
        ("variables.files.3", "file-3"),
    ]));

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body_json().unwrap(),
        json!({"errors": [{"message": "Cannot map form field \"variables.files.3\" into variables."}]})
    );
}

#[test]
fn test_path_through_scalar_is_rejected() {
    let operations = json!({
        "query": UPLOAD_MUTATION,
        "variables": {"file": "already-set"}
    })
    .to_string();

    let response = echo().handle(&multipart(&[
        ("operations", operations.as_str()),
        ("variables.file.inner", "file-0"),
    ]));

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[test]
fn test_query_string_variables_still_receive_uploads() {
    let operations = json!({"query": UPLOAD_MUTATION}).to_string();
    let request = IncomingRequest::builder(Method::POST)
        .content_type("multipart/form-data; boundary=----graphql")
        .query_string(common::qs(&[("variables", r#"{"file":null,"note":"hi"}"#)]))
        .form_field("operations", operations)
        .form_field("variables.file", "file-0")
        .build();

    let response = echo().handle(&request);
    assert_eq!(
        response.body_json().unwrap(),
        json!({"data": {"variables": {"file": "file-0", "note": "hi"}}})
    );
}
