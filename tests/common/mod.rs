//! Shared fixtures for the integration suites.
//!
//! [`TestSchema`] stands in for a GraphQL engine. It understands just enough
//! of the documents used in the tests to answer like the classic `Root`
//! schema with a `test(who: String)` field and a non-null `thrower` field.
//! Any document mentioning `explode` makes the executor itself fail.

#![allow(dead_code)]

use graphql_http::{
    ExecutionContext, ExecutionResult, Executor, ExecutorFault, GraphQLError, GraphqlHttp,
    IncomingRequest, RequestOptions,
};
use http::Method;
use serde_json::{json, Map, Value};

pub struct TestSchema;

impl Executor for TestSchema {
    type Schema = ();
    type RootValue = String;
    type Middleware = String;

    fn execute(&self, ctx: ExecutionContext<'_, Self>) -> Result<ExecutionResult, ExecutorFault> {
        let query = ctx.params.query.as_str();

        if query.trim_start().starts_with("syntaxerror") {
            return Ok(ExecutionResult::invalid([GraphQLError::new(
                "Syntax Error GraphQL request (1:1) Unexpected Name \"syntaxerror\"\n\n1: syntaxerror\n   ^\n",
            )
            .with_location(1, 1)]));
        }

        if query.contains("unknown") {
            return Ok(ExecutionResult::invalid([GraphQLError::new(
                "Cannot query field \"unknown\" on type \"Root\".",
            )
            .with_location(1, 2)]));
        }

        if query.contains("explode") {
            return Err(ExecutorFault::new("Exception", "Throws!"));
        }

        if query.contains("thrower") {
            return Ok(ExecutionResult::with_errors(
                None,
                [GraphQLError::new("Throws!").with_location(1, 2)],
            ));
        }

        let operation = selected_operation(query, ctx.params.operation_name.as_deref());
        let mut data = Map::new();

        if operation.contains("test") {
            let who = who_argument(operation, ctx.params.variables.as_ref());
            data.insert("test".to_string(), Value::String(format!("Hello {who}")));
        }
        if operation.contains("...shared") {
            data.insert("shared".to_string(), json!("Hello Everyone"));
        }
        if operation.contains("root") {
            data.insert("root".to_string(), json!(ctx.root_value));
        }
        if operation.contains("middleware") {
            data.insert("middleware".to_string(), json!(ctx.middleware));
        }
        if operation.contains("method") {
            data.insert("method".to_string(), json!(ctx.request.method().as_str()));
        }

        Ok(ExecutionResult::from_data(Value::Object(data)))
    }
}

fn selected_operation<'a>(query: &'a str, operation_name: Option<&str>) -> &'a str {
    let Some(name) = operation_name else {
        return query;
    };
    let marker = format!("query {name} ");
    let Some(start) = query.find(&marker) else {
        return query;
    };
    let rest = &query[start + marker.len()..];
    let end = rest
        .find("query ")
        .or_else(|| rest.find("fragment "))
        .unwrap_or(rest.len());
    &rest[..end]
}

fn who_argument(operation: &str, variables: Option<&Value>) -> String {
    if operation.contains("who: $who") {
        return variables
            .and_then(|v| v.get("who"))
            .and_then(Value::as_str)
            .unwrap_or("World")
            .to_string();
    }
    if let Some(start) = operation.find("who: \"") {
        let rest = &operation[start + 6..];
        if let Some(end) = rest.find('"') {
            return rest[..end].to_string();
        }
    }
    "World".to_string()
}

/// A binding over [`TestSchema`] with static options.
pub fn graphql_http(pretty: bool) -> GraphqlHttp<TestSchema> {
    let options = RequestOptions::<TestSchema>::builder()
        .schema(())
        .pretty(pretty)
        .build()
        .unwrap();
    GraphqlHttp::new(TestSchema, options)
}

pub fn get(query_string: &str) -> IncomingRequest {
    IncomingRequest::builder(Method::GET)
        .query_string(query_string)
        .build()
}

pub fn post(query_string: &str, content_type: &str, body: impl Into<Vec<u8>>) -> IncomingRequest {
    IncomingRequest::builder(Method::POST)
        .query_string(query_string)
        .content_type(content_type)
        .body(body)
        .build()
}

pub fn post_json(query_string: &str, body: &Value) -> IncomingRequest {
    post(query_string, "application/json", serde_json::to_vec(body).unwrap())
}

pub fn post_form(query_string: &str, fields: &[(&str, &str)]) -> IncomingRequest {
    let body = serde_urlencoded::to_string(fields).unwrap();
    post(query_string, "application/x-www-form-urlencoded", body)
}

/// URL-encodes query-string pairs.
pub fn qs(pairs: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(pairs).unwrap()
}
