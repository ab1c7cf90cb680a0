//! Integration tests for `#[error_rules]`.

#![allow(missing_docs)]

use assert2::{check, let_assert};
use serde_json::{Value, json};
use sieve::DEFAULT_FALLBACK_ERROR_MESSAGE;
use sieve::prelude::*;

/// Rules of a shop API.
struct ShopRules {
    product_name: String,
}

#[error_rules]
impl ShopRules {
    fn errors_for_404(&self) -> ErrorMap {
        ErrorMap::generic(format!("This {} does not exist", self.product_name))
    }

    #[rule("409")]
    fn conflict(&self, body: &Value) -> ErrorMap {
        let reference = body.get("reference").and_then(Value::as_str).unwrap_or("?");
        ErrorMap::generic(format!("Order {reference} is already paid"))
    }

    #[rule(422)]
    fn validation(&self, body: &Value, ctx: &RuleContext<'_>) -> ErrorMap {
        match body.get("errors").and_then(Value::as_object) {
            Some(fields) => fields
                .keys()
                .map(|field| (Some(field.clone()), self.invalid(field)))
                .collect(),
            None => ctx.fallback(),
        }
    }

    fn invalid(&self, field: &str) -> String {
        format!("{} {field} is invalid", self.product_name)
    }
}

/// Rules replacing the class defaults.
struct StrictRules;

#[error_rules]
impl StrictRules {
    fn errors_for_4xx(&self, _body: &Value, ctx: &RuleContext<'_>) -> ErrorMap {
        ErrorMap::generic(format!("Request rejected ({})", ctx.status().unwrap_or_default()))
    }

    #[rule("5XX")]
    fn server_error(&self) -> ErrorMap {
        ErrorMap::generic("Service unavailable")
    }

    #[rule(unknown)]
    fn offline(&self) -> ErrorMap {
        ErrorMap::generic("You are offline")
    }
}

fn shop_parser() -> ResponseParser {
    ResponseParser::builder()
        .rules(ShopRules {
            product_name: "product".to_string(),
        })
        .build()
}

fn errors(parser: &ResponseParser, status: impl Into<Option<u16>>, data: Value) -> ErrorMap {
    parser.errors_for(&Response::new(status, data))
}

#[test]
fn test_rule_by_method_name() {
    let parser = shop_parser();
    let result = errors(&parser, 404, json!({}));
    check!(result == ErrorMap::generic("This product does not exist"));
}

#[test]
fn test_rule_by_attribute() {
    let parser = shop_parser();

    let result = errors(&parser, 409, json!({ "reference": "A-42" }));
    check!(result == ErrorMap::generic("Order A-42 is already paid"));

    let result = errors(&parser, 422, json!({ "errors": { "sku": "x", "price": "y" } }));
    check!(result.field("sku") == Some("product sku is invalid"));
    check!(result.field("price") == Some("product price is invalid"));

    let result = errors(&parser, 422, json!({ "message": "Invalid" }));
    check!(result == ErrorMap::generic(DEFAULT_FALLBACK_ERROR_MESSAGE));
}

#[test]
fn test_helper_method_is_not_a_rule() {
    let parser = shop_parser();
    let keys: Vec<_> = parser.registry().keys().map(|k| k.to_string()).collect();

    check!(keys.len() == 6);
    for key in ["404", "409", "422", "2XX", "4XX", "5XX"] {
        check!(keys.iter().any(|k| k == key), "key: {key}");
    }
}

#[test]
fn test_class_defaults_still_apply() {
    let parser = shop_parser();

    let result = errors(&parser, 400, json!({ "message": "Bad input" }));
    check!(result == ErrorMap::generic("Bad input"));
    check!(errors(&parser, 201, json!({})).is_empty());

    let result = errors(&parser, 500, json!({}));
    check!(result == ErrorMap::generic(DEFAULT_FALLBACK_ERROR_MESSAGE));
}

#[test]
fn test_class_rules_replace_defaults() {
    let parser = ResponseParser::builder().rules(StrictRules).build();

    let result = errors(&parser, 400, json!({ "message": "Bad input" }));
    check!(result == ErrorMap::generic("Request rejected (400)"));

    let result = errors(&parser, 502, json!({}));
    check!(result == ErrorMap::generic("Service unavailable"));

    let result = errors(&parser, None, json!({}));
    check!(result == ErrorMap::generic("You are offline"));
    check!(errors(&parser, 200, json!({})).is_empty());
}

#[test]
fn test_exact_rules_shadow_class_rules() {
    let parser = ResponseParser::builder()
        .rules(StrictRules)
        .rules(ShopRules {
            product_name: "article".to_string(),
        })
        .build();

    let result = errors(&parser, 404, json!({}));
    check!(result == ErrorMap::generic("This article does not exist"));

    let result = errors(&parser, 410, json!({}));
    check!(result == ErrorMap::generic("Request rejected (410)"));
}

#[test]
fn test_registry_extend() {
    let mut registry = RuleRegistry::new();
    registry.extend(StrictRules);

    check!(registry.len() == 3);
    check!(registry.contains(RuleKey::Class(StatusClass::CLIENT_ERROR)));
    check!(registry.contains(RuleKey::Class(StatusClass::SERVER_ERROR)));
    check!(registry.contains(RuleKey::Unknown));

    let (key, rule) = registry.resolve(Some(418)).expect("a client error rule");
    check!(key == RuleKey::Class(StatusClass::CLIENT_ERROR));

    let ctx = RuleContext::new(Some(418), "Oops");
    check!(rule.apply(&Value::Null, &ctx) == ErrorMap::generic("Request rejected (418)"));
}

#[test]
fn test_throw_errors_with_rule_set() {
    let parser = shop_parser();
    let response = Response::new(404, json!({}));

    let_assert!(Err(err) = parser.throw_errors(&response));
    check!(err.status() == Some(404));
    check!(err.errors() == Some(&ErrorMap::generic("This product does not exist")));
}
