//! Property-based tests for raw error classification
//!
//! These tests use proptest to verify the classification rules across many
//! random raw errors.

use application::{UNKNOWN_ERROR_MESSAGE, categorize, classify};
use domain::{ErrorCategory, ErrorStatus, HandledError, RawError, UnknownErrorResult, ValidatorError};
use proptest::prelude::*;
use serde_json::json;

fn field_name() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9_]{0,11}"
}

fn field_errors() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((field_name(), "[A-Za-z0-9 ]{1,30}"), 1..8).prop_map(|entries| {
        let mut seen = std::collections::HashSet::new();
        entries
            .into_iter()
            .filter(|(field, _)| seen.insert(field.clone()))
            .collect()
    })
}

proptest! {
    #[test]
    fn validation_messages_are_joined_in_order(entries in field_errors()) {
        let raw = RawError::validation(
            "validation failed",
            entries
                .iter()
                .map(|(field, message)| (field.clone(), ValidatorError::new(message.clone()))),
        );

        let HandledError::Structured(err) = classify(&raw) else {
            return Err(TestCaseError::fail("validation error must be structured"));
        };

        let expected = entries
            .iter()
            .map(|(_, message)| message.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        prop_assert_eq!(err.message(), format!("Validation error: {expected}"));
        prop_assert_eq!(err.status_code(), 400);
        prop_assert_eq!(err.status(), ErrorStatus::Fail);
    }

    #[test]
    fn validation_without_errors_uses_message(message in "[A-Za-z ]{1,40}") {
        let raw = RawError::new("ValidationError", message.clone());
        let handled = classify(&raw);
        prop_assert_eq!(
            handled.message(),
            format!("Validation error: {message}")
        );
    }

    #[test]
    fn cast_message_is_exact(path in field_name(), value in "[A-Za-z0-9-]{1,24}") {
        let raw = RawError::cast(path.clone(), json!(value.clone()), "ObjectId");
        let handled = classify(&raw);
        prop_assert_eq!(handled.message(), format!("Invalid {path}: {value}"));
        prop_assert_eq!(handled.status_code(), Some(400));
    }

    #[test]
    fn only_code_11000_is_duplicate_key(code in 0i64..100_000) {
        let raw = RawError::new("MongoServerError", "server error")
            .with_code(code)
            .with_key_value([("email".to_string(), json!("x@y.com"))]);

        let category = categorize(&raw);
        if code == 11000 {
            prop_assert_eq!(category, ErrorCategory::UniqueConstraintViolation);
            let handled = classify(&raw);
            prop_assert_eq!(
                handled.message(),
                "Duplicate field value: email. Please use another one!"
            );
        } else {
            prop_assert_eq!(category, ErrorCategory::Unrecognized);
            prop_assert_eq!(
                classify(&raw),
                HandledError::Unknown(UnknownErrorResult::new("server error"))
            );
        }
    }

    #[test]
    fn unrelated_names_are_unknown(
        name in "[A-Z][a-zA-Z]{2,15}",
        message in "[A-Za-z ]{0,40}"
    ) {
        prop_assume!(!matches!(
            name.as_str(),
            "ValidationError" | "CastError" | "MongoServerError"
        ));

        let raw = RawError::new(name, message.clone());
        let expected = if message.is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        };
        prop_assert_eq!(
            classify(&raw),
            HandledError::Unknown(UnknownErrorResult::new(expected))
        );
    }

    #[test]
    fn classification_is_pure(entries in field_errors()) {
        let raw = RawError::validation(
            "validation failed",
            entries
                .into_iter()
                .map(|(field, message)| (field, ValidatorError::new(message))),
        );
        let before = raw.clone();

        let first = classify(&raw);
        let second = classify(&raw);

        prop_assert_eq!(first, second);
        prop_assert_eq!(raw, before);
    }
}
