//! Serde roundtrip and JsonSchema validation tests for entity and response types.

use chrono::{TimeZone, Utc};
use fb_core::entities::Feedback;
use fb_core::enums::Category;
use fb_core::responses::{ExportResponse, FeedbackCreateResponse};
use fb_core::submission::NewFeedback;
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn feedback(category: Category) -> Feedback {
    Feedback {
        id: "fdb-a3f8b2c1d4e5f607".into(),
        user_name: "Jane Doe".into(),
        email: "jane@example.com".into(),
        feedback_text: "Line one\nline two, with a comma".into(),
        category,
        created_at: Utc.with_ymd_and_hms(2026, 10, 17, 8, 15, 0).unwrap(),
    }
}

roundtrip_and_validate!(
    feedback_roundtrip,
    Feedback,
    feedback(Category::BugReport)
);

roundtrip_and_validate!(
    feedback_other_category_roundtrip,
    Feedback,
    feedback(Category::Other("praise".into()))
);

roundtrip_and_validate!(
    new_feedback_roundtrip,
    NewFeedback,
    NewFeedback {
        user_name: "John Roe".into(),
        email: "john@example.com".into(),
        feedback_text: "Search should match partial words.".into(),
        category: Some(Category::FeatureRequest),
    }
);

roundtrip_and_validate!(
    new_feedback_without_category_roundtrip,
    NewFeedback,
    NewFeedback {
        user_name: "John Roe".into(),
        email: "john@example.com".into(),
        feedback_text: "Search should match partial words.".into(),
        category: None,
    }
);

roundtrip_and_validate!(
    create_response_roundtrip,
    FeedbackCreateResponse,
    FeedbackCreateResponse {
        feedback: feedback(Category::Suggestion),
    }
);

roundtrip_and_validate!(
    export_response_roundtrip,
    ExportResponse,
    ExportResponse {
        path: "feedback-export-2026-10-17.csv".into(),
        rows: 12,
        bytes: 1024,
    }
);

#[test]
fn category_serializes_as_stored_text() {
    let json = serde_json::to_value(feedback(Category::FeatureRequest)).unwrap();
    assert_eq!(json["category"], "feature_request");
}
