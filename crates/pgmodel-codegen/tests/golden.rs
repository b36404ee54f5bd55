//! The generated module checked in under `crates/pgmodel/tests/fixtures` must match what the
//! generator produces today. Regenerate it with:
//!
//! ```text
//! pgmodel model --source tests/fixtures/models.rs --module super \
//!     --output tests/fixtures/user_model.rs --table users --model User \
//!     --query UserInfo --query UserTags
//! ```
//!
//! run from `crates/pgmodel`.

use pgmodel_codegen::{GenerateRequest, generate};

const SOURCE: &str = include_str!("../../pgmodel/tests/fixtures/models.rs");
const EXPECTED: &str = include_str!("../../pgmodel/tests/fixtures/user_model.rs");

#[test]
fn fixture_module_is_up_to_date() {
    let queries = vec!["UserInfo".to_string(), "UserTags".to_string()];
    let out = generate(
        SOURCE,
        &GenerateRequest {
            source_path: "tests/fixtures/models.rs",
            module: "super",
            prefix: "user",
            table: "users",
            model: "User",
            queries: &queries,
        },
    )
    .unwrap();

    assert_eq!(out.content, EXPECTED);
}

#[test]
fn fixture_functions() {
    let queries = vec!["UserInfo".to_string(), "UserTags".to_string()];
    let out = generate(
        SOURCE,
        &GenerateRequest {
            source_path: "tests/fixtures/models.rs",
            module: "super",
            prefix: "user",
            table: "users",
            model: "User",
            queries: &queries,
        },
    )
    .unwrap();

    assert_eq!(
        out.functions[6..],
        [
            "user_model_get_user_info_by_id",
            "user_model_get_user_info_ord_id",
            "user_model_get_user_info_eq_status_ord_id",
            "user_model_get_user_info_set_id",
            "user_model_get_user_info_by_name",
            "user_model_get_user_tags_set_status",
        ]
    );
    assert!(out.model.has_unannotated_fields);
    assert_eq!(out.model.primary_key.name, "id");
}
