//! Integration tests for type resolutions

use schemax_compiler::{Schemax, TypeResolution};
use schemax_foundation::ErrorKind;
use serde_json::json;

use crate::fixtures::{
    decl, hello_sdl, merged_dependencies_sdl, merged_mutation_sdl, merged_query_sdl,
    product_schemax, project_sdl, query_mutation_block, random_schemax, sdl, user_schemax,
    user_sdl,
};

const MUTATION_PATTERN: &str = r"^type Mutation(\s|$)";

fn schema(product_mutation: &str, user_mutation: &str) -> Schemax {
    Schemax::from_items([
        random_schemax(),
        product_schemax(product_mutation),
        user_schemax(user_mutation),
    ])
}

/// Declarations in registry order once both mutation headers have collapsed
/// into the first one's slot.
fn resolved_sdl(mutation_header: &str, user_header: &str) -> String {
    let mut declarations = vec![
        hello_sdl(),
        project_sdl(),
        merged_query_sdl(),
        merged_mutation_sdl(mutation_header),
        user_sdl(user_header),
    ];
    declarations.extend(merged_dependencies_sdl());
    declarations.push(query_mutation_block());
    sdl(&declarations)
}

// =============================================================================
// Length Policies
// =============================================================================

#[test]
fn without_rules_headers_stay_apart() {
    let out = schema("type Mutation @aws_cognito_user_pools", "type Mutation")
        .to_sdl()
        .unwrap();
    assert!(out.contains("type Mutation @aws_cognito_user_pools {\n\tcreateProject"));
    assert!(out.contains("type Mutation {\n\tcreateUser"));
}

#[test]
fn keep_longest() {
    let mut schema = schema("type Mutation @aws_cognito_user_pools", "type Mutation");
    let rule = TypeResolution::pattern(MUTATION_PATTERN).unwrap().keep_longest();
    schema.add_type_resolutions([rule]);
    assert_eq!(
        schema.to_sdl().unwrap(),
        resolved_sdl("type Mutation @aws_cognito_user_pools", "type User")
    );
}

#[test]
fn keep_shortest() {
    let mut schema = schema("type Mutation @aws_cognito_user_pools", "type Mutation");
    let rule = TypeResolution::pattern(MUTATION_PATTERN).unwrap().keep_shortest();
    schema.add_type_resolutions([rule]);
    assert_eq!(schema.to_sdl().unwrap(), resolved_sdl("type Mutation", "type User"));
}

#[test]
fn pattern_rule_defaults_to_longest() {
    let mut schema = schema("type Mutation", "type Mutation @aws_cognito_user_pools");
    schema.add_type_resolutions([TypeResolution::pattern(MUTATION_PATTERN).unwrap()]);
    let out = schema.to_sdl().unwrap();
    assert!(out.contains(
        "type Mutation @aws_cognito_user_pools {\n\tcreateProject(project: Input_1743483650): Project"
    ));
}

// =============================================================================
// Renames and Reducers
// =============================================================================

#[test]
fn rename_and_merge() {
    let mut schema = schema("type Mutation @aws_cognito_user_pools", "type Mutation");
    schema.add_type_resolutions([
        TypeResolution::exact("type User").rename_to("type User @aws_auth"),
        TypeResolution::pattern(MUTATION_PATTERN).unwrap().keep_longest(),
    ]);
    assert_eq!(
        schema.to_sdl().unwrap(),
        resolved_sdl("type Mutation @aws_cognito_user_pools", "type User @aws_auth")
    );
}

#[test]
fn custom_reducer_unions_directives() {
    let mut schema = schema("type Mutation @aws_cognito_user_pools", "type Mutation @aws_auth");
    schema.add_type_resolutions([TypeResolution::pattern(MUTATION_PATTERN).unwrap().reduce_with(
        |_master: &str, next: &str, attributes: &mut Vec<String>| {
            for attribute in next.trim_start_matches("type Mutation").split_whitespace() {
                if !attributes.iter().any(|a| a == attribute) {
                    attributes.push(attribute.to_string());
                }
            }
            if attributes.is_empty() {
                "type Mutation".to_string()
            } else {
                format!("type Mutation {}", attributes.join(" "))
            }
        },
    )]);
    assert_eq!(
        schema.to_sdl().unwrap(),
        resolved_sdl("type Mutation @aws_cognito_user_pools @aws_auth", "type User")
    );
}

#[test]
fn reducer_state_is_fresh_per_serialization() {
    let mut schema = schema("type Mutation @a", "type Mutation @b");
    schema.add_type_resolutions([TypeResolution::pattern(MUTATION_PATTERN).unwrap().reduce_with(
        |master: &str, next: &str, count: &mut usize| {
            *count += 1;
            if *count == 1 {
                next.to_string()
            } else {
                format!("{master} {}", next.trim_start_matches("type Mutation "))
            }
        },
    )]);
    let first = schema.to_sdl().unwrap();
    let second = schema.to_sdl().unwrap();
    assert_eq!(first, second);
    assert!(first.contains("type Mutation @a @b {"));
}

// =============================================================================
// Rule Selection
// =============================================================================

#[test]
fn first_matching_rule_claims_header() {
    let mut schema = Schemax::from_items([json!("type User"), json!({ "id": "ID" })]);
    schema.add_type_resolutions([
        TypeResolution::pattern("^type User").unwrap().rename_to("type User @first"),
        TypeResolution::exact("type User").rename_to("type User @second"),
    ]);
    assert_eq!(schema.to_sdl().unwrap(), decl("type User @first", &["id: ID"]));
}

#[test]
fn unmatched_rules_change_nothing() {
    let mut schema = Schemax::from_items([json!("type User"), json!({ "id": "ID" })]);
    let rule = TypeResolution::exact("type Account").rename_to("type Account @x");
    schema.add_type_resolutions([rule]);
    assert_eq!(schema.to_sdl().unwrap(), decl("type User", &["id: ID"]));
}

#[test]
fn collapsing_enum_and_object_fails() {
    let mut schema = Schemax::from_items([
        json!("enum Status"),
        json!(["on", "off"]),
        json!("enum Status @deprecated"),
        json!({ "a": "Int" }),
    ]);
    schema.add_type_resolutions([TypeResolution::pattern("^enum Status").unwrap()]);
    let err = schema.to_sdl().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IncompatibleMerge { .. }));
}

#[test]
fn invalid_pattern_is_rejected() {
    let err = TypeResolution::pattern("^type (Mutation").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::InvalidPattern { ref pattern, .. } if pattern == "^type (Mutation"
    ));
}
