//! Shared schema fragments and SDL builders.

use serde_json::{Value, json};

/// Renders `header { lines }` the way the assembler does.
pub fn decl(header: &str, lines: &[&str]) -> String {
    let mut out = format!("{header} {{\n");
    for line in lines {
        out.push('\t');
        out.push_str(line);
        out.push('\n');
    }
    out.push('}');
    out
}

/// Joins declarations with blank lines.
pub fn sdl(declarations: &[String]) -> String {
    declarations.join("\n\n")
}

pub fn base_resource() -> Value {
    json!({ "id": "ID!", "name": "String!", "description": "String" })
}

fn with_base(extra: Value) -> Value {
    let mut merged = base_resource();
    if let (Some(map), Value::Object(extra)) = (merged.as_object_mut(), extra) {
        map.extend(extra);
    }
    merged
}

pub fn random_schemax() -> Value {
    json!(["enum Hello", ["Peter", "Jacky"]])
}

/// Project declarations, with the mutation header given.
pub fn product_schemax(mutation_header: &str) -> Value {
    json!([
        "type Project @aws_cognito_user_pools",
        with_base(json!({
            "create_date": "String!",
            "update_date": "String @aws_api_key",
            "delete_date": "String",
            "last_commit_date": "String",
            "@aws_api_key": null
        })),
        "type Query",
        {
            "projects": {
                "where": { "id": "ID", "name": "String" },
                "order": { "by": ["create_date", "name"], "dir": ["asc", "desc"] },
                ":": { "count": "Int", "data": "[Project]", "cursor": "ID" }
            },
            "@aws_api_key @aws_cognito_user_pools(cognito_groups: [\"Bloggers\", \"Readers\"])": null
        },
        mutation_header,
        {
            "createProject": {
                "project": { "name": "String!", "description": "String" },
                ":": "Project"
            }
        }
    ])
}

/// User declarations, with the mutation header given.
pub fn user_schemax(mutation_header: &str) -> Value {
    json!([
        "type User",
        with_base(json!({ "first_name": "String", "last_name": "String" })),
        "type Query",
        { "users": { "where": { "id": "ID", "name": "String" }, ":": "[User]" } },
        mutation_header,
        { "createUser": { "user": { "name": "String!", "description": "String" }, ":": "User" } }
    ])
}

pub fn hello_sdl() -> String {
    decl("enum Hello", &["Jacky", "Peter"])
}

pub fn project_sdl() -> String {
    decl(
        "type Project @aws_cognito_user_pools",
        &[
            "id: ID!",
            "name: String!",
            "description: String",
            "create_date: String!",
            "update_date: String @aws_api_key",
            "delete_date: String",
            "last_commit_date: String",
            "@aws_api_key",
        ],
    )
}

pub fn merged_query_sdl() -> String {
    decl(
        "type Query",
        &[
            "projects(where: Input_11955503210, order: Input_12144573852): Type_1850756101",
            "@aws_api_key @aws_cognito_user_pools(cognito_groups: [\"Bloggers\", \"Readers\"])",
            "users(where: Input_11955503210): [User]",
        ],
    )
}

pub fn user_sdl(header: &str) -> String {
    decl(
        header,
        &[
            "id: ID!",
            "name: String!",
            "description: String",
            "first_name: String",
            "last_name: String",
        ],
    )
}

pub fn merged_mutation_sdl(header: &str) -> String {
    decl(
        header,
        &[
            "createProject(project: Input_1743483650): Project",
            "createUser(user: Input_1743483650): User",
        ],
    )
}

/// Hoisted declarations shared by every product + user schema.
pub fn merged_dependencies_sdl() -> Vec<String> {
    vec![
        decl("input Input_11955503210", &["id: ID", "name: String"]),
        decl("enum Enum_11091652180", &["create_date", "name"]),
        decl("enum Enum_1894885946", &["asc", "desc"]),
        decl(
            "input Input_12144573852",
            &["by: Enum_11091652180", "dir: Enum_1894885946"],
        ),
        decl(
            "type Type_1850756101",
            &["count: Int", "data: [Project]", "cursor: ID"],
        ),
        decl("input Input_1743483650", &["name: String!", "description: String"]),
    ]
}

pub fn query_mutation_block() -> String {
    decl("schema", &["query: Query", "mutation: Mutation"])
}
