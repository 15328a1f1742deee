//! Catalog fixtures
//!
//! Bodies in the shapes the administration backend returns.

use serde_json::{Value, json};

pub const ADMIN: i64 = 1;
pub const EDITOR: i64 = 2;

/// `posts.create`
pub const POSTS_CREATE: i64 = 10;
/// `posts.read`
pub const POSTS_READ: i64 = 11;
/// `comments.delete`
pub const COMMENTS_DELETE: i64 = 23;

/// Bare array of roles
pub fn roles() -> Value {
    json!([
        { "id": ADMIN, "name": "Administrator" },
        { "id": EDITOR, "name": "Editor" }
    ])
}

/// Permissions wrapped in `data`, with capitalized actions and one unknown action
pub fn permissions() -> Value {
    let mut data = Vec::new();
    for (base, resource) in [(10, "posts"), (20, "comments")] {
        for (offset, action) in ["Create", "Read", "Update", "Delete"].iter().enumerate() {
            data.push(json!({
                "id": base + offset as i64,
                "resource": resource,
                "action": action,
                "name": format!("{} {}", action, resource),
            }));
        }
    }
    data.push(json!({ "id": 99, "resource": "posts", "action": "publish", "name": "Publish posts" }));
    json!({ "data": data })
}

/// Assignment rows for `(role, permission)` pairs
pub fn assignments(pairs: &[(i64, i64)]) -> Value {
    Value::Array(
        pairs
            .iter()
            .map(|(role_id, permission_id)| {
                json!({ "role_id": role_id, "permission_id": permission_id })
            })
            .collect(),
    )
}

/// Profile wrapped in `user`
pub fn profile(id: i64, roles: &[&str]) -> Value {
    let roles: Vec<Value> = roles.iter().map(|name| json!({ "name": name })).collect();
    json!({
        "user": {
            "id": id,
            "username": format!("user{}", id),
            "email": format!("user{}@example.com", id),
            "roles": roles,
        }
    })
}
