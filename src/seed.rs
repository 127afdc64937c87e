use serde_json::{json, Value};
use time::macros::format_description;
use time::OffsetDateTime;

use crate::auth::password::hash_password;
use crate::users::repo::{Role, User};

/// Accounts created the first time the service starts with no users file.
/// The passwords are placeholders to be changed after first login.
pub fn default_users() -> anyhow::Result<Vec<User>> {
    Ok(vec![
        User {
            id: 1,
            username: "admin".into(),
            password_hash: hash_password("admin123")?,
            role: Role::Admin,
            name: "Administrator".into(),
        },
        User {
            id: 2,
            username: "user1".into(),
            password_hash: hash_password("user123")?,
            role: Role::User,
            name: "Staff 1".into(),
        },
    ])
}

/// Empty bookkeeping document for a fresh install. The client owns the
/// shape from then on; this only has to render as a blank ledger.
pub fn default_document() -> Value {
    json!({
        "employees": [],
        "expenses": [],
        "rawMaterials": [],
        "rent": { "amount": 0, "dueDay": 1, "note": "" },
        "revenue": [],
        "products": [],
        "currentMonth": current_month(),
    })
}

fn current_month() -> String {
    let format = format_description!("[year]-[month]");
    OffsetDateTime::now_utc()
        .format(&format)
        .unwrap_or_default()
}
