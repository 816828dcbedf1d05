// SQL for the users table and row decoding.
use roster_core::{RosterError, RosterResult, User};
use sqlx::{postgres::PgRow, Row};

pub const LIST_USERS: &str = "SELECT id, name, email FROM users";

pub const GET_USER: &str = r#"
    SELECT id, name, email
    FROM users
    WHERE id = $1
"#;

pub const INSERT_USER: &str = r#"
    INSERT INTO users (name, email)
    VALUES ($1, $2)
    RETURNING id
"#;

pub const UPDATE_USER: &str = r#"
    UPDATE users
    SET name = $1, email = $2
    WHERE id = $3
"#;

pub const DELETE_USER: &str = "DELETE FROM users WHERE id = $1";

/// Parse a user from a database row. NULL columns read as empty strings.
pub fn parse_user(row: &PgRow) -> RosterResult<User> {
    Ok(User {
        id: row.try_get("id").map_err(RosterError::database)?,
        name: row
            .try_get::<Option<String>, _>("name")
            .map_err(RosterError::database)?
            .unwrap_or_default(),
        email: row
            .try_get::<Option<String>, _>("email")
            .map_err(RosterError::database)?
            .unwrap_or_default(),
    })
}
