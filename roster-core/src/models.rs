use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn from_input(id: i32, input: UserInput) -> Self {
        Self {
            id,
            name: input.name,
            email: input.email,
        }
    }
}

/// Writable fields of a user, as accepted by create and update.
///
/// Missing fields are the empty string. There is no validation of either
/// field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    pub name: String,
    pub email: String,
}

impl UserInput {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Decode the first JSON value of a request body, if it is an object.
    ///
    /// The object contributes each of `name` and `email` that holds a
    /// string; every other field is ignored. Anything after the first
    /// value is not read. Returns `None` for an empty body, a syntax error
    /// in the first value, or a first value that is not an object.
    pub fn from_json(body: &[u8]) -> Option<Self> {
        let first = serde_json::Deserializer::from_slice(body)
            .into_iter::<Value>()
            .next();

        match first {
            Some(Ok(Value::Object(fields))) => {
                let text = |key: &str| {
                    fields
                        .get(key)
                        .and_then(Value::as_str)
                        .map(str::to_owned)
                        .unwrap_or_default()
                };
                Some(Self {
                    name: text("name"),
                    email: text("email"),
                })
            }
            _ => None,
        }
    }

    /// Like [`UserInput::from_json`], but falls back to the default input.
    pub fn from_json_lenient(body: &[u8]) -> Self {
        Self::from_json(body).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn user_deleted() -> Self {
        Self {
            message: "User deleted".to_string(),
        }
    }
}
