use serde::Serialize;

/// ## Summary
/// The user on whose behalf a request runs. Sessions are owned by `id`.
///
/// The id is the UUIDv5 of the normalized email, so the same person keeps the
/// same id across restarts and authentication methods without a user table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Actor {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
}

impl Actor {
    #[must_use]
    pub fn from_email(name: &str, email: &str) -> Self {
        let email = email.trim().to_lowercase();
        let id = uuid::Uuid::new_v5(
            &uuid::Uuid::NAMESPACE_URL,
            format!("mailto:{email}").as_bytes(),
        );
        let name = match name.trim() {
            "" => email.clone(),
            trimmed => trimmed.to_string(),
        };
        Self { id, name, email }
    }
}
