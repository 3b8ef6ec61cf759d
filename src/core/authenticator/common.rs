use serde::Serialize;

/// Identifier and password of a CAS account.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub identifier: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"********")
            .finish()
    }
}

/// Body of the CAS login form.
///
/// Fields are declared in the order they are encoded on the wire.
#[derive(Serialize, Debug)]
pub struct LoginForm<'a> {
    #[serde(rename = "_eventId")]
    pub event_id: &'a str,
    pub execution: &'a str,
    pub lt: &'a str,
    pub password: &'a str,
    pub submit: &'a str,
    pub username: &'a str,
}

impl<'a> LoginForm<'a> {
    pub fn new(lt: &'a str, credentials: &'a Credentials, submit: &'a str) -> Self {
        Self {
            event_id: "submit",
            execution: "e1s1",
            lt,
            password: &credentials.secret,
            submit,
            username: &credentials.identifier,
        }
    }
}
