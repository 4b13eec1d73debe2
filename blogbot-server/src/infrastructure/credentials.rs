use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Configured admin credentials for basic-auth gated endpoints.
#[derive(Clone)]
pub(crate) struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    pub(crate) fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields are always compared so the result does not depend on which one differs.
    pub(crate) fn verify(&self, username: &str, password: &str) -> bool {
        let username_ok = digest_eq(username, &self.username);
        let password_ok = digest_eq(password, &self.password);
        (username_ok & password_ok).into()
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

// Hashing first makes the comparison length-independent.
fn digest_eq(candidate: &str, expected: &str) -> subtle::Choice {
    let candidate = Sha256::digest(candidate.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());
    candidate.as_slice().ct_eq(expected.as_slice())
}
