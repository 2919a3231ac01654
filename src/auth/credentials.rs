use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// The configured admin account.
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Checks a submitted pair without revealing which half mismatched.
    ///
    /// Both sides are hashed first so the comparison runs over fixed-size digests
    /// whatever the input lengths are, and both halves are always compared.
    pub fn is_valid(&self, username: &str, password: &str) -> bool {
        if username.is_empty() || password.is_empty() {
            return false;
        }

        let username_ok = digest_eq(username, &self.username);
        let password_ok = digest_eq(password, &self.password);

        (username_ok & password_ok).into()
    }
}

fn digest_eq(provided: &str, expected: &str) -> subtle::Choice {
    let provided = Sha256::digest(provided.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());
    provided.ct_eq(&expected)
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
