//! Auth data models.

use std::fmt;

use domicilios::ids::TypedUuid;
use zeroize::Zeroizing;

/// Marker for user ids.
#[derive(Debug)]
pub struct User;

/// User Id
pub type UserId = TypedUuid<User>;

/// Email and password for the password grant.
pub struct Credentials {
    /// Account email
    pub email: String,

    /// Account password, wiped from memory on drop
    pub password: Zeroizing<String>,
}

impl Credentials {
    /// Build credentials from raw strings.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// An authenticated backend session.
#[derive(Clone)]
pub struct Session {
    /// Signed-in user
    pub user_id: UserId,

    /// Bearer token for row-level-secured requests
    pub access_token: Zeroizing<String>,
}

impl Session {
    /// Build a session from a user id and bearer token.
    pub fn new(user_id: UserId, access_token: impl Into<String>) -> Self {
        Self {
            user_id,
            access_token: Zeroizing::new(access_token.into()),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_never_contains_secrets() {
        let session = Session::new(UserId::new(), "eyJhbGciOi.secret");
        let credentials = Credentials::new("ana@example.com", "hunter2");

        assert!(!format!("{session:?}").contains("secret"));
        assert!(!format!("{credentials:?}").contains("hunter2"));
    }
}
