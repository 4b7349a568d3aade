//! Credential prompt port for the interactive login flow.

/// Login name and password for a tracker account.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account login, usually an email address.
    pub login: String,
    /// Account password.
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Asks an operator for tracker credentials.
pub trait CredentialPrompt: Send + Sync {
    /// Prompts for a login and password.
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read or a value is empty.
    fn credentials(&self) -> Result<Credentials, Box<dyn std::error::Error + Send + Sync>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_password() {
        let creds = Credentials { login: "me@example.com".into(), password: "hunter2".into() };
        let printed = format!("{creds:?}");
        assert!(printed.contains("me@example.com"));
        assert!(!printed.contains("hunter2"));
    }
}
