//! Credential generation for scaffolded projects
//!
//! The credential file is generated once at scaffold time, written with
//! restrictive permissions, and always excluded from version control. The
//! base64 value is derived from the password, never supplied independently.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Default admin password length
const PASSWORD_LENGTH: usize = 24;

/// Character sets for credential generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    /// a-zA-Z0-9 (default)
    #[default]
    Alphanumeric,
    /// 0-9a-f
    Hex,
    /// a-zA-Z0-9-_ (URL safe)
    UrlSafe,
}

impl Charset {
    const fn chars(&self) -> &'static [u8] {
        match self {
            Self::Alphanumeric => {
                b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789"
            }
            Self::Hex => b"0123456789abcdef",
            Self::UrlSafe => b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_",
        }
    }
}

/// Generate a random string from the given charset
pub fn generate(length: usize, charset: Charset) -> String {
    let chars = charset.chars();
    let mut rng = rand::rng();
    (0..length)
        .map(|_| chars[rng.random_range(0..chars.len())] as char)
        .collect()
}

/// Generated admin credentials for one project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub admin_user: String,

    pub admin_password: String,

    /// Base64 of the password, derived, never supplied independently
    pub admin_password_b64: String,

    pub created_at: DateTime<Utc>,
}

impl Credentials {
    /// Generate fresh credentials with a random password
    pub fn generate() -> Self {
        let password = generate(PASSWORD_LENGTH, Charset::Alphanumeric);
        Self::from_password("admin", password)
    }

    /// Build credentials from an explicit password, deriving the encoded form
    pub fn from_password(user: impl Into<String>, password: String) -> Self {
        let admin_password_b64 = BASE64.encode(&password);
        Self {
            admin_user: user.into(),
            admin_password: password,
            admin_password_b64,
            created_at: Utc::now(),
        }
    }

    /// Serialize to the credential file body
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| EngineError::Serialize {
            what: "credentials".to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_length_and_charset() {
        let value = generate(32, Charset::Alphanumeric);
        assert_eq!(value.len(), 32);
        assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));

        let hex = generate(16, Charset::Hex);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_derived_base64_matches() {
        let creds = Credentials::from_password("admin", "s3cret".to_string());
        assert_eq!(creds.admin_password_b64, BASE64.encode("s3cret"));
    }

    #[test]
    fn test_generated_credentials_roundtrip() {
        let creds = Credentials::generate();
        assert_eq!(creds.admin_user, "admin");
        assert_eq!(creds.admin_password.len(), PASSWORD_LENGTH);

        let yaml = creds.to_yaml().unwrap();
        let parsed: Credentials = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.admin_password, creds.admin_password);
        assert_eq!(parsed.admin_password_b64, creds.admin_password_b64);
    }
}
