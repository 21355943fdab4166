//! Mock login/registration gate over an in-memory identity store.

use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;
use tracing::debug;

use crate::error::{AuthError, SessionError, ValidationError};

static IDENTITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("identity pattern is a valid regex")
});

const SECRET_SYMBOLS: &str = "-_&%$#\"!=";
const SECRET_MIN_LEN: usize = 8;

pub const DEMO_IDENTITY: &str = "usuario@prueba.com";
pub const DEMO_SECRET: &str = "Password1!";

pub fn validate_identity(identity: &str) -> Result<(), ValidationError> {
    if IDENTITY_PATTERN.is_match(identity) {
        Ok(())
    } else {
        Err(ValidationError::InvalidIdentity)
    }
}

/// At least 8 characters with a lowercase letter, an uppercase letter, a digit
/// and one of `-_&%$#"!=`.
pub fn validate_secret(secret: &str) -> Result<(), ValidationError> {
    let long_enough = secret.chars().count() >= SECRET_MIN_LEN;
    let lower = secret.chars().any(|c| c.is_ascii_lowercase());
    let upper = secret.chars().any(|c| c.is_ascii_uppercase());
    let digit = secret.chars().any(|c| c.is_ascii_digit());
    let symbol = secret.chars().any(|c| SECRET_SYMBOLS.contains(c));

    if long_enough && lower && upper && digit && symbol {
        Ok(())
    } else {
        Err(ValidationError::WeakSecret)
    }
}

/// Validate both fields, collecting every failure.
pub fn validate_credentials(identity: &str, secret: &str) -> Result<(), SessionError> {
    let errors: Vec<ValidationError> = [validate_identity(identity), validate_secret(secret)]
        .into_iter()
        .filter_map(Result::err)
        .collect();

    if errors.is_empty() { Ok(()) } else { Err(SessionError::Invalid(errors)) }
}

/// Registered identity → secret pairs. Lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: HashMap<String, String>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with the demo account.
    pub fn with_demo_user() -> Self {
        let mut store = Self::new();
        store.users.insert(DEMO_IDENTITY.to_string(), DEMO_SECRET.to_string());
        store
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.users.contains_key(identity)
    }

    pub fn secret_for(&self, identity: &str) -> Option<&str> {
        self.users.get(identity).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn insert(&mut self, identity: &str, secret: &str) {
        self.users.insert(identity.to_string(), secret.to_string());
    }
}

#[derive(Debug, Default)]
pub struct SessionGate {
    store: UserStore,
}

impl SessionGate {
    pub fn new(store: UserStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn register(&mut self, identity: &str, secret: &str) -> Result<(), SessionError> {
        validate_credentials(identity, secret)?;

        if self.store.contains(identity) {
            return Err(AuthError::AlreadyRegistered.into());
        }

        self.store.insert(identity, secret);
        debug!(identity, "registered identity");
        Ok(())
    }

    pub fn authenticate(&self, identity: &str, secret: &str) -> Result<(), SessionError> {
        validate_credentials(identity, secret)?;

        match self.store.secret_for(identity) {
            Some(stored) if stored == secret => {
                debug!(identity, "access granted");
                Ok(())
            }
            Some(_) => Err(AuthError::SecretMismatch.into()),
            None => Err(AuthError::UnknownIdentity.into()),
        }
    }
}
