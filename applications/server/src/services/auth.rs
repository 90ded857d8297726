/// Authentication service - password hashing and bearer tokens
use crate::error::{AuthError, Result, ServerError};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// bcrypt only reads this many bytes of a password
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Upper bound for the configured token lifetime (one year)
pub const MAX_ACCESS_TOKEN_MINUTES: u64 = 60 * 24 * 365;

/// Source of the current time for token issuance and expiry checks
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Clone)]
pub struct AuthService {
    secret: String,
    access_token_expiration: Duration,
    bcrypt_cost: u32,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService")
            .field("access_token_expiration", &self.access_token_expiration)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (username)
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
}

impl AuthService {
    /// Lifetimes above [`MAX_ACCESS_TOKEN_MINUTES`] are clamped to it.
    pub fn new(secret: String, access_expiration_minutes: u64, bcrypt_cost: u32) -> Self {
        let minutes = access_expiration_minutes.min(MAX_ACCESS_TOKEN_MINUTES);
        let minutes = i64::try_from(minutes).unwrap_or(0);

        Self {
            secret,
            access_token_expiration: Duration::minutes(minutes),
            bcrypt_cost,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for issuing and checking tokens
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Hash a password using bcrypt.
    ///
    /// Passwords longer than [`MAX_PASSWORD_BYTES`] are refused rather than
    /// truncated.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(ServerError::Validation(format!(
                "password must be at most {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }

        bcrypt::hash(password, self.bcrypt_cost).map_err(ServerError::from)
    }

    /// Verify a password against a hash.
    ///
    /// A malformed hash or an over-long password verifies as `false`.
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        if password.len() > MAX_PASSWORD_BYTES {
            return false;
        }

        match bcrypt::verify(password, hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!("Stored password hash is unusable: {}", e);
                false
            }
        }
    }

    /// Create a login token for `username` with the configured lifetime
    pub fn create_access_token(&self, username: &str) -> Result<String> {
        self.issue_token(username, self.access_token_expiration)
    }

    /// Sign a token carrying `subject` that expires `ttl` from now
    pub fn issue_token(&self, subject: &str, ttl: Duration) -> Result<String> {
        let now = self.clock.now();
        let exp = now
            .checked_add_signed(ttl)
            .ok_or_else(|| ServerError::Config("token lifetime out of range".to_string()))?;

        let claims = Claims {
            sub: subject.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::new(TOKEN_ALGORITHM), &claims, &encoding_key).map_err(ServerError::from)
    }

    /// Check signature and expiry, returning the subject.
    ///
    /// A token is valid while `now < exp`; there is no leeway.
    pub fn verify_token(&self, token: &str) -> std::result::Result<String, AuthError> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());

        // Expiry is checked below against the injected clock
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!("Token rejected: {}", e);
                AuthError::InvalidToken
            })?
            .claims;

        if self.clock.now().timestamp() >= claims.exp {
            return Err(AuthError::InvalidToken);
        }

        if claims.sub.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        Ok(claims.sub)
    }
}
