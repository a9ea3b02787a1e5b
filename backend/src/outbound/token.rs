//! HS256 bearer credential codec.
//!
//! The credential carries only the subject e-mail and timestamps. Roles are
//! deliberately absent; authorisation re-reads them from the user store on
//! every request.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenCodec, TokenCodecError};
use crate::domain::{EmailAddress, Identity};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies HS256 credentials with a shared secret.
pub struct JwtTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtTokenCodec {
    /// Build a codec over the shared secret with the given lifetime in
    /// seconds.
    pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: Duration::seconds(ttl_secs),
        }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, identity: &Identity) -> Result<String, TokenCodecError> {
        let now = Utc::now();
        let claims = Claims {
            sub: identity.email().to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| TokenCodecError::Issuance(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Identity, TokenCodecError> {
        // Every failure mode collapses into the same rejection so callers
        // cannot probe for why a credential was refused.
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| TokenCodecError::Rejected)?;
        let email =
            EmailAddress::parse(data.claims.sub).map_err(|_| TokenCodecError::Rejected)?;
        Ok(Identity::new(email))
    }
}
