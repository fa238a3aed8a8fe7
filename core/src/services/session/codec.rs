//! Credential signing and verification

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::session::SessionClaims;
use crate::errors::TokenError;

/// Signs claims into an opaque credential and reverses it
pub trait TokenCodec: Send + Sync {
    /// Sign a set of claims
    fn sign(&self, claims: &SessionClaims) -> Result<String, TokenError>;

    /// Check signature, issuer, audience and time bounds at `now`
    ///
    /// # Returns
    /// * `Ok(SessionClaims)` - The decoded claims
    /// * `Err(TokenError::Expired)` - `now` is at or past `exp`
    /// * `Err(TokenError::Malformed)` - Not a decodable credential
    /// * `Err(TokenError::Invalid)` - Decodable but not acceptable
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError>;
}

/// HS256 JWT codec keyed by the process-wide secret
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtCodec {
    /// Creates a codec for the given secret, issuer and audience
    pub fn new(secret: &str, issuer: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        // time bounds are checked against the injected clock in `verify`
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    fn map_decode_error(error: &jsonwebtoken::errors::Error) -> TokenError {
        match error.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => TokenError::Malformed,
            _ => TokenError::Invalid,
        }
    }
}

impl TokenCodec for JwtCodec {
    fn sign(&self, claims: &SessionClaims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, event = "session_sign_failed", "Failed to sign session");
            TokenError::GenerationFailed
        })
    }

    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError> {
        let claims = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| Self::map_decode_error(&e))?
            .claims;

        let now = now.timestamp();
        if now >= claims.exp {
            return Err(TokenError::Expired);
        }
        if now < claims.nbf {
            return Err(TokenError::Invalid);
        }

        Ok(claims)
    }
}
