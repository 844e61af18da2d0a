use std::time::Duration;

use anyhow::{Result, anyhow};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use roomgate_types::grant::{AccessTokenClaims, VideoGrant};

/// Signs room access tokens with an API key/secret pair.
///
/// Tokens are HS256 JWTs: `iss` is the API key, `sub` and `jti` the
/// participant identity, and the room permissions live in the `video` claim.
#[derive(Clone)]
pub struct TokenIssuer {
    api_key: String,
    api_secret: String,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>, ttl: Duration) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            ttl,
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, identity: &str, grant: VideoGrant) -> Result<String> {
        let now = chrono::Utc::now().timestamp();
        let ttl = i64::try_from(self.ttl.as_secs())?;
        let exp = now
            .checked_add(ttl)
            .ok_or_else(|| anyhow!("Token TTL of {}s overflows the expiry timestamp", ttl))?;

        let claims = AccessTokenClaims {
            iss: self.api_key.clone(),
            sub: identity.to_string(),
            jti: identity.to_string(),
            nbf: now,
            exp,
            video: grant,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.api_secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Decode a token and check its signature, issuer and validity window.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.api_key]);
        validation.validate_nbf = true;

        let data = decode::<AccessTokenClaims>(
            token,
            &DecodingKey::from_secret(self.api_secret.as_bytes()),
            &validation,
        )?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("devkey", "secret", Duration::from_secs(600))
    }

    #[test]
    fn issued_token_carries_identity_and_grant() {
        let issuer = issuer();
        assert_eq!(issuer.ttl(), Duration::from_secs(600));
        let token = issuer.issue("alice", VideoGrant::join_room("room1")).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.iss, "devkey");
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.jti, "alice");
        assert_eq!(claims.exp - claims.nbf, 600);
        assert_eq!(claims.video, VideoGrant::join_room("room1"));
    }

    #[test]
    fn wrong_secret_fails() {
        let token = issuer().issue("alice", VideoGrant::join_room("room1")).unwrap();
        let other = TokenIssuer::new("devkey", "another-secret", Duration::from_secs(600));
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn wrong_issuer_fails() {
        let token = issuer().issue("alice", VideoGrant::join_room("room1")).unwrap();
        let other = TokenIssuer::new("otherkey", "secret", Duration::from_secs(600));
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn overflowing_ttl_is_an_error() {
        let issuer = TokenIssuer::new("devkey", "secret", Duration::from_secs(i64::MAX as u64));
        assert!(issuer.issue("alice", VideoGrant::join_room("room1")).is_err());

        let issuer = TokenIssuer::new("devkey", "secret", Duration::from_secs(u64::MAX));
        assert!(issuer.issue("alice", VideoGrant::join_room("room1")).is_err());
    }

    #[test]
    fn expired_token_fails() {
        let now = chrono::Utc::now().timestamp();
        let claims = AccessTokenClaims {
            iss: "devkey".into(),
            sub: "alice".into(),
            jti: "alice".into(),
            nbf: now - 7200,
            exp: now - 3600,
            video: VideoGrant::join_room("room1"),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert!(issuer().verify(&token).is_err());
    }
}
