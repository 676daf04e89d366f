use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use league_server_app::domain::account::AccountId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const TOKEN_LIFETIME_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    exp: usize,
}

pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Tokens signed with a generated secret do not survive a restart.
    pub fn from_secret_or_random(secret: Option<&str>) -> Self {
        match secret {
            Some(secret) => Self::new(secret.as_bytes()),
            None => {
                log::info!("JWT secret not found, generating a random one...");
                Self::new(Uuid::new_v4().as_bytes())
            }
        }
    }

    pub fn generate_jwt(&self, account_id: AccountId) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: account_id.to_string(),
            exp: (chrono::Utc::now() + chrono::Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp()
                as usize,
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    pub fn validate_jwt(&self, token: &str) -> Option<AccountId> {
        match decode::<Claims>(token, &self.decoding, &Validation::default()) {
            Ok(data) => data.claims.sub.parse::<i64>().ok().map(AccountId),
            Err(e) => {
                log::debug!("Rejected token: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let keys = JwtKeys::new(b"secret");
        let token = keys.generate_jwt(AccountId(42)).unwrap();
        assert_eq!(keys.validate_jwt(&token), Some(AccountId(42)));
    }

    #[test]
    fn test_foreign_token_rejected() {
        let token = JwtKeys::new(b"one").generate_jwt(AccountId(1)).unwrap();
        assert_eq!(JwtKeys::new(b"two").validate_jwt(&token), None);
        assert_eq!(JwtKeys::from_secret_or_random(None).validate_jwt("garbage"), None);
    }
}
