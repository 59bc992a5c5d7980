use jsonwebtoken::{DecodingKey, Validation, decode};

use crate::models::{Claims, TokenType};

/// Validate a bearer token issued by the identity service. Only access
/// tokens get through; refresh tokens never authorize an API call.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())?;

    if claims.token_type != TokenType::Access {
        return Err("not an access token".to_string());
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use std::time::{SystemTime, UNIX_EPOCH};
    use uuid::Uuid;

    const SECRET: &str = "test-secret";

    fn token(token_type: TokenType, exp_offset: i64) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64;
        let claims = Claims {
            user_id: 1,
            sub: "admin".to_string(),
            role: 1,
            exp: (now + exp_offset) as usize,
            jti: Uuid::new_v4().to_string(),
            token_type,
            employee_id: None,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn accepts_a_valid_access_token() {
        let claims = verify_token(&token(TokenType::Access, 900), SECRET).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.role, 1);
    }

    #[test]
    fn rejects_a_refresh_token() {
        assert!(verify_token(&token(TokenType::Refresh, 900), SECRET).is_err());
    }

    #[test]
    fn rejects_a_token_signed_with_another_secret() {
        assert!(verify_token(&token(TokenType::Access, 900), "other-secret").is_err());
    }

    #[test]
    fn rejects_an_expired_token() {
        assert!(verify_token(&token(TokenType::Access, -900), SECRET).is_err());
    }
}
