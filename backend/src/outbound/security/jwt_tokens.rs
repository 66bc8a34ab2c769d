//! HS256 JSON Web Token adapter for the `TokenService` port.
//!
//! Expiry is checked against the injected clock rather than the system clock
//! so tests can pin time.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{AccessRole, AuthIdentity, IssuedToken, TokenSubject};

const GENERATED_SECRET_LEN: usize = 64;

/// Symmetric signing secret. Wiped from memory on drop.
#[derive(Clone)]
pub struct JwtSecret(Zeroizing<Vec<u8>>);

impl JwtSecret {
    /// Wrap configured secret bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    /// Generate a random secret for development use.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = vec![0_u8; GENERATED_SECRET_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self::new(bytes)
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JwtSecret(<redacted>)")
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    role: String,
    email: String,
    iat: i64,
    exp: i64,
}

/// Issues and verifies HS256-signed bearer tokens.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Create a token service signing with `secret`; tokens live for `ttl`.
    pub fn new(secret: &JwtSecret, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            clock,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, subject: &TokenSubject) -> Result<IssuedToken, TokenError> {
        let issued_at = self.clock.utc();
        let expires_at = issued_at + self.ttl;
        let claims = Claims {
            sub: subject.subject,
            role: subject.role.as_str().to_owned(),
            email: subject.email.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::signing(err.to_string()))?;
        Ok(IssuedToken { token, expires_at })
    }

    fn verify(&self, token: &str) -> Result<AuthIdentity, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &Self::validation()).map_err(|err| {
            debug!(kind = ?err.kind(), "bearer token rejected");
            match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::expired(),
                _ => TokenError::invalid(err.to_string()),
            }
        })?;
        let claims = data.claims;

        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .ok_or_else(|| TokenError::invalid("exp claim out of range"))?;
        if expires_at <= self.clock.utc() {
            return Err(TokenError::expired());
        }
        let role: AccessRole = claims
            .role
            .parse()
            .map_err(|_| TokenError::invalid(format!("unknown role {}", claims.role)))?;
        Ok(AuthIdentity::new(claims.sub, role, claims.email))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::{Local, TimeZone};
    use rstest::{fixture, rstest};
    use std::sync::Mutex;

    use super::*;

    struct SteppingClock(Mutex<DateTime<Utc>>);

    impl SteppingClock {
        fn advance(&self, by: Duration) {
            if let Ok(mut now) = self.0.lock() {
                *now += by;
            }
        }
    }

    impl Clock for SteppingClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0.lock().map(|now| *now).expect("clock lock")
        }
    }

    #[fixture]
    fn clock() -> Arc<SteppingClock> {
        let start = Utc
            .with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        Arc::new(SteppingClock(Mutex::new(start)))
    }

    fn service(secret: &[u8], clock: Arc<SteppingClock>) -> JwtTokenService {
        JwtTokenService::new(&JwtSecret::new(secret), Duration::hours(1), clock)
    }

    fn subject(role: AccessRole) -> TokenSubject {
        TokenSubject {
            subject: Uuid::new_v4(),
            role,
            email: "ada@example.com".to_owned(),
        }
    }

    #[rstest]
    #[case(AccessRole::Admin)]
    #[case(AccessRole::Student)]
    #[case(AccessRole::Employee)]
    fn issued_token_round_trips_identity(clock: Arc<SteppingClock>, #[case] role: AccessRole) {
        let tokens = service(b"round-trip-secret", clock);
        let subject = subject(role);
        let issued = tokens.issue(&subject).expect("issue");
        let identity = tokens.verify(&issued.token).expect("verify");

        assert_eq!(*identity.subject(), subject.subject);
        assert_eq!(identity.role(), role);
        assert_eq!(identity.email(), "ada@example.com");
    }

    #[rstest]
    fn token_expires_after_ttl(clock: Arc<SteppingClock>) {
        let tokens = service(b"expiry-secret", Arc::clone(&clock));
        let issued = tokens.issue(&subject(AccessRole::Student)).expect("issue");

        clock.advance(Duration::minutes(61));

        assert_eq!(tokens.verify(&issued.token), Err(TokenError::Expired));
    }

    #[rstest]
    fn token_signed_with_other_secret_is_invalid(clock: Arc<SteppingClock>) {
        let issuer = service(b"issuer-secret", Arc::clone(&clock));
        let verifier = service(b"verifier-secret", clock);
        let issued = issuer.issue(&subject(AccessRole::Admin)).expect("issue");

        assert!(matches!(
            verifier.verify(&issued.token),
            Err(TokenError::Invalid { .. })
        ));
    }

    #[rstest]
    fn garbage_is_invalid(clock: Arc<SteppingClock>) {
        let tokens = service(b"garbage-secret", clock);
        assert!(matches!(
            tokens.verify("not.a.token"),
            Err(TokenError::Invalid { .. })
        ));
    }

    #[test]
    fn secret_debug_is_redacted() {
        assert_eq!(format!("{:?}", JwtSecret::generate()), "JwtSecret(<redacted>)");
    }
}
