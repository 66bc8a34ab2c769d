//! Credential adapters: password hashing and bearer token signing.

mod bcrypt_hasher;
mod jwt_tokens;

pub use bcrypt_hasher::{BcryptPasswordHasher, MAX_COST, MIN_COST};
pub use jwt_tokens::{JwtSecret, JwtTokenService};
