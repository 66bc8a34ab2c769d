//! Port for issuing and verifying bearer tokens.

use crate::domain::{AuthIdentity, IssuedToken, TokenSubject};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenError {
        /// The token could not be decoded or its signature is wrong.
        Invalid { message: String } => "invalid token: {message}",
        /// The token is past its expiry.
        Expired => "token has expired",
        /// Signing failed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Signs and verifies access tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Sign a token for `subject`.
    fn issue(&self, subject: &TokenSubject) -> Result<IssuedToken, TokenError>;

    /// Verify a token and return the identity it proves.
    fn verify(&self, token: &str) -> Result<AuthIdentity, TokenError>;
}
