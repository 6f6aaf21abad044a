//! Stateless identity credentials for StayHub.
//!
//! The [`TokenService`] issues and validates signed identity assertions
//! (HS256 JWTs carrying the subject email). The service keeps no state and
//! holds no revocation list: revocation is the caller discarding the
//! credential, e.g. by clearing the cookie that transports it.
//!
//! Role checks do not live here — the role directory is consulted by the
//! authorization gate in `stayhub-web`, after the credential has been
//! validated. This crate only answers "who is the caller claiming to be, and
//! is the claim genuine".

pub mod error;
pub mod token;

pub use error::{AuthError, Result};
pub use token::{Claims, TokenService};
