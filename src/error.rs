//! Error taxonomy shared across the crate.
//!
//! Every failure branch surfaces as a typed kind so callers branch on the
//! variant, never on message strings. Nothing here is retried automatically:
//! reads (`listcrops`, `getcrop`) are safe to re-invoke, while re-invoking
//! `addcrop` creates a duplicate record under a fresh identifier.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The username or email is already registered. Which of the two
    /// collided is not disclosed.
    #[error("an account with that username or email already exists")]
    DuplicateIdentity,

    /// Unknown email and wrong password are deliberately conflated so the
    /// error value cannot be used to enumerate accounts.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The remote store rejected a write (non-2xx status or transport fault).
    #[error("remote {action} write failed: {detail}")]
    RemoteWriteFailed { action: &'static str, detail: String },

    /// The remote store could not serve a read (non-200 status, transport
    /// fault, or a reply carrying no record).
    #[error("remote {action} read failed: {detail}")]
    RemoteReadFailed { action: &'static str, detail: String },

    /// The remote answered with a body this crate could not decode.
    #[error("malformed remote response: {0}")]
    MalformedResponse(String),

    /// An outbound remote call exceeded its bounded timeout.
    #[error("remote call timed out after {0:?}")]
    RemoteTimeout(Duration),

    /// A notification transport reported a failed delivery attempt.
    #[error("notification delivery failed: {0}")]
    NotificationFailed(String),

    /// Form-style input failed validation at the proxy boundary.
    #[error("invalid {field}: {reason}")]
    MalformedInput { field: &'static str, reason: String },

    /// The password hashing primitive itself failed (bad cost parameters).
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// A credential-store fault outside the taxonomy above.
    #[error("credential store error")]
    Store(#[from] sqlx::Error),
}
