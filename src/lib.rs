pub mod crypto;
pub mod domain;
pub mod error;
pub mod infra;
pub mod notify;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use crypto::password::{HashCost, PasswordHasher};
pub use domain::crop::{image_url, CropRecord, NewCrop};
pub use domain::stats::{total_yield, YieldSummary};
pub use error::Error;
pub use infra::config::Config;
pub use infra::remote::RecordProxy;
pub use notify::{LoggingTransport, Message, NotificationTransport};
pub use storage::credentials::{AuthenticatedUser, CredentialStore};
