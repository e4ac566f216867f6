pub mod router;
pub mod types;
pub mod handlers {
    pub mod auth;
    pub mod crops;
    pub mod health;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;
