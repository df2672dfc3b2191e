pub mod auth;
pub mod request_id;

pub use auth::AuthUser;
pub use request_id::{request_id_middleware, RequestId};
