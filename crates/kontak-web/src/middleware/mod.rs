//! Tower middleware for the Kontak server.

pub mod method_override;
pub mod session;

pub use method_override::{MethodOverride, MethodOverrideLayer};
pub use session::{Session, SessionLayer, SessionService, SessionStore};
