pub mod cache;
pub mod cookie;
pub(crate) mod internal;

pub use cache::SessionCache;
pub use cookie::{clear_session_cookie, read_session_id, session_cookie};
pub use internal::Session;
