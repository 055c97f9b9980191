/// Request middleware
mod session;

pub use session::{build_cookie, cookie_value, expire_cookie, session_middleware, SessionUser};
