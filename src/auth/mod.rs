//! Admin authentication
//!
//! A single configured account signs in through the login form and receives a
//! signed, time-limited session token in an HTTP-only cookie.

pub mod cookie;
pub mod credentials;
pub mod extract;
pub mod next_path;
pub mod token;

pub use cookie::{SESSION_COOKIE_NAME, clear_session_cookie, session_cookie};
pub use credentials::AdminCredentials;
pub use extract::AdminSession;
pub use next_path::{DEFAULT_NEXT_PATH, sanitize_next_path};
pub use token::{ADMIN_ROLE, SESSION_TTL_SECONDS, SessionClaims, SessionKeys};
