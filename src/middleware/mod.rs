pub mod cache;
pub mod guard;

pub use cache::cache_control_middleware;
pub use guard::{RouteAccess, route_guard};
