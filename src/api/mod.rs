pub mod middleware;

pub mod addresses;
pub mod conversations;
pub mod mail;
pub mod notifications;
pub mod payment_methods;
pub mod roles;
pub mod router;

pub use middleware::*;
pub use router::build_router;
