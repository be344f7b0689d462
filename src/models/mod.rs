pub mod address;
pub mod conversation;
pub mod notification;
pub mod payment_method;
pub mod role;
pub mod user;

pub use address::*;
pub use conversation::*;
pub use notification::*;
pub use payment_method::*;
pub use role::*;
pub use user::*;
