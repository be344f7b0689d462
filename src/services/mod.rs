pub mod mail;
pub mod notification_service;
pub mod observer;

pub use mail::*;
pub use notification_service::*;
pub use observer::*;
