pub mod error;
pub mod extract;
pub mod state;

pub use error::*;
pub use extract::*;
pub use state::*;
