pub mod requests;
pub mod test_db;

pub use requests::*;
pub use test_db::*;
