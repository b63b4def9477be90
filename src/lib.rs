pub mod cookie;
pub mod dispatch;
pub mod error;
pub mod helper;
pub mod parser;
pub mod types;

pub use error::{Error, Result};
