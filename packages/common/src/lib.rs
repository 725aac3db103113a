pub mod error;
pub mod id;
pub mod result;

pub use error::*;
pub use id::*;
pub use result::*;
