pub mod delta;
pub mod error;
pub mod segment;
pub mod token;

pub use delta::*;
pub use error::*;
pub use segment::*;
pub use token::*;
