pub mod diff;
pub mod merge;
pub mod result;
pub mod tokenize;
pub mod worker;

pub use result::*;
pub use worker::{render_diff, DiffConfig, DiffEngine};
