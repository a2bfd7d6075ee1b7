mod runner;
pub mod test_utils;

pub use self::runner::*;
