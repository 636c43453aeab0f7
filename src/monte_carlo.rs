pub mod parser;
pub use parser::*;

pub mod aggregator;
pub use aggregator::*;

pub mod execute;
