pub mod time_grid;
pub use time_grid::*;
