pub mod sir_states;
pub use sir_states::*;

pub mod network;
pub use network::*;

pub mod network_options;
pub use network_options::*;

pub mod rate_index;
pub use rate_index::*;

pub mod epidemic_state;
pub use epidemic_state::*;

pub mod trajectory;
pub use trajectory::*;

pub mod gillespie;
pub use gillespie::*;

pub mod sir_writer;
pub use sir_writer::*;
