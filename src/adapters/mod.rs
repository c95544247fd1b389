//! Adapters - concrete implementations of ports (traits)

mod console_sink;
mod file_sink;
mod sim_tpm;

#[cfg(test)]
pub mod fake_tpm;

pub use console_sink::ConsoleSink;
pub use file_sink::{read_blob, FileSink};
pub use sim_tpm::{SimulatedConnector, SimulatedTpm};
