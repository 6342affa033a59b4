//! Verse Player - terminal front end
//!
//! Loads playlists and caption files, drives the transport controller on a
//! simulated sink, and renders the now-playing line.

pub mod config;
pub mod error;
pub mod keys;
pub mod playlist_file;
pub mod render;
pub mod sim;

pub use config::{CliConfig, SimulationSettings};
pub use error::{CliError, Result};
pub use sim::VirtualSink;
