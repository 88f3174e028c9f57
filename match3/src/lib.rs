pub use board::*;
pub use cascade::*;
pub use config::*;
pub use engine::*;
pub use errors::*;
pub use input::*;
pub use position::*;
pub use snapshot::*;
pub use swap::*;
pub use tiles::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod cascade;
mod config;
mod engine;
mod errors;
mod input;
mod position;
mod snapshot;
mod swap;
mod tiles;
mod visualization;
