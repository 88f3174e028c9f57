mod config;
mod player;
mod recording;
mod session;
pub use config::*;
pub use player::*;
pub use recording::*;
pub use session::*;
