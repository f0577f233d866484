//! HTTP Handlers

mod page;
mod ping;
mod playback;
mod script;
mod websocket;

pub use page::*;
pub use ping::*;
pub use playback::*;
pub use script::*;
pub use websocket::*;
