/// HTTP API handlers
pub mod health;
pub mod playlists;
pub mod queue;
pub mod search;
pub mod stream;
