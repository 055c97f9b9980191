/// Domain types for Muse
mod playlist;
mod queue;
mod search;
mod song;
mod user;

pub use playlist::{Playlist, PlaylistSummary};
pub use queue::QueueEntry;
pub use search::{SearchResult, StreamSource};
pub use song::{NewSong, Song};
pub use user::User;
