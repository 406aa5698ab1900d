//! Player directory cache

mod player_directory;

pub use player_directory::PlayerDirectory;
