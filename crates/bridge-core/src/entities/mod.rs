//! Domain entities

mod player;
mod record;

pub use player::PlayerRecord;
pub use record::ConsoleRecord;
