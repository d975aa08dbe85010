pub mod common;
pub mod leagues;
pub mod seasons;

pub use leagues::{League, LeaguesResponse, Sport};
pub use seasons::{Season, SeasonsResponse};
