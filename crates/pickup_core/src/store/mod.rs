// League persistence: one pretty-printed JSON document per league

pub mod book;
pub mod error;
pub mod manager;

pub use book::{LeagueBook, RosterSource};
pub use error::StoreError;
pub use manager::LeagueStore;
