pub mod player;
pub mod session;
pub mod team;
pub mod validation;

pub use player::{Player, Position, Rating};
pub use session::{GameDay, PlayerProfile, SessionRecord};
pub use team::Team;
pub use validation::{PlayerValidator, ValidationError};
