// Sign-up ranking and history queries over a league book

pub mod attendance;
pub mod history;

pub use attendance::{priority_list, AttendanceDay, PriorityEntry, PriorityList, PriorityRules};
pub use history::{compare_players, teammate_overlap, PlayerComparison};
