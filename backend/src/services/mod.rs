//! Business logic services
//!
//! Services encapsulate business logic and coordinate between the stores,
//! the evaluators and the device bridge. The evaluators themselves are
//! pure functions over snapshots; the service structs apply their results.

pub mod achievements;
pub mod activity;
pub mod calendar;
pub mod challenges;
pub mod export;
pub mod goals;
pub mod import;
pub mod levels;
pub mod progress;
pub mod streak;

pub use achievements::AchievementService;
pub use activity::ActivityService;
pub use challenges::ChallengeService;
pub use goals::GoalsService;
pub use import::ImportService;
pub use progress::ProgressService;
