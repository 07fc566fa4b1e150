//! Static gamification catalogs
//!
//! Achievement ids are stable strings; the catalog is the canonical source
//! of truth and is instantiated into the gamification store at creation.
//! Entries whose statistic is not tracked by this engine (BMI, body fat,
//! progress photos, nutrition quality) are defined here but never progressed
//! automatically.

use chrono::{Duration, Utc};
use fittrack_shared::models::{
    Achievement, AchievementCategory, AchievementTier, Challenge, ChallengeDifficulty,
    GoalCategory,
};

// ─── Achievement id constants ────────────────────────────────────────────────

pub const FIRST_WORKOUT: &str = "first_workout";
pub const WORKOUTS_10: &str = "workouts_10";
pub const WORKOUTS_50: &str = "workouts_50";
pub const WORKOUTS_100: &str = "workouts_100";
pub const STRENGTH_10: &str = "strength_10";
pub const STREAK_3: &str = "streak_3";
pub const STREAK_7: &str = "streak_7";
pub const STREAK_30: &str = "streak_30";
pub const STEPS_10K_DAY: &str = "steps_10k_day";
pub const STEPS_70K_WEEK: &str = "steps_70k_week";
pub const STEPS_300K_MONTH: &str = "steps_300k_month";
pub const STEPS_1M_TOTAL: &str = "steps_1m_total";
pub const WEIGHT_WEEK: &str = "weight_week";
pub const WEIGHT_MONTH: &str = "weight_month";
pub const BALANCED_WEEK: &str = "balanced_week";
pub const BMI_HEALTHY: &str = "bmi_healthy";
pub const PHOTO_PROGRESS: &str = "photo_progress";

/// Build the full achievement catalog in its initial (locked) state
pub fn achievements() -> Vec<Achievement> {
    use AchievementCategory as Cat;
    use AchievementTier as Tier;

    let def = |id: &str,
               title: &str,
               description: &str,
               category: Cat,
               tier: Tier,
               target: u32,
               points: u32| Achievement {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category,
        tier,
        progress: 0,
        target,
        completed: false,
        completed_at: None,
        points,
    };

    vec![
        def(
            FIRST_WORKOUT,
            "First Workout",
            "Complete your first workout.",
            Cat::Workout,
            Tier::Bronze,
            1,
            10,
        ),
        def(
            WORKOUTS_10,
            "Getting Warmed Up",
            "Complete 10 workouts.",
            Cat::Workout,
            Tier::Silver,
            10,
            25,
        ),
        def(
            WORKOUTS_50,
            "Regular",
            "Complete 50 workouts.",
            Cat::Workout,
            Tier::Gold,
            50,
            75,
        ),
        def(
            WORKOUTS_100,
            "Century",
            "Complete 100 workouts.",
            Cat::Workout,
            Tier::Platinum,
            100,
            150,
        ),
        def(
            STRENGTH_10,
            "Iron Habit",
            "Complete 10 strength workouts.",
            Cat::Workout,
            Tier::Silver,
            10,
            30,
        ),
        def(
            STREAK_3,
            "Three in a Row",
            "Work out on 3 consecutive days.",
            Cat::Streak,
            Tier::Bronze,
            3,
            15,
        ),
        def(
            STREAK_7,
            "Full Week",
            "Work out on 7 consecutive days.",
            Cat::Streak,
            Tier::Silver,
            7,
            35,
        ),
        def(
            STREAK_30,
            "Unstoppable",
            "Work out on 30 consecutive days.",
            Cat::Streak,
            Tier::Gold,
            30,
            100,
        ),
        def(
            STEPS_10K_DAY,
            "10K Day",
            "Walk 10,000 steps in a single day.",
            Cat::Steps,
            Tier::Bronze,
            10_000,
            20,
        ),
        def(
            STEPS_70K_WEEK,
            "70K Week",
            "Walk 70,000 steps in one calendar week.",
            Cat::Steps,
            Tier::Silver,
            70_000,
            40,
        ),
        def(
            STEPS_300K_MONTH,
            "300K Month",
            "Walk 300,000 steps in one calendar month.",
            Cat::Steps,
            Tier::Gold,
            300_000,
            80,
        ),
        def(
            STEPS_1M_TOTAL,
            "Million Stepper",
            "Walk 1,000,000 steps all-time.",
            Cat::Steps,
            Tier::Diamond,
            1_000_000,
            200,
        ),
        def(
            WEIGHT_WEEK,
            "Scale Watcher",
            "Log your weight on 7 consecutive days.",
            Cat::Weight,
            Tier::Bronze,
            7,
            20,
        ),
        def(
            WEIGHT_MONTH,
            "Trend Tracker",
            "Log your weight on 30 consecutive days.",
            Cat::Weight,
            Tier::Gold,
            30,
            60,
        ),
        def(
            BALANCED_WEEK,
            "Balanced Week",
            "Hit your macro targets every day for a week.",
            Cat::Nutrition,
            Tier::Silver,
            7,
            40,
        ),
        def(
            BMI_HEALTHY,
            "In the Zone",
            "Reach a healthy BMI range.",
            Cat::Special,
            Tier::Gold,
            1,
            50,
        ),
        def(
            PHOTO_PROGRESS,
            "Picture of Progress",
            "Record 5 progress photos.",
            Cat::Special,
            Tier::Bronze,
            5,
            15,
        ),
    ]
}

// ─── Challenge catalog ───────────────────────────────────────────────────────

/// A catalog challenge definition; starting one instantiates a [`Challenge`]
/// with its window anchored at the start time.
#[derive(Debug, Clone)]
pub struct ChallengeDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: GoalCategory,
    pub target: u32,
    pub days: i64,
    pub points: u32,
    pub reward: Option<&'static str>,
    pub difficulty: ChallengeDifficulty,
}

pub const WEEKLY_WARRIOR: &str = "weekly_warrior";
pub const HYDRATION_HERO: &str = "hydration_hero";
pub const GOAL_GETTER: &str = "goal_getter";

/// The predefined challenge catalog
pub fn challenges() -> Vec<ChallengeDef> {
    vec![
        ChallengeDef {
            id: WEEKLY_WARRIOR,
            title: "Weekly Warrior",
            description: "Complete 5 workouts in 7 days.",
            category: GoalCategory::Workout,
            target: 5,
            days: 7,
            points: 50,
            reward: Some("Warrior badge"),
            difficulty: ChallengeDifficulty::Medium,
        },
        ChallengeDef {
            id: HYDRATION_HERO,
            title: "Hydration Hero",
            description: "Log water intake on 7 days in a row.",
            category: GoalCategory::Water,
            target: 7,
            days: 7,
            points: 30,
            reward: None,
            difficulty: ChallengeDifficulty::Easy,
        },
        ChallengeDef {
            id: GOAL_GETTER,
            title: "Goal Getter",
            description: "Complete 3 goals within a month.",
            category: GoalCategory::Other,
            target: 3,
            days: 30,
            points: 100,
            reward: Some("Gold frame"),
            difficulty: ChallengeDifficulty::Hard,
        },
    ]
}

impl ChallengeDef {
    /// Instantiate this definition as an active challenge starting now
    pub fn start(&self) -> Challenge {
        let now = Utc::now();
        Challenge {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            category: self.category,
            starts_at: now,
            ends_at: now + Duration::days(self.days),
            target: self.target,
            progress: 0,
            completed: false,
            points: self.points,
            reward: self.reward.map(str::to_string),
            difficulty: self.difficulty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_achievement_ids_are_unique() {
        let catalog = achievements();
        let mut ids: Vec<_> = catalog.iter().map(|a| a.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_catalog_starts_locked() {
        for achievement in achievements() {
            assert_eq!(achievement.progress, 0);
            assert!(!achievement.completed);
            assert!(achievement.completed_at.is_none());
            assert!(achievement.target > 0);
        }
    }

    #[test]
    fn test_challenge_start_window() {
        let def = &challenges()[0];
        let challenge = def.start();
        assert_eq!(challenge.ends_at - challenge.starts_at, Duration::days(def.days));
        assert_eq!(challenge.progress, 0);
        assert!(!challenge.completed);
    }
}
