//! Structured goal targets
//!
//! A [`GoalSpec`] captures the machine-readable part of a goal (direction,
//! numeric target, unit) at creation time, with the free text kept only as
//! a display label. Structured input always wins; when the client supplies
//! none, the spec is inferred from the goal text once, at creation. Text
//! that matches nothing yields an empty spec and the goal is scored by
//! milestones alone.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{GoalCategory, GoalDirection};

/// Unit of a goal's numeric target
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TargetUnit {
    Kilograms,
    Liters,
    Steps,
    Workouts,
}

/// Structured target captured at goal creation
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GoalSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<GoalDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<TargetUnit>,
    /// The target applies per day across the goal's timeframe
    /// (e.g. "drink 2L daily" for a week)
    #[serde(default)]
    pub per_day: bool,
}

/// Keywords indicating a decreasing weight goal
const LOSS_KEYWORDS: &[&str] = &["lose", "reduce", "drop"];

/// Keywords indicating an increasing weight goal
const GAIN_KEYWORDS: &[&str] = &["gain", "increase", "build"];

impl GoalSpec {
    /// True when the spec carries no scorable target
    pub fn is_empty(&self) -> bool {
        self.target.is_none()
    }

    /// Infer a spec from free goal text for the given category.
    ///
    /// Unmatched text returns the empty spec; inference never fails.
    pub fn infer(category: GoalCategory, text: &str) -> Self {
        let lower = text.to_lowercase();
        match category {
            GoalCategory::Weight => Self::infer_weight(&lower),
            GoalCategory::Workout => Self::infer_workout(&lower),
            GoalCategory::Water => Self::infer_water(&lower),
            GoalCategory::Steps => Self::infer_steps(&lower),
            // Nutrition, health and other goals are scored by milestones only
            _ => Self::default(),
        }
    }

    fn infer_weight(lower: &str) -> Self {
        let direction = if LOSS_KEYWORDS.iter().any(|k| lower.contains(k)) {
            Some(GoalDirection::Loss)
        } else if GAIN_KEYWORDS.iter().any(|k| lower.contains(k)) {
            Some(GoalDirection::Gain)
        } else {
            None
        };

        let target = match direction {
            Some(_) => first_number(lower),
            None => None,
        };

        Self {
            direction,
            target,
            unit: target.map(|_| TargetUnit::Kilograms),
            per_day: false,
        }
    }

    fn infer_workout(lower: &str) -> Self {
        if !lower.contains("workout") && !lower.contains("exercise") {
            return Self::default();
        }
        // Exercise-specific goals (push-ups, squats, ...) stay milestone-driven
        let target = first_number(lower).filter(|n| *n >= 1.0);
        Self {
            direction: None,
            target,
            unit: target.map(|_| TargetUnit::Workouts),
            per_day: false,
        }
    }

    fn infer_water(lower: &str) -> Self {
        let re = Regex::new(r"(\d+(\.\d+)?)\s*(l|liter|liters)").expect("valid regex");
        let target = re
            .captures(lower)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok());
        Self {
            direction: None,
            target,
            unit: target.map(|_| TargetUnit::Liters),
            per_day: is_per_day(lower),
        }
    }

    fn infer_steps(lower: &str) -> Self {
        let re = Regex::new(r"(\d+)\s*(steps|step)").expect("valid regex");
        let target = re
            .captures(lower)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok());
        Self {
            direction: None,
            target,
            unit: target.map(|_| TargetUnit::Steps),
            per_day: is_per_day(lower),
        }
    }
}

fn first_number(text: &str) -> Option<f64> {
    let re = Regex::new(r"(\d+(\.\d+)?)").expect("valid regex");
    re.captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

fn is_per_day(text: &str) -> bool {
    text.contains("daily") || text.contains("every day") || text.contains("each day")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Lose 5 kg", Some(GoalDirection::Loss), Some(5.0))]
    #[case("Drop 2.5kg before summer", Some(GoalDirection::Loss), Some(2.5))]
    #[case("Gain 3 kg of muscle", Some(GoalDirection::Gain), Some(3.0))]
    #[case("Build up to 80kg", Some(GoalDirection::Gain), Some(80.0))]
    #[case("Get healthier", None, None)]
    fn weight_inference(
        #[case] text: &str,
        #[case] direction: Option<GoalDirection>,
        #[case] target: Option<f64>,
    ) {
        let spec = GoalSpec::infer(GoalCategory::Weight, text);
        assert_eq!(spec.direction, direction);
        assert_eq!(spec.target, target);
    }

    #[test]
    fn workout_inference_requires_keyword() {
        let spec = GoalSpec::infer(GoalCategory::Workout, "Complete 12 workouts this month");
        assert_eq!(spec.target, Some(12.0));
        assert_eq!(spec.unit, Some(TargetUnit::Workouts));

        // "100 push-ups" has a number but no workout/exercise keyword
        let spec = GoalSpec::infer(GoalCategory::Workout, "Do 100 push-ups in one set");
        assert!(spec.is_empty());
    }

    #[rstest]
    #[case("drink 2L daily", Some(2.0), true)]
    #[case("Drink 1.5 liters of water", Some(1.5), false)]
    #[case("stay hydrated", None, false)]
    fn water_inference(#[case] text: &str, #[case] target: Option<f64>, #[case] per_day: bool) {
        let spec = GoalSpec::infer(GoalCategory::Water, text);
        assert_eq!(spec.target, target);
        assert_eq!(spec.per_day, per_day);
    }

    #[test]
    fn steps_inference() {
        let spec = GoalSpec::infer(GoalCategory::Steps, "Walk 10000 steps");
        assert_eq!(spec.target, Some(10000.0));
        assert_eq!(spec.unit, Some(TargetUnit::Steps));
    }

    #[test]
    fn nutrition_goals_are_never_inferred() {
        let spec = GoalSpec::infer(GoalCategory::Nutrition, "Eat 120g of protein daily");
        assert!(spec.is_empty());
    }
}
