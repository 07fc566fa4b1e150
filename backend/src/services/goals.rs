//! Goals service for goal management
//!
//! Provides business logic for:
//! - Goal creation with structured target capture
//! - Goal listing, update and deletion
//! - Milestone creation and completion
//!
//! Progress write-backs belong to the progress evaluator; this service only
//! mutates display fields and milestone state.

use chrono::Utc;
use fittrack_shared::goal_spec::GoalSpec;
use fittrack_shared::models::{Goal, Milestone};
use fittrack_shared::types::{
    AddMilestoneRequest, CreateGoalRequest, GoalResponse, GoalsListQuery, MilestoneResponse,
    UpdateGoalRequest,
};
use fittrack_shared::validation::validate_goal_text;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::services::challenges::ChallengeService;
use crate::state::AppState;

/// Goals service for business logic
pub struct GoalsService;

impl GoalsService {
    /// Create a new goal.
    ///
    /// When the request carries a structured target it is used as-is;
    /// otherwise the target is inferred from the goal text, once, here.
    pub async fn create_goal(
        state: &AppState,
        req: CreateGoalRequest,
    ) -> Result<GoalResponse, ApiError> {
        req.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        validate_goal_text(&req.text).map_err(ApiError::Validation)?;

        let spec = if req.target.is_some() {
            GoalSpec {
                direction: req.direction,
                target: req.target,
                unit: req.unit,
                per_day: req.per_day.unwrap_or(false),
            }
        } else {
            GoalSpec::infer(req.category, &req.text)
        };

        let goal = Goal {
            id: Uuid::new_v4(),
            text: req.text,
            category: req.category,
            timeframe: req.timeframe,
            spec,
            created_at: Utc::now(),
            target_date: req.target_date,
            current_value: None,
            progress: 0,
            completed: false,
            completed_at: None,
            milestones: vec![],
            daily_progress: Default::default(),
            last_checked: None,
        };

        let response = Self::to_response(&goal);
        state.goals.insert(goal).await;
        Ok(response)
    }

    /// List goals with optional filters
    pub async fn get_goals(state: &AppState, query: &GoalsListQuery) -> Vec<GoalResponse> {
        state
            .goals
            .snapshot()
            .await
            .goals
            .iter()
            .filter(|g| query.completed.map_or(true, |c| g.completed == c))
            .filter(|g| query.category.map_or(true, |c| g.category == c))
            .map(Self::to_response)
            .collect()
    }

    /// Get a specific goal
    pub async fn get_goal(state: &AppState, id: Uuid) -> Result<GoalResponse, ApiError> {
        state
            .goals
            .get(id)
            .await
            .map(|g| Self::to_response(&g))
            .ok_or_else(|| ApiError::NotFound("Goal not found".to_string()))
    }

    /// Update a goal's display fields
    pub async fn update_goal(
        state: &AppState,
        id: Uuid,
        req: UpdateGoalRequest,
    ) -> Result<GoalResponse, ApiError> {
        if let Some(ref text) = req.text {
            validate_goal_text(text).map_err(ApiError::Validation)?;
        }

        state
            .goals
            .update(id, |g| {
                if let Some(text) = req.text {
                    g.text = text;
                }
                if let Some(date) = req.target_date {
                    g.target_date = Some(date);
                }
            })
            .await
            .map(|g| Self::to_response(&g))
            .ok_or_else(|| ApiError::NotFound("Goal not found".to_string()))
    }

    /// Delete a goal; immediate and unconditional
    pub async fn delete_goal(state: &AppState, id: Uuid) -> Result<(), ApiError> {
        if state.goals.delete(id).await {
            Ok(())
        } else {
            Err(ApiError::NotFound("Goal not found".to_string()))
        }
    }

    /// Add a milestone to a goal
    pub async fn add_milestone(
        state: &AppState,
        goal_id: Uuid,
        req: AddMilestoneRequest,
    ) -> Result<GoalResponse, ApiError> {
        req.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        state
            .goals
            .update(goal_id, |g| {
                g.milestones.push(Milestone {
                    id: Uuid::new_v4(),
                    text: req.text,
                    completed: false,
                });
            })
            .await
            .map(|g| Self::to_response(&g))
            .ok_or_else(|| ApiError::NotFound("Goal not found".to_string()))
    }

    /// Complete a milestone.
    ///
    /// Recomputes the parent goal's progress as the completed-milestone
    /// ratio (never lowering stored progress) and completes the goal when
    /// every milestone is done.
    pub async fn complete_milestone(
        state: &AppState,
        goal_id: Uuid,
        milestone_id: Uuid,
    ) -> Result<GoalResponse, ApiError> {
        let before = state
            .goals
            .get(goal_id)
            .await
            .ok_or_else(|| ApiError::NotFound("Goal not found".to_string()))?;
        if !before.milestones.iter().any(|m| m.id == milestone_id) {
            return Err(ApiError::NotFound("Milestone not found".to_string()));
        }

        let updated = state
            .goals
            .update(goal_id, |g| {
                let Some(milestone) = g.milestones.iter_mut().find(|m| m.id == milestone_id)
                else {
                    return;
                };
                milestone.completed = true;

                let total = g.milestones.len();
                let done = g.milestones.iter().filter(|m| m.completed).count();
                let ratio = ((done as f64 / total as f64) * 100.0).round() as u8;
                g.progress = g.progress.max(ratio);

                if done == total && !g.completed {
                    g.completed = true;
                    g.completed_at = Some(Utc::now());
                    g.progress = 100;
                }
            })
            .await
            .ok_or_else(|| ApiError::NotFound("Goal not found".to_string()))?;

        if updated.completed && !before.completed {
            ChallengeService::record_goal_completion(state).await;
        }

        Ok(Self::to_response(&updated))
    }

    /// Convert a goal to its API representation
    pub fn to_response(goal: &Goal) -> GoalResponse {
        GoalResponse {
            id: goal.id.to_string(),
            text: goal.text.clone(),
            category: goal.category,
            timeframe: goal.timeframe,
            spec: goal.spec.clone(),
            created_at: goal.created_at,
            target_date: goal.target_date,
            current_value: goal.current_value,
            progress: goal.progress,
            completed: goal.completed,
            completed_at: goal.completed_at,
            milestones: goal
                .milestones
                .iter()
                .map(|m| MilestoneResponse {
                    id: m.id.to_string(),
                    text: m.text.clone(),
                    completed: m.completed,
                })
                .collect(),
            daily_progress: goal.daily_progress.clone(),
            last_checked: goal.last_checked,
        }
    }
}
