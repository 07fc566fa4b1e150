//! Challenge service
//!
//! Challenges are added to the active set by explicit start and progressed
//! by hooks from workout logging, water logging and goal completion.
//! Completion awards points exactly once, guarded by the completed flag.

use chrono::Utc;
use fittrack_shared::models::{Challenge, GoalCategory};
use fittrack_shared::types::{
    ChallengeCatalogResponse, ChallengeResponse, StartChallengeRequest,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::catalog;
use crate::error::ApiError;
use crate::services::levels;
use crate::state::AppState;

/// Challenge business logic
pub struct ChallengeService;

impl ChallengeService {
    /// The predefined challenge catalog
    pub fn catalog() -> Vec<ChallengeCatalogResponse> {
        catalog::challenges()
            .into_iter()
            .map(|def| ChallengeCatalogResponse {
                id: def.id.to_string(),
                title: def.title.to_string(),
                description: def.description.to_string(),
                category: def.category,
                target: def.target,
                days: def.days,
                points: def.points,
                reward: def.reward.map(str::to_string),
                difficulty: def.difficulty,
            })
            .collect()
    }

    /// List the active challenge set
    pub async fn list_active(state: &AppState) -> Vec<ChallengeResponse> {
        state
            .gamification
            .snapshot()
            .await
            .challenges
            .iter()
            .map(Self::to_response)
            .collect()
    }

    /// Start a catalog challenge or a user-defined one
    pub async fn start(
        state: &AppState,
        req: StartChallengeRequest,
    ) -> Result<ChallengeResponse, ApiError> {
        let challenge = match (req.catalog_id, req.custom) {
            (Some(id), _) => {
                let def = catalog::challenges()
                    .into_iter()
                    .find(|def| def.id == id)
                    .ok_or_else(|| ApiError::NotFound(format!("Unknown challenge: {id}")))?;

                let active = state.gamification.snapshot().await;
                if active.challenges.iter().any(|c| c.id == def.id && !c.completed) {
                    return Err(ApiError::Conflict(format!(
                        "Challenge already active: {id}"
                    )));
                }
                def.start()
            }
            (None, Some(custom)) => {
                custom
                    .validate()
                    .map_err(|e| ApiError::Validation(e.to_string()))?;
                let now = Utc::now();
                Challenge {
                    id: format!("custom_{}", Uuid::new_v4()),
                    title: custom.title,
                    description: custom.description,
                    category: custom.category,
                    starts_at: now,
                    ends_at: now + chrono::Duration::days(custom.days),
                    target: custom.target,
                    progress: 0,
                    completed: false,
                    points: custom.points,
                    reward: None,
                    difficulty: custom.difficulty,
                }
            }
            (None, None) => {
                return Err(ApiError::BadRequest(
                    "Provide a catalog_id or a custom challenge".to_string(),
                ))
            }
        };

        let response = Self::to_response(&challenge);
        state
            .gamification
            .mutate(|s| s.challenges.push(challenge))
            .await;
        Ok(response)
    }

    /// Hook: a completed workout was logged
    pub async fn record_workout(state: &AppState) {
        Self::record_event(state, GoalCategory::Workout).await;
    }

    /// Hook: the first water entry of a day was logged
    pub async fn record_water_day(state: &AppState) {
        Self::record_event(state, GoalCategory::Water).await;
    }

    /// Hook: a goal was completed
    pub async fn record_goal_completion(state: &AppState) {
        Self::record_event(state, GoalCategory::Other).await;
    }

    /// Bump every active, in-window challenge of the given category.
    ///
    /// Reaching the target completes the challenge and awards its points;
    /// the completed flag guards against a second award.
    async fn record_event(state: &AppState, category: GoalCategory) {
        let now = Utc::now();
        let completed_now = state
            .gamification
            .mutate(|s| {
                let mut completed_now = Vec::new();
                let mut awarded = 0u32;
                for challenge in &mut s.challenges {
                    if challenge.completed
                        || challenge.category != category
                        || now < challenge.starts_at
                        || now > challenge.ends_at
                    {
                        continue;
                    }
                    challenge.progress = (challenge.progress + 1).min(challenge.target);
                    if challenge.progress >= challenge.target {
                        challenge.completed = true;
                        awarded += challenge.points;
                        completed_now.push(challenge.id.clone());
                    }
                }
                if awarded > 0 {
                    s.points += awarded;
                    s.level = levels::level_for(s.points);
                }
                completed_now
            })
            .await;

        for id in completed_now {
            info!(id = %id, "Challenge completed");
        }
    }

    fn to_response(challenge: &Challenge) -> ChallengeResponse {
        ChallengeResponse {
            id: challenge.id.clone(),
            title: challenge.title.clone(),
            description: challenge.description.clone(),
            category: challenge.category,
            starts_at: challenge.starts_at,
            ends_at: challenge.ends_at,
            target: challenge.target,
            progress: challenge.progress,
            completed: challenge.completed,
            points: challenge.points,
            reward: challenge.reward.clone(),
            difficulty: challenge.difficulty,
        }
    }
}
