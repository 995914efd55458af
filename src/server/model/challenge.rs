//! Challenge domain models and the pure progress computations behind
//! progress recording, progress summaries and leaderboards.

use std::collections::HashMap;

use chrono::{DateTime, Days, NaiveDate, Utc};
use entity::challenge::{ChallengeDifficulty, ChallengeStatus, ChallengeType};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    model::challenge::{
        ChallengeDto, CreateChallengeDto, LeaderboardEntryDto, PaginatedChallengesDto,
        ProgressDto, ProgressSummaryDto, UpdateChallengeDto, UserProgressDto,
    },
    server::{
        model::user::UserSummary,
        util::{pagination::Page, round2},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Challenge {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub title: String,
    pub description: String,
    pub challenge_type: ChallengeType,
    pub difficulty: ChallengeDifficulty,
    pub goal: Value,
    pub duration_days: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ChallengeStatus,
    pub is_public: bool,
    pub max_participants: i32,
    pub participants_count: u64,
    pub rewards: Option<Value>,
    pub rules: Option<Value>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Challenge {
    pub fn from_entity(entity: entity::challenge::Model, participants_count: u64) -> Self {
        Self {
            id: entity.id,
            creator_id: entity.creator_id,
            title: entity.title,
            description: entity.description,
            challenge_type: entity.challenge_type,
            difficulty: entity.difficulty,
            goal: entity.goal,
            duration_days: entity.duration_days,
            start_date: entity.start_date,
            end_date: entity.end_date,
            status: entity.status,
            is_public: entity.is_public,
            max_participants: entity.max_participants,
            participants_count,
            rewards: entity.rewards,
            rules: entity.rules,
            image_url: entity.image_url,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> ChallengeDto {
        ChallengeDto {
            id: self.id,
            creator_id: self.creator_id,
            title: self.title,
            description: self.description,
            challenge_type: self.challenge_type,
            difficulty: self.difficulty,
            goal: self.goal,
            duration_days: self.duration_days,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
            is_public: self.is_public,
            max_participants: self.max_participants,
            participants_count: self.participants_count,
            rewards: self.rewards,
            rules: self.rules,
            image_url: self.image_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Whether new participants may still join. A `max_participants` of 0 means no cap.
    pub fn is_full(&self) -> bool {
        self.max_participants > 0 && self.participants_count >= self.max_participants as u64
    }

    pub fn is_joinable(&self) -> bool {
        matches!(self.status, ChallengeStatus::Draft | ChallengeStatus::Active)
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Last day of a challenge, counting the start date as day one.
pub fn end_date(start_date: NaiveDate, duration_days: i32) -> NaiveDate {
    let extra = u64::try_from(duration_days.saturating_sub(1)).unwrap_or(0);
    start_date
        .checked_add_days(Days::new(extra))
        .unwrap_or(NaiveDate::MAX)
}

/// Percentage of the goal reached by one day's progress, capped at 100.
///
/// The measured value is `progress_data[goal.unit]` when present, otherwise the first
/// numeric value in `progress_data`. A missing value or a non-positive target gives 0.
pub fn completion_percentage(goal: &Value, progress_data: &Value) -> f64 {
    let Some(target) = goal.get("target").and_then(Value::as_f64) else {
        return 0.0;
    };
    if target <= 0.0 {
        return 0.0;
    }

    let by_unit = goal
        .get("unit")
        .and_then(Value::as_str)
        .and_then(|unit| progress_data.get(unit))
        .and_then(Value::as_f64);

    let achieved = by_unit.or_else(|| {
        progress_data
            .as_object()
            .and_then(|map| map.values().find_map(Value::as_f64))
    });

    match achieved {
        Some(value) if value > 0.0 => (value / target * 100.0).min(100.0),
        _ => 0.0,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeProgress {
    pub id: Uuid,
    pub challenge_id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub progress_data: Value,
    pub completion_percentage: f64,
    pub is_completed: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChallengeProgress {
    pub fn from_entity(entity: entity::challenge_progress::Model) -> Self {
        Self {
            id: entity.id,
            challenge_id: entity.challenge_id,
            user_id: entity.user_id,
            date: entity.date,
            progress_data: entity.progress_data,
            completion_percentage: entity.completion_percentage,
            is_completed: entity.is_completed,
            notes: entity.notes,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> ProgressDto {
        ProgressDto {
            id: self.id,
            challenge_id: self.challenge_id,
            user_id: self.user_id,
            date: self.date,
            progress_data: self.progress_data,
            completion_percentage: self.completion_percentage,
            is_completed: self.is_completed,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Number of consecutive completed days ending at the most recent entry.
///
/// Entries are scanned newest first. The streak stops at the first incomplete entry or
/// at the first gap between calendar days.
pub fn current_streak(entries: &[ChallengeProgress]) -> u64 {
    let mut sorted: Vec<&ChallengeProgress> = entries.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut streak = 0;
    let mut previous: Option<NaiveDate> = None;

    for entry in sorted {
        if !entry.is_completed {
            break;
        }
        if let Some(previous) = previous {
            if previous.pred_opt() != Some(entry.date) {
                break;
            }
        }
        streak += 1;
        previous = Some(entry.date);
    }

    streak
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSummary {
    pub total_days: u64,
    pub completed_days: u64,
    pub average_completion: f64,
    pub current_streak: u64,
    pub best_day: Option<ChallengeProgress>,
}

impl ProgressSummary {
    /// The best day is the first entry with the highest completion.
    pub fn from_entries(entries: &[ChallengeProgress]) -> Self {
        let total_days = entries.len() as u64;
        let completed_days = entries.iter().filter(|e| e.is_completed).count() as u64;
        let average_completion = if entries.is_empty() {
            0.0
        } else {
            round2(entries.iter().map(|e| e.completion_percentage).sum::<f64>() / entries.len() as f64)
        };

        let best_day = entries
            .iter()
            .fold(None::<&ChallengeProgress>, |best, current| match best {
                Some(best) if current.completion_percentage <= best.completion_percentage => {
                    Some(best)
                }
                _ => Some(current),
            })
            .cloned();

        Self {
            total_days,
            completed_days,
            average_completion,
            current_streak: current_streak(entries),
            best_day,
        }
    }

    pub fn into_dto(self) -> ProgressSummaryDto {
        ProgressSummaryDto {
            total_days: self.total_days,
            completed_days: self.completed_days,
            average_completion: self.average_completion,
            current_streak: self.current_streak,
            best_day: self.best_day.map(ChallengeProgress::into_dto),
        }
    }
}

/// Builds the `{progress, summary}` response from date-ordered entries.
pub fn user_progress_dto(entries: Vec<ChallengeProgress>) -> UserProgressDto {
    let summary = ProgressSummary::from_entries(&entries).into_dto();

    UserProgressDto {
        progress: entries.into_iter().map(ChallengeProgress::into_dto).collect(),
        summary,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: u64,
    pub user: UserSummary,
    pub avg_completion: f64,
    pub completed_days: u64,
    pub total_entries: u64,
}

impl LeaderboardEntry {
    pub fn into_dto(self) -> LeaderboardEntryDto {
        LeaderboardEntryDto {
            rank: self.rank,
            user: self.user.into_dto(),
            avg_completion: self.avg_completion,
            completed_days: self.completed_days,
            total_entries: self.total_entries,
        }
    }
}

/// Ranks participants by average completion, then completed days, then user id.
///
/// Only users with at least one progress entry appear. Ranks start at 1.
pub fn leaderboard(
    entries: &[ChallengeProgress],
    users: &HashMap<Uuid, UserSummary>,
) -> Vec<LeaderboardEntry> {
    struct Totals {
        completion_sum: f64,
        completed_days: u64,
        total_entries: u64,
    }

    let mut totals: HashMap<Uuid, Totals> = HashMap::new();
    for entry in entries {
        let t = totals.entry(entry.user_id).or_insert(Totals {
            completion_sum: 0.0,
            completed_days: 0,
            total_entries: 0,
        });
        t.completion_sum += entry.completion_percentage;
        t.total_entries += 1;
        if entry.is_completed {
            t.completed_days += 1;
        }
    }

    let mut rows: Vec<(Uuid, f64, u64, u64)> = totals
        .into_iter()
        .map(|(user_id, t)| {
            let avg = t.completion_sum / t.total_entries as f64;
            (user_id, avg, t.completed_days, t.total_entries)
        })
        .collect();

    rows.sort_by(|a, b| {
        b.1.total_cmp(&a.1)
            .then_with(|| b.2.cmp(&a.2))
            .then_with(|| a.0.cmp(&b.0))
    });

    rows.into_iter()
        .enumerate()
        .map(|(index, (user_id, avg, completed_days, total_entries))| LeaderboardEntry {
            rank: index as u64 + 1,
            user: users
                .get(&user_id)
                .cloned()
                .unwrap_or_else(|| UserSummary::unknown(user_id)),
            avg_completion: round2(avg),
            completed_days,
            total_entries,
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct ChallengeFilter {
    pub challenge_type: Option<ChallengeType>,
    pub difficulty: Option<ChallengeDifficulty>,
    pub status: Option<ChallengeStatus>,
}

#[derive(Debug, Clone)]
pub struct CreateChallengeParams {
    pub creator_id: Uuid,
    pub title: String,
    pub description: String,
    pub challenge_type: ChallengeType,
    pub difficulty: ChallengeDifficulty,
    pub goal: Value,
    pub duration_days: i32,
    pub start_date: NaiveDate,
    pub status: ChallengeStatus,
    pub is_public: bool,
    pub max_participants: i32,
    pub rewards: Option<Value>,
    pub rules: Option<Value>,
    pub image_url: Option<String>,
}

impl CreateChallengeParams {
    /// Status defaults to `draft`, visibility to public and the participant cap to none.
    pub fn from_dto(creator_id: Uuid, dto: CreateChallengeDto) -> Self {
        Self {
            creator_id,
            title: dto.title,
            description: dto.description,
            challenge_type: dto.challenge_type,
            difficulty: dto.difficulty,
            goal: dto.goal,
            duration_days: dto.duration_days,
            start_date: dto.start_date,
            status: dto.status.unwrap_or(ChallengeStatus::Draft),
            is_public: dto.is_public.unwrap_or(true),
            max_participants: dto.max_participants.unwrap_or(0),
            rewards: dto.rewards,
            rules: dto.rules,
            image_url: dto.image_url,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateChallengeParams {
    pub title: Option<String>,
    pub description: Option<String>,
    pub challenge_type: Option<ChallengeType>,
    pub difficulty: Option<ChallengeDifficulty>,
    pub goal: Option<Value>,
    pub duration_days: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub status: Option<ChallengeStatus>,
    pub is_public: Option<bool>,
    pub max_participants: Option<i32>,
    pub rewards: Option<Value>,
    pub rules: Option<Value>,
    pub image_url: Option<String>,
}

impl UpdateChallengeParams {
    pub fn from_dto(dto: UpdateChallengeDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            challenge_type: dto.challenge_type,
            difficulty: dto.difficulty,
            goal: dto.goal,
            duration_days: dto.duration_days,
            start_date: dto.start_date,
            status: dto.status,
            is_public: dto.is_public,
            max_participants: dto.max_participants,
            rewards: dto.rewards,
            rules: dto.rules,
            image_url: dto.image_url,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordProgressParams {
    pub challenge_id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub progress_data: Value,
    pub notes: Option<String>,
}

pub fn paginated_challenges_dto(page: Page<Challenge>) -> PaginatedChallengesDto {
    let page = page.map(Challenge::into_dto);

    PaginatedChallengesDto {
        challenges: page.items,
        total: page.total,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn entry(user_id: Uuid, day: &str, pct: f64) -> ChallengeProgress {
        ChallengeProgress {
            id: Uuid::new_v4(),
            challenge_id: Uuid::nil(),
            user_id,
            date: date(day),
            progress_data: json!({}),
            completion_percentage: pct,
            is_completed: pct >= 100.0,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Expected: a 30 day challenge starting 2025-07-01 ends on 2025-07-30
    #[test]
    fn end_date_counts_start_as_day_one() {
        assert_eq!(end_date(date("2025-07-01"), 30), date("2025-07-30"));
        assert_eq!(end_date(date("2025-07-01"), 1), date("2025-07-01"));
    }

    /// Expected: the unit key wins, otherwise the first numeric value is used
    #[test]
    fn completion_uses_goal_unit_first() {
        let goal = json!({"target": 10000, "unit": "steps"});

        assert_eq!(completion_percentage(&goal, &json!({"steps": 5000})), 50.0);
        assert_eq!(completion_percentage(&goal, &json!({"steps": 15000})), 100.0);
        assert_eq!(completion_percentage(&goal, &json!({"walked": 2500})), 25.0);
        assert_eq!(completion_percentage(&goal, &json!({"note": "rest"})), 0.0);
        assert_eq!(
            completion_percentage(&json!({"target": 0, "unit": "steps"}), &json!({"steps": 10})),
            0.0
        );
    }

    /// Expected: completed yesterday but not today gives a streak of 0,
    /// completed only today gives 1
    #[test]
    fn streak_stops_at_incomplete_or_gap() {
        let user = Uuid::new_v4();

        let entries = vec![entry(user, "2025-07-01", 100.0), entry(user, "2025-07-02", 50.0)];
        assert_eq!(current_streak(&entries), 0);

        let entries = vec![entry(user, "2025-07-01", 50.0), entry(user, "2025-07-02", 100.0)];
        assert_eq!(current_streak(&entries), 1);

        let entries = vec![
            entry(user, "2025-07-01", 100.0),
            entry(user, "2025-07-03", 100.0),
            entry(user, "2025-07-04", 100.0),
        ];
        assert_eq!(current_streak(&entries), 2);
    }

    /// Expected: best day is the first entry reaching the highest completion
    #[test]
    fn summary_reports_average_and_best_day() {
        let user = Uuid::new_v4();
        let entries = vec![
            entry(user, "2025-07-01", 40.0),
            entry(user, "2025-07-02", 80.0),
            entry(user, "2025-07-03", 80.0),
        ];

        let summary = ProgressSummary::from_entries(&entries);

        assert_eq!(summary.total_days, 3);
        assert_eq!(summary.completed_days, 0);
        assert_eq!(summary.average_completion, 66.67);
        assert_eq!(summary.best_day.map(|d| d.date), Some(date("2025-07-02")));
    }

    /// Expected: equal averages fall back to completed days, then to user id
    #[test]
    fn leaderboard_breaks_ties_deterministically() {
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);
        let c = Uuid::from_u128(3);

        let entries = vec![
            entry(c, "2025-07-01", 100.0),
            entry(c, "2025-07-02", 0.0),
            entry(b, "2025-07-01", 50.0),
            entry(b, "2025-07-02", 50.0),
            entry(a, "2025-07-01", 50.0),
            entry(a, "2025-07-02", 50.0),
        ];

        let board = leaderboard(&entries, &HashMap::new());

        let order: Vec<Uuid> = board.iter().map(|e| e.user.id).collect();
        assert_eq!(order, vec![c, a, b]);
        assert_eq!(board.iter().map(|e| e.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(board[0].completed_days, 1);
    }
}
