use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, Select,
};
use uuid::Uuid;

use crate::server::{
    model::challenge::{
        end_date, Challenge, ChallengeFilter, CreateChallengeParams, UpdateChallengeParams,
    },
    util::pagination::{Page, PageRequest},
};

pub struct ChallengeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ChallengeRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a challenge with `end_date` derived from the start date and duration.
    pub async fn create(&self, params: CreateChallengeParams) -> Result<Challenge, DbErr> {
        let now = Utc::now();

        let entity = entity::challenge::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            creator_id: ActiveValue::Set(params.creator_id),
            title: ActiveValue::Set(params.title),
            description: ActiveValue::Set(params.description),
            challenge_type: ActiveValue::Set(params.challenge_type),
            difficulty: ActiveValue::Set(params.difficulty),
            goal: ActiveValue::Set(params.goal),
            duration_days: ActiveValue::Set(params.duration_days),
            start_date: ActiveValue::Set(params.start_date),
            end_date: ActiveValue::Set(end_date(params.start_date, params.duration_days)),
            status: ActiveValue::Set(params.status),
            is_public: ActiveValue::Set(params.is_public),
            max_participants: ActiveValue::Set(params.max_participants),
            rewards: ActiveValue::Set(params.rewards),
            rules: ActiveValue::Set(params.rules),
            image_url: ActiveValue::Set(params.image_url),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(Challenge::from_entity(entity, 0))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Challenge>, DbErr> {
        let Some(entity) = entity::prelude::Challenge::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let count = self.participant_counts(&[id]).await?;
        let participants = count.get(&id).copied().unwrap_or(0);

        Ok(Some(Challenge::from_entity(entity, participants)))
    }

    /// Lists public challenges matching `filter`, newest first.
    pub async fn find_public(
        &self,
        filter: &ChallengeFilter,
        request: PageRequest,
    ) -> Result<Page<Challenge>, DbErr> {
        let mut query = entity::prelude::Challenge::find()
            .filter(entity::challenge::Column::IsPublic.eq(true));

        if let Some(challenge_type) = filter.challenge_type {
            query = query.filter(entity::challenge::Column::ChallengeType.eq(challenge_type));
        }
        if let Some(difficulty) = filter.difficulty {
            query = query.filter(entity::challenge::Column::Difficulty.eq(difficulty));
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::challenge::Column::Status.eq(status));
        }

        self.paginate(query, request).await
    }

    pub async fn find_by_creator(
        &self,
        creator_id: Uuid,
        request: PageRequest,
    ) -> Result<Page<Challenge>, DbErr> {
        let query = entity::prelude::Challenge::find()
            .filter(entity::challenge::Column::CreatorId.eq(creator_id));

        self.paginate(query, request).await
    }

    /// Lists challenges `user_id` participates in.
    pub async fn find_by_participant(
        &self,
        user_id: Uuid,
        request: PageRequest,
    ) -> Result<Page<Challenge>, DbErr> {
        let challenge_ids: Vec<Uuid> = entity::prelude::ChallengeParticipant::find()
            .filter(entity::challenge_participant::Column::UserId.eq(user_id))
            .all(self.db)
            .await?
            .into_iter()
            .map(|p| p.challenge_id)
            .collect();

        let query = entity::prelude::Challenge::find()
            .filter(entity::challenge::Column::Id.is_in(challenge_ids));

        self.paginate(query, request).await
    }

    /// Applies a partial update, recomputing `end_date` when the schedule changes.
    pub async fn update(
        &self,
        id: Uuid,
        params: UpdateChallengeParams,
    ) -> Result<Challenge, DbErr> {
        let model = self.load(id).await?;

        let schedule_changed = params.start_date.is_some() || params.duration_days.is_some();
        let start_date = params.start_date.unwrap_or(model.start_date);
        let duration_days = params.duration_days.unwrap_or(model.duration_days);

        let mut active = model.into_active_model();

        if let Some(title) = params.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(description);
        }
        if let Some(challenge_type) = params.challenge_type {
            active.challenge_type = ActiveValue::Set(challenge_type);
        }
        if let Some(difficulty) = params.difficulty {
            active.difficulty = ActiveValue::Set(difficulty);
        }
        if let Some(goal) = params.goal {
            active.goal = ActiveValue::Set(goal);
        }
        if schedule_changed {
            active.start_date = ActiveValue::Set(start_date);
            active.duration_days = ActiveValue::Set(duration_days);
            active.end_date = ActiveValue::Set(end_date(start_date, duration_days));
        }
        if let Some(status) = params.status {
            active.status = ActiveValue::Set(status);
        }
        if let Some(is_public) = params.is_public {
            active.is_public = ActiveValue::Set(is_public);
        }
        if let Some(max_participants) = params.max_participants {
            active.max_participants = ActiveValue::Set(max_participants);
        }
        if let Some(rewards) = params.rewards {
            active.rewards = ActiveValue::Set(Some(rewards));
        }
        if let Some(rules) = params.rules {
            active.rules = ActiveValue::Set(Some(rules));
        }
        if let Some(image_url) = params.image_url {
            active.image_url = ActiveValue::Set(Some(image_url));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;
        let counts = self.participant_counts(&[id]).await?;

        Ok(Challenge::from_entity(
            entity,
            counts.get(&id).copied().unwrap_or(0),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Challenge::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn paginate(
        &self,
        query: Select<entity::prelude::Challenge>,
        request: PageRequest,
    ) -> Result<Page<Challenge>, DbErr> {
        let paginator = query
            .order_by_desc(entity::challenge::Column::CreatedAt)
            .order_by_asc(entity::challenge::Column::Id)
            .paginate(self.db, request.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(request.index()).await?;

        let ids: Vec<Uuid> = entities.iter().map(|e| e.id).collect();
        let counts = self.participant_counts(&ids).await?;

        let challenges = entities
            .into_iter()
            .map(|e| {
                let participants = counts.get(&e.id).copied().unwrap_or(0);
                Challenge::from_entity(e, participants)
            })
            .collect();

        Ok(Page::new(challenges, total, request))
    }

    async fn participant_counts(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, u64>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let participants = entity::prelude::ChallengeParticipant::find()
            .filter(entity::challenge_participant::Column::ChallengeId.is_in(ids.iter().copied()))
            .all(self.db)
            .await?;

        let mut counts = HashMap::new();
        for participant in participants {
            *counts.entry(participant.challenge_id).or_insert(0) += 1;
        }

        Ok(counts)
    }

    async fn load(&self, id: Uuid) -> Result<entity::challenge::Model, DbErr> {
        entity::prelude::Challenge::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Challenge {} not found", id)))
    }
}
