use super::*;

fn challenge_params(creator_id: Uuid, start_date: NaiveDate) -> CreateChallengeParams {
    CreateChallengeParams {
        creator_id,
        title: "10k steps".to_string(),
        description: "Walk every day".to_string(),
        challenge_type: ChallengeType::Steps,
        difficulty: ChallengeDifficulty::Beginner,
        goal: json!({ "target": 10000, "unit": "steps" }),
        duration_days: 7,
        start_date,
        status: ChallengeStatus::Active,
        is_public: true,
        max_participants: 0,
        rewards: None,
        rules: None,
        image_url: None,
    }
}

/// Tests creating a challenge that starts in the past.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_past_start_date() -> Result<(), AppError> {
    let test = TestBuilder::new().with_challenge_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let yesterday = Utc::now().date_naive() - Duration::days(1);

    let result = ChallengeService::new(db)
        .create(challenge_params(user.id, yesterday))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests joining a challenge twice and joining a full one.
///
/// Expected: Ok for the first join, Err(Conflict) for the repeat and for the full challenge
#[tokio::test]
async fn join_rules() -> Result<(), AppError> {
    let test = TestBuilder::new().with_challenge_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let creator = factory::create_user(db).await?;
    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    let challenge = factory::challenge::ChallengeFactory::new(db, creator.id)
        .max_participants(1)
        .build()
        .await?;
    let service = ChallengeService::new(db);

    let joined = service.join(first.id, challenge.id).await?;
    assert_eq!(joined.participants_count, 1);

    assert!(matches!(
        service.join(first.id, challenge.id).await,
        Err(AppError::Conflict(_))
    ));
    assert!(matches!(
        service.join(second.id, challenge.id).await,
        Err(AppError::Conflict(_))
    ));

    Ok(())
}

/// Tests recording progress against the goal unit.
///
/// Verifies the completion is capped at 100 and that recording the same day again
/// replaces the earlier entry.
///
/// Expected: Ok with 50% then 100% and a single stored entry
#[tokio::test]
async fn records_and_replaces_daily_progress() -> Result<(), AppError> {
    let test = TestBuilder::new().with_challenge_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let challenge = factory::create_challenge(db, user.id).await?;
    let today = Utc::now().date_naive();
    let service = ChallengeService::new(db);
    service.join(user.id, challenge.id).await?;

    let half = service
        .record_progress(RecordProgressParams {
            challenge_id: challenge.id,
            user_id: user.id,
            date: today,
            progress_data: json!({ "steps": 5000 }),
            notes: None,
        })
        .await?;
    assert_eq!(half.completion_percentage, 50.0);
    assert!(!half.is_completed);

    let full = service
        .record_progress(RecordProgressParams {
            challenge_id: challenge.id,
            user_id: user.id,
            date: today,
            progress_data: json!({ "steps": 14000 }),
            notes: Some("Long walk".to_string()),
        })
        .await?;
    assert_eq!(full.completion_percentage, 100.0);
    assert!(full.is_completed);

    let entries = service.user_progress(challenge.id, user.id).await?;
    assert_eq!(entries.len(), 1);

    Ok(())
}

/// Tests recording progress without participating.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn rejects_progress_from_non_participant() -> Result<(), AppError> {
    let test = TestBuilder::new().with_challenge_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let challenge = factory::create_challenge(db, user.id).await?;

    let result = ChallengeService::new(db)
        .record_progress(RecordProgressParams {
            challenge_id: challenge.id,
            user_id: user.id,
            date: Utc::now().date_naive(),
            progress_data: json!({ "steps": 100 }),
            notes: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests leaderboard ranking by average completion.
///
/// Expected: Ok with the stronger participant ranked first
#[tokio::test]
async fn ranks_leaderboard_by_average_completion() -> Result<(), AppError> {
    let test = TestBuilder::new().with_challenge_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let creator = factory::create_user(db).await?;
    let strong = factory::create_user(db).await?;
    let weak = factory::create_user(db).await?;
    let challenge = factory::create_challenge(db, creator.id).await?;
    let today = Utc::now().date_naive();
    for user in [&strong, &weak] {
        factory::create_participant(db, challenge.id, user.id).await?;
    }
    factory::create_progress(db, challenge.id, weak.id, today, 40.0).await?;
    factory::create_progress(db, challenge.id, strong.id, today, 100.0).await?;
    factory::create_progress(
        db,
        challenge.id,
        strong.id,
        today + Duration::days(1),
        80.0,
    )
    .await?;

    let board = ChallengeService::new(db).leaderboard(challenge.id).await?;

    assert_eq!(board.len(), 2);
    assert_eq!(board[0].user.id, strong.id);
    assert_eq!(board[0].rank, 1);
    assert_eq!(board[0].avg_completion, 90.0);
    assert_eq!(board[0].completed_days, 1);
    assert_eq!(board[1].user.id, weak.id);

    Ok(())
}
