use super::*;

fn reminder_params(
    user_id: Uuid,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> CreateReminderParams {
    CreateReminderParams {
        user_id,
        title: "Evening stretch".to_string(),
        description: None,
        reminder_type: ReminderType::Exercise,
        frequency: ReminderFrequency::Daily,
        time: "19:30".to_string(),
        start_date,
        end_date,
        custom_schedule: None,
        status: ReminderStatus::Active,
        is_notification_enabled: true,
        metadata: None,
    }
}

/// Tests a schedule whose end is not after its start.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn rejects_inverted_schedule() -> Result<(), AppError> {
    let test = TestBuilder::new().with_tracking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let start = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();

    let result = ReminderService::new(db)
        .create(reminder_params(user.id, Some(start), Some(start)))
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests creating a reminder with an open-ended schedule.
///
/// Expected: Ok with the reminder active
#[tokio::test]
async fn creates_open_ended_reminder() -> Result<(), AppError> {
    let test = TestBuilder::new().with_tracking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;

    let reminder = ReminderService::new(db)
        .create(reminder_params(user.id, None, None))
        .await?;

    assert_eq!(reminder.status, ReminderStatus::Active);
    assert_eq!(reminder.time, "19:30");

    Ok(())
}

/// Tests pausing a reminder through a status update.
///
/// Expected: Ok with Paused status, Err(Forbidden) for another user
#[tokio::test]
async fn updates_status_for_owner_only() -> Result<(), AppError> {
    let test = TestBuilder::new().with_tracking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let reminder = factory::create_reminder(db, user.id, ReminderType::Meal, "08:00").await?;
    let service = ReminderService::new(db);

    let denied = service
        .update_status(other.id, reminder.id, ReminderStatus::Paused)
        .await;
    assert!(matches!(denied, Err(AppError::Forbidden(_))));

    let paused = service
        .update_status(user.id, reminder.id, ReminderStatus::Paused)
        .await?;
    assert_eq!(paused.status, ReminderStatus::Paused);

    Ok(())
}
