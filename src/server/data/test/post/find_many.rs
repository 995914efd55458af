use super::*;

/// Tests that soft-deleted posts are never listed.
///
/// Expected: Ok with only the active post
#[tokio::test]
async fn excludes_inactive_posts() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let active = factory::create_post(db, user.id).await?;
    factory::post::PostFactory::new(db, user.id)
        .is_active(false)
        .build()
        .await?;

    let page = PostRepository::new(db)
        .find_many(&PostFilter::default(), PageRequest::default())
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, active.id);
    assert_eq!(page.items[0].author.id, user.id);

    Ok(())
}

/// Tests the public feed filter.
///
/// Expected: Ok without the private post
#[tokio::test]
async fn public_only_hides_private_posts() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    factory::create_post(db, user.id).await?;
    factory::post::PostFactory::new(db, user.id)
        .visibility(PostVisibility::Private)
        .build()
        .await?;

    let filter = PostFilter {
        public_only: true,
        ..Default::default()
    };
    let page = PostRepository::new(db)
        .find_many(&filter, PageRequest::default())
        .await?;

    assert_eq!(page.total, 1);
    assert!(page
        .items
        .iter()
        .all(|p| p.visibility == PostVisibility::Public));

    Ok(())
}

/// Tests case-insensitive search over content and tags.
///
/// Expected: Ok with the content match and the tag match
#[tokio::test]
async fn searches_content_and_tags() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    factory::post::PostFactory::new(db, user.id)
        .content("Morning YOGA flow")
        .build()
        .await?;
    factory::post::PostFactory::new(db, user.id)
        .content("Stretching")
        .tags(&["yoga"])
        .build()
        .await?;
    factory::post::PostFactory::new(db, user.id)
        .content("Leg day")
        .build()
        .await?;

    let filter = PostFilter {
        search: Some("yoga".to_string()),
        ..Default::default()
    };
    let page = PostRepository::new(db)
        .find_many(&filter, PageRequest::default())
        .await?;

    assert_eq!(page.total, 2);

    Ok(())
}

/// Tests page metadata for a partial last page.
///
/// Expected: Ok with 1 item on page 3 of 3
#[tokio::test]
async fn paginates_results() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    for _ in 0..5 {
        factory::create_post(db, user.id).await?;
    }

    let page = PostRepository::new(db)
        .find_many(&PostFilter::default(), PageRequest { page: 3, limit: 2 })
        .await?;

    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 1);

    Ok(())
}

/// Tests that walking every page returns each post exactly once, including posts that
/// share a creation time.
///
/// Expected: Ok with pages covering all 7 ids without duplicates, ties ordered by id
#[tokio::test]
async fn pages_cover_every_post_once() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_social_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;

    let shared = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let mut inserted = HashSet::new();
    let mut tied = Vec::new();
    for _ in 0..4 {
        let post = factory::post::PostFactory::new(db, user.id)
            .created_at(shared)
            .build()
            .await?;
        inserted.insert(post.id);
        tied.push(post.id);
    }
    for second in 1..=3 {
        let post = factory::post::PostFactory::new(db, user.id)
            .created_at(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, second).unwrap())
            .build()
            .await?;
        inserted.insert(post.id);
    }

    let repo = PostRepository::new(db);
    let first = repo
        .find_many(&PostFilter::default(), PageRequest { page: 1, limit: 2 })
        .await?;
    let mut collected: Vec<Uuid> = first.items.iter().map(|p| p.id).collect();
    for page in 2..=first.total_pages {
        let next = repo
            .find_many(&PostFilter::default(), PageRequest { page, limit: 2 })
            .await?;
        collected.extend(next.items.iter().map(|p| p.id));
    }

    assert_eq!(first.total, 7);
    assert_eq!(first.total_pages, 4);
    assert_eq!(collected.len(), 7);
    assert_eq!(collected.iter().copied().collect::<HashSet<_>>(), inserted);

    tied.sort();
    assert_eq!(&collected[3..], tied.as_slice());

    Ok(())
}
