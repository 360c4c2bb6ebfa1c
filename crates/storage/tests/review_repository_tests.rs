#![cfg(feature = "postgres-tests")]

use chrono::{NaiveDate, TimeZone, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use jlpt_tutor_domain::ItemKind;
use jlpt_tutor_storage::{CardRepository, ReviewRepository, SessionRepository, StorageError};

async fn seed_vocab(pool: &PgPool) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO vocab_items (surface, reading, gloss, part_of_speech, jlpt_level)
         VALUES ($1, $2, $3, $4, $5) RETURNING id",
    )
    .bind("食べる")
    .bind("たべる")
    .bind("to eat")
    .bind("verb")
    .bind("N5")
    .fetch_one(pool)
    .await
    .unwrap()
}

#[sqlx::test(migrations = "../../migrations")]
async fn first_review_creates_a_card_with_interval_one(pool: PgPool) -> Result<(), sqlx::Error> {
    let item_id = seed_vocab(&pool).await;
    let sessions = SessionRepository::new(pool.clone());
    let reviews = ReviewRepository::new(pool.clone());

    let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let now = Utc.from_utc_datetime(&today.and_hms_opt(9, 0, 0).unwrap());
    let session_id = sessions.open(now).await.unwrap();

    let (card, correct, incorrect) = reviews
        .record_review(ItemKind::Vocab, item_id, 3, session_id, today, now)
        .await
        .unwrap();

    assert_eq!(card.interval_days, 1);
    assert_eq!(card.reps, 1);
    assert_eq!(card.due_date, today + chrono::Duration::days(1));
    assert_eq!((correct, incorrect), (1, 0));

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn second_review_grows_interval_to_six(pool: PgPool) -> Result<(), sqlx::Error> {
    let item_id = seed_vocab(&pool).await;
    let sessions = SessionRepository::new(pool.clone());
    let reviews = ReviewRepository::new(pool.clone());

    let day1 = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let day2 = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
    let now1 = Utc.from_utc_datetime(&day1.and_hms_opt(9, 0, 0).unwrap());
    let now2 = Utc.from_utc_datetime(&day2.and_hms_opt(9, 0, 0).unwrap());
    let session_id = sessions.open(now1).await.unwrap();

    reviews
        .record_review(ItemKind::Vocab, item_id, 3, session_id, day1, now1)
        .await
        .unwrap();
    let (card, correct, _incorrect) = reviews
        .record_review(ItemKind::Vocab, item_id, 3, session_id, day2, now2)
        .await
        .unwrap();

    assert_eq!(card.interval_days, 6);
    assert_eq!(card.reps, 2);
    assert_eq!(card.due_date, day2 + chrono::Duration::days(6));
    assert_eq!(correct, 2);

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn lapse_resets_interval_and_appends_a_new_event(pool: PgPool) -> Result<(), sqlx::Error> {
    let item_id = seed_vocab(&pool).await;
    let sessions = SessionRepository::new(pool.clone());
    let reviews = ReviewRepository::new(pool.clone());

    let day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let now = Utc.from_utc_datetime(&day.and_hms_opt(9, 0, 0).unwrap());
    let session_id = sessions.open(now).await.unwrap();

    reviews
        .record_review(ItemKind::Vocab, item_id, 3, session_id, day, now)
        .await
        .unwrap();
    let (card, _correct, incorrect) = reviews
        .record_review(ItemKind::Vocab, item_id, 0, session_id, day, now)
        .await
        .unwrap();

    assert_eq!(card.interval_days, 1);
    assert_eq!(card.reps, 0);
    assert_eq!(incorrect, 1);

    let event_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM review_events")
        .fetch_one(&pool)
        .await?;
    assert_eq!(event_count, 2, "lapse must append, not replace, the event log");

    Ok(())
}

/// P10: concurrent duplicate card-creation attempts produce exactly one row
/// and one integrity error, not a generic 500.
#[sqlx::test(migrations = "../../migrations")]
async fn concurrent_first_reviews_of_the_same_item_yield_one_card_and_one_integrity_error(
    pool: PgPool,
) -> Result<(), sqlx::Error> {
    let item_id = seed_vocab(&pool).await;
    let sessions = SessionRepository::new(pool.clone());
    let reviews_a = ReviewRepository::new(pool.clone());
    let reviews_b = ReviewRepository::new(pool.clone());

    let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let now = Utc.from_utc_datetime(&today.and_hms_opt(9, 0, 0).unwrap());
    let session_id = sessions.open(now).await.unwrap();

    let (result_a, result_b) = tokio::join!(
        reviews_a.record_review(ItemKind::Vocab, item_id, 3, session_id, today, now),
        reviews_b.record_review(ItemKind::Vocab, item_id, 3, session_id, today, now),
    );

    let outcomes = [result_a, result_b];
    let ok_count = outcomes.iter().filter(|r| r.is_ok()).count();
    let integrity_errors = outcomes
        .iter()
        .filter(|r| matches!(r, Err(StorageError::Integrity(_))))
        .count();

    assert_eq!(ok_count, 1, "exactly one concurrent insert should win");
    assert_eq!(
        integrity_errors, 1,
        "the losing insert should surface as an integrity error, not a generic query error"
    );

    let card_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM memory_cards")
        .fetch_one(&pool)
        .await?;
    assert_eq!(card_count, 1, "invariant I1: at most one card per item");

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn due_cards_are_ordered_oldest_first(pool: PgPool) -> Result<(), sqlx::Error> {
    let item_a = seed_vocab(&pool).await;
    let item_b: i64 = sqlx::query_scalar(
        "INSERT INTO vocab_items (surface, reading, gloss, part_of_speech, jlpt_level)
         VALUES ($1, $2, $3, $4, $5) RETURNING id",
    )
    .bind("飲む")
    .bind("のむ")
    .bind("to drink")
    .bind("verb")
    .bind("N5")
    .fetch_one(&pool)
    .await?;

    let today = NaiveDate::from_ymd_opt(2026, 7, 26).unwrap();
    sqlx::query(
        "INSERT INTO memory_cards (item_type, item_id, due_date, created_at) VALUES ('vocab', $1, $2, now())",
    )
    .bind(item_a)
    .bind(today - chrono::Duration::days(2))
    .execute(&pool)
    .await?;
    sqlx::query(
        "INSERT INTO memory_cards (item_type, item_id, due_date, created_at) VALUES ('vocab', $1, $2, now())",
    )
    .bind(item_b)
    .bind(today - chrono::Duration::days(5))
    .execute(&pool)
    .await?;

    let cards = CardRepository::new(pool.clone())
        .select_due(None, None, 20, today)
        .await
        .unwrap();

    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].card.item_id, item_b, "the older-due card comes first");
    assert_eq!(cards[1].card.item_id, item_a);

    Ok(())
}
