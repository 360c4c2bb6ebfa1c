#![cfg(feature = "postgres-tests")]

use chrono::Utc;
use sqlx::PgPool;

use jlpt_tutor_domain::ItemKind;
use jlpt_tutor_storage::{MetaRepository, ReviewRepository, SessionRepository};

#[sqlx::test(migrations = "../../migrations")]
async fn meta_set_then_get_round_trips(pool: PgPool) -> Result<(), sqlx::Error> {
    let repo = MetaRepository::new(pool.clone());
    repo.set("jlpt_focus", "N3").await.unwrap();
    assert_eq!(repo.get("jlpt_focus").await.unwrap(), Some("N3".to_string()));

    repo.set("jlpt_focus", "N2").await.unwrap();
    assert_eq!(repo.get("jlpt_focus").await.unwrap(), Some("N2".to_string()));

    let all = repo.get_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].value, "N2");

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn closing_an_already_closed_session_errors(pool: PgPool) -> Result<(), sqlx::Error> {
    let repo = SessionRepository::new(pool.clone());
    let now = Utc::now();
    let id = repo.open(now).await.unwrap();

    repo.close(id, now).await.unwrap();
    let second_close = repo.close(id, now).await;
    assert!(second_close.is_err());

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn shutdown_sweep_closes_every_open_session_regardless_of_age(
    pool: PgPool,
) -> Result<(), sqlx::Error> {
    let repo = SessionRepository::new(pool.clone());
    let now = Utc::now();
    repo.open(now).await.unwrap();
    repo.open(now).await.unwrap();
    let third = repo.open(now).await.unwrap();
    repo.close(third, now).await.unwrap();

    let swept = repo.sweep_open_on_shutdown(now).await.unwrap();
    assert_eq!(swept, 2, "only the two still-open sessions are swept");

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn startup_sweep_ignores_sessions_younger_than_24h(pool: PgPool) -> Result<(), sqlx::Error> {
    let repo = SessionRepository::new(pool.clone());
    let now = Utc::now();
    repo.open(now).await.unwrap();

    let swept = repo.sweep_stale_on_startup(now).await.unwrap();
    assert_eq!(swept, 0, "a session opened moments ago is not stale yet");

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn startup_sweep_backdates_ended_at_to_latest_review_event(
    pool: PgPool,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO vocab_items (id, surface, reading, gloss, part_of_speech, jlpt_level) \
         VALUES (1, '食べる', 'たべる', 'to eat', 'verb', 'N5')",
    )
    .execute(&pool)
    .await?;

    let session_repo = SessionRepository::new(pool.clone());
    let review_repo = ReviewRepository::new(pool.clone());
    let now = Utc::now();
    let stale_start = now - chrono::Duration::hours(30);
    let review_time = now - chrono::Duration::hours(29);
    let today = stale_start.date_naive();

    let session_id = session_repo.open(stale_start).await.unwrap();
    review_repo
        .record_review(ItemKind::Vocab, 1, 3, session_id, today, review_time)
        .await
        .unwrap();

    let swept = session_repo.sweep_stale_on_startup(now).await.unwrap();
    assert_eq!(swept, 1);

    let ended_at: Option<chrono::DateTime<Utc>> =
        sqlx::query_scalar("SELECT ended_at FROM sessions WHERE id = $1")
            .bind(session_id)
            .fetch_one(&pool)
            .await?;
    let ended_at = ended_at.expect("session should be closed");
    assert!(
        (ended_at - review_time).num_seconds().abs() <= 1,
        "ended_at should be backdated to the latest review event, not now"
    );

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn startup_sweep_is_idempotent(pool: PgPool) -> Result<(), sqlx::Error> {
    let repo = SessionRepository::new(pool.clone());
    let now = Utc::now();
    let stale_start = now - chrono::Duration::hours(30);
    repo.open(stale_start).await.unwrap();

    let first = repo.sweep_stale_on_startup(now).await.unwrap();
    let second = repo.sweep_stale_on_startup(now).await.unwrap();
    assert_eq!(first, 1);
    assert_eq!(second, 0, "P9: a second sweep finds nothing left to close");

    Ok(())
}
