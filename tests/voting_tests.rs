//! End-to-end voting flows against a real SQLite store.

use chrono::Utc;
use moviemash::config::Config;
use moviemash::db::Store;
use moviemash::models::movie::NewMovie;
use moviemash::config::ComparisonConfig;
use moviemash::services::{Scheduler, VoteService, Voter, VotingError};
use moviemash::state::SharedState;
use std::sync::Arc;
use std::time::Duration;

async fn spawn_state() -> SharedState {
    let db_path =
        std::env::temp_dir().join(format!("moviemash-voting-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());

    SharedState::new(config)
        .await
        .expect("failed to create shared state")
}

async fn add_movies(store: &Store, count: i32) -> Vec<i32> {
    let mut ids = Vec::new();
    for n in 1..=count {
        let id = store
            .upsert_movie(&NewMovie {
                title: format!("Film {n}"),
                year: 1990 + n,
                director: Some(format!("Director {n}")),
                genres: vec!["Drama".to_string()],
                letterboxd_id: format!("film/film-{n}"),
            })
            .await
            .expect("failed to insert movie");
        ids.push(id);
    }
    ids
}

/// Two disjoint sets over eight movies.
async fn two_sets(store: &Store) -> (i32, i32, Vec<i32>) {
    let movies = add_movies(store, 8).await;
    let a = store
        .add_top4_set(Some("alice"), &movies[..4])
        .await
        .unwrap();
    let b = store.add_top4_set(Some("bob"), &movies[4..]).await.unwrap();
    (a, b, movies)
}

async fn vote_with_retry(
    votes: &Arc<dyn VoteService>,
    comparison_id: i32,
    winner_set_id: i32,
) -> moviemash::models::comparison::VoteReceipt {
    for _ in 0..5 {
        match votes
            .record_vote(comparison_id, winner_set_id, Voter::Anonymous)
            .await
        {
            Ok(receipt) => return receipt,
            Err(e) if e.is_retryable() => tokio::time::sleep(Duration::from_millis(50)).await,
            Err(e) => panic!("vote failed: {e}"),
        }
    }
    panic!("vote kept failing with transient errors");
}

#[tokio::test]
async fn first_selection_creates_comparison_over_both_sets() {
    let state = spawn_state().await;
    let (a, b, _) = two_sets(&state.store).await;

    let view = state.comparison_service.select_active().await.unwrap();

    let mut sides = [view.set_a.id, view.set_b.id];
    sides.sort_unstable();
    assert_eq!(sides, [a.min(b), a.max(b)]);
    assert_eq!((view.votes_a, view.votes_b), (0, 0));
    assert_eq!(view.set_a.movies.len(), 4);
    assert_eq!(view.set_b.movies.len(), 4);
    assert!(view.expires_at > Utc::now());
    assert_eq!(state.store.comparison_count().await.unwrap(), 1);

    // A second read reuses the live comparison
    let again = state.comparison_service.select_active().await.unwrap();
    assert_eq!(again.id, view.id);
    assert_eq!(state.store.comparison_count().await.unwrap(), 1);
}

#[tokio::test]
async fn selection_without_enough_sets_is_insufficient_data() {
    let state = spawn_state().await;
    let movies = add_movies(&state.store, 4).await;
    state.store.add_top4_set(None, &movies).await.unwrap();

    let err = state.comparison_service.select_active().await.unwrap_err();
    assert!(matches!(err, VotingError::InsufficientData));
}

#[tokio::test]
async fn votes_update_counters_and_leaderboard() {
    let state = spawn_state().await;
    two_sets(&state.store).await;

    let comparison = state.comparison_service.create_comparison().await.unwrap();
    let (s1, s2) = (comparison.set_a_id, comparison.set_b_id);

    for _ in 0..3 {
        vote_with_retry(&state.vote_service, comparison.id, s1).await;
    }
    let last = vote_with_retry(&state.vote_service, comparison.id, s2).await;

    assert_eq!((last.votes_a, last.votes_b), (3, 1));

    let stored = state
        .store
        .get_comparison(comparison.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!((stored.votes_a, stored.votes_b), (3, 1));
    assert_eq!(state.store.vote_count().await.unwrap(), 4);

    let s1_movies = state.store.get_top4_set(s1).await.unwrap().unwrap().movie_ids;
    let s2_movies = state.store.get_top4_set(s2).await.unwrap().unwrap().movie_ids;

    let rankings = state.leaderboard_service.rank_items(100).await.unwrap();
    assert_eq!(rankings.len(), 8);
    for row in &rankings {
        if s1_movies.contains(&row.movie.id) {
            assert!(row.wins >= 3);
        } else {
            assert!(s2_movies.contains(&row.movie.id));
            assert!(row.wins >= 1);
        }
    }
    assert!(s1_movies.contains(&rankings[0].movie.id));
}

#[tokio::test]
async fn each_vote_moves_exactly_one_counter() {
    let state = spawn_state().await;
    two_sets(&state.store).await;
    let comparison = state.comparison_service.create_comparison().await.unwrap();

    let before = (comparison.votes_a, comparison.votes_b);
    let receipt = vote_with_retry(&state.vote_service, comparison.id, comparison.set_b_id).await;

    assert_eq!(receipt.votes_a, before.0);
    assert_eq!(receipt.votes_b, before.1 + 1);
}

#[tokio::test]
async fn foreign_winner_is_rejected_without_side_effects() {
    let state = spawn_state().await;
    let (_, _, movies) = two_sets(&state.store).await;
    let outsider = state
        .store
        .add_top4_set(Some("carol"), &movies[2..6])
        .await
        .unwrap();

    let comparison = loop {
        let c = state.comparison_service.create_comparison().await.unwrap();
        if c.side_of(outsider).is_none() {
            break c;
        }
    };

    let err = state
        .vote_service
        .record_vote(comparison.id, outsider, Voter::Anonymous)
        .await
        .unwrap_err();
    assert!(matches!(err, VotingError::InvalidWinner { .. }));

    let stored = state
        .store
        .get_comparison(comparison.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!((stored.votes_a, stored.votes_b), (0, 0));
    assert_eq!(state.store.vote_count().await.unwrap(), 0);
}

#[tokio::test]
async fn unknown_comparison_is_not_found() {
    let state = spawn_state().await;
    two_sets(&state.store).await;

    let err = state
        .vote_service
        .record_vote(9999, 1, Voter::Anonymous)
        .await
        .unwrap_err();
    assert!(matches!(err, VotingError::NotFound { id: 9999, .. }));
}

#[tokio::test]
async fn expired_comparison_is_never_selected() {
    let state = spawn_state().await;
    two_sets(&state.store).await;

    let stale = state.comparison_service.create_comparison().await.unwrap();
    state
        .store
        .set_comparison_expiry(stale.id, Utc::now() - chrono::Duration::minutes(1))
        .await
        .unwrap();

    let view = state.comparison_service.select_active().await.unwrap();
    assert_ne!(view.id, stale.id);
    assert!(view.expires_at > Utc::now());
    assert_eq!(state.store.comparison_count().await.unwrap(), 2);
}

#[tokio::test]
async fn cache_reflects_votes_immediately() {
    let state = spawn_state().await;
    two_sets(&state.store).await;

    let view = state.comparison_service.select_active().await.unwrap();
    let receipt = vote_with_retry(&state.vote_service, view.id, view.set_a.id).await;

    let cached = state.cache.get(view.id).await.expect("comparison cached");
    assert_eq!(
        (cached.votes_a, cached.votes_b),
        (receipt.votes_a, receipt.votes_b)
    );

    let stored = state.store.get_comparison(view.id).await.unwrap().unwrap();
    assert_eq!((cached.votes_a, cached.votes_b), (stored.votes_a, stored.votes_b));
}

#[tokio::test]
async fn vote_queues_a_follow_up_comparison() {
    let state = spawn_state().await;
    two_sets(&state.store).await;
    let comparison = state.comparison_service.create_comparison().await.unwrap();

    vote_with_retry(&state.vote_service, comparison.id, comparison.set_a_id).await;

    let mut created = false;
    for _ in 0..50 {
        if state.store.comparison_count().await.unwrap() >= 2 {
            created = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(created, "background refresh never created a comparison");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_votes_are_all_counted() {
    const VOTES: i32 = 20;

    let state = spawn_state().await;
    two_sets(&state.store).await;
    let comparison = state.comparison_service.create_comparison().await.unwrap();

    let handles: Vec<_> = (0..VOTES)
        .map(|n| {
            let votes = Arc::clone(&state.vote_service);
            let winner = if n % 2 == 0 {
                comparison.set_a_id
            } else {
                comparison.set_b_id
            };
            let id = comparison.id;
            tokio::spawn(async move { vote_with_retry(&votes, id, winner).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    let stored = state
        .store
        .get_comparison(comparison.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.votes_a + stored.votes_b, VOTES);
    assert_eq!((stored.votes_a, stored.votes_b), (VOTES / 2, VOTES / 2));
    assert_eq!(state.store.vote_count().await.unwrap(), VOTES as u64);

    let cached = state.cache.get(comparison.id).await.unwrap();
    assert_eq!((cached.votes_a, cached.votes_b), (VOTES / 2, VOTES / 2));
}

#[tokio::test]
async fn anonymous_user_is_shared() {
    let state = spawn_state().await;

    let (a, b) = tokio::join!(
        state.store.get_or_create_anonymous_user(),
        state.store.get_or_create_anonymous_user()
    );
    assert_eq!(a.unwrap(), b.unwrap());
}

fn scheduler_for(state: &SharedState) -> Scheduler {
    Scheduler::new(
        Arc::clone(&state.cache),
        Arc::clone(&state.comparison_service),
        ComparisonConfig::default(),
    )
}

#[tokio::test]
async fn maintenance_sweeps_cache_and_replaces_expired_comparisons() {
    let state = spawn_state().await;
    two_sets(&state.store).await;

    let first = state.comparison_service.create_comparison().await.unwrap();
    let second = state.comparison_service.create_comparison().await.unwrap();
    for c in [&first, &second] {
        state
            .store
            .set_comparison_expiry(c.id, Utc::now() - chrono::Duration::minutes(1))
            .await
            .unwrap();
        state
            .cache
            .put(c.id, c.set_a_id, c.set_b_id, 0, 0, Duration::ZERO)
            .await;
    }
    assert_eq!(state.cache.len().await, 2);

    let scheduler = scheduler_for(&state);
    scheduler.run_once().await;

    // Only the replacement is cached
    assert_eq!(state.cache.len().await, 1);
    assert!(state.cache.get(first.id).await.is_none());
    assert!(state.cache.get(second.id).await.is_none());
    assert_eq!(state.store.comparison_count().await.unwrap(), 3);
    assert_eq!(
        state.store.active_comparison_count(Utc::now()).await.unwrap(),
        1
    );

    // Something is live now, so a second pass leaves the store alone
    scheduler.run_once().await;
    assert_eq!(state.store.comparison_count().await.unwrap(), 3);
    assert_eq!(
        state.store.active_comparison_count(Utc::now()).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn maintenance_without_sets_creates_nothing() {
    let state = spawn_state().await;

    let err = state.comparison_service.ensure_active().await.unwrap_err();
    assert!(matches!(err, VotingError::InsufficientData));

    scheduler_for(&state).run_once().await;
    assert_eq!(state.store.comparison_count().await.unwrap(), 0);
}

#[tokio::test]
async fn maintenance_respects_keep_warm_off() {
    let state = spawn_state().await;
    two_sets(&state.store).await;

    let config = ComparisonConfig {
        keep_warm: false,
        ..ComparisonConfig::default()
    };
    Scheduler::new(
        Arc::clone(&state.cache),
        Arc::clone(&state.comparison_service),
        config,
    )
    .run_once()
    .await;

    assert_eq!(state.store.comparison_count().await.unwrap(), 0);
}
