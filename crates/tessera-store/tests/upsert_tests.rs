// Integration tests for upsert: update-then-insert with a re-read of
// the stored row, including compound-key addressing.

mod common;

use common::{PlaylistEntry, Track};
use tessera_core::Value;

#[tokio::test]
async fn test_upsert_inserts_when_no_row_matches() {
    let (_dir, repo) = common::repo::<Track>().await;

    let stored = repo
        .upsert(Track {
            title: "brand new".to_string(),
            liked: true,
            ..Track::default()
        })
        .await
        .unwrap();

    assert!(stored.id > 0);
    assert!(stored.added_at.is_some(), "insert path backfills");
    assert_eq!(repo.count(None).await.unwrap(), 1);
}

#[tokio::test]
async fn test_upsert_updates_when_the_key_matches() {
    let (_dir, repo) = common::repo::<Track>().await;
    let stored = repo
        .insert(Track {
            title: "draft".to_string(),
            ..Track::default()
        })
        .await
        .unwrap();

    let mut changed = stored.clone();
    changed.title = "final".to_string();
    let result = repo.upsert(changed).await.unwrap();

    // Same row, new content, still exactly one row
    assert_eq!(result.id, stored.id);
    assert_eq!(result.title, "final");
    assert_eq!(repo.count(None).await.unwrap(), 1);
}

#[tokio::test]
async fn test_upsert_result_reflects_stored_state() {
    let (_dir, repo) = common::repo::<Track>().await;
    let stored = repo
        .insert(Track {
            title: "reread".to_string(),
            ..Track::default()
        })
        .await
        .unwrap();

    let mut changed = stored.clone();
    changed.liked = true;
    let result = repo.upsert(changed).await.unwrap();

    // The returned entity comes from a re-select, not from the input
    let fetched = repo
        .select_by_primary_key(&[Value::Integer(stored.id)])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(result, fetched);
}

#[tokio::test]
async fn test_upsert_addresses_the_full_compound_key() {
    let (_dir, repo) = common::repo::<PlaylistEntry>().await;
    repo.insert(PlaylistEntry {
        playlist_id: 1,
        track_id: 10,
        position: 0,
    })
    .await
    .unwrap();
    repo.insert(PlaylistEntry {
        playlist_id: 2,
        track_id: 10,
        position: 0,
    })
    .await
    .unwrap();

    // Same track_id, different playlist_id: only the (1, 10) row moves
    let result = repo
        .upsert(PlaylistEntry {
            playlist_id: 1,
            track_id: 10,
            position: 9,
        })
        .await
        .unwrap();
    assert_eq!(result.position, 9);

    let untouched = repo
        .select_by_primary_key(&[Value::Integer(2), Value::Integer(10)])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched.position, 0);
    assert_eq!(repo.count(None).await.unwrap(), 2);
}

#[tokio::test]
async fn test_upsert_insert_path_for_compound_key() {
    let (_dir, repo) = common::repo::<PlaylistEntry>().await;

    let stored = repo
        .upsert(PlaylistEntry {
            playlist_id: 7,
            track_id: 70,
            position: 3,
        })
        .await
        .unwrap();

    assert_eq!(stored.playlist_id, 7);
    assert_eq!(stored.track_id, 70);
    assert_eq!(repo.count(None).await.unwrap(), 1);
}
