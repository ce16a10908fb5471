//! Integration tests for the session flow.
//!
//! Exercises cross-crate interactions between reelcut-timeline,
//! reelcut-media, reelcut-export and reelcut-session against the in-memory
//! backend.

use crate::support::{source_id_for, TestBackend};
use reelcut_core::{ReelcutError, SourceId};
use reelcut_session::Session;

fn backend() -> TestBackend {
    TestBackend::new()
        .with_media("/media/a.mp4", 121.1, "16:9")
        .with_media("/media/b.mp4", 61.1, "4:3")
}

async fn session_with_sources() -> Session<TestBackend> {
    let mut session = Session::new(backend());
    session.init().await.unwrap();
    let a = session.open_source("/media/a.mp4").await.unwrap();
    let b = session.open_source("/media/b.mp4").await.unwrap();
    session.add_source_part(&a, None);
    session.add_source_part(&b, None);
    session
}

// ── Source opening & composition ───────────────────────────────

#[tokio::test]
async fn open_source_derives_conservative_duration() {
    let mut session = Session::new(backend());
    let id = session.open_source("/media/a.mp4").await.unwrap();
    let source = session.sources().get(&id).unwrap();
    assert_eq!(source.duration, 120.0); // floor(121.1 - 1.1)
    assert_eq!(source.aspect_ratio(), 1.777_777);
}

#[tokio::test]
async fn open_source_is_cached_per_id() {
    let mut session = Session::new(backend());
    let first = session.open_source("/media/a.mp4").await.unwrap();
    let second = session.open_source("/media/a.mp4").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(session.sources().len(), 1);
}

#[tokio::test]
async fn composition_tracks_duration() {
    let session = session_with_sources().await;
    assert_eq!(session.timeline().len(), 2);
    assert_eq!(session.timeline().duration(), 180.0);
}

#[tokio::test]
async fn add_sources_uses_picker() {
    let mut session = Session::new(backend());
    session.init().await.unwrap();
    session.backend().queue_pick(&["/media/a.mp4", "/media/b.mp4"]);
    session.add_sources(None).await.unwrap();
    assert_eq!(session.timeline().len(), 2);
    assert_eq!(session.sources().len(), 2);
}

#[tokio::test]
async fn empty_pick_is_a_selection_error() {
    let mut session = Session::new(backend());
    session.init().await.unwrap();
    let err = session.add_sources(None).await.unwrap_err();
    assert!(matches!(err, ReelcutError::Selection(_)));
    assert!(session.timeline().is_empty());
}

// ── Cursor & seek ──────────────────────────────────────────────

#[tokio::test]
async fn cursor_resolves_across_parts() {
    let mut session = session_with_sources().await;
    session.navigate_to(130.0);
    let cursor = session.cursor();
    assert_eq!(cursor.part_index, 1);
    assert_eq!(cursor.part_start, 120.0);
    assert_eq!(cursor.part_end, 180.0);
    let (source, at) = session.preview_position().unwrap();
    assert_eq!(source, SourceId::new(source_id_for("/media/b.mp4")));
    assert_eq!(at, 10.0);
    assert_eq!(session.source_info().unwrap().aspect_ratio(), 1.333_333);
}

#[tokio::test]
async fn cursor_clamps_into_range() {
    let mut session = session_with_sources().await;
    session.navigate_to(-10.0);
    assert_eq!(session.cursor().time, 0.0);
    session.navigate_to(500.0);
    assert_eq!(session.cursor().time, 180.0);
    // end of timeline resolves to the end of the last part
    assert_eq!(session.cursor().part_index, 1);
}

#[tokio::test]
async fn adaptive_seek_converges() {
    let mut session = session_with_sources().await;
    session.navigate_to(0.0);

    session.find_next(true);
    assert_eq!(session.cursor().time, 180.0);
    session.find_next(false);
    assert_eq!(session.cursor().time, 90.0);
    session.find_next(false);
    assert_eq!(session.cursor().time, 45.0);
    session.find_next(true);
    assert_eq!(session.cursor().time, 67.0);

    // an explicit jump restarts at coarse granularity
    session.navigate_to(0.0);
    session.find_next(true);
    assert_eq!(session.cursor().time, 180.0);
}

#[tokio::test]
async fn time_text_roundtrips() {
    let mut session = session_with_sources().await;
    session.set_time_hms("2:05");
    assert_eq!(session.cursor().time, 125.0);
    assert_eq!(session.time_hms(), "2:05");
    assert_eq!(session.period_hms(), "3:00");
    session.set_period_hms("0:30");
    assert_eq!(session.seek().period, 30.0);
}

// ── Editing ────────────────────────────────────────────────────

#[tokio::test]
async fn split_swap_remove_flow() {
    let mut session = session_with_sources().await;

    session.navigate_to(30.0);
    assert!(session.split_at_cursor());
    assert_eq!(session.timeline().len(), 3);
    assert_eq!(session.timeline().duration(), 180.0);
    assert_eq!(session.cursor().part_index, 1);
    assert_eq!(session.cursor().part_start, 30.0);

    assert!(session.swap_parts(0, 1));
    assert_eq!(session.timeline().parts()[0].from, 30.0);

    assert!(session.remove_part(2));
    assert_eq!(session.timeline().duration(), 120.0);

    // invalid edits are absorbed
    assert!(!session.remove_part(9));
    assert!(!session.swap_parts(0, 9));
}

#[tokio::test]
async fn join_restores_split_part() {
    let mut session = session_with_sources().await;
    session.navigate_to(30.0);
    session.split_at_cursor();
    assert!(session.can_join_at_cursor());
    assert!(session.join_at_cursor());
    assert_eq!(session.timeline().len(), 2);
    assert_eq!(session.timeline().parts()[0].to, 120.0);
}

#[tokio::test]
async fn join_refuses_across_sources() {
    let mut session = session_with_sources().await;
    session.navigate_to(120.0); // boundary between source a and source b
    assert!(!session.can_join_at_cursor());
    assert!(!session.join_at_cursor());
}

// ── Project persistence ────────────────────────────────────────

#[tokio::test]
async fn project_roundtrips_through_store() {
    let mut session = session_with_sources().await;
    session.navigate_to(130.0);
    session.destination_filename = "cut.mp4".to_string();
    session.aspect_ratio = "21/9".to_string();
    session.settings_mut().map_all_streams = true;
    session.settings_mut().subtitle_codec = "-".to_string();

    let path = session
        .save_project(Some("/media/cut.json".to_string()))
        .await
        .unwrap();
    assert_eq!(path, "/media/cut.json");
    assert_eq!(session.project_filename.as_deref(), Some("/media/cut.json"));

    let mut restored = Session::new(backend());
    restored.init().await.unwrap();
    let data = session.backend().files.lock().unwrap()["/media/cut.json"].clone();
    restored
        .backend()
        .files
        .lock()
        .unwrap()
        .insert("/media/cut.json".to_string(), data);
    restored.load_project("/media/cut.json").await.unwrap();

    assert_eq!(restored.timeline().len(), 2);
    assert_eq!(restored.timeline().duration(), 180.0);
    assert_eq!(restored.destination_filename, "cut.mp4");
    assert_eq!(restored.aspect_ratio, "21/9");
    assert!(restored.settings().map_all_streams);
    assert_eq!(restored.settings().subtitle_codec, "-");
    assert_eq!(restored.cursor().time, 130.0);
    assert_eq!(restored.cursor().part_index, 1);
}

#[tokio::test]
async fn load_rejects_source_id_mismatch() {
    let mut session = Session::new(backend());
    session.init().await.unwrap();
    session
        .backend()
        .files
        .lock()
        .unwrap()
        .insert(
            "/media/stale.json".to_string(),
            r#"{"parts": [], "sources": {"stale-id": "/media/a.mp4"}, "destinationFilename": "out.mp4"}"#
                .to_string(),
        );
    let err = session.load_project("/media/stale.json").await.unwrap_err();
    assert!(matches!(err, ReelcutError::Selection(_)));
}

#[tokio::test]
async fn load_rejects_part_with_undeclared_source() {
    let mut session = Session::new(backend());
    session.init().await.unwrap();
    session.backend().files.lock().unwrap().insert(
        "/media/bad.json".to_string(),
        r#"{"parts": [{"sourceId": "ghost", "duration": 10.0, "from": 0.0, "to": 10.0}],
            "sources": {}, "destinationFilename": "out.mp4"}"#
            .to_string(),
    );
    let err = session.load_project("/media/bad.json").await.unwrap_err();
    assert!(matches!(err, ReelcutError::Selection(_)));
    assert!(session.timeline().is_empty());
}

#[tokio::test]
async fn default_project_name_follows_destination() {
    let mut session = session_with_sources().await;
    session.destination_filename = "/media/holiday.mp4".to_string();
    assert_eq!(session.default_project_name(), "holiday.json");
}
