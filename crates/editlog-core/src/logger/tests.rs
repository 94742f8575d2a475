use super::*;
use crate::diff::DiffLine;
use crate::document::MemoryDocuments;
use crate::events::{ContentChange, EditKind, Position};
use crate::export::{ExportRecord, MemoryFs};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::advance;

struct Harness {
    logger: EditLogger,
    docs: Arc<MemoryDocuments>,
    fs: Arc<MemoryFs>,
}

impl Harness {
    async fn start(config: LoggerConfig) -> Self {
        let docs = Arc::new(MemoryDocuments::new());
        let fs = Arc::new(MemoryFs::new());
        let logger =
            EditLogger::spawn(config, docs.clone(), DatasetExporter::new(fs.clone())).unwrap();
        logger.set_enabled(true).await.unwrap();
        Self { logger, docs, fs }
    }

    /// Apply an insert and wait until the logger has processed it
    async fn type_text(&self, path: &str, line: usize, character: usize, text: &str) {
        let mut notification = ChangeNotification::new(
            path,
            vec![ContentChange::insert(Position::new(line, character), text)],
        );
        self.docs.apply(&mut notification).unwrap();
        self.logger.notify_change(notification).await.unwrap();
        self.settle().await;
    }

    async fn settle(&self) -> LoggerStatus {
        self.logger.status().await.unwrap()
    }

    async fn history_len(&self) -> usize {
        self.settle().await.history_len
    }
}

fn config() -> LoggerConfig {
    LoggerConfig::default()
        .with_dataset_root("/data")
        .with_workspace_root("/w/proj")
        .with_debounce_ms(1000)
}

const A: &str = "/w/proj/a.ts";
const B: &str = "/w/proj/b.ts";

#[tokio::test(start_paused = true)]
async fn test_three_keystrokes_make_one_entry() {
    let h = Harness::start(config().with_history_size(2)).await;
    h.docs.open(A, "let x = 1;\n");

    h.type_text(A, 0, 9, "a").await;
    advance(Duration::from_millis(100)).await;
    h.type_text(A, 0, 10, "b").await;
    advance(Duration::from_millis(100)).await;
    h.type_text(A, 0, 11, "c").await;

    advance(Duration::from_millis(999)).await;
    assert_eq!(h.history_len().await, 0);

    advance(Duration::from_millis(1)).await;
    let status = h.settle().await;
    assert_eq!(status.history_len, 1);
    assert_eq!(status.saved_event_count, 1);
    assert_eq!(status.pending_file, None);

    let history = h.logger.history().await.unwrap();
    let entry = &history[0];
    assert_eq!(entry.event_kind, EditKind::Insert);
    assert_eq!(entry.event_text, "c");
    assert_eq!(entry.hunks.len(), 1);
    assert_eq!(
        entry.hunks[0].lines[..2],
        [DiffLine::delete("let x = 1;"), DiffLine::insert("let x = 1abc;")]
    );

    let files = h.fs.files();
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("/data/proj"));
    let record: ExportRecord = serde_json::from_str(&h.fs.get(&files[0]).unwrap()).unwrap();
    assert_eq!(record.file_content, "let x = 1abc;\n");
    assert_eq!(record.history.len(), 1);
    assert_eq!(record.history[0].event_type, EditKind::Insert);
}

#[tokio::test(start_paused = true)]
async fn test_debounce_resets_on_each_event() {
    let h = Harness::start(config()).await;
    h.docs.open(A, "");

    h.type_text(A, 0, 0, "a").await;
    advance(Duration::from_millis(999)).await;
    h.type_text(A, 0, 1, "b").await;

    advance(Duration::from_millis(1)).await;
    assert_eq!(h.history_len().await, 0);

    advance(Duration::from_millis(998)).await;
    assert_eq!(h.history_len().await, 0);

    advance(Duration::from_millis(1)).await;
    assert_eq!(h.history_len().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_file_switch_flushes_immediately() {
    let h = Harness::start(config()).await;
    h.docs.open(A, "a\n");
    h.docs.open(B, "b\n");

    h.type_text(A, 0, 1, "1").await;
    h.type_text(B, 0, 1, "2").await;

    let status = h.settle().await;
    assert_eq!(status.history_len, 1);
    assert_eq!(status.pending_file.as_deref(), Some(Path::new(B)));

    let history = h.logger.history().await.unwrap();
    assert_eq!(history[0].file_name, "a.ts");
    assert_eq!(history[0].masked_content, "a1\n");
}

#[tokio::test(start_paused = true)]
async fn test_disabled_logger_ignores_changes() {
    let h = Harness::start(config()).await;
    assert!(!h.logger.toggle().await.unwrap());
    h.docs.open(A, "");

    h.type_text(A, 0, 0, "x").await;
    assert_eq!(h.logger.flush().await.unwrap(), None);
    assert_eq!(h.settle().await.pending_file, None);
}

#[tokio::test(start_paused = true)]
async fn test_disabling_keeps_pending_burst() {
    let h = Harness::start(config()).await;
    h.docs.open(A, "");

    h.type_text(A, 0, 0, "x").await;
    h.logger.set_enabled(false).await.unwrap();

    advance(Duration::from_millis(1000)).await;
    let status = h.settle().await;
    assert!(!status.enabled);
    assert_eq!(status.history_len, 1);
}

#[tokio::test(start_paused = true)]
async fn test_untracked_documents_are_ignored() {
    let h = Harness::start(config()).await;
    let vendored = "/w/proj/node_modules/lib/index.js";
    h.docs.open(vendored, "");
    h.type_text(vendored, 0, 0, "x").await;
    assert_eq!(h.settle().await.pending_file, None);

    h.docs.open("Untitled-1", "");
    let mut notification =
        ChangeNotification::new("Untitled-1", vec![ContentChange::insert(Position::new(0, 0), "x")])
            .with_scheme("untitled");
    h.docs.apply(&mut notification).unwrap();
    h.logger.notify_change(notification).await.unwrap();
    assert_eq!(h.settle().await.pending_file, None);
}

#[tokio::test(start_paused = true)]
async fn test_noop_burst_produces_nothing() {
    let h = Harness::start(config()).await;
    h.docs.open(A, "abc");
    h.type_text(A, 0, 0, "").await;

    assert_eq!(h.settle().await.pending_file.as_deref(), Some(Path::new(A)));
    advance(Duration::from_millis(1000)).await;
    let status = h.settle().await;
    assert_eq!(status.history_len, 0);
    assert_eq!(status.pending_file, None);
    assert!(h.fs.files().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_explicit_flush() {
    let h = Harness::start(config()).await;
    h.docs.open(A, "");
    h.type_text(A, 0, 0, "x").await;

    let written = h.logger.flush().await.unwrap().unwrap();
    assert!(h.fs.get(&written).is_some());
    assert_eq!(h.logger.flush().await.unwrap(), None);

    // The cancelled timer must not produce a second entry
    advance(Duration::from_millis(5000)).await;
    assert_eq!(h.history_len().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_flushes_pending_burst() {
    let h = Harness::start(config()).await;
    h.docs.open(A, "");
    h.type_text(A, 0, 0, "x").await;

    h.logger.shutdown().await.unwrap();
    assert_eq!(h.fs.files().len(), 1);

    let err = h.logger.status().await.unwrap_err();
    assert_eq!(err.error_code(), "EVENT_PROCESSING_FAILED");
    h.logger.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_closed_document_discards_burst() {
    let h = Harness::start(config()).await;
    h.docs.open(A, "");
    h.type_text(A, 0, 0, "x").await;
    h.docs.close(Path::new(A));

    assert_eq!(h.logger.flush().await.unwrap(), None);
    assert_eq!(h.history_len().await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_export_failure_keeps_logger_usable() {
    let h = Harness::start(config()).await;
    h.docs.open(A, "");
    h.fs.set_fail_writes(true);

    h.type_text(A, 0, 0, "x").await;
    let err = h.logger.flush().await.unwrap_err();
    assert_eq!(err.error_code(), "FILE_OPERATION_FAILED");

    let status = h.settle().await;
    assert_eq!(status.history_len, 1);
    assert_eq!(status.saved_event_count, 0);

    h.fs.set_fail_writes(false);
    h.type_text(A, 0, 1, "y").await;
    assert!(h.logger.flush().await.unwrap().is_some());

    let status = h.settle().await;
    assert_eq!(status.history_len, 2);
    assert_eq!(status.saved_event_count, 1);
}

#[tokio::test(start_paused = true)]
async fn test_export_carries_bounded_history() {
    let h = Harness::start(config().with_history_size(2)).await;
    h.docs.open(A, "");
    h.docs.open(B, "");

    h.type_text(A, 0, 0, "1").await;
    h.logger.flush().await.unwrap();
    h.type_text(B, 0, 0, "2").await;
    h.logger.flush().await.unwrap();
    h.type_text(A, 0, 1, "3").await;
    let last = h.logger.flush().await.unwrap().unwrap();

    let record: ExportRecord = serde_json::from_str(&h.fs.get(&last).unwrap()).unwrap();
    let names: Vec<&str> = record.history.iter().map(|e| e.file_name.as_str()).collect();
    assert_eq!(names, vec!["b.ts", "a.ts"]);
    assert_eq!(record.file_content, "13");
}

#[tokio::test(start_paused = true)]
async fn test_update_config_resizes_history() {
    let h = Harness::start(config()).await;
    h.docs.open(A, "");
    for (i, c) in ["a", "b", "c"].into_iter().enumerate() {
        h.type_text(A, 0, i, c).await;
        h.logger.flush().await.unwrap();
    }
    assert_eq!(h.history_len().await, 3);

    let err = h
        .logger
        .update_config(config().with_history_size(0))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_FAILED");
    assert_eq!(h.history_len().await, 3);

    h.logger
        .update_config(config().with_history_size(1).with_dataset_root("/elsewhere"))
        .await
        .unwrap();
    let status = h.settle().await;
    assert_eq!(status.history_len, 1);
    assert_eq!(status.dataset_root, PathBuf::from("/elsewhere"));
}

#[tokio::test(start_paused = true)]
async fn test_status_observers() {
    let h = Harness::start(config()).await;
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    h.logger.on_status_change(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    h.logger.toggle().await.unwrap();
    h.logger.toggle().await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    h.docs.open(A, "");
    h.type_text(A, 0, 0, "x").await;
    h.logger.flush().await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_saves_are_not_exported() {
    let h = Harness::start(config()).await;
    h.docs.open(A, "x");
    h.logger
        .notify_save(SaveNotification {
            file_path: PathBuf::from(A),
            cursor_line: Some(0),
            line_count: 1,
        })
        .await
        .unwrap();

    assert_eq!(h.logger.flush().await.unwrap(), None);
    assert!(h.fs.files().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_bad_mask_pattern_is_skipped() {
    let mut cfg = config();
    cfg.mask_patterns = vec!["(unclosed".to_string(), "password".to_string()];
    let h = Harness::start(cfg).await;
    h.docs.open(A, "");

    h.type_text(A, 0, 0, "password = 1").await;
    h.logger.flush().await.unwrap();

    let history = h.logger.history().await.unwrap();
    assert_eq!(history[0].masked_content, "[REDACTED] = 1");
}

#[tokio::test(start_paused = true)]
async fn test_update_config_keeps_good_settings_with_bad_pattern() {
    let h = Harness::start(config()).await;
    let mut cfg = config().with_history_size(1);
    cfg.mask_patterns.push("[".to_string());

    h.logger.update_config(cfg).await.unwrap();
    h.docs.open(A, "");
    h.type_text(A, 0, 0, "a").await;
    h.logger.flush().await.unwrap();
    h.type_text(A, 0, 1, "b").await;
    h.logger.flush().await.unwrap();

    assert_eq!(h.history_len().await, 1);
}
