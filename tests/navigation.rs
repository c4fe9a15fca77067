use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use uidnav::{SuggestionHistory, SuggestionPool, UidHistory};

const POLL_A: &str = "videos";
const POLL_B: &str = "candidates";

#[derive(Default)]
struct CountingPool {
    calls: AtomicUsize,
    excludes: Mutex<Vec<Vec<Option<String>>>>,
    answer: Option<String>,
}

impl CountingPool {
    fn answering(uid: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Some(uid.to_string()),
            ..Self::default()
        })
    }
}

#[async_trait]
impl SuggestionPool for CountingPool {
    async fn random_id_excluding(
        &self,
        _poll: &str,
        exclude: &[Option<String>],
    ) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.excludes.lock().unwrap().push(exclude.to_vec());
        Ok(self.answer.clone())
    }
}

fn some(uid: &str) -> Option<String> {
    Some(uid.to_string())
}

fn assert_pristine(history: &mut UidHistory, poll: &str) {
    assert!(history.is_empty(poll));
    assert_eq!(history.move_left(poll), None);
    assert_eq!(history.move_right(poll), None);
    assert!(!history.has_next_left(poll));
    assert!(!history.has_next_right(poll));
}

#[test]
fn fresh_history_answers_empty_defaults() {
    let mut history = UidHistory::new();
    assert_pristine(&mut history, POLL_A);
    assert_pristine(&mut history, "");
}

#[test]
fn polls_are_isolated() {
    let mut history = UidHistory::new();
    for uid in ["u1", "u2", "u3"] {
        history.append_right(POLL_A, uid);
    }
    history.move_left(POLL_A);
    history.insert(POLL_A, "u9", uidnav::Side::Left);

    assert_pristine(&mut history, POLL_B);
    assert_eq!(history.len(POLL_A), 4);
}

#[test]
fn walking_left_then_mirror_walking_right() {
    let mut right = UidHistory::new();
    for uid in ["u1", "u2", "u3", "u4"] {
        right.append_right(POLL_A, uid);
    }
    let walked: Vec<_> = (0..5).map(|_| right.move_left(POLL_A)).collect();
    assert_eq!(
        walked,
        [some("u3"), some("u2"), some("u1"), None, None]
    );

    let mut left = UidHistory::new();
    for uid in ["u1", "u2", "u3", "u4"] {
        left.append_left(POLL_A, uid);
    }
    let walked: Vec<_> = (0..5).map(|_| left.move_right(POLL_A)).collect();
    assert_eq!(
        walked,
        [some("u3"), some("u2"), some("u1"), None, None]
    );
}

#[test]
fn append_re_anchors_the_cursor() {
    let mut history = UidHistory::new();
    for uid in ["u1", "u2", "u3", "u4"] {
        history.append_right(POLL_A, uid);
    }
    history.move_left(POLL_A);
    history.move_left(POLL_A);

    history.append_right(POLL_A, "u5");

    assert_eq!(history.move_left(POLL_A).as_deref(), Some("u4"));
}

#[test]
fn has_next_is_a_preview() {
    let mut history = UidHistory::new();
    for uid in ["u1", "u2"] {
        history.append_right(POLL_A, uid);
    }

    for _ in 0..10 {
        assert!(history.has_next_left(POLL_A));
    }
    assert_eq!(history.move_left(POLL_A).as_deref(), Some("u1"));
    assert!(!history.has_next_left(POLL_A));
}

#[test]
fn clear_resets_all_polls_at_once() {
    let mut history = UidHistory::new();
    let polls = [POLL_A, POLL_B, "third"];
    for poll in polls {
        for uid in ["u1", "u2", "u3"] {
            history.append_right(poll, uid);
        }
    }
    history.move_left(POLL_A);
    history.move_left(POLL_A);
    history.move_left(POLL_B);

    history.clear();

    for poll in polls {
        assert_pristine(&mut history, poll);
    }
}

#[tokio::test]
async fn pool_is_skipped_while_history_has_more() {
    let pool = CountingPool::answering("fresh");
    let mut history = SuggestionHistory::new(pool.clone());
    for uid in ["u1", "u2"] {
        history.history_mut().append_right(POLL_A, uid);
    }

    let uid = history.move_left_or_suggestion(POLL_A, &[]).await.unwrap();
    assert_eq!(uid.as_deref(), Some("u1"));
    let uid = history.move_right_or_suggestion(POLL_A, &[]).await.unwrap();
    assert_eq!(uid.as_deref(), Some("u2"));

    assert_eq!(pool.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn exhausted_history_asks_the_pool_once_and_remembers() {
    let pool = CountingPool::answering("fresh");
    let mut history = SuggestionHistory::new(pool.clone());
    history.history_mut().append_right(POLL_A, "u1");
    let exclude = vec![Some("u1".to_string()), None];

    let uid = history
        .move_right_or_suggestion(POLL_A, &exclude)
        .await
        .unwrap();

    assert_eq!(uid.as_deref(), Some("fresh"));
    assert_eq!(pool.calls.load(Ordering::SeqCst), 1);
    assert_eq!(pool.excludes.lock().unwrap().as_slice(), [exclude]);

    let history = history.history_mut();
    assert_eq!(history.move_left(POLL_A).as_deref(), Some("u1"));
    assert_eq!(history.move_right(POLL_A).as_deref(), Some("fresh"));
}

#[tokio::test]
async fn exhausted_pool_leaves_history_alone() {
    let pool = Arc::new(CountingPool::default());
    let mut history = SuggestionHistory::new(pool.clone());

    let uid = history.move_left_or_suggestion(POLL_A, &[None]).await.unwrap();

    assert_eq!(uid, None);
    assert_eq!(pool.calls.load(Ordering::SeqCst), 1);
    assert!(history.history().is_empty(POLL_A));
}
