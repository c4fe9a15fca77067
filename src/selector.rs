use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::history::Side;
use crate::suggestion::{SuggestionHistory, SuggestionPool};

/// One of the two entity selectors of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    A,
    B,
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::A => write!(f, "A"),
            Selector::B => write!(f, "B"),
        }
    }
}

/// A comparison between two entities, each picked by a selector with its own
/// browsing history. Both histories share the same suggestion pool.
pub struct ComparisonSession<P: ?Sized> {
    poll: String,
    pool: Arc<P>,
    history_a: SuggestionHistory<P>,
    history_b: SuggestionHistory<P>,
    uid_a: Option<String>,
    uid_b: Option<String>,
}

impl<P: SuggestionPool + ?Sized> ComparisonSession<P> {
    pub fn new(poll: impl Into<String>, pool: Arc<P>) -> Self {
        Self {
            poll: poll.into(),
            history_a: SuggestionHistory::new(pool.clone()),
            history_b: SuggestionHistory::new(pool.clone()),
            pool,
            uid_a: None,
            uid_b: None,
        }
    }

    pub fn poll(&self) -> &str {
        &self.poll
    }

    pub fn uid(&self, selector: Selector) -> Option<&str> {
        match selector {
            Selector::A => self.uid_a.as_deref(),
            Selector::B => self.uid_b.as_deref(),
        }
    }

    pub fn history(&self, selector: Selector) -> &SuggestionHistory<P> {
        match selector {
            Selector::A => &self.history_a,
            Selector::B => &self.history_b,
        }
    }

    /// Initialize both selectors. A given UID is remembered as is, a missing
    /// one is filled with a suggestion distinct from the other selector's.
    pub async fn auto_fill(&mut self, uid_a: Option<String>, uid_b: Option<String>) -> Result<()> {
        self.uid_a = match uid_a {
            Some(uid) => {
                self.history_a.history_mut().append_right(&self.poll, uid.as_str());
                Some(uid)
            }
            None => {
                let exclude = [None, uid_b.clone()];
                self.history_a
                    .move_right_or_suggestion(&self.poll, &exclude)
                    .await?
            }
        };

        self.uid_b = match uid_b {
            Some(uid) => {
                self.history_b.history_mut().append_right(&self.poll, uid.as_str());
                Some(uid)
            }
            None => {
                let exclude = [self.uid_a.clone(), None];
                self.history_b
                    .move_right_or_suggestion(&self.poll, &exclude)
                    .await?
            }
        };

        info!(
            poll = %self.poll,
            uid_a = ?self.uid_a,
            uid_b = ?self.uid_b,
            "Comparison initialized"
        );
        Ok(())
    }

    pub async fn previous(&mut self, selector: Selector) -> Result<Option<String>> {
        self.step(selector, Side::Left).await
    }

    pub async fn next(&mut self, selector: Selector) -> Result<Option<String>> {
        self.step(selector, Side::Right).await
    }

    /// Explicitly select a UID. It becomes the newest entry of the history.
    pub fn pick(&mut self, selector: Selector, uid: impl Into<String>) {
        let uid = uid.into();
        let (poll, history, slot) = self.parts_mut(selector);
        history.history_mut().append_right(poll, uid.as_str());
        *slot = Some(uid);
    }

    /// Forget everything seen in this session, suggestions included.
    pub async fn logout(&mut self) {
        self.history_a.clear();
        self.history_b.clear();
        self.pool.clear().await;
        self.uid_a = None;
        self.uid_b = None;
        debug!("Comparison session cleared");
    }

    async fn step(&mut self, selector: Selector, side: Side) -> Result<Option<String>> {
        // Neither selector may be suggested what is already displayed.
        let exclude = [self.uid_a.clone(), self.uid_b.clone()];
        let (poll, history, slot) = self.parts_mut(selector);

        let uid = match side {
            Side::Left => history.move_left_or_suggestion(poll, &exclude).await?,
            Side::Right => history.move_right_or_suggestion(poll, &exclude).await?,
        };

        if let Some(uid) = &uid {
            debug!(%selector, ?side, %uid, "Selector moved");
            *slot = Some(uid.clone());
        }
        Ok(uid)
    }

    fn parts_mut(
        &mut self,
        selector: Selector,
    ) -> (&str, &mut SuggestionHistory<P>, &mut Option<String>) {
        match selector {
            Selector::A => (&self.poll, &mut self.history_a, &mut self.uid_a),
            Selector::B => (&self.poll, &mut self.history_b, &mut self.uid_b),
        }
    }
}
