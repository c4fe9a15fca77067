use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::history::UidHistory;

/// A source of fresh UIDs, used when a history runs out in one direction.
#[async_trait]
pub trait SuggestionPool: Send + Sync {
    /// Return a UID that is not in `exclude`, or None if nothing is eligible.
    async fn random_id_excluding(
        &self,
        poll: &str,
        exclude: &[Option<String>],
    ) -> Result<Option<String>>;

    /// Forget everything cached for every poll.
    async fn clear(&self) {}
}

/// A [`UidHistory`] that falls back to a suggestion pool when exhausted.
pub struct SuggestionHistory<P: ?Sized> {
    history: UidHistory,
    pool: Arc<P>,
}

impl<P: SuggestionPool + ?Sized> SuggestionHistory<P> {
    pub fn new(pool: Arc<P>) -> Self {
        Self {
            history: UidHistory::new(),
            pool,
        }
    }

    pub fn history(&self) -> &UidHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut UidHistory {
        &mut self.history
    }

    /// Same as [`UidHistory::move_left`], except that an exhausted history
    /// asks the pool for a new UID and appends it to the left.
    ///
    /// A pool failure is returned as is and leaves the history untouched.
    pub async fn move_left_or_suggestion(
        &mut self,
        poll: &str,
        exclude: &[Option<String>],
    ) -> Result<Option<String>> {
        if self.history.has_next_left(poll) {
            return Ok(self.history.move_left(poll));
        }

        let suggestion = self.pool.random_id_excluding(poll, exclude).await?;
        if let Some(uid) = &suggestion {
            self.history.append_left(poll, uid.as_str());
        }
        Ok(suggestion)
    }

    /// Same as [`UidHistory::move_right`], except that an exhausted history
    /// asks the pool for a new UID and appends it to the right.
    pub async fn move_right_or_suggestion(
        &mut self,
        poll: &str,
        exclude: &[Option<String>],
    ) -> Result<Option<String>> {
        if self.history.has_next_right(poll) {
            return Ok(self.history.move_right(poll));
        }

        let suggestion = self.pool.random_id_excluding(poll, exclude).await?;
        if let Some(uid) = &suggestion {
            self.history.append_right(poll, uid.as_str());
        }
        Ok(suggestion)
    }

    /// Clear the history. The pool is shared and cleared by its owner.
    pub fn clear(&mut self) {
        self.history.clear();
    }
}
