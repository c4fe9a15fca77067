use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use rand::seq::IndexedRandom;
use tokio::sync::Mutex;
use tracing::debug;

use crate::suggestion::SuggestionPool;

fn is_excluded(uid: &str, exclude: &[Option<String>]) -> bool {
    exclude.iter().flatten().any(|excluded| excluded == uid)
}

/// An in-memory bag of candidate UIDs per poll.
///
/// Drawing a UID removes it, so a bag never hands out the same UID twice
/// until it is filled again.
#[derive(Debug, Default)]
pub struct BasePool {
    suggestions: HashMap<String, Vec<String>>,
}

impl BasePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self, poll: &str) -> bool {
        self.suggestions.get(poll).map_or(true, Vec::is_empty)
    }

    pub fn candidates(&self, poll: &str) -> &[String] {
        self.suggestions.get(poll).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace the candidates of `poll` with `uids`, minus the excluded ones.
    pub fn fill<I>(&mut self, poll: &str, uids: I, exclude: &[Option<String>])
    where
        I: IntoIterator<Item = String>,
    {
        let uids = uids
            .into_iter()
            .filter(|uid| !is_excluded(uid, exclude))
            .collect();
        self.suggestions.insert(poll.to_owned(), uids);
    }

    /// Remove and return a random candidate of `poll` that is not excluded.
    pub fn random(&mut self, poll: &str, exclude: &[Option<String>]) -> Option<String> {
        let candidates = self.suggestions.get_mut(poll)?;
        let eligible: Vec<usize> = candidates
            .iter()
            .enumerate()
            .filter(|(_, uid)| !is_excluded(uid, exclude))
            .map(|(index, _)| index)
            .collect();

        let &index = eligible.choose(&mut rand::rng())?;
        Some(candidates.swap_remove(index))
    }

    pub fn clear(&mut self) {
        self.suggestions.clear();
    }
}

/// Somewhere to fetch a fresh batch of candidate UIDs from.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    async fn fetch_candidates(&self, poll: &str) -> Result<Vec<String>>;
}

/// A [`SuggestionPool`] drawing from a [`BasePool`] refilled from a
/// [`CandidateSource`] whenever it has nothing eligible left.
pub struct CachedSuggestionPool<S> {
    source: S,
    cache: Mutex<BasePool>,
}

impl<S: CandidateSource> CachedSuggestionPool<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: Mutex::new(BasePool::new()),
        }
    }

    pub async fn is_empty(&self, poll: &str) -> bool {
        self.cache.lock().await.is_empty(poll)
    }

    async fn refill(&self, poll: &str, exclude: &[Option<String>]) -> Result<()> {
        // The lock is not held while fetching.
        let uids = self.source.fetch_candidates(poll).await?;
        debug!(poll, fetched = uids.len(), "Refilling suggestion pool");
        self.cache.lock().await.fill(poll, uids, exclude);
        Ok(())
    }
}

#[async_trait]
impl<S: CandidateSource> SuggestionPool for CachedSuggestionPool<S> {
    async fn random_id_excluding(
        &self,
        poll: &str,
        exclude: &[Option<String>],
    ) -> Result<Option<String>> {
        let cached = self.cache.lock().await.random(poll, exclude);
        if cached.is_some() {
            return Ok(cached);
        }

        self.refill(poll, exclude).await?;
        let suggestion = self.cache.lock().await.random(poll, exclude);
        if suggestion.is_none() {
            debug!(poll, "No eligible suggestion");
        }
        Ok(suggestion)
    }

    async fn clear(&self) {
        self.cache.lock().await.clear();
    }
}
