use std::collections::{HashMap, VecDeque};

/// Which end of a history, or which neighbour of the cursor, an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Default)]
struct Track {
    entries: VecDeque<String>,
    // None until the first move or has-next query after creation.
    cursor: Option<usize>,
}

impl Track {
    fn last_index(&self) -> usize {
        self.entries.len() - 1
    }

    /// Initialize the cursor on first use. Returns None for an empty track.
    fn cursor_or_init(&mut self, default: impl FnOnce(&Self) -> usize) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        if self.cursor.is_none() {
            self.cursor = Some(default(self));
        }
        self.cursor
    }

    fn current(&self) -> Option<&str> {
        self.cursor
            .and_then(|i| self.entries.get(i))
            .map(String::as_str)
    }
}

/// A history of UIDs per poll, supporting appends to both ends.
///
/// Each poll owns an independent sequence and cursor. Appending always moves
/// the cursor onto the appended UID, so the next move starts from it. The
/// history is volatile and must be cleared at logout.
#[derive(Debug, Default)]
pub struct UidHistory {
    tracks: HashMap<String, Track>,
}

impl UidHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self, poll: &str) -> bool {
        self.tracks.get(poll).map_or(true, |t| t.entries.is_empty())
    }

    pub fn len(&self, poll: &str) -> usize {
        self.tracks.get(poll).map_or(0, |t| t.entries.len())
    }

    /// Current cursor position, without initializing it.
    pub fn cursor(&self, poll: &str) -> Option<usize> {
        self.tracks.get(poll).and_then(|t| t.cursor)
    }

    /// UID under the cursor, without initializing it.
    pub fn current(&self, poll: &str) -> Option<&str> {
        self.tracks.get(poll).and_then(Track::current)
    }

    /// Append a UID at the head of the history and move the cursor onto it.
    pub fn append_left(&mut self, poll: &str, uid: impl Into<String>) {
        let track = self.track_mut(poll);
        track.entries.push_front(uid.into());
        track.cursor = Some(0);
    }

    /// Append a UID at the tail of the history and move the cursor onto it.
    pub fn append_right(&mut self, poll: &str, uid: impl Into<String>) {
        let track = self.track_mut(poll);
        track.entries.push_back(uid.into());
        track.cursor = Some(track.last_index());
    }

    /// Insert a UID next to the cursor and move the cursor onto it.
    ///
    /// Does nothing if the UID is the one currently under the cursor.
    pub fn insert(&mut self, poll: &str, uid: impl Into<String>, side: Side) {
        let uid = uid.into();
        let track = self.track_mut(poll);

        if track.current() == Some(uid.as_str()) {
            return;
        }

        let at = if track.entries.is_empty() {
            0
        } else {
            let cursor = track.cursor.unwrap_or_else(|| track.last_index());
            match side {
                Side::Left => cursor,
                Side::Right => cursor + 1,
            }
        };

        track.entries.insert(at, uid);
        track.cursor = Some(at);
    }

    /// Move the cursor one step to the left and return the UID found there.
    ///
    /// An uninitialized cursor starts from the tail.
    pub fn move_left(&mut self, poll: &str) -> Option<String> {
        let track = self.tracks.get_mut(poll)?;
        let cursor = track.cursor_or_init(Track::last_index)?;
        if cursor == 0 {
            return None;
        }

        track.cursor = Some(cursor - 1);
        track.entries.get(cursor - 1).cloned()
    }

    /// Move the cursor one step to the right and return the UID found there.
    ///
    /// An uninitialized cursor starts from the head.
    pub fn move_right(&mut self, poll: &str) -> Option<String> {
        let track = self.tracks.get_mut(poll)?;
        let cursor = track.cursor_or_init(|_| 0)?;
        if cursor >= track.last_index() {
            return None;
        }

        track.cursor = Some(cursor + 1);
        track.entries.get(cursor + 1).cloned()
    }

    pub fn has_next_left(&mut self, poll: &str) -> bool {
        self.tracks
            .get_mut(poll)
            .and_then(|t| t.cursor_or_init(Track::last_index))
            .map_or(false, |cursor| cursor > 0)
    }

    pub fn has_next_right(&mut self, poll: &str) -> bool {
        self.tracks.get_mut(poll).map_or(false, |t| {
            t.cursor_or_init(|_| 0)
                .map_or(false, |cursor| cursor < t.last_index())
        })
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    fn track_mut(&mut self, poll: &str) -> &mut Track {
        self.tracks.entry(poll.to_owned()).or_default()
    }
}
