//! Submitted-line history with up/down navigation.

/// Bounded list of submitted lines plus a navigation cursor.
///
/// The cursor rests one past the newest entry after every push; moving down
/// past the newest entry yields an empty line.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Record a submitted line and reset the cursor.
    pub fn push(&mut self, line: &str) {
        // Don't duplicate the last entry.
        if self.entries.last().is_none_or(|last| last != line) {
            self.entries.push(line.to_string());
            if self.entries.len() > self.limit {
                self.entries.remove(0);
            }
        }
        self.cursor = self.entries.len();
    }

    /// Step towards older entries.
    pub fn older(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Step towards newer entries; past the newest this yields `""`.
    pub fn newer(&mut self) -> Option<&str> {
        if self.cursor >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries.get(self.cursor).map_or("", String::as_str))
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(100)
    }
}
