//! High score leaderboard system
//!
//! Persisted to a plain text file, one `"<score> <name>"` line per entry,
//! best score first.

use std::fmt::Write as _;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_PLAYER_NAME, MAX_HIGH_SCORES, MAX_NAME_LENGTH};

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player name (at most 15 characters)
    pub name: String,
    /// Player's score
    pub score: u32,
}

impl HighScoreEntry {
    /// Parse one `"<score> <name>"` line. Returns `None` for a non-numeric
    /// score or an empty name. Names are capped like typed ones.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        let (score, name) = line.split_once(char::is_whitespace)?;
        let score = score.parse::<u32>().ok()?;
        if name.trim().is_empty() {
            return None;
        }
        // Hand-edited files can carry longer names than entry allows
        Some(Self {
            name: sanitize_name(name),
            score,
        })
    }
}

/// Trim a typed name to something storable
pub fn sanitize_name(name: &str) -> String {
    let name: String = name
        .trim()
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_NAME_LENGTH)
        .collect();
    let name = name.trim();
    if name.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        name.to_string()
    }
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreTable {
    entries: Vec<HighScoreEntry>,
    max_entries: usize,
}

impl Default for HighScoreTable {
    fn default() -> Self {
        Self::new(MAX_HIGH_SCORES)
    }
}

impl HighScoreTable {
    /// Create empty leaderboard
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Check if a score qualifies for the leaderboard
    pub fn is_high_score(&self, score: u32) -> bool {
        if score == 0 || self.max_entries == 0 {
            return false;
        }
        if self.entries.len() < self.max_entries {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.is_high_score(score) {
            return None;
        }
        Some(self.insert_position(score) + 1)
    }

    /// Index a new score would take; ties keep the older entry ahead
    fn insert_position(&self, score: u32) -> usize {
        self.entries.iter().take_while(|e| e.score >= score).count()
    }

    /// Insert a score, keeping the table sorted and bounded.
    /// Returns the rank achieved (1-indexed) or None if it fell off the end.
    pub fn add_high_score(&mut self, name: &str, score: u32) -> Option<usize> {
        let entry = HighScoreEntry {
            name: sanitize_name(name),
            score,
        };

        let pos = self.insert_position(score);
        self.entries.insert(pos, entry);

        // Trim to max size
        self.entries.truncate(self.max_entries);

        (pos < self.entries.len()).then_some(pos + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Parse the file format. Blank and malformed lines are skipped.
    pub fn from_text(text: &str, max_entries: usize) -> Self {
        let mut entries = Vec::new();
        for (number, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match HighScoreEntry::parse_line(line) {
                Some(entry) => entries.push(entry),
                None => log::warn!("Skipping malformed high score line {}: {:?}", number + 1, line),
            }
        }
        // Stable sort keeps file order among equal scores
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(max_entries);
        Self { entries, max_entries }
    }

    /// Render the file format
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let _ = writeln!(out, "{} {}", entry.score, entry.name);
        }
        out
    }

    /// Load high scores from a file. A missing or unreadable file yields an
    /// empty table.
    pub fn load(path: impl AsRef<Path>, max_entries: usize) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let table = Self::from_text(&text, max_entries);
                log::info!("Loaded {} high scores from {}", table.entries.len(), path.display());
                table
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                Self::new(max_entries)
            }
            Err(e) => {
                log::warn!("Failed to read high scores {}: {}", path.display(), e);
                Self::new(max_entries)
            }
        }
    }

    /// Rewrite the whole file with the current table
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_text())?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
