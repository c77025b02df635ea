//! Debug/cheat activation via a typed key sequence

use serde::{Deserialize, Serialize};

/// Keys that unlock cheat mode, in order (case-insensitive)
pub const CHEAT_SEQUENCE: &str = "fishy";

/// Incremental matcher for [`CHEAT_SEQUENCE`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheatCode {
    progress: usize,
}

impl CheatCode {
    /// Feed one keystroke. Returns true when the sequence completes.
    pub fn feed(&mut self, key: char) -> bool {
        let key = key.to_ascii_lowercase();
        let expected = CHEAT_SEQUENCE.chars().nth(self.progress);

        if expected == Some(key) {
            self.progress += 1;
            if self.progress == CHEAT_SEQUENCE.len() {
                self.progress = 0;
                return true;
            }
        } else if CHEAT_SEQUENCE.starts_with(key) {
            self.progress = 1;
        } else {
            self.progress = 0;
        }
        false
    }

    pub fn reset(&mut self) {
        self.progress = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(code: &mut CheatCode, keys: &str) -> bool {
        keys.chars().fold(false, |hit, k| code.feed(k) || hit)
    }

    #[test]
    fn test_sequence_unlocks() {
        let mut code = CheatCode::default();
        assert!(feed_all(&mut code, "fishy"));
    }

    #[test]
    fn test_case_insensitive() {
        let mut code = CheatCode::default();
        assert!(feed_all(&mut code, "FiShY"));
    }

    #[test]
    fn test_wrong_key_restarts() {
        let mut code = CheatCode::default();
        assert!(!feed_all(&mut code, "fisxhy"));
        // Restart on the first letter keeps partial progress usable
        assert!(feed_all(&mut code, "fiffishy"));
    }

    #[test]
    fn test_reset_clears_progress() {
        let mut code = CheatCode::default();
        feed_all(&mut code, "fish");
        code.reset();
        assert!(!code.feed('y'));
    }
}
