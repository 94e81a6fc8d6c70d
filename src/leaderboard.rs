use crate::error::LeaderboardError;
use log::{error, info, warn};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// One leaderboard record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerScore {
    pub username: String,
    pub score: i32,
}

impl PlayerScore {
    pub fn new(username: impl Into<String>, score: i32) -> Self {
        Self {
            username: username.into(),
            score,
        }
    }

    /// Parse a `name,score` record. The score is not trimmed.
    pub fn parse(line: &str) -> Result<Self, LeaderboardError> {
        let fields: Vec<&str> = line.split(',').collect();
        let [name, score] = fields.as_slice() else {
            return Err(LeaderboardError::FieldCount {
                fields: fields.len(),
            });
        };

        let score = score
            .parse::<i32>()
            .map_err(|_| LeaderboardError::Score(score.to_string()))?;

        Ok(Self::new(*name, score))
    }
}

/// Flat file store of the best scores.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    path: PathBuf,
    capacity: usize,
}

impl Leaderboard {
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all entries in file order. Never fails: read errors are logged and
    /// yield an empty board, malformed lines are skipped.
    pub fn load(&self) -> Vec<PlayerScore> {
        match self.try_load() {
            Ok(scores) => scores,
            Err(err) => {
                error!("{err}");
                Vec::new()
            }
        }
    }

    fn try_load(&self) -> Result<Vec<PlayerScore>, LeaderboardError> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            // First run, nothing saved yet
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(LeaderboardError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let mut scores = Vec::new();
        for (number, line) in content.split(|&b| b == b'\n').enumerate() {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            if line.is_empty() {
                continue;
            }

            let parsed = std::str::from_utf8(line)
                .map_err(|_| LeaderboardError::Encoding)
                .and_then(PlayerScore::parse);

            match parsed {
                Ok(score) => scores.push(score),
                Err(err) => warn!(
                    "Skipping line {} of {}: {err}",
                    number + 1,
                    self.path.display()
                ),
            }
        }

        Ok(scores)
    }

    /// Sort descending by score, keep the top entries and overwrite the file.
    /// Equal scores keep their relative order.
    pub fn save(&self, mut scores: Vec<PlayerScore>) -> Result<(), LeaderboardError> {
        scores.sort_by(|a, b| b.score.cmp(&a.score));
        scores.truncate(self.capacity);

        let write_err = |source: io::Error| LeaderboardError::Write {
            path: self.path.clone(),
            source,
        };

        let file = fs::File::create(&self.path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        for entry in scores.iter() {
            writeln!(writer, "{},{}", entry.username, entry.score).map_err(write_err)?;
        }
        writer.flush().map_err(write_err)?;

        Ok(())
    }

    /// Insert a score. An unreadable file is left untouched and reported.
    pub fn add_score(&self, username: &str, score: i32) -> Result<(), LeaderboardError> {
        let mut scores = self.try_load()?;
        scores.push(PlayerScore::new(username, score));
        self.save(scores)?;

        info!("Recorded {score} points for {username}");
        Ok(())
    }

    /// Remove the backing file. Clearing an absent board is not an error.
    pub fn clear(&self) -> Result<(), LeaderboardError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Cleared leaderboard {}", self.path.display());
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(LeaderboardError::Delete {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

    /// A board backed by a fresh path in the system temp dir.
    fn scratch_board(capacity: usize) -> Leaderboard {
        let n = NEXT_FILE.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "campus-guesser-{}-{n}.txt",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        Leaderboard::new(path, capacity)
    }

    #[test]
    fn missing_file_is_empty() {
        let board = scratch_board(10);
        assert!(board.load().is_empty());
    }

    #[test]
    fn clear_missing_file_is_ok() {
        let board = scratch_board(10);
        board.clear().unwrap();
        board.clear().unwrap();
    }

    #[test]
    fn clear_removes_entries() {
        let board = scratch_board(10);
        board.add_score("ali", 900).unwrap();
        assert_eq!(board.load().len(), 1);

        board.clear().unwrap();
        assert!(!board.path().exists());
        assert!(board.load().is_empty());
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let board = scratch_board(10);
        fs::write(board.path(), "alice,1200\nbob,lots\n\ncarol,800\nno score\n").unwrap();

        assert_eq!(
            board.load(),
            vec![PlayerScore::new("alice", 1200), PlayerScore::new("carol", 800)]
        );
        board.clear().unwrap();
    }

    #[test]
    fn non_utf8_line_only_skips_itself() {
        let board = scratch_board(10);
        fs::write(board.path(), b"alice,1200\n\xff\xfe,5\r\ncarol,800\n").unwrap();

        assert_eq!(
            board.load(),
            vec![PlayerScore::new("alice", 1200), PlayerScore::new("carol", 800)]
        );

        board.add_score("dave", 10).unwrap();
        assert_eq!(
            fs::read_to_string(board.path()).unwrap(),
            "alice,1200\ncarol,800\ndave,10\n"
        );
        board.clear().unwrap();
    }

    #[test]
    fn crlf_lines_are_accepted() {
        let board = scratch_board(10);
        fs::write(board.path(), "alice,1200\r\nbob,900\r\n").unwrap();

        assert_eq!(
            board.load(),
            vec![PlayerScore::new("alice", 1200), PlayerScore::new("bob", 900)]
        );
        board.clear().unwrap();
    }

    #[test]
    fn unreadable_board_degrades_to_empty_and_errors_on_write() {
        let board = scratch_board(10);
        fs::create_dir(board.path()).unwrap();

        assert!(board.load().is_empty());
        assert!(matches!(
            board.add_score("eve", 100),
            Err(LeaderboardError::Read { .. })
        ));
        assert!(matches!(board.clear(), Err(LeaderboardError::Delete { .. })));
        assert!(board.path().is_dir());

        fs::remove_dir(board.path()).unwrap();
    }

    #[test]
    fn parse_rejects_extra_fields() {
        assert!(matches!(
            PlayerScore::parse("a,b,3"),
            Err(LeaderboardError::FieldCount { fields: 3 })
        ));
        assert!(matches!(
            PlayerScore::parse("a, 3"),
            Err(LeaderboardError::Score(_))
        ));
        assert_eq!(PlayerScore::parse("a,-3").unwrap(), PlayerScore::new("a", -3));
    }

    #[test]
    fn save_sorts_stably_and_truncates() {
        let board = scratch_board(3);
        let entries = vec![
            PlayerScore::new("a", 100),
            PlayerScore::new("b", 300),
            PlayerScore::new("c", 100),
            PlayerScore::new("d", 300),
            PlayerScore::new("e", 50),
        ];
        board.save(entries).unwrap();

        assert_eq!(
            board.load(),
            vec![
                PlayerScore::new("b", 300),
                PlayerScore::new("d", 300),
                PlayerScore::new("a", 100),
            ]
        );
        assert_eq!(fs::read_to_string(board.path()).unwrap(), "b,300\nd,300\na,100\n");
        board.clear().unwrap();
    }

    #[test]
    fn eleventh_score_drops_the_lowest() {
        let board = scratch_board(10);
        for i in 0..10 {
            board.add_score(&format!("p{i}"), 100 + i * 10).unwrap();
        }
        assert_eq!(board.load().len(), 10);

        board.add_score("late", 150).unwrap();
        let scores = board.load();

        assert_eq!(scores.len(), 10);
        assert!(!scores.iter().any(|s| s.username == "p0"));
        assert!(scores.iter().any(|s| s.username == "late"));
        assert_eq!(scores[0], PlayerScore::new("p9", 190));
        board.clear().unwrap();
    }

    #[test]
    fn low_score_does_not_enter_full_board() {
        let board = scratch_board(2);
        board.add_score("x", 500).unwrap();
        board.add_score("y", 400).unwrap();
        board.add_score("z", 10).unwrap();

        assert_eq!(
            board.load(),
            vec![PlayerScore::new("x", 500), PlayerScore::new("y", 400)]
        );
        board.clear().unwrap();
    }
}
