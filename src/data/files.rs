//! File-backed case content and the investigation log
//!
//! Every reader here degrades instead of failing: an unreadable file is
//! logged to the diagnostic output and yields an empty value, so the
//! player is never interrupted by an I/O dialog.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::data::Clue;

/// Loads the case narrative: every line of the file, re-joined with
/// newlines. Returns an empty string if the file cannot be read.
pub fn load_case(path: &Path) -> String {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            tracing::warn!("could not open case file {}: {err}", path.display());
            return String::new();
        }
    };

    let mut story = String::new();
    for line in BufReader::new(file).lines() {
        match line {
            Ok(line) => {
                story.push_str(&line);
                story.push('\n');
            }
            Err(err) => {
                tracing::warn!("error reading case file {}: {err}", path.display());
                break;
            }
        }
    }
    story
}

/// Loads the clue sheet, one clue per line.
///
/// Each line is parsed independently and best-effort; a malformed line
/// becomes a partial clue rather than aborting the load. An unreadable
/// file yields an empty list.
pub fn load_clues(path: &Path) -> Vec<Clue> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            tracing::warn!("could not open clues file {}: {err}", path.display());
            return Vec::new();
        }
    };

    let mut clues = Vec::new();
    for line in BufReader::new(file).lines() {
        match line {
            Ok(line) => clues.push(Clue::from_line(&line)),
            Err(err) => {
                tracing::warn!("error reading clues file {}: {err}", path.display());
                break;
            }
        }
    }
    clues
}

/// Appends one caller-formatted entry to the investigation log.
///
/// The log is append-only plain text, one entry per line. Failures are
/// logged and swallowed; losing a log line never interrupts play.
pub fn append_investigation_log(path: &Path, entry: &str) {
    let result = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut file| writeln!(file, "{entry}"));

    if let Err(err) = result {
        tracing::warn!(
            "could not append to investigation log {}: {err}",
            path.display()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn load_case_joins_lines_with_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("case.txt");
        fs::write(&path, "It was a quiet morning.\nThen the scones vanished.").unwrap();

        let story = load_case(&path);
        assert_eq!(story, "It was a quiet morning.\nThen the scones vanished.\n");
    }

    #[test]
    fn load_case_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let story = load_case(&dir.path().join("nowhere.txt"));
        assert_eq!(story, "");
    }

    #[test]
    fn load_clues_parses_each_line_best_effort() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clues.txt");
        fs::write(
            &path,
            "Key found|Look under the mat|Sipho\nScones missing\nFlour prints|Size seven|Thando|extra",
        )
        .unwrap();

        let clues = load_clues(&path);
        assert_eq!(clues.len(), 3);
        assert_eq!(clues[0].related_suspect, "Sipho");
        assert_eq!(clues[1].hint, "");
        assert_eq!(clues[2].hint, "Size seven");
        assert_eq!(clues[2].related_suspect, "Thando");
    }

    #[test]
    fn load_clues_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_clues(&dir.path().join("nowhere.txt")).is_empty());
    }

    #[test]
    fn append_investigation_log_appends_one_line_per_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");

        append_investigation_log(&path, "[2026-08-07 10:00:00] Clue discovered: Key found");
        append_investigation_log(&path, "[2026-08-07 10:00:01] Accusation made on: Thando");

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("Clue discovered: Key found"));
        assert!(lines[1].ends_with("Accusation made on: Thando"));
    }
}
