//! Newest-artifact discovery across the tester's agent drop directories.
//!
//! Several backtest agents may each leave a results file behind; only
//! the most recently modified one belongs to the run that just
//! finished. Read-only: nothing under the base directory is touched.

use glob::glob;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("no results artifact matched any pattern (tried: {})", patterns.join(", "))]
    NotFound { patterns: Vec<String> },

    #[error("invalid search pattern '{pattern}': {source}")]
    BadPattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("failed to stat candidate {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Returns the most recently modified file matching any pattern under
/// `base_dir`.
///
/// Patterns are glob expressions relative to the base directory, tried
/// in declared order. On a modification-time tie the first match in
/// enumeration order wins, so the result is deterministic for a given
/// directory listing.
pub fn find_latest_artifact(base_dir: &Path, patterns: &[String]) -> Result<PathBuf, LocateError> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for pattern in patterns {
        let rooted = base_dir.join(pattern).to_string_lossy().into_owned();
        let paths = glob(&rooted).map_err(|source| LocateError::BadPattern {
            pattern: pattern.clone(),
            source,
        })?;

        for path in paths.flatten() {
            if !path.is_file() {
                continue;
            }
            let modified = path
                .metadata()
                .and_then(|meta| meta.modified())
                .map_err(|source| LocateError::Io {
                    path: path.clone(),
                    source,
                })?;

            let is_newer = match &newest {
                Some((best, _)) => modified > *best,
                None => true,
            };
            if is_newer {
                newest = Some((modified, path));
            }
        }
    }

    newest
        .map(|(_, path)| path)
        .ok_or_else(|| LocateError::NotFound {
            patterns: patterns.to_vec(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::TempDir;

    fn write_with_mtime(dir: &Path, name: &str, age_secs: u64) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        let mut file = File::create(&path).unwrap();
        writeln!(file, "{{}}").unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(age_secs))
            .unwrap();
        path
    }

    #[test]
    fn picks_the_newest_match_across_patterns() {
        let dir = TempDir::new().unwrap();
        write_with_mtime(dir.path(), "Agent-1/Files/backtest_a.json", 300);
        let newest = write_with_mtime(dir.path(), "Agent-2/Files/backtest_b.json", 10);
        write_with_mtime(dir.path(), "Agent-3/Files/backtest_c.json", 100);

        let found = find_latest_artifact(
            dir.path(),
            &["Agent-*/Files/backtest_*.json".to_string()],
        )
        .unwrap();
        assert_eq!(found, newest);
    }

    #[test]
    fn not_found_reports_the_patterns_tried() {
        let dir = TempDir::new().unwrap();
        let err = find_latest_artifact(
            dir.path(),
            &["a/*.json".to_string(), "b/*.json".to_string()],
        )
        .unwrap_err();
        match err {
            LocateError::NotFound { patterns } => {
                assert_eq!(patterns, vec!["a/*.json", "b/*.json"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn directories_matching_the_pattern_are_ignored() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("backtest_dir.json")).unwrap();
        let only_file = write_with_mtime(dir.path(), "backtest_real.json", 60);

        let found =
            find_latest_artifact(dir.path(), &["backtest_*.json".to_string()]).unwrap();
        assert_eq!(found, only_file);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = find_latest_artifact(dir.path(), &["[".to_string()]).unwrap_err();
        assert!(matches!(err, LocateError::BadPattern { .. }));
    }
}
