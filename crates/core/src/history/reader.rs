//! Asynchronous `git shortlog` runner.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

use crate::config::HistoryConfig;
use crate::errors::HistoryError;

/// Reads one line per distinct author from `git shortlog`.
#[derive(Debug, Clone)]
pub struct HistoryReader {
    git_binary: String,
    repo_path: PathBuf,
    revision: String,
    timeout: Duration,
}

impl HistoryReader {
    pub fn new(config: &HistoryConfig) -> Self {
        let reader = Self {
            git_binary: config.git_binary.clone(),
            repo_path: config.repo_path.clone(),
            revision: config.revision.clone(),
            timeout: config.timeout(),
        };
        debug!(
            git = %reader.git_binary,
            repo = %reader.repo_path.display(),
            revision = %reader.revision,
            "created HistoryReader"
        );
        reader
    }

    pub fn revision(&self) -> &str {
        &self.revision
    }

    /// Probe whether the git binary can be executed at all.
    #[instrument(skip(self), fields(git = %self.git_binary))]
    pub async fn is_available(&self) -> bool {
        let mut cmd = Command::new(&self.git_binary);
        cmd.arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        match tokio::time::timeout(self.timeout, cmd.status()).await {
            Ok(Ok(status)) => status.success(),
            Ok(Err(e)) => {
                debug!(error = %e, "git probe failed to start");
                false
            }
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "git probe timed out");
                false
            }
        }
    }

    /// Run `git shortlog --summary --email <revision>` and return its lines.
    ///
    /// Each line has the form `<count>\t<Name> <<email>>`. Lines are decoded
    /// lazily as the returned iterator is consumed.
    #[instrument(skip(self), fields(repo = %self.repo_path.display(), revision = %self.revision))]
    pub async fn read_lines(&self) -> Result<ShortlogLines, HistoryError> {
        let stdout = self
            .run_git(&["shortlog", "--summary", "--email", &self.revision])
            .await?;
        info!(bytes = stdout.len(), "collected shortlog output");
        Ok(ShortlogLines::new(stdout))
    }

    async fn run_git(&self, args: &[&str]) -> Result<Vec<u8>, HistoryError> {
        let mut cmd = Command::new(&self.git_binary);
        cmd.current_dir(&self.repo_path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(cmd = ?format!("{} {}", self.git_binary, args.join(" ")), "running git command");
        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| HistoryError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    HistoryError::BinaryNotFound(self.git_binary.clone())
                } else {
                    HistoryError::Io(e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let exit_code = output.status.code().unwrap_or(-1);
            warn!(exit_code, %stderr, "git command failed");
            return Err(HistoryError::CommandFailed { exit_code, stderr });
        }
        Ok(output.stdout)
    }
}

/// Lazily decoded lines of captured shortlog output.
///
/// Blank lines are skipped. A line that is not valid UTF-8 yields
/// [`HistoryError::Decode`].
#[derive(Debug)]
pub struct ShortlogLines {
    buf: Vec<u8>,
    pos: usize,
    line: usize,
}

impl ShortlogLines {
    pub fn new(buf: Vec<u8>) -> Self {
        Self { buf, pos: 0, line: 0 }
    }
}

impl Iterator for ShortlogLines {
    type Item = Result<String, HistoryError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.buf.len() {
            let rest = &self.buf[self.pos..];
            let (raw, advance) = match rest.iter().position(|&b| b == b'\n') {
                Some(idx) => (&rest[..idx], idx + 1),
                None => (rest, rest.len()),
            };
            self.pos += advance;
            self.line += 1;

            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            if raw.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let line = self.line;
            return Some(
                String::from_utf8(raw.to_vec()).map_err(|source| HistoryError::Decode { line, source }),
            );
        }
        None
    }
}

/// Split a shortlog line into its commit count and the identity after it.
///
/// The count is `None` when the line does not start with digits followed by
/// whitespace; the identity is then the whole trimmed line.
pub fn split_count(line: &str) -> (Option<u64>, &str) {
    let trimmed = line.trim();
    let digits = trimmed.len() - trimmed.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let rest = &trimmed[digits..];
    if digits > 0 && rest.starts_with(char::is_whitespace) {
        (trimmed[..digits].parse().ok(), rest.trim_start())
    } else {
        (None, trimmed)
    }
}

/// Remove the leading commit count and surrounding whitespace from a
/// shortlog line, leaving the bare identity.
///
/// A line without a count is only trimmed, and logged since git never
/// emits one.
pub fn strip_count(line: &str) -> &str {
    let (count, identity) = split_count(line);
    if count.is_none() {
        warn!(line = identity, "shortlog line has no commit count");
    }
    identity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::test_support::fake_git;

    fn collect(bytes: &[u8]) -> Vec<Result<String, HistoryError>> {
        ShortlogLines::new(bytes.to_vec()).collect()
    }

    #[test]
    fn test_strip_count() {
        assert_eq!(
            strip_count("     3\tAda Lovelace <ada@example.com>"),
            "Ada Lovelace <ada@example.com>"
        );
        assert_eq!(strip_count("12 Bob <bob@example.com>  "), "Bob <bob@example.com>");
        assert_eq!(strip_count("Bare Name"), "Bare Name");
        assert_eq!(strip_count("  7\t2pac <tupac@example.com>"), "2pac <tupac@example.com>");
        assert_eq!(strip_count("2pac <tupac@example.com>"), "2pac <tupac@example.com>");
    }

    #[test]
    fn test_lines_skip_blanks_and_carriage_returns() {
        let lines: Vec<String> = collect(b"  3\tAda <a@x>\r\n\n  1\tBob <b@x>")
            .into_iter()
            .map(Result::unwrap)
            .collect();
        assert_eq!(lines, vec!["  3\tAda <a@x>", "  1\tBob <b@x>"]);
    }

    #[test]
    fn test_lines_empty_output() {
        assert!(collect(b"").is_empty());
        assert!(collect(b"\n\n").is_empty());
    }

    #[test]
    fn test_lines_decode_error_reports_line() {
        let out = collect(b"  1\tAda <a@x>\n  2\t\xff\xfe <bad@x>\n");
        assert!(out[0].is_ok());
        match &out[1] {
            Err(HistoryError::Decode { line, .. }) => assert_eq!(*line, 2),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_lines_non_ascii_names() {
        let out = collect("  4\tJosé Müller <jose@example.com>\n".as_bytes());
        assert_eq!(out[0].as_ref().unwrap(), "  4\tJosé Müller <jose@example.com>");
    }

    #[test]
    fn test_split_count() {
        assert_eq!(
            split_count("     3\tAda Lovelace <ada@example.com>"),
            (Some(3), "Ada Lovelace <ada@example.com>")
        );
        assert_eq!(split_count("Bare Name"), (None, "Bare Name"));
        assert_eq!(split_count("2pac <tupac@example.com>"), (None, "2pac <tupac@example.com>"));
        assert_eq!(split_count("42"), (None, "42"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_git_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let git = fake_git(dir.path(), "exec sleep 5");
        let config = HistoryConfig {
            git_binary: git.display().to_string(),
            repo_path: dir.path().to_path_buf(),
            timeout_secs: 1,
            ..Default::default()
        };
        let reader = HistoryReader::new(&config);
        assert!(reader.is_available().await);

        let started = std::time::Instant::now();
        let err = reader.read_lines().await.unwrap_err();
        assert!(matches!(err, HistoryError::Timeout(1)), "got {:?}", err);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_git_reports_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let git = fake_git(dir.path(), "echo 'fatal: bad revision' >&2\nexit 128");
        let config = HistoryConfig {
            git_binary: git.display().to_string(),
            repo_path: dir.path().to_path_buf(),
            ..Default::default()
        };
        let err = HistoryReader::new(&config).read_lines().await.unwrap_err();
        match err {
            HistoryError::CommandFailed { exit_code, stderr } => {
                assert_eq!(exit_code, 128);
                assert_eq!(stderr, "fatal: bad revision");
            }
            other => panic!("expected CommandFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_binary_is_unavailable() {
        let config = HistoryConfig {
            git_binary: "definitely-not-a-real-git-binary".into(),
            ..Default::default()
        };
        let reader = HistoryReader::new(&config);
        assert!(!reader.is_available().await);

        let err = reader.read_lines().await.unwrap_err();
        assert!(err.is_unavailable());
    }
}
