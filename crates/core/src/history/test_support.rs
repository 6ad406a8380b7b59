//! Stand-in git executables for exercising the process runner.

use std::path::{Path, PathBuf};

/// Write an executable `sh` script named `git` into `dir`.
///
/// `--version` always succeeds; every other invocation runs `body`.
pub(crate) fn fake_git(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("git");
    let script = format!(
        "#!/bin/sh\nif [ \"$1\" = \"--version\" ]; then\n  echo 'git version 2.0.0'\n  exit 0\nfi\n{}\n",
        body
    );
    std::fs::write(&path, script).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
    path
}
