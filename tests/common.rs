// tests/common.rs

#![allow(dead_code)] // Each integration test uses a different subset.

use git2::{IndexTime, Repository, Signature};
use nice_clone::cancellation::CancellationToken;
use nice_clone::config::Config;
use nice_clone::errors::GitError;
use nice_clone::git::GitClient;
use nice_clone::progress::ProgressReporter;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tempfile::{tempdir, TempDir};

// Helper function to get the binary command
pub fn nice_clone_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("nice-clone"));
    for var in [
        "NICE_REPOS_DIR",
        "CLONE_TIMEOUT",
        "PORT",
        "NICE_CLONE_HOST",
        "LOG_LEVEL",
        "LOG_FORMAT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Config rooted at `base_dir` with a custom timeout.
pub fn test_config(base_dir: &Path, clone_timeout: Duration) -> Config {
    Config {
        base_dir: base_dir.to_path_buf(),
        clone_timeout,
        bind_addr: "127.0.0.1:0".parse().unwrap(),
    }
}

/// Creates a bare git repo with one commit, acting as a "remote".
pub fn setup_remote_repo() -> Result<(TempDir, String), Box<dyn std::error::Error>> {
    let remote_dir = tempdir()?;
    let repo = Repository::init_bare(remote_dir.path())?;
    let mut index = repo.index()?;
    let content = "hello";
    let oid = repo.blob(content.as_bytes())?;
    let entry = git2::IndexEntry {
        ctime: IndexTime::new(0, 0),
        mtime: IndexTime::new(0, 0),
        dev: 0,
        ino: 0,
        mode: 0o100644,
        uid: 0,
        gid: 0,
        file_size: content.len() as u32,
        id: oid,
        flags: 0,
        flags_extended: 0,
        path: b"README.md".to_vec(),
    };
    index.add(&entry)?;
    let tree_id = index.write_tree()?;
    let tree = repo.find_tree(tree_id)?;
    let sig = Signature::now("Test", "test@example.com")?;
    repo.commit(Some("HEAD"), &sig, &sig, "Initial", &tree, &[])?;

    let url = file_url(remote_dir.path().to_path_buf());
    Ok((remote_dir, url))
}

/// `file://` URL for a local path.
pub fn file_url(path: PathBuf) -> String {
    let path = path.to_str().unwrap().trim_end_matches(&['/', '\\'][..]).to_string();
    if cfg!(windows) {
        format!("file:///{}", path.replace('\\', "/"))
    } else {
        format!("file://{}", path)
    }
}

/// Records every call and materializes the target like a real clone would.
#[derive(Default)]
pub struct RecordingClient {
    pub calls: Mutex<Vec<(String, PathBuf)>>,
    pub delay: Duration,
}

impl RecordingClient {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            delay,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl GitClient for RecordingClient {
    fn clone_repo(
        &self,
        url: &str,
        target: &Path,
        _token: &CancellationToken,
        _progress: Option<Arc<dyn ProgressReporter>>,
    ) -> Result<(), GitError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), target.to_path_buf()));
        std::thread::sleep(self.delay);
        std::fs::create_dir_all(target.join(".git")).map_err(anyhow::Error::from)?;
        Ok(())
    }
}

/// Always fails with a multi-line message that mentions a local path.
pub struct FailingClient;

pub const FAILING_CLIENT_SECRET: &str = "/home/builder/.ssh/id_rsa";

impl GitClient for FailingClient {
    fn clone_repo(
        &self,
        _url: &str,
        _target: &Path,
        _token: &CancellationToken,
        _progress: Option<Arc<dyn ProgressReporter>>,
    ) -> Result<(), GitError> {
        Err(GitError::Generic(anyhow::anyhow!(
            "remote authentication required\nkey tried: {}",
            FAILING_CLIENT_SECRET
        )))
    }
}

/// Blocks until its token is cancelled, then reports the cancellation.
#[derive(Default)]
pub struct HangingClient {
    pub saw_cancel: Mutex<bool>,
}

impl GitClient for HangingClient {
    fn clone_repo(
        &self,
        _url: &str,
        _target: &Path,
        token: &CancellationToken,
        _progress: Option<Arc<dyn ProgressReporter>>,
    ) -> Result<(), GitError> {
        let started = Instant::now();
        while !token.is_cancelled() {
            if started.elapsed() > Duration::from_secs(30) {
                return Ok(());
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        *self.saw_cancel.lock().unwrap() = true;
        Err(GitError::Cancelled)
    }
}

/// Works for `steps` x `step` while recording activity after every step, the
/// way a slow but healthy transfer does.
pub struct SteadyClient {
    pub steps: u32,
    pub step: Duration,
}

impl GitClient for SteadyClient {
    fn clone_repo(
        &self,
        _url: &str,
        target: &Path,
        token: &CancellationToken,
        _progress: Option<Arc<dyn ProgressReporter>>,
    ) -> Result<(), GitError> {
        for _ in 0..self.steps {
            if token.is_cancelled() {
                return Err(GitError::Cancelled);
            }
            std::thread::sleep(self.step);
            token.record_activity();
        }
        std::fs::create_dir_all(target.join(".git")).map_err(anyhow::Error::from)?;
        Ok(())
    }
}

/// Panics on every call.
pub struct PanickingClient;

impl GitClient for PanickingClient {
    fn clone_repo(
        &self,
        _url: &str,
        _target: &Path,
        _token: &CancellationToken,
        _progress: Option<Arc<dyn ProgressReporter>>,
    ) -> Result<(), GitError> {
        panic!("client exploded at /src/secret/path.rs");
    }
}
