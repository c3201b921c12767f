//! Lock file guarding read-modify-write cycles on a JSON document.
//!
//! The lock is a sibling file `<document>.lock` created with `create_new`
//! and holding the owner's pid. Locks left behind by dead processes are
//! removed. The guard deletes the file on drop.

use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::StoreError;

const LOCK_RETRY_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug)]
pub struct DocumentLock {
    path: PathBuf,
}

impl Drop for DocumentLock {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

impl DocumentLock {
    /// Lock file path for a document.
    #[must_use]
    pub fn path_for(document: &Path) -> PathBuf {
        let mut name = document.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Block until the lock for `document` is acquired or `timeout` elapses.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LockTimeout`] if the lock is still held by a
    /// live process after `timeout`, and [`StoreError::Write`] at once if the
    /// lock file cannot be created for any other reason (missing directory,
    /// permissions).
    pub fn acquire(document: &Path, timeout: Duration) -> Result<Self, StoreError> {
        let lock_path = Self::path_for(document);
        let started = Instant::now();

        loop {
            match try_acquire(&lock_path) {
                Ok(guard) => return Ok(guard),
                Err(LockState::Failed(err)) => return Err(StoreError::Write(err)),
                Err(LockState::Stale) => {
                    tracing::warn!(path = %lock_path.display(), "removing stale lock file");
                    let _ = std::fs::remove_file(&lock_path);
                }
                Err(state) => {
                    if started.elapsed() >= timeout {
                        tracing::warn!(path = %lock_path.display(), ?state, "lock wait timed out");
                        return Err(StoreError::LockTimeout { path: lock_path });
                    }
                    std::thread::sleep(LOCK_RETRY_DELAY);
                }
            }
        }
    }
}

#[derive(Debug)]
enum LockState {
    HeldBy(u32),
    Stale,
    Unknown,
    Failed(std::io::Error),
}

fn try_acquire(lock_path: &Path) -> Result<DocumentLock, LockState> {
    match OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(lock_path)
    {
        Ok(mut file) => {
            let _ = writeln!(file, "{}", std::process::id());
            Ok(DocumentLock {
                path: lock_path.to_path_buf(),
            })
        }
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
            let mut pid_buf = String::new();
            if OpenOptions::new()
                .read(true)
                .open(lock_path)
                .and_then(|mut file| file.read_to_string(&mut pid_buf))
                .is_err()
            {
                return Err(LockState::Unknown);
            }

            // An empty file means the owner is between create and write.
            match pid_buf.trim().parse::<u32>().ok() {
                Some(pid) if is_process_running(pid) => Err(LockState::HeldBy(pid)),
                Some(_) => Err(LockState::Stale),
                None => Err(LockState::Unknown),
            }
        }
        Err(err) => Err(LockState::Failed(err)),
    }
}

fn is_process_running(pid: u32) -> bool {
    if pid == std::process::id() {
        return true;
    }
    std::process::Command::new("kill")
        .arg("-0")
        .arg(pid.to_string())
        .status()
        .is_ok_and(|status| status.success())
}
