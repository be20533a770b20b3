//! Single-instance lock for the daemon

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process;

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::{Pid, Uid};

/// Errors taking the lock
#[derive(Debug, thiserror::Error)]
pub enum PidFileError {
    #[error("Another daemon is already running (PID: {0})")]
    AlreadyRunning(u32),

    #[error("Failed to write PID file {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },
}

/// Per-user lock path, in the runtime dir when the session has one
pub fn default_pid_path() -> PathBuf {
    match dirs::runtime_dir() {
        Some(dir) => dir.join("cliptrail.pid"),
        None => std::env::temp_dir().join(format!("cliptrail-{}.pid", Uid::current())),
    }
}

/// Held while the daemon runs. The file is removed on drop if it still
/// names this process.
#[derive(Debug)]
pub struct PidLock {
    path: PathBuf,
}

impl PidLock {
    /// Take the lock, clearing a file left by a process that has exited
    pub fn acquire(path: impl Into<PathBuf>) -> Result<Self, PidFileError> {
        let path = path.into();

        // Two attempts: the second follows removal of a stale file
        for _ in 0..2 {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    write!(file, "{}", process::id()).map_err(|e| write_failed(&path, e))?;
                    return Ok(Self { path });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => match owner(&path) {
                    Some(pid) if is_alive(pid) => return Err(PidFileError::AlreadyRunning(pid)),
                    _ => {
                        let _ = fs::remove_file(&path);
                    }
                },
                Err(e) => return Err(write_failed(&path, e)),
            }
        }
        Err(write_failed(
            &path,
            std::io::Error::new(ErrorKind::AlreadyExists, "lock file keeps reappearing"),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PidLock {
    fn drop(&mut self) {
        if owner(&self.path) == Some(process::id()) {
            let _ = fs::remove_file(&self.path);
        }
    }
}

fn write_failed(path: &Path, e: std::io::Error) -> PidFileError {
    PidFileError::WriteFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn owner(path: &Path) -> Option<u32> {
    fs::read_to_string(path).ok()?.trim().parse().ok()
}

/// Probe with the null signal. EPERM means the process exists under
/// another user.
fn is_alive(pid: u32) -> bool {
    if pid == process::id() {
        return false;
    }
    let Ok(raw) = i32::try_from(pid) else {
        return false;
    };
    match kill(Pid::from_raw(raw), None::<Signal>) {
        Ok(()) => true,
        Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}
