//! Lifecycle gate: an exclusive `flock` on a lock file.
//!
//! The lock is per open file description, so it holds across agent processes
//! (the CLI runs once per request) and within one process alike. The kernel
//! drops it when the guard is dropped or the process exits.

use std::fs::{File, OpenOptions};
use std::path::PathBuf;

use nix::errno::Errno;
use nix::fcntl::{Flock, FlockArg};

use crate::application::ports::LifecycleGate;
use crate::domain::LifecycleError;

pub struct FlockGate {
    path: PathBuf,
}

impl FlockGate {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn unavailable(&self, reason: impl ToString) -> LifecycleError {
        LifecycleError::LockUnavailable {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl LifecycleGate for FlockGate {
    type Guard = Flock<File>;

    fn try_acquire(&self) -> Result<Self::Guard, LifecycleError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.unavailable(e))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.path)
            .map_err(|e| self.unavailable(e))?;

        Flock::lock(file, FlockArg::LockExclusiveNonblock).map_err(|(_, errno)| {
            if errno == Errno::EWOULDBLOCK {
                LifecycleError::Busy
            } else {
                self.unavailable(errno)
            }
        })
    }
}
