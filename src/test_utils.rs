use crate::claude::ScanRoots;
use crate::config::CLAUDE_DIR;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

static PROCESS_STATE: Mutex<()> = Mutex::new(());

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Temporary home and project directories, each able to hold a `.claude` folder.
pub struct ScopeFixture {
    _temp: TempDir,
    pub home: PathBuf,
    pub project: PathBuf,
}

impl ScopeFixture {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let home = temp.path().join("home");
        let project = temp.path().join("project");
        fs::create_dir_all(&home).expect("mkdir home");
        fs::create_dir_all(&project).expect("mkdir project");
        Self {
            _temp: temp,
            home,
            project,
        }
    }

    pub fn roots(&self) -> ScanRoots {
        ScanRoots::new(&self.home, &self.project)
    }

    pub fn write_global(&self, relative: &str, content: &str) -> PathBuf {
        write_file(&self.home.join(CLAUDE_DIR), relative, content)
    }

    pub fn write_project(&self, relative: &str, content: &str) -> PathBuf {
        write_file(&self.project.join(CLAUDE_DIR), relative, content)
    }
}

/// Exclusive access to the environment and current directory for one test.
/// Every variable touched and the starting directory are restored on drop.
#[must_use]
pub struct ProcessGuard {
    _lock: MutexGuard<'static, ()>,
    cwd: PathBuf,
    saved: Vec<(&'static str, Option<OsString>)>,
}

impl ProcessGuard {
    pub fn acquire() -> Self {
        let lock = PROCESS_STATE.lock().unwrap_or_else(|e| e.into_inner());
        Self {
            _lock: lock,
            cwd: env::current_dir().expect("current dir"),
            saved: Vec::new(),
        }
    }

    pub fn set_env(&mut self, key: &'static str, value: impl AsRef<std::ffi::OsStr>) {
        self.save(key);
        unsafe { env::set_var(key, value) };
    }

    pub fn unset_env(&mut self, key: &'static str) {
        self.save(key);
        unsafe { env::remove_var(key) };
    }

    pub fn chdir(&mut self, path: &Path) {
        env::set_current_dir(path).expect("chdir");
    }

    fn save(&mut self, key: &'static str) {
        if !self.saved.iter().any(|(saved, _)| *saved == key) {
            self.saved.push((key, env::var_os(key)));
        }
    }
}

impl Drop for ProcessGuard {
    fn drop(&mut self) {
        for (key, previous) in self.saved.drain(..).rev() {
            match previous {
                Some(value) => unsafe { env::set_var(key, value) },
                None => unsafe { env::remove_var(key) },
            }
        }
        let _ = env::set_current_dir(&self.cwd);
    }
}
