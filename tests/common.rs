use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Sample documents shared by the integration tests
#[allow(dead_code)]
pub mod test_content {
    pub const AGENT_FOO: &str = "---\nname: Foo\ndescription: Does foo\ntools: Read, Grep\nmodel: sonnet\n---\nYou are foo.\n";

    pub const SKILL_PDF: &str =
        "---\nname: pdf\ndescription: Work with PDFs\nallowed-tools:\n  - Read\n  - Bash\n---\nBody\n";

    pub const RULE_STYLE: &str = "---\npaths:\n  - \"src/**/*.rs\"\n---\nUse rustfmt.\n";

    pub const GLOBAL_SETTINGS: &str = r#"{
  "model": "opus",
  "env": { "API_TOKEN": "sk-abcdef123456", "DEBUG": "1" },
  "permissions": { "allow": ["Bash(ls)"], "deny": ["Read(.env)"] },
  "enabledPlugins": { "fmt@tools": true, "old@tools": false }
}"#;
}

pub fn ccsetting_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ccsetting"))
}

/// Isolated home and project directories for running the binary.
pub struct TestEnvironment {
    // TempDir is kept to ensure cleanup happens when TestEnvironment is dropped
    #[allow(dead_code)]
    temp_dir: TempDir,
    pub home: PathBuf,
    pub project: PathBuf,
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TestEnvironment {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let home = temp_dir.path().join("home");
        let project = temp_dir.path().join("project");
        fs::create_dir_all(&home).expect("mkdir home");
        fs::create_dir_all(&project).expect("mkdir project");
        Self {
            temp_dir,
            home,
            project,
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write_global(&self, relative: &str, content: &str) -> PathBuf {
        write_file(&self.home.join(".claude"), relative, content)
    }

    pub fn write_project(&self, relative: &str, content: &str) -> PathBuf {
        write_file(&self.project.join(".claude"), relative, content)
    }

    /// Run the binary from the project directory with the home pinned to the fixture.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(ccsetting_bin())
            .args(["--color", "never"])
            .args(args)
            .current_dir(&self.project)
            .env("CCSETTING_HOME", &self.home)
            .env("CCSETTING_LANG", "en")
            .env_remove("RUST_LOG")
            .env_remove("NO_COLOR")
            .output()
            .expect("run ccsetting")
    }
}

pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(&path, content).expect("Failed to write test file");
    path
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
