//! Shared helpers: a stand-in `api-linter` executable and a scratch workspace.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A workspace directory (bounded by `.git` so settings discovery stays inside it)
/// plus a separate directory holding the fake linter and its call log.
pub struct Fixture {
    _workspace: TempDir,
    _tool: TempDir,
    pub root: PathBuf,
    pub tool_dir: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let workspace = tempfile::tempdir().unwrap();
        let tool = tempfile::tempdir().unwrap();
        let root = workspace.path().canonicalize().unwrap();
        let tool_dir = tool.path().canonicalize().unwrap();
        fs::create_dir(root.join(".git")).unwrap();
        Self {
            _workspace: workspace,
            _tool: tool,
            root,
            tool_dir,
        }
    }

    /// Create a file (and its parent directories) inside the workspace.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Install a fake linter. `-h` exits 2 the way the real tool does; any other call logs its
    /// working directory and arguments, then runs `body`.
    #[cfg(unix)]
    pub fn fake_linter(&self, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = self.tool_dir.join("api-linter");
        let content = format!(
            "#!/bin/sh\n\
             if [ \"$1\" = \"-h\" ]; then\n  echo 'Usage of api-linter:' >&2\n  exit 2\nfi\n\
             pwd -P > '{log}/cwd.txt'\n\
             printf '%s\\n' \"$@\" > '{log}/args.txt'\n\
             {body}\n",
            log = self.tool_dir.display(),
        );
        fs::write(&script, content).unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    /// Arguments of the last lint call, one per line, or `None` if the linter never ran.
    pub fn logged_args(&self) -> Option<String> {
        fs::read_to_string(self.tool_dir.join("args.txt")).ok()
    }

    pub fn logged_cwd(&self) -> Option<PathBuf> {
        fs::read_to_string(self.tool_dir.join("cwd.txt"))
            .ok()
            .map(|cwd| PathBuf::from(cwd.trim_end()))
    }
}

/// Shell snippet printing `stdout` verbatim and exiting with `code`.
pub fn print_and_exit(stdout: &str, code: i32) -> String {
    format!("cat <<'REPORT'\n{stdout}\nREPORT\nexit {code}")
}

/// Shell snippet writing `stderr` to the error stream and exiting with `code`.
pub fn fail_with(stderr: &str, code: i32) -> String {
    format!("cat >&2 <<'STDERR'\n{stderr}\nSTDERR\nexit {code}")
}

pub fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

/// One-file report with a single problem on line 3, columns 1 through 10.
pub const ONE_PROBLEM_REPORT: &str = r#"[{"file_path":"a.proto","problems":[{"message":"Request messages should be named after the RPC.","rule_id":"core::0131::request-message-name","rule_doc_uri":"https://linter.aip.dev/131/request-message-name","location":{"start_position":{"line_number":3,"column_number":1},"end_position":{"line_number":3,"column_number":10}}}]}]"#;

pub const CLEAN_REPORT: &str = r#"[{"file_path":"a.proto","problems":[]}]"#;
