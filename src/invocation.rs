//! Working-directory resolution and argument construction for a lint run.
//!
//! The resolver is purely lexical: it never touches the filesystem. Callers locate the config
//! file (see [`crate::config::find_config_file`]) before handing it in.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Everything needed to spawn the tool for one file, with all paths relative to `cwd`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Working directory for the subprocess.
    pub cwd: PathBuf,
    /// Target file, relative to `cwd`.
    pub relative_file: PathBuf,
    /// Linter config file, relative to `cwd`.
    pub config_file: Option<PathBuf>,
    /// Include paths, relative to `cwd`, in configured order.
    pub proto_paths: Vec<PathBuf>,
}

/// Outcome of resolving a lint request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Run(Invocation),
    /// The file lies outside every configured directory and must not be linted.
    Skip,
}

impl Invocation {
    /// Target file as the tool will see it on its command line and echo it back in errors.
    pub fn target_file(&self) -> String {
        self.relative_file.to_string_lossy().into_owned()
    }

    /// `<command...> <file> --output-format json [--config <c>] [-I <p>]...`
    pub fn command_line(&self, command: &[String]) -> Vec<OsString> {
        let mut argv: Vec<OsString> = command.iter().map(OsString::from).collect();
        argv.push(self.relative_file.clone().into_os_string());
        argv.push("--output-format".into());
        argv.push("json".into());
        if let Some(config_file) = &self.config_file {
            argv.push("--config".into());
            argv.push(config_file.clone().into_os_string());
        }
        for proto_path in &self.proto_paths {
            argv.push("-I".into());
            argv.push(proto_path.clone().into_os_string());
        }
        argv
    }
}

/// Resolve the working directory and relativized arguments for linting `file`.
///
/// `file`, `directories` and `proto_paths` are interpreted relative to `workspace_root` unless
/// absolute. `directories` is scanned in order and the first directory containing `file` wins.
/// `None` or an empty list means no restriction: the tool runs in `workspace_root` with `file`
/// passed through unchanged.
pub fn resolve(
    file: &Path,
    workspace_root: &Path,
    directories: Option<&[String]>,
    config_file: Option<&Path>,
    proto_paths: &[String],
) -> Resolution {
    let (cwd, relative_file) = match directories {
        None | Some([]) => (workspace_root.to_path_buf(), file.to_path_buf()),
        Some(directories) => match find_containing_directory(file, workspace_root, directories) {
            Some(found) => found,
            None => {
                log::debug!(
                    "{} is outside the configured directories {:?}; skipping",
                    file.display(),
                    directories
                );
                return Resolution::Skip;
            }
        },
    };

    let config_file = config_file.map(|config| relative_to(&workspace_root.join(config), &cwd));
    let proto_paths = proto_paths
        .iter()
        .map(|proto_path| relative_to(&workspace_root.join(proto_path), &cwd))
        .collect();

    log::debug!("Resolved {} to {} in {}", file.display(), relative_file.display(), cwd.display());

    Resolution::Run(Invocation {
        cwd,
        relative_file,
        config_file,
        proto_paths,
    })
}

/// First directory (in list order) that contains `file`, with `file` relative to it.
fn find_containing_directory(file: &Path, workspace_root: &Path, directories: &[String]) -> Option<(PathBuf, PathBuf)> {
    let absolute_file = workspace_root.join(file);
    directories.iter().find_map(|directory| {
        let cwd = workspace_root.join(directory);
        let relative = pathdiff::diff_paths(&absolute_file, &cwd)?;
        is_descendant(&relative).then_some((cwd, relative))
    })
}

/// A relative path that stays below its base: it starts with a normal component.
fn is_descendant(relative: &Path) -> bool {
    matches!(relative.components().next(), Some(Component::Normal(_)))
}

/// `path` relative to `base`, falling back to `path` itself when no relative form exists.
fn relative_to(path: &Path, base: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}
