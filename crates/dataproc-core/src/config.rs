use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the compiled-in project root.
pub const ROOT_ENV_VAR: &str = "DATAPROC_ROOT";

const DATA_DIR: &str = "data";
const INPUT_FILE: &str = "sample_input.csv";
const OUTPUT_FILE: &str = "processed_output.csv";
const LOG_FILE: &str = "data_processing.log";

/// File locations for one run, all derived from a single project root.
///
/// Each path can be replaced on its own after construction, which is how tests
/// and the CLI point individual files somewhere else without touching the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
    pub log: PathBuf,
}

impl ProjectPaths {
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let data_dir = root.join(DATA_DIR);
        Self {
            input: data_dir.join(INPUT_FILE),
            output: data_dir.join(OUTPUT_FILE),
            log: data_dir.join(LOG_FILE),
            root,
        }
    }

    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = path.into();
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    pub fn with_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.log = path.into();
        self
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }
}

/// The workspace directory this crate was built from.
///
/// Fixed at compile time so it does not move with the current working directory.
pub fn default_project_root() -> PathBuf {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    root.canonicalize().unwrap_or(root)
}

/// Picks the project root: explicit override first, then `DATAPROC_ROOT`, then the build tree.
pub fn resolve_project_root(explicit: Option<PathBuf>) -> PathBuf {
    choose_project_root(explicit, std::env::var_os(ROOT_ENV_VAR))
}

/// An empty `env_value` counts as unset.
fn choose_project_root(explicit: Option<PathBuf>, env_value: Option<OsString>) -> PathBuf {
    explicit
        .or_else(|| {
            env_value
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(default_project_root)
}
