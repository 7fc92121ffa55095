// ABOUTME: The sandboxed artifact store: validated file operations under one output root
// ABOUTME: Batch writes report partial success; nothing outside the root is ever touched

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use stackforge_core::constants::ROOT_LEVEL_ALLOWLIST;

use crate::error::{ArtifactError, Result};

/// Extensions that belong to the browser layer.
const BROWSER_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "html", "css"];

/// Expected file kind for pre-flight path validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Python,
    Javascript,
    Config,
    Any,
}

impl PathKind {
    fn matches(&self, extension: &str) -> bool {
        match self {
            PathKind::Python => extension == "py",
            PathKind::Javascript => BROWSER_EXTENSIONS.contains(&extension),
            PathKind::Config => {
                matches!(extension, "json" | "yml" | "yaml" | "toml" | "ini" | "cfg" | "txt" | "md")
            }
            PathKind::Any => true,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            PathKind::Python => "python",
            PathKind::Javascript => "javascript",
            PathKind::Config => "config",
            PathKind::Any => "any",
        }
    }
}

/// One generated file, identified by an output-relative path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub path: String,
    pub content: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Non-fatal finding attached to an otherwise acceptable path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathWarning {
    pub path: String,
    pub message: String,
}

/// Outcome of a pre-flight validation: the path is writable, possibly with
/// layer-mismatch warnings the caller may want to surface.
#[derive(Debug, Clone, Default)]
pub struct PathCheck {
    pub warnings: Vec<PathWarning>,
}

/// One entry that could not be written in a batch.
#[derive(Debug, Clone, Serialize)]
pub struct FailedWrite {
    pub path: String,
    pub error: String,
}

/// Structured summary of a batch write. Partial success is expected and
/// reported; it is never escalated to a whole-batch failure.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WriteSummary {
    pub created: Vec<String>,
    pub failed: Vec<FailedWrite>,
    pub warnings: Vec<PathWarning>,
}

impl WriteSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// One-line report in the shape stage payloads embed.
    pub fn describe(&self) -> String {
        format!(
            "{} created, {} failed, {} warnings",
            self.created.len(),
            self.failed.len(),
            self.warnings.len()
        )
    }
}

/// Validated, idempotent file operations against one sandboxed output root.
#[derive(Debug)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Checks a relative output path without touching storage.
    ///
    /// Hard failures: traversal outside the root, missing extension,
    /// root-level placement outside the allow-list, and extension mismatch
    /// against an explicit expected kind. Layer mismatches (a browser-script
    /// extension under backend/, or .py under frontend/) come back as
    /// warnings and do not block a write.
    pub fn validate_path(&self, path: &str, expected: PathKind) -> Result<PathCheck> {
        let rel = Path::new(path);

        if rel.is_absolute()
            || rel
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::RootDir))
        {
            return Err(ArtifactError::OutsideRoot(path.to_string()));
        }

        let extension = rel
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        let file_name = rel.file_name().and_then(|name| name.to_str()).unwrap_or("");

        // Dotfiles like .gitignore count as having an extension-equivalent name.
        let has_extension = extension.is_some() || file_name.starts_with('.');
        if !has_extension {
            return Err(ArtifactError::NoExtension(path.to_string()));
        }

        if rel.components().count() < 2 && !ROOT_LEVEL_ALLOWLIST.contains(&file_name) {
            return Err(ArtifactError::RootLevel(path.to_string()));
        }

        let extension = extension.unwrap_or_default();
        if expected != PathKind::Any && !expected.matches(&extension) {
            return Err(ArtifactError::WrongKind {
                path: path.to_string(),
                expected: expected.describe().to_string(),
            });
        }

        let mut check = PathCheck::default();
        let top_level = rel
            .components()
            .next()
            .and_then(|c| c.as_os_str().to_str())
            .unwrap_or("");
        if top_level == "backend" && BROWSER_EXTENSIONS.contains(&extension.as_str()) {
            check.warnings.push(PathWarning {
                path: path.to_string(),
                message: format!("browser file type (.{}) under backend/", extension),
            });
        } else if top_level == "frontend" && extension == "py" {
            check.warnings.push(PathWarning {
                path: path.to_string(),
                message: "python file under frontend/".to_string(),
            });
        }

        Ok(check)
    }

    /// Writes one file, creating parent directories as needed. Layer-mismatch
    /// warnings are logged and the write proceeds.
    pub fn write(&self, path: &str, content: &str) -> Result<()> {
        let check = self.validate_path(path, PathKind::Any)?;
        for warning in &check.warnings {
            warn!(path = %warning.path, "{}", warning.message);
        }

        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, content)?;

        info!(path, bytes = content.len(), "Created file");
        Ok(())
    }

    /// Writes a batch of artifacts. Every entry is attempted regardless of
    /// earlier failures; successfully written files stay in place.
    pub fn write_many(&self, artifacts: &[Artifact]) -> WriteSummary {
        let mut summary = WriteSummary::default();

        for artifact in artifacts {
            match self.validate_path(&artifact.path, PathKind::Any) {
                Ok(check) => {
                    summary.warnings.extend(check.warnings);
                    match self.write_unchecked(&artifact.path, &artifact.content) {
                        Ok(()) => summary.created.push(artifact.path.clone()),
                        Err(err) => summary.failed.push(FailedWrite {
                            path: artifact.path.clone(),
                            error: err.to_string(),
                        }),
                    }
                }
                Err(err) => summary.failed.push(FailedWrite {
                    path: artifact.path.clone(),
                    error: err.to_string(),
                }),
            }
        }

        info!("Batch write: {}", summary.describe());
        for failure in &summary.failed {
            warn!(path = %failure.path, error = %failure.error, "Write failed");
        }
        summary
    }

    fn write_unchecked(&self, path: &str, content: &str) -> Result<()> {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, content)?;
        Ok(())
    }

    /// Reads a previously written file.
    pub fn read(&self, path: &str) -> Result<String> {
        self.validate_path(path, PathKind::Any)?;
        let full_path = self.root.join(path);
        if !full_path.exists() {
            return Err(ArtifactError::NotFound(path.to_string()));
        }
        Ok(fs::read_to_string(&full_path)?)
    }

    /// Lists files under `prefix` (or the whole root for ""), as sorted
    /// root-relative paths.
    pub fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let base = if prefix.is_empty() {
            self.root.clone()
        } else {
            let rel = Path::new(prefix);
            if rel.is_absolute()
                || rel
                    .components()
                    .any(|c| matches!(c, Component::ParentDir | Component::RootDir))
            {
                return Err(ArtifactError::OutsideRoot(prefix.to_string()));
            }
            self.root.join(rel)
        };
        if !base.exists() {
            return Err(ArtifactError::NotFound(prefix.to_string()));
        }

        let mut files = Vec::new();
        self.collect_files(&base, &mut files)?;
        files.sort();
        Ok(files)
    }

    fn collect_files(&self, dir: &Path, out: &mut Vec<String>) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                self.collect_files(&path, out)?;
            } else if let Ok(rel) = path.strip_prefix(&self.root) {
                out.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
        Ok(())
    }

    /// Creates a set of named subdirectories under `base`. Idempotent.
    pub fn create_dirs(&self, base: &str, names: &[&str]) -> Result<Vec<String>> {
        let rel = Path::new(base);
        if rel.is_absolute()
            || rel
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::RootDir))
        {
            return Err(ArtifactError::OutsideRoot(base.to_string()));
        }

        let mut created = Vec::new();
        for name in names {
            let dir = self.root.join(rel).join(name.trim());
            fs::create_dir_all(&dir)?;
            created.push(name.trim().to_string());
        }
        info!(base, "Created directories: {}", created.join(", "));
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store() -> (TempDir, ArtifactStore) {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_validate_path_accepts_nested_file() {
        let (_dir, store) = store();
        let check = store.validate_path("backend/main.py", PathKind::Python).unwrap();
        assert!(check.warnings.is_empty());
    }

    #[test]
    fn test_validate_path_root_level_diagnosis() {
        let (_dir, store) = store();
        let err = store.validate_path("main.py", PathKind::Any).unwrap_err();
        assert!(matches!(err, ArtifactError::RootLevel(_)));
    }

    #[test]
    fn test_validate_path_no_extension_diagnosis() {
        let (_dir, store) = store();
        let err = store.validate_path("backend", PathKind::Any).unwrap_err();
        assert!(matches!(err, ArtifactError::NoExtension(_)));
    }

    #[test]
    fn test_validate_path_wrong_kind_diagnosis() {
        let (_dir, store) = store();
        let err = store
            .validate_path("backend/app.js", PathKind::Python)
            .unwrap_err();
        assert!(matches!(err, ArtifactError::WrongKind { .. }));
    }

    #[test]
    fn test_validate_path_rejects_traversal() {
        let (_dir, store) = store();
        assert!(matches!(
            store.validate_path("../escape.py", PathKind::Any),
            Err(ArtifactError::OutsideRoot(_))
        ));
        assert!(matches!(
            store.validate_path("/etc/passwd.py", PathKind::Any),
            Err(ArtifactError::OutsideRoot(_))
        ));
    }

    #[test]
    fn test_root_allowlist_permits_deployment_files() {
        let (_dir, store) = store();
        assert!(store.validate_path("docker-compose.yml", PathKind::Any).is_ok());
        assert!(store.validate_path("README.md", PathKind::Any).is_ok());
        assert!(store.validate_path(".gitignore", PathKind::Any).is_ok());
    }

    #[test]
    fn test_layer_mismatch_is_warning_and_write_proceeds() {
        let (_dir, store) = store();
        let check = store
            .validate_path("backend/script.js", PathKind::Any)
            .unwrap();
        assert_eq!(check.warnings.len(), 1);
        store.write("backend/script.js", "console.log(1)").unwrap();
        assert!(store.read("backend/script.js").is_ok());
    }

    #[test]
    fn test_write_many_partial_success() {
        let (_dir, store) = store();
        let artifacts = vec![
            Artifact {
                path: "backend/main.py".to_string(),
                content: "print('hi')".to_string(),
                description: None,
            },
            Artifact {
                path: "main.py".to_string(),
                content: "nope".to_string(),
                description: None,
            },
            Artifact {
                path: "frontend/src/App.js".to_string(),
                content: "export default function App() {}".to_string(),
                description: Some("main component".to_string()),
            },
        ];
        let summary = store.write_many(&artifacts);

        assert_eq!(summary.created.len(), 2);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].path, "main.py");
        assert!(store.read("backend/main.py").is_ok());
        assert!(store.read("frontend/src/App.js").is_ok());
    }

    #[test]
    fn test_read_missing_file_is_not_found() {
        let (_dir, store) = store();
        assert!(matches!(
            store.read("backend/missing.py"),
            Err(ArtifactError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_returns_sorted_relative_paths() {
        let (_dir, store) = store();
        store.write("backend/main.py", "x").unwrap();
        store.write("backend/requirements.txt", "fastapi").unwrap();
        store.write("frontend/src/App.js", "y").unwrap();

        let all = store.list("").unwrap();
        assert_eq!(
            all,
            vec![
                "backend/main.py".to_string(),
                "backend/requirements.txt".to_string(),
                "frontend/src/App.js".to_string(),
            ]
        );

        let backend_only = store.list("backend").unwrap();
        assert_eq!(backend_only.len(), 2);
    }

    #[test]
    fn test_create_dirs_is_idempotent() {
        let (_dir, store) = store();
        let created = store.create_dirs("backend", &["tests", "tests"]).unwrap();
        assert_eq!(created, vec!["tests", "tests"]);
        assert!(store.root().join("backend/tests").is_dir());
    }
}
