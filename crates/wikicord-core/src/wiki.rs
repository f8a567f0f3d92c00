//! Wiki discovery — glob expansion, workspace-relative paths, forge URLs.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, WikiError};
use crate::extractor::WikiPage;
use crate::utils::to_url_path;

/// Characters that make a path component a glob pattern.
const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// Read and edit URLs of one page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageLinks {
    pub read: String,
    pub edit: String,
}

/// Builds repository URLs for files in a checked-out workspace.
#[derive(Clone, Debug)]
pub struct RepoLinks {
    repo_url: String,
    branch: String,
    workspace_root: PathBuf,
}

impl RepoLinks {
    /// `repo_url` is the web URL of the repository, e.g.
    /// `https://github.com/owner/repo`.
    pub fn new(
        repo_url: impl Into<String>,
        branch: impl Into<String>,
        workspace_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            repo_url: repo_url.into().trim_end_matches('/').to_string(),
            branch: branch.into(),
            workspace_root: workspace_root.into(),
        }
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Path of `path` relative to the workspace root, `/`-separated.
    ///
    /// Relative inputs are resolved against the current directory first.
    /// A result that would climb out of the root with `..` is rejected.
    pub fn relative_path(&self, path: &Path) -> Result<String> {
        let root = resolve(&self.workspace_root)?;
        let full = resolve(path)?;

        let outside = || WikiError::OutsideWorkspace {
            path: full.clone(),
            root: root.clone(),
        };
        let rel = full.strip_prefix(&root).map_err(|_| outside())?;
        if rel.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(outside());
        }

        Ok(to_url_path(rel))
    }

    /// Read and edit URLs for a file in the workspace.
    pub fn page_links(&self, path: &Path) -> Result<PageLinks> {
        let rel = self.relative_path(path)?;
        let links = PageLinks {
            read: format!("{}/blob/{}/{}", self.repo_url, self.branch, rel),
            edit: format!("{}/edit/{}/{}", self.repo_url, self.branch, rel),
        };
        debug!("Read url for {} is at: {}", path.display(), links.read);
        debug!("Edit url for {} is at: {}", path.display(), links.edit);
        Ok(links)
    }

    /// URL of the folder the wiki glob searches, used by the trailer message.
    pub fn index_url(&self, pattern: &str) -> Result<String> {
        let root = search_root(pattern);
        let rel = self.relative_path(&root)?;
        if rel.is_empty() {
            Ok(format!("{}/tree/{}", self.repo_url, self.branch))
        } else {
            Ok(format!("{}/tree/{}/{}", self.repo_url, self.branch, rel))
        }
    }
}

/// Canonical form of an existing path, otherwise its absolute form.
fn resolve(path: &Path) -> Result<PathBuf> {
    let resolved = if path.exists() {
        path.canonicalize()
    } else {
        std::path::absolute(path)
    };
    resolved.map_err(|source| WikiError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// The literal directory prefix of a glob pattern.
///
/// `docs/wiki/**/*.md` → `docs/wiki`; `*.md` → `.`.
pub fn search_root(pattern: &str) -> PathBuf {
    let mut root = PathBuf::new();
    for component in Path::new(pattern).components() {
        if let Component::Normal(part) = component {
            if part.to_string_lossy().contains(GLOB_META) {
                break;
            }
        }
        root.push(component);
    }

    // A pattern with no wildcard names a single file; its folder is the root.
    if root == Path::new(pattern) {
        root.pop();
    }

    if root.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        root
    }
}

/// Branch name from a git ref such as `refs/heads/main`.
pub fn branch_from_ref(git_ref: &str) -> String {
    ["refs/heads/", "refs/tags/", "refs/"]
        .iter()
        .find_map(|prefix| git_ref.strip_prefix(prefix))
        .unwrap_or(git_ref)
        .to_string()
}

/// Web URL of a repository from a forge server URL and `owner/name`.
pub fn repo_url(server_url: &str, repository: &str) -> String {
    format!(
        "{}/{}",
        server_url.trim_end_matches('/'),
        repository.trim_matches('/')
    )
}

/// Expand the wiki glob into markdown files, in discovery order.
///
/// Directories and broken symlinks are skipped.
pub fn discover(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|source| WikiError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        } else {
            debug!("Skipping non-file match: {}", path.display());
        }
    }
    Ok(files)
}

/// Discover, read, and extract every page matched by `pattern`.
///
/// The first failure aborts; no partial list is returned.
pub fn load_pages(pattern: &str, links: &RepoLinks) -> Result<Vec<WikiPage>> {
    let mut pages = Vec::new();
    for path in discover(pattern)? {
        info!("Processing: {}", path.display());
        let markdown = std::fs::read_to_string(&path).map_err(|source| WikiError::Read {
            path: path.clone(),
            source,
        })?;
        let page_links = links.page_links(&path)?;
        pages.push(WikiPage::from_markdown(&markdown, &path, &page_links)?);
    }
    Ok(pages)
}
