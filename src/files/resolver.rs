use std::path::{Component, Path, PathBuf};

use crate::config::StaticFilesConfig;

/// Outcome of mapping a request target onto the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Path to hand to the responder. It may not exist.
    File(PathBuf),
    /// The target would leave the server root and containment is on.
    Outside,
}

/// Maps request targets to paths under a fixed server root.
///
/// Resolution never touches the filesystem: the same `(root, target)` pair
/// always produces the same answer.
#[derive(Debug, Clone)]
pub struct Resolver {
    root: PathBuf,
    default_document: String,
    contain_paths: bool,
}

impl Resolver {
    pub fn new(cfg: &StaticFilesConfig) -> Self {
        Self {
            root: cfg.root.clone(),
            default_document: cfg.default_document.clone(),
            contain_paths: cfg.contain_paths,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a request target.
    ///
    /// `/` becomes the default document. Anything else loses at most one
    /// leading `/` and is joined onto the root verbatim; `..` segments are
    /// not normalised. With containment on, a remainder that could step
    /// outside the root is reported as [`Resolved::Outside`] instead.
    pub fn resolve(&self, target: &str) -> Resolved {
        if target == "/" {
            return Resolved::File(self.root.join(&self.default_document));
        }

        let relative = target.strip_prefix('/').unwrap_or(target);

        if self.contain_paths && escapes_root(Path::new(relative)) {
            return Resolved::Outside;
        }

        Resolved::File(self.root.join(relative))
    }
}

/// Lexical check: any parent, root or prefix component can leave the root
/// once joined.
fn escapes_root(relative: &Path) -> bool {
    relative.components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(contain_paths: bool) -> Resolver {
        Resolver::new(&StaticFilesConfig {
            root: PathBuf::from("www"),
            default_document: "index.html".to_string(),
            contain_paths,
        })
    }

    #[test]
    fn dot_segments_are_allowed() {
        assert_eq!(
            resolver(true).resolve("/./a/./b.txt"),
            Resolved::File(PathBuf::from("www/./a/./b.txt"))
        );
    }

    #[test]
    fn absolute_remainder_replaces_root_when_uncontained() {
        assert_eq!(
            resolver(false).resolve("//etc/passwd"),
            Resolved::File(PathBuf::from("/etc/passwd"))
        );
        assert_eq!(resolver(true).resolve("//etc/passwd"), Resolved::Outside);
    }
}
