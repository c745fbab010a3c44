//! Build path aliases (`@` → `src/`, `@/.source` → generated content dir).

use crate::error::SiteError;
use std::path::{Path, PathBuf};

/// Ordered alias table rooted at the project directory.
#[derive(Debug, Clone)]
pub struct AliasMap {
    root: PathBuf,
    entries: Vec<(String, PathBuf)>,
}

impl AliasMap {
    /// Creates the default alias table for a project rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let mut map = Self {
            entries: Vec::new(),
            root: root.clone(),
        };
        map.insert("@", root.join("src"));
        map.insert("@/.source", root.join(".source"));
        map
    }

    /// Adds or replaces an alias token.
    pub fn insert(&mut self, token: impl Into<String>, target: impl Into<PathBuf>) {
        let token = token.into();
        let target = target.into();
        match self.entries.iter_mut().find(|(t, _)| *t == token) {
            Some(entry) => entry.1 = target,
            None => self.entries.push((token, target)),
        }
        // Longest token first so `@/.source` wins over `@`.
        self.entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Project root every relative path is joined onto.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a specifier to a path. Alias tokens only match on a whole
    /// path component (`@/x`, not `@x`).
    pub fn resolve(&self, spec: &str) -> PathBuf {
        for (token, target) in &self.entries {
            if spec == token {
                return target.clone();
            }
            if let Some(rest) = spec.strip_prefix(token.as_str())
                && let Some(rest) = rest.strip_prefix('/')
            {
                return target.join(rest);
            }
        }

        let path = Path::new(spec);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Resolves a specifier that must point at an existing directory.
    pub fn resolve_existing(&self, spec: &str) -> Result<PathBuf, SiteError> {
        let path = self.resolve(spec);
        if path.is_dir() {
            Ok(path)
        } else {
            Err(SiteError::config(format!(
                "path `{spec}` resolves to `{}`, which is not a directory",
                path.display()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_default_aliases() {
        let aliases = AliasMap::new("/site");
        assert_eq!(
            aliases.resolve("@/components/logo"),
            PathBuf::from("/site/src/components/logo")
        );
        assert_eq!(aliases.resolve("@"), PathBuf::from("/site/src"));
        assert_eq!(
            aliases.resolve("@/.source/index"),
            PathBuf::from("/site/.source/index")
        );
    }

    #[test]
    fn plain_paths_are_rooted() {
        let aliases = AliasMap::new("/site");
        assert_eq!(aliases.resolve("out"), PathBuf::from("/site/out"));
        assert_eq!(aliases.resolve("/abs/out"), PathBuf::from("/abs/out"));
        assert_eq!(aliases.resolve("@scope/pkg"), PathBuf::from("/site/@scope/pkg"));
    }

    #[test]
    fn custom_alias_overrides() {
        let mut aliases = AliasMap::new("/site");
        aliases.insert("@", "/elsewhere");
        assert_eq!(aliases.resolve("@/x"), PathBuf::from("/elsewhere/x"));
    }

    #[test]
    fn missing_directory_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src/content")).unwrap();
        let aliases = AliasMap::new(dir.path());
        assert!(aliases.resolve_existing("@/content").is_ok());
        let err = aliases.resolve_existing("@/missing").unwrap_err();
        assert!(err.is_configuration());
    }
}
