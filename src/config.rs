use std::path::Path;

use crate::error::Error;

/// Scan configuration loaded from `.linklint.toml` in the scan root.
/// Exclude entries are directory segments pruned from the walk; extensions
/// name the document types whose content is scanned for links.
pub struct Config {
    exclude: Vec<String>,
    extensions: Vec<String>,
}

/// Raw TOML structure for `.linklint.toml`.
#[derive(serde::Deserialize)]
struct LinklintTomlConfig {
    #[serde(default = "default_exclude")]
    exclude: Vec<String>,
    #[serde(default = "default_extensions")]
    extensions: Vec<String>,
}

/// Dependency-cache directories skipped by default.
fn default_exclude() -> Vec<String> {
    return vec!["node_modules".to_string()];
}

/// Document extensions recognized by default.
fn default_extensions() -> Vec<String> {
    return vec!["md".to_string()];
}

impl Config {
    /// Load config from `.linklint.toml` in the given root directory.
    /// Returns the defaults if the file doesn't exist.
    /// Returns an error if the file exists but is malformed — never silently
    /// falls back to defaults when the user wrote a config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(".linklint.toml");
        // NotADirectory falls through to the scanner's own root validation.
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e)
                if e.kind() == std::io::ErrorKind::NotFound
                    || e.kind() == std::io::ErrorKind::NotADirectory =>
            {
                return Ok(Self::defaults());
            },
            Err(e) => return Err(Error::Io(e)),
        };

        let raw: LinklintTomlConfig = toml::from_str(&content)?;
        Ok(Self {
            exclude: raw.exclude,
            extensions: raw.extensions,
        })
    }

    /// Built-in defaults: scan `md` files, skip `node_modules`.
    pub fn defaults() -> Self {
        Self {
            exclude: default_exclude(),
            extensions: default_extensions(),
        }
    }

    /// Check whether a file's extension marks it as a scannable document.
    pub fn is_document(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| return e.to_str()) else {
            return false;
        };
        self.extensions.iter().any(|e| return e == ext)
    }

    /// Check whether any component of the path is an excluded segment.
    pub fn is_excluded(&self, path: &Path) -> bool {
        path.components().any(|component| {
            let std::path::Component::Normal(name) = component else {
                return false;
            };
            return self.exclude.iter().any(|seg| return name.to_str() == Some(seg.as_str()));
        })
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn missing_config_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert!(config.is_document(Path::new("guide.md")));
        assert!(!config.is_document(Path::new("guide.txt")));
        assert!(config.is_excluded(Path::new("a/node_modules/b.md")));
        assert!(!config.is_excluded(Path::new("a/b.md")));
    }

    #[test]
    fn partial_config_keeps_unset_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".linklint.toml"), "exclude = [\"vendor\"]\n").unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert!(config.is_excluded(Path::new("vendor/readme.md")));
        assert!(!config.is_excluded(Path::new("node_modules/readme.md")));
        assert!(config.is_document(Path::new("guide.md")));
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".linklint.toml"), "exclude = not toml").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }

    #[test]
    fn excluded_segment_must_match_a_whole_component() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert!(!config.is_excluded(Path::new("my_node_modules_notes/b.md")));
    }
}
