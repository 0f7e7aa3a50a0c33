//! Where the config file comes from.
//!
//! An explicit `--config` path must be readable. Otherwise the first readable
//! file among `./forksweep.toml` and the per-user config dir wins, and an
//! empty document (all defaults) is used when neither exists.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::defaults::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};

/// Origin of the loaded config text, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConfigOrigin {
    Flag(PathBuf),
    Discovered(PathBuf),
    Defaults,
}

impl ConfigOrigin {
    pub(crate) fn path(&self) -> Option<&Path> {
        match self {
            Self::Flag(path) | Self::Discovered(path) => Some(path),
            Self::Defaults => None,
        }
    }
}

/// Files probed, in order, when no `--config` flag is given.
fn discovery_candidates(config_root: Option<PathBuf>) -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(root) = config_root {
        candidates.push(root.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
    }
    candidates
}

pub(crate) fn locate_config_text<FRead, FRoot>(
    flag_path: Option<&str>,
    read_file: &FRead,
    config_root: &FRoot,
) -> Result<(String, ConfigOrigin), ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    if let Some(raw) = flag_path {
        let path = PathBuf::from(raw);
        return match read_file(&path) {
            Ok(text) => Ok((text, ConfigOrigin::Flag(path))),
            Err(source) => Err(ConfigError::Read { path, source }),
        };
    }

    let found = discovery_candidates(config_root())
        .into_iter()
        .find_map(|path| read_file(&path).ok().map(|text| (text, path)));
    Ok(match found {
        Some((text, path)) => (text, ConfigOrigin::Discovered(path)),
        None => (String::new(), ConfigOrigin::Defaults),
    })
}

/// `$XDG_CONFIG_HOME`, else `~/.config`, else the platform config dir.
pub fn config_root_dir() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .or_else(dirs::config_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_file_shadows_user_dir() {
        let read = |path: &Path| {
            if path == Path::new(CONFIG_FILE_NAME) || path.starts_with("/cfg") {
                Ok(format!("# {}", path.display()))
            } else {
                Err(std::io::Error::from(std::io::ErrorKind::NotFound))
            }
        };
        let (text, origin) =
            locate_config_text(None, &read, &|| Some(PathBuf::from("/cfg"))).unwrap();
        assert_eq!(text, "# forksweep.toml");
        assert_eq!(origin.path(), Some(Path::new(CONFIG_FILE_NAME)));
    }

    #[test]
    fn nothing_found_means_defaults() {
        let read = |_: &Path| Err(std::io::Error::from(std::io::ErrorKind::NotFound));
        let (text, origin) = locate_config_text(None, &read, &|| None).unwrap();
        assert!(text.is_empty());
        assert_eq!(origin, ConfigOrigin::Defaults);
        assert_eq!(origin.path(), None);
    }
}
