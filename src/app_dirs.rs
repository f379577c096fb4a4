use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// `$HOME/.local/state/hangmath/hangmath.log`, or the platform data dir
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("hangmath");
            Some(state_dir.join("hangmath.log"))
        } else {
            ProjectDirs::from("", "", "hangmath")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("hangmath.log"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_ends_with_file_name() {
        if let Some(path) = AppDirs::log_path() {
            assert!(path.ends_with("hangmath/hangmath.log"));
        }
    }
}
