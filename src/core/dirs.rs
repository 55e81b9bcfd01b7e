use crate::core::error::StatuslineError;
use std::path::PathBuf;

pub fn get_config_directory() -> Result<PathBuf, StatuslineError> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Application Support")),
        _ => dirs::config_dir(),
    };

    base.map(|base| base.join("git-statusline"))
        .ok_or(StatuslineError::ConfigDirectoryNotFound)
}
