use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const STORE_FILE: &str = "lingualay.json";
pub const BACKUPS_DIR: &str = "backups";

pub fn data_root() -> PathBuf {
    if let Some(pd) = ProjectDirs::from("com", "lingualay", "Lingualay") {
        pd.data_dir().to_path_buf()
    } else {
        // Fallback: current dir
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}

/// Store file and backups directory under `root`.
pub fn store_files(root: &Path) -> (PathBuf, PathBuf) {
    (root.join(STORE_FILE), root.join(BACKUPS_DIR))
}
