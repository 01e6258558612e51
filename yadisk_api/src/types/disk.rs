//! Disk-level data: quota, usage, and system folder locations.

use serde::{Deserialize, Serialize};

/// Free and used space on the user's Disk, returned by `GET /v1/disk/`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Disk {
    /// Cumulative size of the files in the Trash, in bytes.
    #[serde(default)]
    pub trash_size: u64,

    /// Total space available to the user, in bytes.
    #[serde(default)]
    pub total_space: u64,

    /// Cumulative size of the files already stored on the Disk, in bytes.
    #[serde(default)]
    pub used_space: u64,

    /// Absolute addresses of the Disk system folders.
    #[serde(default)]
    pub system_folders: SystemFolders,
}

impl Disk {
    /// Space left on the Disk, in bytes.
    pub fn free_space(&self) -> u64 {
        self.total_space.saturating_sub(self.used_space)
    }
}

/// Absolute addresses of Disk system folders.
///
/// Folder names depend on the interface language the Disk was created with,
/// e.g. `disk:/Downloads/` for English and `disk:/Загрузки/` for Russian.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemFolders {
    /// Folder for application files.
    #[serde(default)]
    pub applications: String,

    /// Folder for files downloaded from the internet.
    #[serde(default)]
    pub downloads: String,
}
