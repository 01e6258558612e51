//! Resource metadata: files and folders stored on the Disk.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a resource is a file or a folder.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    #[default]
    File,
    Dir,
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceType::File => write!(f, "file"),
            ResourceType::Dir => write!(f, "dir"),
        }
    }
}

/// Metainformation about a file or folder, returned by `GET /v1/disk/resources/`.
///
/// Every key may be left out when the request narrows the response with `fields`;
/// missing keys decode to their zero values.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Resource {
    /// Key of a published resource. Present only for published files and folders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,

    /// Resources directly contained in the folder. Present only for folders.
    #[serde(rename = "_embedded", default, skip_serializing_if = "Option::is_none")]
    pub embedded: Option<ResourceList>,

    /// Resource name.
    #[serde(default)]
    pub name: String,

    /// When the resource was created.
    #[serde(default)]
    pub created: DateTime<Utc>,

    /// User defined attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_properties: Option<HashMap<String, String>>,

    /// Link to a published resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,

    /// Path the resource had before it was moved to the Trash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_path: Option<String>,

    /// When the resource was last modified.
    #[serde(default)]
    pub modified: DateTime<Utc>,

    /// Full path to the resource, e.g. `disk:/foo/photo.png`.
    ///
    /// Trash entries may carry a unique suffix (`trash:/foo_1408546879`).
    #[serde(default)]
    pub path: String,

    /// MD5 hash of the file. Folders have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,

    /// SHA-256 hash of the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,

    #[serde(rename = "type", default)]
    pub resource_type: ResourceType,

    /// MIME type of the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Coarse media classification, e.g. `image` or `document`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    /// File size in bytes. Folders report zero.
    #[serde(default)]
    pub size: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,

    /// Link to a reduced preview image, when one is available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

impl Resource {
    pub fn is_dir(&self) -> bool {
        self.resource_type == ResourceType::Dir
    }

    /// Items of the embedded folder listing, or an empty slice for files.
    pub fn items(&self) -> &[Resource] {
        self.embedded
            .as_ref()
            .map(|list| list.items.as_slice())
            .unwrap_or_default()
    }
}

/// A page of resources contained in a folder, with its listing properties.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ResourceList {
    /// Field the list is sorted by.
    #[serde(default)]
    pub sort: String,

    /// Key of the published folder this list belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,

    #[serde(default)]
    pub items: Vec<Resource>,

    /// Path of the folder described by this list.
    #[serde(default)]
    pub path: String,

    /// Maximum number of items, as set in the request.
    #[serde(default)]
    pub limit: u64,

    /// Number of items skipped from the start of the folder.
    #[serde(default)]
    pub offset: u64,

    /// Total number of resources in the folder.
    #[serde(default)]
    pub total: u64,
}
