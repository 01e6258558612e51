mod disk;
pub use self::disk::{Disk, SystemFolders};

mod resource;
pub use self::resource::{Resource, ResourceList, ResourceType};
