mod common;
pub use self::common::{Paging, Query, SortDirection};

mod resource;
pub use self::resource::{PreviewSize, ResourceQuery, ResourceSortBy};
