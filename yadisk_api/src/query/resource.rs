use std::fmt;
use std::str::FromStr;

use url::Url;

use super::{
    common::{Paging, SortDirection},
    Query,
};

/// Optional parameters for the resource metadata request.
#[derive(Default)]
pub struct ResourceQuery {
    pub paging: Paging,
    pub sort: Option<(ResourceSortBy, SortDirection)>,
    /// JSON keys to keep in the response; nested keys are dot separated
    /// (e.g. `_embedded.items.path`). Empty means the full response.
    pub fields: Vec<String>,
    pub preview_size: Option<PreviewSize>,
    /// Crop the preview to the requested size.
    pub preview_crop: bool,
}

impl Query for ResourceQuery {
    fn get_paging(&mut self) -> &mut Paging {
        &mut self.paging
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.paging.add_to_url(url);
        if let Some((sort_by, direction)) = &self.sort {
            url.query_pairs_mut().append_pair(
                "sort",
                format!("{}{}", direction.prefix(), sort_by).as_str(),
            );
        }
        if !self.fields.is_empty() {
            url.query_pairs_mut()
                .append_pair("fields", self.fields.join(",").as_str());
        }
        if let Some(preview_size) = &self.preview_size {
            url.query_pairs_mut()
                .append_pair("preview_size", preview_size.to_string().as_str());
        }
        if self.preview_crop {
            url.query_pairs_mut().append_pair("preview_crop", "true");
        }
        url
    }
}

impl ResourceQuery {
    pub fn with_sort(mut self, sort_by: ResourceSortBy, direction: SortDirection) -> Self {
        self.sort = Some((sort_by, direction));
        self
    }

    pub fn with_field(mut self, field: &str) -> Self {
        self.fields.push(field.to_string());
        self
    }

    pub fn with_fields(mut self, fields: &[&str]) -> Self {
        self.fields.extend(fields.iter().map(|f| f.to_string()));
        self
    }

    pub fn with_preview_size(mut self, preview_size: PreviewSize) -> Self {
        self.preview_size = Some(preview_size);
        self
    }

    pub fn with_preview_crop(mut self, crop: bool) -> Self {
        self.preview_crop = crop;
        self
    }
}

/// Key used to sort the items of a folder listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceSortBy {
    Name,
    Path,
    Created,
    Modified,
    Size,
}

impl fmt::Display for ResourceSortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResourceSortBy::Name => "name",
            ResourceSortBy::Path => "path",
            ResourceSortBy::Created => "created",
            ResourceSortBy::Modified => "modified",
            ResourceSortBy::Size => "size",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ResourceSortBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(ResourceSortBy::Name),
            "path" => Ok(ResourceSortBy::Path),
            "created" => Ok(ResourceSortBy::Created),
            "modified" => Ok(ResourceSortBy::Modified),
            "size" => Ok(ResourceSortBy::Size),
            _ => Err(()),
        }
    }
}

/// Requested size of the preview image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PreviewSize {
    /// 150 pixels on the longest side.
    S,
    /// 300 pixels.
    M,
    /// 500 pixels.
    L,
    /// 800 pixels.
    XL,
    /// 1024 pixels.
    XXL,
    /// 1280 pixels.
    XXXL,
    /// Exact dimensions: `120`, `120x`, `x145`, or `120x240`.
    Exact(String),
}

impl fmt::Display for PreviewSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewSize::S => write!(f, "S"),
            PreviewSize::M => write!(f, "M"),
            PreviewSize::L => write!(f, "L"),
            PreviewSize::XL => write!(f, "XL"),
            PreviewSize::XXL => write!(f, "XXL"),
            PreviewSize::XXXL => write!(f, "XXXL"),
            PreviewSize::Exact(size) => write!(f, "{}", size),
        }
    }
}
