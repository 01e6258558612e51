//! Shared query infrastructure: the [`Query`] trait, [`Paging`] fields, and [`SortDirection`].

use std::str::FromStr;

use url::Url;

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for pagination.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the paging fields.
    fn get_paging(&mut self) -> &mut Paging;

    /// Sets the maximum number of items returned in a listing.
    fn with_limit(mut self, limit: u64) -> Self
    where
        Self: Sized,
    {
        self.get_paging().limit = Some(limit);
        self
    }

    /// Skips the given number of items from the top of a listing.
    fn with_offset(mut self, offset: u64) -> Self
    where
        Self: Sized,
    {
        self.get_paging().offset = Some(offset);
        self
    }
}

/// Sort order for listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order. This is the API default.
    #[default]
    Asc,
    /// Descending order, sent as a `-` prefix on the sort field.
    Desc,
}

impl SortDirection {
    pub(crate) fn prefix(&self) -> &'static str {
        match self {
            SortDirection::Asc => "",
            SortDirection::Desc => "-",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

/// Pagination fields. `None` leaves the API default in place (20 items, no offset).
#[derive(Clone, Copy, Debug, Default)]
pub struct Paging {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Paging {
    /// Appends the pagination parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(limit) = self.limit {
            url.query_pairs_mut()
                .append_pair("limit", &limit.to_string());
        };
        if let Some(offset) = self.offset {
            url.query_pairs_mut()
                .append_pair("offset", &offset.to_string());
        };
        url
    }
}
