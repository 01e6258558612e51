//! Client for the Yandex.Disk REST API.
//!
//! [`Client`] builds authenticated requests against `https://cloud-api.yandex.net/v1/`,
//! dispatches them under a caller-supplied [`Context`], and maps responses to typed
//! payloads or to [`Error`]. Any status of 400 or above becomes [`Error::Api`] carrying
//! the structured [`ApiError`] from the response body.

mod client;
mod context;
mod errors;
mod query;
pub mod types;
pub use self::client::{Client, Destination, Reply, ResponseHead};
pub use self::context::Context;
pub use self::errors::{ApiError, Error};
pub use self::query::{Paging, PreviewSize, Query, ResourceQuery, ResourceSortBy, SortDirection};

pub use reqwest::Method;
pub use tokio_util::sync::CancellationToken;
