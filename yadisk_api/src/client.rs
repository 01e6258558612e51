//! HTTP client for the Yandex.Disk REST API.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use url::Url;

use crate::{
    context::Context,
    errors::ApiError,
    query::{Query, ResourceQuery},
    types::{Disk, Resource},
    Error,
};

const DEFAULT_BASE_URL: &str = "https://cloud-api.yandex.net/";
const API_VERSION: &str = "1";
const USER_AGENT: &str = concat!("yadisk-rs/", env!("CARGO_PKG_VERSION"));
const JSON: &str = "application/json";

/// Unread body bytes consumed before a response is released, so the
/// connection can go back to the pool.
const DRAIN_LIMIT: usize = 512;

/// Error bodies beyond this size are not read.
const ERROR_BODY_LIMIT: usize = 64 * 1024;

/// HTTP client for the Yandex.Disk REST API.
///
/// Holds the base URL, the OAuth credential, and the underlying `reqwest::Client`.
/// None of these change after construction, so a `Client` can be cloned and shared
/// freely across tasks; clones share the connection pool of the HTTP client.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    /// Pre-built `OAuth <token>` header, marked sensitive so it never shows in `Debug`.
    authorization: HeaderValue,
}

/// Where the body of a successful response goes.
pub enum Destination<'a, T = ()> {
    /// The body is not read beyond the drain limit.
    Discard,
    /// The body is copied verbatim, without any JSON interpretation.
    Raw(&'a mut (dyn AsyncWrite + Unpin + Send)),
    /// The first JSON value of the body is decoded into the target.
    /// An empty body leaves the target untouched.
    Typed(&'a mut T),
}

impl<'a> Destination<'a, ()> {
    pub fn discard() -> Self {
        Destination::Discard
    }

    pub fn raw(writer: &'a mut (dyn AsyncWrite + Unpin + Send)) -> Self {
        Destination::Raw(writer)
    }
}

/// Status line and headers of a response, kept after the body has been consumed.
#[derive(Clone, Debug)]
pub struct ResponseHead {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Final URL of the response, after redirects.
    pub url: Url,
}

impl From<&reqwest::Response> for ResponseHead {
    fn from(response: &reqwest::Response) -> Self {
        Self {
            status: response.status(),
            headers: response.headers().clone(),
            url: response.url().clone(),
        }
    }
}

/// A decoded payload together with the response it came from.
#[derive(Clone, Debug)]
pub struct Reply<T> {
    pub data: T,
    pub response: ResponseHead,
}

impl Client {
    /// Creates a new client pointing at the production Yandex.Disk API.
    pub fn new(access_token: &str) -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL, access_token)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    ///
    /// A base URL whose path lacks a trailing slash gets one, so relative
    /// resource paths are always resolved beneath it.
    pub fn with_base_url(base_url: &str, access_token: &str) -> Result<Self, Error> {
        Self::build(base_url, access_token, None)
    }

    /// Creates a client on top of an existing HTTP client. The caller keeps
    /// ownership of its pool and may share it between several API clients.
    pub fn from_http_client(
        http: reqwest::Client,
        base_url: &str,
        access_token: &str,
    ) -> Result<Self, Error> {
        Self::build(base_url, access_token, Some(http))
    }

    fn build(base_url: &str, access_token: &str, http: Option<reqwest::Client>) -> Result<Self, Error> {
        let base_url = parse_base_url(base_url)?;
        let authorization = authorization_header(access_token)?;
        let http = match http {
            Some(http) => http,
            None => reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .map_err(|e| {
                    tracing::error!("Failed to build HTTP client: {}", e);
                    Error::HttpClient(e)
                })?,
        };
        Ok(Self {
            http,
            base_url,
            authorization,
        })
    }

    /// Replaces the HTTP client of an already built client.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http
    }

    /// Builds a request without a body.
    ///
    /// `path` is relative to the API root and is resolved as `v1/<path>/`
    /// against the base URL, e.g. `disk` becomes `https://cloud-api.yandex.net/v1/disk/`.
    /// The request has no body at all, not even an empty one.
    pub fn new_request(&self, method: Method, path: &str) -> Result<reqwest::Request, Error> {
        self.build_request::<()>(method, path, None)
    }

    /// Builds a request whose body is `body` encoded as JSON, followed by a newline.
    pub fn new_json_request<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Request, Error>
    where
        B: Serialize + ?Sized,
    {
        self.build_request(method, path, Some(body))
    }

    fn build_request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Request, Error>
    where
        B: Serialize + ?Sized,
    {
        let url = self.get_url(path)?;
        let encoded = match body {
            Some(body) => {
                let mut buf = serde_json::to_vec(body).map_err(|e| {
                    tracing::error!("Failed to encode request body: {}", e);
                    Error::Encode(e)
                })?;
                buf.push(b'\n');
                Some(buf)
            }
            None => None,
        };

        let mut request = reqwest::Request::new(method, url);
        let headers = request.headers_mut();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        headers.insert(AUTHORIZATION, self.authorization.clone());
        if let Some(buf) = encoded {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
            *request.body_mut() = Some(buf.into());
        }
        Ok(request)
    }

    fn get_url(&self, path: &str) -> Result<Url, Error> {
        validate_path(path)?;
        let trimmed = path.trim_matches('/');
        let relative = if trimmed.is_empty() {
            format!("v{}/", API_VERSION)
        } else {
            format!("v{}/{}/", API_VERSION, trimmed)
        };
        self.base_url.join(&relative).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::Url(e)
        })
    }

    /// Sends `request` under `ctx` and routes the response body to `destination`.
    ///
    /// Any status of 400 or above fails with [`Error::Api`], best-effort populated from
    /// the body. Cancellation and deadline expiry of `ctx` fail with
    /// [`Error::Cancelled`] and [`Error::DeadlineExceeded`]. Whatever the outcome, up to
    /// 512 unread body bytes are drained before the response is released.
    pub async fn execute<T>(
        &self,
        ctx: &Context,
        request: reqwest::Request,
        destination: Destination<'_, T>,
    ) -> Result<ResponseHead, Error>
    where
        T: DeserializeOwned,
    {
        ctx.run(self.dispatch(request, destination)).await
    }

    async fn dispatch<T>(
        &self,
        request: reqwest::Request,
        destination: Destination<'_, T>,
    ) -> Result<ResponseHead, Error>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(method = %request.method(), url = %request.url(), "Sending request");
        let mut response = self.http.execute(request).await.map_err(|e| {
            tracing::error!("Failed to send request: {}", e);
            Error::Transport(e)
        })?;
        let head = ResponseHead::from(&response);

        let result = handle_response(&mut response, &head, destination).await;
        drain(&mut response).await;
        result.map(|()| head)
    }

    async fn get<T>(&self, ctx: &Context, request: reqwest::Request) -> Result<Reply<T>, Error>
    where
        T: DeserializeOwned + Default,
    {
        let mut data = T::default();
        let response = self
            .execute(ctx, request, Destination::Typed(&mut data))
            .await?;
        Ok(Reply { data, response })
    }

    /// Fetches quota, usage, and system folder locations of the user's Disk.
    pub async fn get_disk(&self, ctx: &Context) -> Result<Reply<Disk>, Error> {
        let request = self.new_request(Method::GET, "disk")?;
        self.get(ctx, request).await
    }

    /// Fetches metainformation about a file or folder.
    ///
    /// `path` is relative to the Disk root (`disk:/foo` or `/foo`); Trash entries use
    /// `trash:/`. For folders, [`Resource::embedded`] holds the listing selected by
    /// `query`.
    pub async fn get_resource(
        &self,
        ctx: &Context,
        path: &str,
        query: &ResourceQuery,
    ) -> Result<Reply<Resource>, Error> {
        let mut request = self.new_request(Method::GET, "disk/resources")?;
        let mut url = request.url().clone();
        url.query_pairs_mut().append_pair("path", path);
        *request.url_mut() = query.add_to_url(&url);
        self.get(ctx, request).await
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, Error> {
    let mut url = Url::parse(base_url).map_err(|e| {
        tracing::error!("Invalid base URL {}: {}", base_url, e);
        Error::InvalidBaseUrl(format!("{}: {}", base_url, e))
    })?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidBaseUrl(base_url.to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn authorization_header(access_token: &str) -> Result<HeaderValue, Error> {
    let mut value =
        HeaderValue::from_str(&format!("OAuth {}", access_token)).map_err(|_| Error::InvalidToken)?;
    value.set_sensitive(true);
    Ok(value)
}

/// Rejects relative paths that would not resolve to a path under the API root.
fn validate_path(path: &str) -> Result<(), Error> {
    let invalid = |reason| {
        Err(Error::InvalidPath {
            path: path.to_string(),
            reason,
        })
    };

    if path.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return invalid("whitespace and control characters are not allowed");
    }
    if path.contains(|c: char| c == '?' || c == '#') {
        return invalid("query and fragment are not allowed");
    }
    let first_segment = path.trim_start_matches('/').split('/').next().unwrap_or_default();
    if first_segment.contains(':') {
        return invalid("first path segment cannot contain a colon");
    }
    let bytes = path.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b != b'%' {
            continue;
        }
        let escape_ok = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !escape_ok {
            return invalid("malformed percent escape");
        }
    }
    Ok(())
}

async fn handle_response<T>(
    response: &mut reqwest::Response,
    head: &ResponseHead,
    destination: Destination<'_, T>,
) -> Result<(), Error>
where
    T: DeserializeOwned,
{
    check_response(response, head).await?;

    match destination {
        Destination::Discard => Ok(()),
        Destination::Raw(writer) => copy_body(response, head, writer).await,
        Destination::Typed(target) => {
            let body = read_body(response).await.map_err(|source| {
                tracing::error!("Failed to read response body: {}", source);
                Error::Body {
                    source,
                    response: head.clone(),
                }
            })?;
            decode_into(&body, target).map_err(|source| {
                tracing::error!("Failed to parse response: {} | body: {}", source, truncate_body(&body));
                Error::Decode {
                    source,
                    response: head.clone(),
                }
            })
        }
    }
}

/// Turns a status of 400 or above into [`Error::Api`].
async fn check_response(response: &mut reqwest::Response, head: &ResponseHead) -> Result<(), Error> {
    if head.status.as_u16() < 400 {
        return Ok(());
    }

    // An unreadable or non-JSON body leaves the error unclassified.
    let mut api_error = ApiError::default();
    if let Ok(body) = read_body_limited(response, ERROR_BODY_LIMIT).await {
        decode_into(&body, &mut api_error).ok();
    }
    tracing::warn!(
        status = head.status.as_u16(),
        code = %api_error.code,
        "Request failed: {}",
        api_error
    );
    Err(Error::Api {
        source: api_error,
        response: head.clone(),
    })
}

fn decode_into<T>(body: &[u8], target: &mut T) -> Result<(), serde_json::Error>
where
    T: DeserializeOwned,
{
    match serde_json::Deserializer::from_slice(body)
        .into_iter::<T>()
        .next()
    {
        Some(decoded) => {
            *target = decoded?;
            Ok(())
        }
        None => Ok(()),
    }
}

async fn copy_body(
    response: &mut reqwest::Response,
    head: &ResponseHead,
    writer: &mut (dyn AsyncWrite + Unpin + Send),
) -> Result<(), Error> {
    let sink_error = |source| Error::Sink {
        source,
        response: head.clone(),
    };

    while let Some(chunk) = response.chunk().await.map_err(|source| Error::Body {
        source,
        response: head.clone(),
    })? {
        writer.write_all(&chunk).await.map_err(sink_error)?;
    }
    writer.flush().await.map_err(sink_error)
}

async fn read_body(response: &mut reqwest::Response) -> Result<Vec<u8>, reqwest::Error> {
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Reads chunks until `limit` bytes have been collected or the body ends.
async fn read_body_limited(
    response: &mut reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, reqwest::Error> {
    let mut body = Vec::new();
    while body.len() < limit {
        match response.chunk().await? {
            Some(chunk) => body.extend_from_slice(&chunk),
            None => break,
        }
    }
    Ok(body)
}

/// Consumes what is left of the body, up to [`DRAIN_LIMIT`] bytes.
///
/// No further chunk is requested once the limit is reached. A remainder known
/// to be larger than the limit is left alone.
async fn drain(response: &mut reqwest::Response) {
    if response
        .content_length()
        .is_some_and(|remaining| remaining > DRAIN_LIMIT as u64)
    {
        return;
    }
    let mut drained = 0;
    while drained < DRAIN_LIMIT {
        match response.chunk().await {
            Ok(Some(chunk)) => drained += chunk.len(),
            _ => break,
        }
    }
}

fn truncate_body(body: &[u8]) -> String {
    const MAX: usize = 2000;
    let text = String::from_utf8_lossy(body);
    if text.len() <= MAX {
        text.into_owned()
    } else {
        let mut end = MAX;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &text[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug, Default, PartialEq, serde::Deserialize)]
    struct Foo {
        #[serde(rename = "A")]
        a: String,
    }

    #[test]
    fn decode_into_empty_body_leaves_target() {
        let mut foo = Foo {
            a: "untouched".to_string(),
        };
        decode_into(b"", &mut foo).unwrap();
        decode_into(b"  \n", &mut foo).unwrap();
        assert_eq!(foo.a, "untouched");
    }

    #[test]
    fn decode_into_reads_first_value_only() {
        let mut foo = Foo::default();
        decode_into(br#"{"A":"a"} {"A":"b"}"#, &mut foo).unwrap();
        assert_eq!(foo.a, "a");
    }

    #[test]
    fn decode_into_reports_invalid_json() {
        let mut foo = Foo::default();
        assert!(decode_into(b"{not valid json}", &mut foo).is_err());
    }

    #[test]
    fn validate_path_accepts_plain_segments() {
        assert!(validate_path("disk").is_ok());
        assert!(validate_path("disk/resources").is_ok());
        assert!(validate_path("/").is_ok());
        assert!(validate_path("disk/%D0%B0").is_ok());
    }

    #[test]
    fn validate_path_rejects_malformed_paths() {
        for path in [":", "/:", "a b", "disk?x=1", "disk#frag", "disk/%zz", "disk/%4"] {
            assert!(
                matches!(validate_path(path), Err(Error::InvalidPath { .. })),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let url = parse_base_url("http://localhost:8080/proxy").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/proxy/");
    }

    #[test]
    fn base_url_must_be_absolute() {
        assert!(matches!(
            parse_base_url("cloud-api.yandex.net"),
            Err(Error::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            parse_base_url("mailto:someone@example.com"),
            Err(Error::InvalidBaseUrl(_))
        ));
    }

    fn streamed_response(chunks: usize, chunk_len: usize) -> (reqwest::Response, Arc<AtomicUsize>) {
        let polled = Arc::new(AtomicUsize::new(0));
        let counter = polled.clone();
        let stream = futures::stream::iter((0..chunks).map(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, std::io::Error>(vec![b'x'; chunk_len])
        }));
        let response = http::Response::new(reqwest::Body::wrap_stream(stream));
        (reqwest::Response::from(response), polled)
    }

    #[tokio::test]
    async fn drain_stops_at_limit() {
        let (mut response, polled) = streamed_response(8, 300);
        drain(&mut response).await;
        assert_eq!(polled.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn drain_reads_short_remainder_to_the_end() {
        let (mut response, polled) = streamed_response(3, 100);
        drain(&mut response).await;
        assert_eq!(polled.load(Ordering::SeqCst), 3);
        assert!(response.chunk().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn drain_skips_known_large_remainder() {
        let body = reqwest::Body::from(vec![b'x'; 4096]);
        let mut response = reqwest::Response::from(http::Response::new(body));
        drain(&mut response).await;
        let rest = response.chunk().await.unwrap().unwrap();
        assert_eq!(rest.len(), 4096);
    }

    #[tokio::test]
    async fn read_body_limited_stops_after_limit() {
        let (mut response, polled) = streamed_response(10, 1000);
        let body = read_body_limited(&mut response, 2500).await.unwrap();
        assert_eq!(body.len(), 3000);
        assert_eq!(polled.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "ж".repeat(1500);
        let truncated = truncate_body(body.as_bytes());
        assert!(truncated.ends_with("...[truncated]"));
    }
}
