//! Blocking Docker Engine API client.
//!
//! Talks HTTP to the endpoint named by `DOCKER_HOST`: the local Unix socket
//! (`unix://`, the default) or a TCP endpoint (`tcp://`, `http://`,
//! `https://`).

use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use serde::Deserialize;
use vess_common::constants::{DEFAULT_DOCKER_HOST, DOCKER_HOST_ENV};
use vess_common::error::{Result, VessError};

use crate::progress::BuildEvent;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
/// How often a quiet build re-checks the cancel flag.
const CANCEL_POLL: Duration = Duration::from_millis(250);
/// Authority used for requests sent over a Unix socket; never resolved.
const SOCKET_BASE_URL: &str = "http://localhost";

/// Options for [`DockerClient::build`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Repository tag applied to the built image.
    pub tag: String,
    /// Ignore the build cache.
    pub no_cache: bool,
}

/// One entry of the engine's image list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageSummary {
    /// Content-addressed image ID.
    pub id: String,
    /// Tags pointing at the image.
    #[serde(default)]
    pub repo_tags: Option<Vec<String>>,
    /// Image size in bytes.
    pub size: u64,
    /// Creation time, seconds since the Unix epoch.
    pub created: i64,
}

impl ImageSummary {
    /// Tags, or `<none>` for an untagged image.
    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        match self.repo_tags.as_deref() {
            Some(tags) if !tags.is_empty() => tags.iter().map(String::as_str).collect(),
            _ => vec!["<none>"],
        }
    }

    /// The ID without its `sha256:` prefix, truncated to 12 characters.
    #[must_use]
    pub fn short_id(&self) -> &str {
        let id = self.id.strip_prefix("sha256:").unwrap_or(&self.id);
        id.get(..12).unwrap_or(id)
    }
}

/// Result of removing one image reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RemovedImage {
    /// Tag that was removed.
    pub untagged: Option<String>,
    /// Image or layer that was deleted.
    pub deleted: Option<String>,
}

/// Where the engine listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Local Unix socket.
    Unix(PathBuf),
    /// HTTP base URL without a trailing slash.
    Tcp(String),
}

impl Endpoint {
    /// Parses a `DOCKER_HOST` value.
    ///
    /// # Errors
    ///
    /// Returns `VessError::Config` for an unsupported scheme or an empty
    /// socket path.
    pub fn parse(host: &str) -> Result<Self> {
        let host = host.trim();
        if let Some(path) = host.strip_prefix("unix://") {
            if path.is_empty() {
                return Err(VessError::Config {
                    message: format!("docker endpoint has no socket path: {host}"),
                });
            }
            return Ok(Self::Unix(PathBuf::from(path)));
        }
        let host = host.trim_end_matches('/');
        if let Some(rest) = host.strip_prefix("tcp://") {
            return Ok(Self::Tcp(format!("http://{rest}")));
        }
        if host.starts_with("http://") || host.starts_with("https://") {
            return Ok(Self::Tcp(host.to_owned()));
        }
        Err(VessError::Config {
            message: format!(
                "unsupported docker endpoint: {host} (must be unix://, tcp://, http:// or https://)"
            ),
        })
    }

    fn base_url(&self) -> &str {
        match self {
            Self::Unix(_) => SOCKET_BASE_URL,
            Self::Tcp(url) => url,
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unix(path) => write!(f, "unix://{}", path.display()),
            Self::Tcp(url) => f.write_str(url),
        }
    }
}

/// Picks the configured `DOCKER_HOST`, falling back to the local socket.
fn host_or_default(configured: Option<String>) -> String {
    configured
        .filter(|host| !host.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DOCKER_HOST.to_owned())
}

/// Client for one Docker Engine endpoint.
#[derive(Debug, Clone)]
pub struct DockerClient {
    endpoint: Endpoint,
    http: reqwest::blocking::Client,
}

impl DockerClient {
    /// Connects to the endpoint in `DOCKER_HOST`, or the local socket.
    ///
    /// # Errors
    ///
    /// Returns `VessError::Config` for an unsupported endpoint and
    /// `VessError::Docker` if the HTTP client cannot be created.
    pub fn from_env() -> Result<Self> {
        Self::new(&host_or_default(std::env::var(DOCKER_HOST_ENV).ok()))
    }

    /// Connects to `host` (`unix://`, `tcp://`, `http://`, or `https://`).
    ///
    /// # Errors
    ///
    /// Returns `VessError::Config` for an unsupported endpoint and
    /// `VessError::Docker` if the HTTP client cannot be created.
    pub fn new(host: &str) -> Result<Self> {
        let endpoint = Endpoint::parse(host)?;
        // Builds stream for as long as they run, so only connecting is bounded.
        let builder = reqwest::blocking::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(None::<Duration>);
        let http = with_transport(builder, &endpoint)?.build().map_err(http_err)?;
        tracing::debug!(endpoint = %endpoint, "docker client created");
        Ok(Self { endpoint, http })
    }

    /// The engine endpoint, in `DOCKER_HOST` form.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.endpoint.base_url())
    }

    /// Checks that the engine answers.
    ///
    /// # Errors
    ///
    /// Returns `VessError::Docker` if the engine is unreachable or unhealthy.
    pub fn ping(&self) -> Result<()> {
        let response = self
            .http
            .get(self.url("/_ping"))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .map_err(http_err)?;
        check_status(response).map(|_| ())
    }

    /// Builds an image from a packed context and streams progress to
    /// `on_event`.
    ///
    /// `cancel` is polled while waiting for progress, so a build stuck in a
    /// silent step is still abandoned promptly once it is set.
    ///
    /// # Errors
    ///
    /// Returns `VessError::Docker` if the request fails, the engine reports a
    /// build error, or the build is cancelled.
    pub fn build(
        &self,
        context: Vec<u8>,
        options: &BuildOptions,
        cancel: &AtomicBool,
        on_event: impl FnMut(&BuildEvent),
    ) -> Result<Option<String>> {
        tracing::info!(tag = %options.tag, no_cache = options.no_cache, "starting image build");
        let nocache = if options.no_cache { "1" } else { "0" };
        let response = self
            .http
            .post(self.url("/build"))
            .query(&[("t", options.tag.as_str()), ("nocache", nocache), ("rm", "1")])
            .header(reqwest::header::CONTENT_TYPE, "application/x-tar")
            .body(context)
            .send()
            .map_err(http_err)?;
        let response = check_status(response)?;

        let image_id = follow_build(response, cancel, on_event)?;
        tracing::info!(tag = %options.tag, image = ?image_id, "image build finished");
        Ok(image_id)
    }

    /// Lists images known to the engine.
    ///
    /// # Errors
    ///
    /// Returns `VessError::Docker` if the request fails.
    pub fn list_images(&self) -> Result<Vec<ImageSummary>> {
        let response = self
            .http
            .get(self.url("/images/json"))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .map_err(http_err)?;
        check_status(response)?.json().map_err(http_err)
    }

    /// Removes an image by ID or reference.
    ///
    /// # Errors
    ///
    /// Returns `VessError::Docker` if the request fails or the engine refuses,
    /// e.g. because a container still uses the image and `force` is unset.
    pub fn remove_image(&self, image: &str, force: bool) -> Result<Vec<RemovedImage>> {
        tracing::info!(image, force, "removing image");
        let response = self
            .http
            .delete(self.url(&format!("/images/{image}")))
            .query(&[("force", if force { "true" } else { "false" })])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .map_err(http_err)?;
        check_status(response)?.json().map_err(http_err)
    }
}

#[cfg(unix)]
#[allow(clippy::unnecessary_wraps)]
fn with_transport(
    builder: reqwest::blocking::ClientBuilder,
    endpoint: &Endpoint,
) -> Result<reqwest::blocking::ClientBuilder> {
    Ok(match endpoint {
        Endpoint::Unix(path) => builder.unix_socket(path.clone()),
        Endpoint::Tcp(_) => builder,
    })
}

#[cfg(not(unix))]
fn with_transport(
    builder: reqwest::blocking::ClientBuilder,
    endpoint: &Endpoint,
) -> Result<reqwest::blocking::ClientBuilder> {
    match endpoint {
        Endpoint::Unix(_) => Err(VessError::Config {
            message: format!("unix socket endpoints are unavailable on this platform: {endpoint}"),
        }),
        Endpoint::Tcp(_) => Ok(builder),
    }
}

/// Reads the progress stream on a worker thread and hands each event to
/// `on_event`, checking `cancel` every [`CANCEL_POLL`] even when the engine
/// is silent.
fn follow_build(
    body: impl Read + Send + 'static,
    cancel: &AtomicBool,
    mut on_event: impl FnMut(&BuildEvent),
) -> Result<Option<String>> {
    let (tx, rx) = mpsc::channel();
    let _reader = std::thread::spawn(move || {
        for line in BufReader::new(body).lines() {
            let failed = line.is_err();
            if tx.send(line).is_err() || failed {
                break;
            }
        }
    });

    let mut image_id = None;
    loop {
        if cancel.load(Ordering::SeqCst) {
            return Err(docker_err("build cancelled".to_owned()));
        }
        let line = match rx.recv_timeout(CANCEL_POLL) {
            Ok(line) => line.map_err(|e| docker_err(format!("reading build output: {e}")))?,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        let Some(event) = BuildEvent::parse(&line)? else {
            continue;
        };
        on_event(&event);
        match event {
            BuildEvent::Error(message) => return Err(docker_err(message)),
            BuildEvent::ImageId(id) => image_id = Some(id),
            BuildEvent::Stream(_) | BuildEvent::Status { .. } => {}
        }
    }
    Ok(image_id)
}

/// Turns a non-success response into an error carrying the engine's message.
fn check_status(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
        .unwrap_or(body);
    Err(docker_err(format!("{status}: {}", message.trim())))
}

fn http_err(e: reqwest::Error) -> VessError {
    docker_err(e.to_string())
}

const fn docker_err(message: String) -> VessError {
    VessError::Docker { message }
}
