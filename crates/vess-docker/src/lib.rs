//! # vess-docker
//!
//! Turns a rendered Dockerfile into an image through the Docker Engine API.
//!
//! Handles:
//! - **Context**: Gzip-compressed tar build contexts.
//! - **Progress**: Decoding of the engine's streamed build messages.
//! - **Client**: Blocking HTTP client for build, list, and remove.
//!
//! Nothing in the resolution engine depends on this crate; it consumes the
//! rendered recipe as an opaque string.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod client;
pub mod context;
pub mod progress;

pub use client::{BuildOptions, DockerClient, Endpoint, ImageSummary};
pub use progress::BuildEvent;
