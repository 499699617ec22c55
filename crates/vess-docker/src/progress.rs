//! Streamed build progress.
//!
//! The engine answers a build with newline-delimited JSON objects. Each line
//! carries build output (`stream`), a pull/push status, the built image ID
//! (`aux`), or a terminal error.

use serde::Deserialize;
use vess_common::error::Result;

#[derive(Debug, Deserialize)]
struct RawMessage {
    stream: Option<String>,
    status: Option<String>,
    id: Option<String>,
    progress: Option<String>,
    error: Option<String>,
    #[serde(rename = "errorDetail")]
    error_detail: Option<ErrorDetail>,
    aux: Option<Aux>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Aux {
    #[serde(rename = "ID")]
    id: Option<String>,
}

/// One decoded progress message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    /// Output of a build step.
    Stream(String),
    /// Layer pull or push status.
    Status {
        /// Layer or image the status refers to.
        id: Option<String>,
        /// Status text.
        status: String,
        /// Progress bar, if any.
        progress: Option<String>,
    },
    /// The ID of the built image.
    ImageId(String),
    /// The build failed.
    Error(String),
}

impl BuildEvent {
    /// Decodes one line of the progress stream.
    ///
    /// Blank lines and messages carrying nothing recognizable yield `None`.
    ///
    /// # Errors
    ///
    /// Returns `VessError::Serialization` if the line is not JSON.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let raw: RawMessage = serde_json::from_str(line)?;

        if let Some(error) = raw.error {
            let detail = raw.error_detail.and_then(|d| d.message);
            return Ok(Some(Self::Error(detail.unwrap_or(error))));
        }
        if let Some(id) = raw.aux.and_then(|aux| aux.id) {
            return Ok(Some(Self::ImageId(id)));
        }
        if let Some(stream) = raw.stream {
            return Ok(Some(Self::Stream(stream)));
        }
        Ok(raw.status.map(|status| Self::Status {
            id: raw.id,
            status,
            progress: raw.progress,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_stream_output() {
        let event = BuildEvent::parse(r#"{"stream":"Step 1/3 : FROM php:8.3-fpm\n"}"#)
            .expect("parse")
            .expect("event");
        assert_eq!(event, BuildEvent::Stream("Step 1/3 : FROM php:8.3-fpm\n".into()));
    }

    #[test]
    fn parse_status_with_progress() {
        let line = r#"{"status":"Downloading","progressDetail":{"current":1,"total":2},"progress":"[=>  ]","id":"a1b2"}"#;
        let event = BuildEvent::parse(line).expect("parse").expect("event");
        assert_eq!(
            event,
            BuildEvent::Status {
                id: Some("a1b2".into()),
                status: "Downloading".into(),
                progress: Some("[=>  ]".into()),
            }
        );
    }

    #[test]
    fn parse_aux_image_id() {
        let event = BuildEvent::parse(r#"{"aux":{"ID":"sha256:abc"}}"#)
            .expect("parse")
            .expect("event");
        assert_eq!(event, BuildEvent::ImageId("sha256:abc".into()));
    }

    #[test]
    fn parse_error_prefers_detail_message() {
        let line = r#"{"errorDetail":{"code":1,"message":"exit code 127"},"error":"failed"}"#;
        let event = BuildEvent::parse(line).expect("parse").expect("event");
        assert_eq!(event, BuildEvent::Error("exit code 127".into()));
    }

    #[test]
    fn parse_blank_and_empty_objects() {
        assert!(BuildEvent::parse("   ").expect("parse").is_none());
        assert!(BuildEvent::parse("{}").expect("parse").is_none());
    }

    #[test]
    fn parse_rejects_non_json() {
        assert!(BuildEvent::parse("not json").is_err());
    }
}
