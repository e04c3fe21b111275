use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{DataqError, Result};

/// Builds the wire form of a queue address: `[[username:]password@]name`.
///
/// The password, when set, is prepended as `password@`; the username, when
/// set, is prepended in front of that as `username:`. Either part may be
/// present on its own. No escaping is performed, so names containing the
/// delimiter characters (space, `:`, `@`) are the caller's problem.
pub(crate) fn build_queue_uri(
    username: Option<&str>,
    password: Option<&str>,
    queue_name: &str,
) -> String {
    let mut uri = queue_name.to_string();

    if let Some(password) = password {
        uri = format!("{}@{}", password, uri);
    }

    if let Some(username) = username {
        uri = format!("{}:{}", username, uri);
    }

    uri
}

/// Statistics for a single queue, as reported by `STAT <queue>`.
///
/// A typed view over the raw `key:value` mapping; `kind` carries the queue
/// discipline (`fifo` or `filo`) and serializes under the wire name `type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueueStats {
    /// Queue name as registered on the server
    pub name: String,
    /// Queue discipline ("fifo" or "filo")
    #[serde(rename = "type")]
    pub kind: String,
    /// Maximum number of messages the queue holds
    pub size: u64,
    /// Overflow policy ("deny" or "pop")
    pub overflow: String,
    /// Number of messages currently queued
    pub messages: u64,
}

impl QueueStats {
    /// Decodes the raw `STAT <queue>` field mapping into a typed view.
    ///
    /// Fails with [`DataqError::MalformedResponse`] when a field is missing
    /// or a numeric field does not parse.
    pub fn from_info(info: &HashMap<String, String>) -> Result<Self> {
        let field = |key: &str| -> Result<&String> {
            info.get(key).ok_or_else(|| {
                DataqError::MalformedResponse(format!("STAT response missing '{}' field", key))
            })
        };

        let numeric = |key: &str| -> Result<u64> {
            field(key)?.trim().parse::<u64>().map_err(|_| {
                DataqError::MalformedResponse(format!(
                    "STAT field '{}' is not a number: '{}'",
                    key,
                    info[key]
                ))
            })
        };

        Ok(Self {
            name: field("name")?.clone(),
            kind: field("type")?.clone(),
            size: numeric("size")?,
            overflow: field("overflow")?.clone(),
            messages: numeric("messages")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(fields: &[(&str, &str)]) -> HashMap<String, String> {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_bare_queue_name() {
        assert_eq!(build_queue_uri(None, None, "jobs"), "jobs");
    }

    #[test]
    fn test_password_only() {
        assert_eq!(build_queue_uri(None, Some("secret"), "jobs"), "secret@jobs");
    }

    #[test]
    fn test_username_only() {
        assert_eq!(build_queue_uri(Some("alice"), None, "jobs"), "alice:jobs");
    }

    #[test]
    fn test_username_and_password() {
        assert_eq!(
            build_queue_uri(Some("alice"), Some("secret"), "jobs"),
            "alice:secret@jobs"
        );
    }

    #[test]
    fn test_empty_queue_name() {
        // The bare STAT listing uses an empty name; credentials still apply.
        assert_eq!(build_queue_uri(None, None, ""), "");
        assert_eq!(build_queue_uri(None, Some("secret"), ""), "secret@");
        assert_eq!(
            build_queue_uri(Some("alice"), Some("secret"), ""),
            "alice:secret@"
        );
    }

    #[test]
    fn test_no_escaping_is_performed() {
        // Delimiter collisions are passed through untouched.
        assert_eq!(
            build_queue_uri(Some("a:b"), Some("p@w"), "jobs"),
            "a:b:p@w@jobs"
        );
    }

    #[test]
    fn test_queue_stats_from_info() {
        let stats = QueueStats::from_info(&info(&[
            ("name", "jobs"),
            ("type", "fifo"),
            ("size", "10"),
            ("overflow", "deny"),
            ("messages", "3"),
        ]))
        .unwrap();

        assert_eq!(stats.name, "jobs");
        assert_eq!(stats.kind, "fifo");
        assert_eq!(stats.size, 10);
        assert_eq!(stats.overflow, "deny");
        assert_eq!(stats.messages, 3);
    }

    #[test]
    fn test_queue_stats_missing_field() {
        let result = QueueStats::from_info(&info(&[
            ("name", "jobs"),
            ("type", "fifo"),
            ("size", "10"),
            ("overflow", "deny"),
        ]));

        match result {
            Err(DataqError::MalformedResponse(msg)) => {
                assert!(msg.contains("messages"));
            }
            _ => panic!("Expected malformed response error"),
        }
    }

    #[test]
    fn test_queue_stats_non_numeric_field() {
        let result = QueueStats::from_info(&info(&[
            ("name", "jobs"),
            ("type", "fifo"),
            ("size", "lots"),
            ("overflow", "deny"),
            ("messages", "3"),
        ]));

        match result {
            Err(DataqError::MalformedResponse(msg)) => {
                assert!(msg.contains("size"));
                assert!(msg.contains("lots"));
            }
            _ => panic!("Expected malformed response error"),
        }
    }

    #[test]
    fn test_queue_stats_serialization() {
        let stats = QueueStats {
            name: "jobs".to_string(),
            kind: "filo".to_string(),
            size: 100,
            overflow: "pop".to_string(),
            messages: 0,
        };

        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"type\":\"filo\""));
        assert!(json.contains("\"size\":100"));

        let back: QueueStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }
}
