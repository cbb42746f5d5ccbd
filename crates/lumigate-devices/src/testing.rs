//! Recording transport for tests.
//!
//! Captures every [`VendorRequest`] and answers with scripted responses.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::{RelayError, RelayResult};
use crate::transport::{Transport, VendorRequest};

/// A scripted reply.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Status(u16, String),
    Unreachable,
}

/// Fake transport that records requests.
///
/// Scripted replies are consumed in order; once exhausted, every call answers
/// with the default reply.
pub struct RecordingTransport {
    requests: Mutex<Vec<VendorRequest>>,
    replies: Mutex<VecDeque<Reply>>,
    default_reply: Reply,
}

impl RecordingTransport {
    /// Answers every call with a vendor-style success body.
    pub fn ok() -> Self {
        Self::with_default(Reply::Json(json!({"code": 200, "msg": "success"})))
    }

    pub fn with_default(default_reply: Reply) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            replies: Mutex::new(VecDeque::new()),
            default_reply,
        }
    }

    /// Queue a reply for the next unanswered call.
    pub fn push_reply(&self, reply: Reply) -> &Self {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(reply);
        self
    }

    /// Snapshot of the requests seen so far.
    pub fn requests(&self) -> Vec<VendorRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Bodies of the requests seen so far (`null` for body-less calls).
    pub fn bodies(&self) -> Vec<Value> {
        self.requests()
            .into_iter()
            .map(|r| r.body.unwrap_or(Value::Null))
            .collect()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: VendorRequest) -> RelayResult<Value> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);
        let reply = self
            .replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| self.default_reply.clone());

        match reply {
            Reply::Json(value) => Ok(value),
            Reply::Status(status, body) => Err(RelayError::Status { status, body }),
            Reply::Unreachable => Err(RelayError::Transport("connection refused".to_string())),
        }
    }
}
