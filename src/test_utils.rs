use std::collections::VecDeque;
use std::sync::Mutex;

use crate::errors::ClientError;
use crate::net::transport::{RawResponse, Transport, WireRequest};

/// Transport that replays queued results and records what it was asked to send.
///
/// Once the queue is drained the last queued response is repeated.
pub(crate) struct ScriptedTransport {
    script: Mutex<VecDeque<Result<RawResponse, ClientError>>>,
    last: Mutex<Option<RawResponse>>,
    sent: Mutex<Vec<WireRequest>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Result<RawResponse, ClientError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(responses: Vec<RawResponse>) -> Self {
        Self::new(responses.into_iter().map(Ok).collect())
    }

    pub fn sent(&self) -> Vec<WireRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: &WireRequest) -> Result<RawResponse, ClientError> {
        self.sent.lock().unwrap().push(request.clone());
        match self.script.lock().unwrap().pop_front() {
            Some(Ok(raw)) => {
                *self.last.lock().unwrap() = Some(raw.clone());
                Ok(raw)
            }
            Some(Err(e)) => Err(e),
            None => Ok(self
                .last
                .lock()
                .unwrap()
                .clone()
                .expect("scripted transport has nothing to replay")),
        }
    }
}

pub(crate) fn raw(status: u16, url: &str, headers: &[(&str, &str)], body: &str) -> RawResponse {
    RawResponse {
        status,
        url: url.to_string(),
        headers: headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        body: body.as_bytes().to_vec(),
    }
}
