// src/gist/mock.rs
// =============================================================================
// Scripted Fetcher for unit tests.
//
// Responses are queued per URL. Each call pops the front of the queue, but
// the last response stays in place so it keeps answering. Every call is
// recorded so tests can assert on network traffic.
// =============================================================================

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::error::TransportError;
use super::fetch::{FetchResponse, Fetcher};

type Scripted = Result<FetchResponse, TransportError>;

#[derive(Default)]
pub struct StubFetcher {
    routes: Mutex<HashMap<String, VecDeque<Scripted>>>,
    calls: Mutex<Vec<String>>,
    latency: Option<Duration>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call sleeps this long before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Queue a response for `url`.
    pub fn respond(self, url: &str, response: Scripted) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(response);
        self
    }

    pub fn ok(self, url: &str, body: &str) -> Self {
        self.respond(url, Ok(FetchResponse::ok(body)))
    }

    pub fn status(self, url: &str, status: u16) -> Self {
        self.respond(url, Ok(FetchResponse::status(status)))
    }

    pub fn fail(self, url: &str, message: &str) -> Self {
        self.respond(url, Err(TransportError::new(message)))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == url).count()
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn get(&self, url: &str) -> Result<FetchResponse, TransportError> {
        self.calls.lock().unwrap().push(url.to_string());

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let mut routes = self.routes.lock().unwrap();
        match routes.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Err(TransportError::new(format!("no stubbed response for {url}"))),
        }
    }
}
