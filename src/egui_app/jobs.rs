//! Background fetch jobs.
//!
//! Network work runs on spawned threads and reports back over an mpsc
//! channel polled each frame. Every dispatched request carries a
//! monotonically increasing id; only the settlement of the most recently
//! dispatched request may be applied, so a superseded response can never
//! overwrite newer state.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;

use url::Url;

use crate::scrape::{self, FetchError};

/// Messages sent back to the UI thread when background work settles.
pub enum JobMessage {
    /// A README fetch settled.
    ReadmeFetched(ReadmeFetchResult),
}

/// Settlement of a single README fetch.
#[derive(Debug)]
pub struct ReadmeFetchResult {
    /// Id assigned when the fetch was dispatched.
    pub request_id: u64,
    /// The fetched README text, or the failure that ended the request.
    pub result: Result<String, FetchError>,
}

/// Owns the settlement channel and tracks the latest outstanding request.
pub struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    next_request_id: u64,
    latest_request_id: Option<u64>,
}

impl Default for ControllerJobs {
    fn default() -> Self {
        Self::new()
    }
}

impl ControllerJobs {
    /// Create the jobs hub with a fresh settlement channel.
    pub fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            next_request_id: 1,
            latest_request_id: None,
        }
    }

    /// Drain one pending settlement message, if any.
    pub fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    /// Sender for injecting settlement messages (used by workers and tests).
    pub fn message_sender(&self) -> Sender<JobMessage> {
        self.message_tx.clone()
    }

    /// Dispatch a README fetch on a worker thread, superseding any prior
    /// outstanding request. Returns the new request id.
    pub fn begin_readme_fetch(&mut self, endpoint: Url, repo_url: String) -> u64 {
        let request_id = self.next_request_id;
        self.next_request_id = self.next_request_id.wrapping_add(1).max(1);
        self.latest_request_id = Some(request_id);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = scrape::fetch_readme(&endpoint, &repo_url);
            let _ = tx.send(JobMessage::ReadmeFetched(ReadmeFetchResult {
                request_id,
                result,
            }));
        });
        request_id
    }

    /// Whether `request_id` is the most recently dispatched fetch.
    pub fn is_latest_fetch(&self, request_id: u64) -> bool {
        self.latest_request_id == Some(request_id)
    }

    /// Mark the outstanding fetch as settled.
    pub fn clear_fetch(&mut self, request_id: u64) {
        if self.latest_request_id == Some(request_id) {
            self.latest_request_id = None;
        }
    }

    /// Whether a fetch is outstanding.
    pub fn fetch_in_progress(&self) -> bool {
        self.latest_request_id.is_some()
    }
}
