//! Maintains form state and bridges the scrape client to the egui UI.

use std::sync::mpsc::TryRecvError;

use egui::Context;
use url::Url;

use crate::config::{AppConfig, ConfigError};
use crate::egui_app::jobs::{ControllerJobs, JobMessage, ReadmeFetchResult};
use crate::egui_app::state::FormState;

/// Owns the form state and maps fetch settlements onto it.
///
/// Lifecycle per fetch: Idle -> Loading -> (Success | Failure) -> Idle.
pub struct FormController {
    /// Form state rendered each frame. The URL field and, when editing is
    /// allowed, the README editor bind to it mutably.
    pub state: FormState,
    config: AppConfig,
    endpoint: Url,
    jobs: ControllerJobs,
}

impl FormController {
    /// Create a controller for the given configuration.
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        let endpoint = config.endpoint_url()?;
        Ok(Self {
            state: FormState::default(),
            config,
            endpoint,
            jobs: ControllerJobs::new(),
        })
    }

    /// Whether the fetched README may be edited in place.
    pub fn allow_edit(&self) -> bool {
        self.config.allow_edit
    }

    /// Whether the copy-to-clipboard action is offered.
    pub fn allow_copy(&self) -> bool {
        self.config.allow_copy
    }

    /// Start fetching a README for the current URL.
    ///
    /// Clears any previous result and error synchronously, before the
    /// request is dispatched. A fetch started while another is outstanding
    /// supersedes it: the older settlement will be dropped on arrival.
    pub fn begin_fetch(&mut self) {
        self.state.loading = true;
        self.state.error.clear();
        self.state.readme.clear();
        let request_id = self
            .jobs
            .begin_readme_fetch(self.endpoint.clone(), self.state.repo_url.clone());
        tracing::info!(request_id, "Requesting README generation");
    }

    /// Drain settled background work and apply it to the form state.
    ///
    /// Called at the top of every frame.
    pub fn poll_background_jobs(&mut self) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            };
            match message {
                JobMessage::ReadmeFetched(settled) => self.apply_fetch_settlement(settled),
            }
        }
    }

    fn apply_fetch_settlement(&mut self, settled: ReadmeFetchResult) {
        if !self.jobs.is_latest_fetch(settled.request_id) {
            tracing::debug!(
                request_id = settled.request_id,
                "Dropping superseded README fetch settlement"
            );
            return;
        }
        self.jobs.clear_fetch(settled.request_id);
        match settled.result {
            Ok(readme) => {
                self.state.readme = readme;
                self.state.error.clear();
            }
            Err(err) => {
                tracing::error!("README fetch failed: {err}");
                self.state.error = err.display_message();
                self.state.readme.clear();
            }
        }
        self.state.loading = false;
    }

    /// Copy the current README text to the system clipboard and open the
    /// confirmation modal. Does nothing when there is no result to copy.
    ///
    /// Clipboard denial by the platform is not surfaced; the copy is
    /// fire-and-forget.
    pub fn copy_readme_to_clipboard(&mut self, ctx: &Context) {
        if self.state.readme.is_empty() {
            return;
        }
        ctx.copy_text(self.state.readme.clone());
        self.state.copy_ack_open = true;
    }

    /// Close the copy confirmation modal.
    pub fn acknowledge_copy(&mut self) {
        self.state.copy_ack_open = false;
    }

    #[cfg(test)]
    pub(crate) fn jobs_mut(&mut self) -> &mut ControllerJobs {
        &mut self.jobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use std::time::{Duration, Instant};

    fn controller_for(endpoint: &str) -> FormController {
        let config = AppConfig {
            endpoint: endpoint.to_string(),
            ..AppConfig::default()
        };
        FormController::new(config).unwrap()
    }

    fn serve_json_once(status_line: &str, body: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        );
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 2048];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}")
    }

    fn poll_until_settled(controller: &mut FormController) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while controller.state.loading {
            controller.poll_background_jobs();
            assert!(Instant::now() < deadline, "fetch did not settle in time");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn begin_fetch_enters_loading_and_clears_previous_outcome() {
        let mut controller = controller_for(&serve_json_once("200 OK", r#"{"readme":"X"}"#));
        controller.state.readme = "old result".into();
        controller.state.error = "old error".into();
        controller.state.repo_url = "https://github.com/user/repo".into();

        controller.begin_fetch();
        assert!(controller.state.loading);
        assert!(controller.state.readme.is_empty());
        assert!(controller.state.error.is_empty());

        poll_until_settled(&mut controller);
    }

    #[test]
    fn successful_fetch_populates_readme_only() {
        let mut controller = controller_for(&serve_json_once("200 OK", r#"{"readme":"X"}"#));
        controller.state.repo_url = "https://github.com/user/repo".into();

        controller.begin_fetch();
        poll_until_settled(&mut controller);

        assert_eq!(controller.state.readme, "X");
        assert!(controller.state.error.is_empty());
        assert!(!controller.state.loading);
    }

    #[test]
    fn failed_fetch_surfaces_detail_and_clears_readme() {
        let mut controller = controller_for(&serve_json_once(
            "422 Unprocessable Entity",
            r#"{"detail":"bad url"}"#,
        ));
        controller.state.repo_url = "nonsense".into();

        controller.begin_fetch();
        poll_until_settled(&mut controller);

        assert_eq!(controller.state.error, "bad url");
        assert!(controller.state.readme.is_empty());
        assert!(!controller.state.loading);
    }

    #[test]
    fn failure_without_detail_uses_fallback_message() {
        let mut controller = controller_for(&serve_json_once("500 Internal Server Error", "{}"));
        controller.state.repo_url = "https://github.com/user/repo".into();

        controller.begin_fetch();
        poll_until_settled(&mut controller);

        assert_eq!(
            controller.state.error,
            crate::scrape::FALLBACK_ERROR_MESSAGE
        );
    }

    #[test]
    fn superseded_settlement_is_dropped() {
        let mut controller = controller_for("http://127.0.0.1:1");
        let tx = controller.jobs_mut().message_sender();

        // Two dispatches; the first becomes stale immediately.
        controller.begin_fetch();
        controller.begin_fetch();

        tx.send(JobMessage::ReadmeFetched(ReadmeFetchResult {
            request_id: 1,
            result: Ok("stale".into()),
        }))
        .unwrap();
        controller.poll_background_jobs();

        // The stale success must not be applied.
        assert_ne!(controller.state.readme, "stale");

        // The second (real, failing) request still settles normally.
        poll_until_settled(&mut controller);
        assert!(controller.state.readme.is_empty());
        assert_eq!(
            controller.state.error,
            crate::scrape::FALLBACK_ERROR_MESSAGE
        );
    }

    #[test]
    fn copy_requires_a_result_and_opens_acknowledgement() {
        let mut controller = controller_for("http://127.0.0.1:1");
        let ctx = Context::default();

        controller.copy_readme_to_clipboard(&ctx);
        assert!(!controller.state.copy_ack_open);

        controller.state.readme = "content".into();
        controller.copy_readme_to_clipboard(&ctx);
        assert!(controller.state.copy_ack_open);

        controller.acknowledge_copy();
        assert!(!controller.state.copy_ack_open);
    }
}
