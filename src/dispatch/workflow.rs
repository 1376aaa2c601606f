use super::client::{DecodedImage, MlClient};
use super::{DispatchError, Operation};
use crate::upload::SelectedFile;
use derivative::Derivative;
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WorkflowStatus {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed(String),
}

/// Most recent successful response. `generation` changes every time a new
/// image arrives so the UI knows when to rebuild its texture.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct PreviewImage {
    pub generation: u64,
    pub size: [usize; 2],
    #[derivative(Debug = "ignore")]
    pub rgba: Vec<u8>,
    #[derivative(Debug = "ignore")]
    pub bytes: Vec<u8>,
}

type Outcome = Result<DecodedImage, DispatchError>;

/// Sends the held file to the ML service and tracks what the preview panel
/// should show. Every send runs on its own thread; outcomes are applied in
/// the order they settle.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct DispatchWorkflow {
    client: MlClient,
    status: WorkflowStatus,
    preview: Option<PreviewImage>,
    error: Option<String>,
    generation: u64,
    outstanding: usize,
    #[derivative(Debug = "ignore")]
    outcome_sender: Sender<Outcome>,
    #[derivative(Debug = "ignore")]
    outcome_receiver: Receiver<Outcome>,
}

impl DispatchWorkflow {
    pub fn new(client: MlClient) -> Self {
        let (outcome_sender, outcome_receiver) = mpsc::channel();
        Self {
            client,
            status: WorkflowStatus::Idle,
            preview: None,
            error: None,
            generation: 0,
            outstanding: 0,
            outcome_sender,
            outcome_receiver,
        }
    }

    pub fn status(&self) -> &WorkflowStatus {
        &self.status
    }

    pub fn is_in_flight(&self) -> bool {
        self.status == WorkflowStatus::InFlight
    }

    /// True while any spawned request has not been polled back yet, even
    /// after an earlier outcome already cleared InFlight.
    pub fn has_outstanding(&self) -> bool {
        self.outstanding > 0
    }

    pub fn client(&self) -> &MlClient {
        &self.client
    }

    pub fn preview(&self) -> Option<&PreviewImage> {
        self.preview.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
        if matches!(self.status, WorkflowStatus::Failed(_)) {
            self.status = WorkflowStatus::Idle;
        }
    }

    /// Drops preview and error after the held file changed. A request that
    /// is still running is left alone and will overwrite both when it settles.
    pub fn reset_preview(&mut self) {
        self.preview = None;
        self.clear_error();
        if self.status == WorkflowStatus::Succeeded {
            self.status = WorkflowStatus::Idle;
        }
    }

    /// Returns false when validation failed and no request was started.
    pub fn send(&mut self, file: Option<&SelectedFile>, operation: Option<Operation>) -> bool {
        let (file, operation) = match (file, operation) {
            (Some(file), Some(operation)) => (file.clone(), operation),
            _ => {
                let e = DispatchError::Validation;
                warn!("Send rejected: {}", e);
                let message = e.user_message();
                self.error = Some(message.clone());
                // A request that is already running keeps the spinner.
                if self.status != WorkflowStatus::InFlight {
                    self.status = WorkflowStatus::Failed(message);
                }
                return false;
            }
        };

        self.status = WorkflowStatus::InFlight;
        self.error = None;

        info!("Dispatching '{}' for '{}'", file.name, operation);

        self.outstanding += 1;
        let client = self.client.clone();
        let sender = self.outcome_sender.clone();

        std::thread::spawn(move || {
            let outcome = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt.block_on(client.dispatch(operation, &file)),
                Err(e) => Err(DispatchError::Transport(e.to_string())),
            };
            // The receiver only goes away with the window.
            let _ = sender.send(outcome);
        });

        true
    }

    /// Applies every outcome that settled since the last call. Returns true
    /// if anything changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.outcome_receiver.try_recv() {
            changed = true;
            self.outstanding = self.outstanding.saturating_sub(1);
            match outcome {
                Ok(image) => self.succeed(image),
                Err(e) => self.fail(e),
            }
        }
        changed
    }

    fn succeed(&mut self, image: DecodedImage) {
        self.generation += 1;
        info!(
            "Received {}x{} preview image (generation {})",
            image.size[0], image.size[1], self.generation
        );
        self.preview = Some(PreviewImage {
            generation: self.generation,
            size: image.size,
            rgba: image.rgba,
            bytes: image.bytes,
        });
        self.error = None;
        self.status = WorkflowStatus::Succeeded;
    }

    fn fail(&mut self, e: DispatchError) {
        warn!("Dispatch failed: {}", e);
        let message = e.user_message();
        self.error = Some(message.clone());
        self.status = WorkflowStatus::Failed(message);
    }
}

#[cfg(test)]
impl DispatchWorkflow {
    /// Polls until nothing is in flight or the timeout expires.
    pub(crate) fn wait_settled(&mut self, timeout: std::time::Duration) {
        let deadline = std::time::Instant::now() + timeout;
        loop {
            self.poll();
            if !self.is_in_flight() || std::time::Instant::now() >= deadline {
                return;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
    }
}
