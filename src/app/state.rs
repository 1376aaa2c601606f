use super::selector::OptionSelector;
use crate::dispatch::{DispatchWorkflow, MlClient, Operation, PreviewImage, WorkflowStatus};
use crate::upload::{CandidateFile, UploadWidget};

pub const PREVIEW_PLACEHOLDER: &str = "Your Image Preview Here";

/// What the preview card should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewView {
    Spinner,
    Image,
    Placeholder,
}

impl PreviewView {
    pub fn project(status: &WorkflowStatus, preview: Option<&PreviewImage>) -> Self {
        match (status, preview) {
            (WorkflowStatus::InFlight, _) => PreviewView::Spinner,
            (_, Some(_)) => PreviewView::Image,
            _ => PreviewView::Placeholder,
        }
    }
}

/// State of the Explore page, one transition function per user event.
#[derive(Debug)]
pub struct ExploreState {
    pub upload: UploadWidget,
    pub selector: OptionSelector,
    pub workflow: DispatchWorkflow,
}

impl ExploreState {
    pub fn new(client: MlClient) -> Self {
        Self {
            upload: UploadWidget::new(),
            selector: OptionSelector::default(),
            workflow: DispatchWorkflow::new(client),
        }
    }

    /// Leaving the page drops the held file, the selection, and the preview.
    /// A request still running reports into the discarded workflow.
    pub fn reset(&mut self) {
        let client = self.workflow.client().clone();
        *self = Self::new(client);
    }

    pub fn on_files(&mut self, candidates: Vec<CandidateFile>) {
        if self.upload.submit(candidates) {
            self.workflow.reset_preview();
        }
    }

    pub fn on_remove_file(&mut self) {
        self.upload.remove();
        self.workflow.reset_preview();
    }

    pub fn on_select(&mut self, operation: Operation) {
        self.selector.select_option(operation);
        self.workflow.clear_error();
    }

    pub fn on_send(&mut self) {
        self.workflow.send(self.upload.file(), self.selector.selected());
    }

    pub fn preview_view(&self) -> PreviewView {
        PreviewView::project(self.workflow.status(), self.workflow.preview())
    }
}
