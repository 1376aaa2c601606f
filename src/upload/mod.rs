mod types;
mod widget;

pub use types::{AcceptedMime, CandidateFile, SelectedFile, PICKER_EXTENSIONS};
pub use widget::{candidate_from_path, candidates_from_dropped, UploadWidget};
