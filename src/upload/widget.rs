use crate::upload::types::{declared_mime, AcceptedMime, CandidateFile, SelectedFile};
use eframe::egui::DroppedFile;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Single-slot file holder behind the upload card.
#[derive(Debug, Default)]
pub struct UploadWidget {
    file: Option<SelectedFile>,
}

impl UploadWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    /// Keeps the first candidate with an accepted MIME type, replacing any
    /// earlier selection. Returns false and leaves the slot untouched when
    /// nothing in the batch is accepted.
    pub fn submit(&mut self, candidates: Vec<CandidateFile>) -> bool {
        let total = candidates.len();
        let accepted = candidates.into_iter().find_map(|candidate| {
            match AcceptedMime::from_mime(&candidate.mime) {
                Some(mime) => Some(SelectedFile {
                    name: candidate.name,
                    mime,
                    bytes: candidate.bytes,
                }),
                None => {
                    debug!(
                        "Dropping '{}' with unsupported type {}",
                        candidate.name, candidate.mime
                    );
                    None
                }
            }
        });

        match accepted {
            Some(file) => {
                info!("Selected file '{}' ({}, {} bytes)", file.name, file.mime, file.size());
                self.file = Some(file);
                true
            }
            None => {
                debug!("No acceptable file among {} candidates", total);
                false
            }
        }
    }

    pub fn remove(&mut self) {
        if let Some(file) = self.file.take() {
            info!("Removed file '{}'", file.name);
        }
    }
}

pub fn candidate_from_path(path: &Path) -> Result<CandidateFile, String> {
    let name = path
        .file_name()
        .ok_or("Invalid filename")?
        .to_string_lossy()
        .to_string();

    let bytes = fs::read(path).map_err(|e| format!("Failed to read file: {}", e))?;

    Ok(CandidateFile {
        name,
        mime: declared_mime(path).to_string(),
        bytes,
    })
}

/// Turns files dropped on the window into candidates. Files that can't be
/// read are skipped like any other rejected file.
pub fn candidates_from_dropped(dropped: &[DroppedFile]) -> Vec<CandidateFile> {
    let mut candidates = Vec::new();

    for file in dropped {
        if let Some(bytes) = &file.bytes {
            let name = if file.name.is_empty() {
                "dropped_file".to_string()
            } else {
                file.name.clone()
            };
            candidates.push(CandidateFile {
                mime: declared_mime(Path::new(&name)).to_string(),
                name,
                bytes: bytes.to_vec(),
            });
            continue;
        }

        if let Some(path) = &file.path {
            match candidate_from_path(path) {
                Ok(candidate) => candidates.push(candidate),
                Err(e) => warn!("Skipping dropped file {}: {}", path.display(), e),
            }
        }
    }

    candidates
}
