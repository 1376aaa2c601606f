use std::fmt;
use std::path::Path;

/// MIME types the ML service knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptedMime {
    Csv,
    Png,
    Jpeg,
    Jpg,
}

impl AcceptedMime {
    pub const ALL: [AcceptedMime; 4] = [
        AcceptedMime::Csv,
        AcceptedMime::Png,
        AcceptedMime::Jpeg,
        AcceptedMime::Jpg,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AcceptedMime::Csv => "text/csv",
            AcceptedMime::Png => "image/png",
            AcceptedMime::Jpeg => "image/jpeg",
            AcceptedMime::Jpg => "image/jpg",
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|accepted| accepted.as_str() == mime)
    }
}

impl fmt::Display for AcceptedMime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extensions offered in the file picker.
pub const PICKER_EXTENSIONS: [&str; 4] = ["csv", "png", "jpeg", "jpg"];

/// Declared type of a native file, the same way a browser fills `File.type`.
pub fn declared_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("csv") => "text/csv",
        Some("png") => "image/png",
        Some("jpeg") | Some("jpg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// A file offered to the upload widget, not yet validated.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// The single file held by the upload widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime: AcceptedMime,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn declared_mime_follows_extension() {
        assert_eq!(declared_mime(&PathBuf::from("shapes.CSV")), "text/csv");
        assert_eq!(declared_mime(&PathBuf::from("a/b/frag.png")), "image/png");
        assert_eq!(declared_mime(&PathBuf::from("photo.jpg")), "image/jpeg");
        assert_eq!(declared_mime(&PathBuf::from("photo.jpeg")), "image/jpeg");
        assert_eq!(
            declared_mime(&PathBuf::from("curves.svg")),
            "application/octet-stream"
        );
        assert_eq!(
            declared_mime(&PathBuf::from("Makefile")),
            "application/octet-stream"
        );
    }

    #[test]
    fn only_four_mime_types_are_accepted() {
        assert_eq!(AcceptedMime::from_mime("text/csv"), Some(AcceptedMime::Csv));
        assert_eq!(AcceptedMime::from_mime("image/jpg"), Some(AcceptedMime::Jpg));
        assert_eq!(AcceptedMime::from_mime(" IMAGE/PNG "), Some(AcceptedMime::Png));
        assert_eq!(AcceptedMime::from_mime("image/gif"), None);
        assert_eq!(AcceptedMime::from_mime("application/json"), None);
        assert_eq!(AcceptedMime::from_mime(""), None);
    }
}
