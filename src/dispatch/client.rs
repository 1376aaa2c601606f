use super::{DispatchError, Operation};
use crate::upload::SelectedFile;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Multipart field the ML service reads the upload from.
pub const FILE_FIELD: &str = "file";

/// Error body the service sends with a 2xx status when processing fails.
#[derive(Deserialize)]
struct ServiceErrorBody {
    error: String,
}

/// Image bytes as received, plus the RGBA pixels decoded from them.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub size: [usize; 2],
    pub rgba: Vec<u8>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct MlClient {
    http: reqwest::Client,
    base_url: Url,
}

impl MlClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: with_trailing_slash(base_url),
        }
    }

    pub fn endpoint(&self, operation: Operation) -> Result<Url, DispatchError> {
        self.base_url
            .join(operation.endpoint_suffix())
            .map_err(|e| {
                warn!(
                    "Cannot build endpoint for '{}' from {}: {}",
                    operation, self.base_url, e
                );
                DispatchError::InvalidOption(operation.label().to_string())
            })
    }

    /// Posts `file` to the endpoint of `operation` and decodes the image it
    /// answers with.
    pub async fn dispatch(
        &self,
        operation: Operation,
        file: &SelectedFile,
    ) -> Result<DecodedImage, DispatchError> {
        let url = self.endpoint(operation)?;

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(file.mime.as_str())?;
        let form = Form::new().part(FILE_FIELD, part);

        info!("Sending '{}' to {}", file.name, url);

        let response = self.http.post(url.clone()).multipart(form).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("{} answered with status {}", url, status);
            return Err(DispatchError::RequestFailed(status));
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("application/json"))
            .unwrap_or(false);

        let body = response.bytes().await?;
        debug!("Received {} bytes from {}", body.len(), url);

        if is_json {
            return Err(match serde_json::from_slice::<ServiceErrorBody>(&body) {
                Ok(payload) => {
                    warn!("ML service reported: {}", payload.error);
                    DispatchError::ServerReported(payload.error)
                }
                Err(e) => DispatchError::InvalidImage(format!("JSON body instead of image: {}", e)),
            });
        }

        decode_image(body.to_vec())
    }
}

fn decode_image(bytes: Vec<u8>) -> Result<DecodedImage, DispatchError> {
    let image = image::load_from_memory(&bytes)
        .map_err(|e| DispatchError::InvalidImage(e.to_string()))?
        .to_rgba8();

    let size = [image.width() as usize, image.height() as usize];
    Ok(DecodedImage {
        size,
        rgba: image.into_raw(),
        bytes,
    })
}

/// Without a trailing slash `Url::join` would replace the last path segment
/// of the base instead of appending to it.
pub fn with_trailing_slash(mut url: Url) -> Url {
    if !url.cannot_be_a_base() && !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{csv_file, png_bytes};
    use mockito::{Matcher, Server};

    fn client_for(server: &Server) -> MlClient {
        MlClient::new(Url::parse(&server.url()).unwrap())
    }

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Runtime::new().unwrap().block_on(future)
    }

    #[test]
    fn endpoints_append_to_base_path() {
        let client = MlClient::new(Url::parse("http://ml.local:5000/api").unwrap());
        assert_eq!(
            client.endpoint(Operation::SymmetryLines).unwrap().as_str(),
            "http://ml.local:5000/api/detect_symmetry_png"
        );

        let client = MlClient::new(Url::parse("http://ml.local:5000").unwrap());
        assert_eq!(
            client.endpoint(Operation::RegularizationCsv).unwrap().as_str(),
            "http://ml.local:5000/regularization_csv"
        );
    }

    #[test]
    fn unusable_base_is_an_invalid_option() {
        let client = MlClient::new(Url::parse("mailto:ml@example.com").unwrap());
        let err = client.endpoint(Operation::RegularizationPng).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidOption(_)));
    }

    #[test]
    fn uploads_file_as_multipart_field() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/regularization_csv")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="file"; filename="isolated.csv""#.to_string()),
                Matcher::Regex("0,0,1.0,2.0".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_body(png_bytes(3, 2))
            .create();

        let image = block_on(client_for(&server).dispatch(Operation::RegularizationCsv, &csv_file()))
            .unwrap();

        mock.assert();
        assert_eq!(image.size, [3, 2]);
        assert_eq!(image.rgba.len(), 3 * 2 * 4);
        assert_eq!(image.bytes, png_bytes(3, 2));
    }

    #[test]
    fn non_success_status_is_request_failed() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/regularization_png")
            .with_status(500)
            .with_body("Traceback (most recent call last): ...")
            .create();

        let err = block_on(client_for(&server).dispatch(Operation::RegularizationPng, &csv_file()))
            .unwrap_err();

        mock.assert();
        assert!(matches!(err, DispatchError::RequestFailed(status) if status.as_u16() == 500));
    }

    #[test]
    fn json_error_body_is_reported() {
        let mut server = Server::new();
        server
            .mock("POST", "/detect_symmetry_png")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Image not found."}"#)
            .create();

        let err = block_on(client_for(&server).dispatch(Operation::SymmetryLines, &csv_file()))
            .unwrap_err();

        assert_eq!(err.user_message(), "Image not found.");
    }

    #[test]
    fn garbage_body_is_not_an_image() {
        let mut server = Server::new();
        server
            .mock("POST", "/detect_symmetry_png")
            .with_status(200)
            .with_body("definitely not a png")
            .create();

        let err = block_on(client_for(&server).dispatch(Operation::SymmetryLines, &csv_file()))
            .unwrap_err();

        assert!(matches!(err, DispatchError::InvalidImage(_)));
    }

    #[test]
    fn unreachable_service_is_a_transport_error() {
        let client = MlClient::new(Url::parse("http://127.0.0.1:9").unwrap());
        let err = block_on(client.dispatch(Operation::RegularizationCsv, &csv_file())).unwrap_err();

        assert!(matches!(err, DispatchError::Transport(_)));
        assert!(!err.user_message().is_empty());
    }
}
