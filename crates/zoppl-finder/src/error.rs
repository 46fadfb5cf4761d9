use thiserror::Error;

/// Text shown when the service could not be reached or answered with
/// something that is not JSON.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "An error occurred while contacting the service";

/// Default text for a non-success HTTP status without a usable `message`.
pub const SERVER_ERROR_MESSAGE: &str = "Server error occurred";

/// Default text for a `status: false` payload without a `message`.
pub const SERVICE_FAILURE_MESSAGE: &str = "Failed to process image";

pub const NO_IMAGE_MESSAGE: &str = "Please select an image first";

pub const INVALID_IMAGE_MESSAGE: &str = "Please select a valid image file (JPEG, PNG, GIF, WEBP)";

/// Shown when the selected file is missing or cannot be read.
pub const READ_IMAGE_MESSAGE: &str = "The selected image could not be read";

#[derive(Debug, Error)]
pub enum FinderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from analysis service: {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("analysis service reported failure: {message}")]
    ServiceFailure { message: String },

    #[error("invalid endpoint URL \"{url}\": {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("no image selected")]
    NoImage,

    #[error("unsupported image file \"{file_name}\": {reason}")]
    InvalidImage { file_name: String, reason: String },

    #[error("image \"{file_name}\" is {size} bytes, larger than the {max} byte limit")]
    ImageTooLarge {
        file_name: String,
        size: u64,
        max: u64,
    },

    #[error("failed to read image {path}: {source}")]
    ReadImage {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FinderError {
    /// Text to show the user for this failure.
    ///
    /// Service-reported messages are passed through verbatim; transport
    /// failures collapse to one generic message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::UnexpectedStatus { message, .. } | Self::ServiceFailure { message } => {
                message.clone()
            }
            Self::NoImage => NO_IMAGE_MESSAGE.to_string(),
            Self::InvalidImage { .. } => INVALID_IMAGE_MESSAGE.to_string(),
            Self::ReadImage { .. } => READ_IMAGE_MESSAGE.to_string(),
            Self::ImageTooLarge { max, .. } => {
                format!("Image is too large (maximum {} MB)", max / (1024 * 1024))
            }
            Self::Http(_) | Self::Deserialize { .. } | Self::InvalidEndpoint { .. } => {
                TRANSPORT_FAILURE_MESSAGE.to_string()
            }
        }
    }

    /// `true` for failures detected locally before any request was sent.
    #[must_use]
    pub fn is_selection_error(&self) -> bool {
        matches!(
            self,
            Self::NoImage
                | Self::InvalidImage { .. }
                | Self::ImageTooLarge { .. }
                | Self::ReadImage { .. }
        )
    }
}
