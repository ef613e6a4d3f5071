use newsdesk_api::Error as ApiError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("reading {key:?} from storage")]
    StorageRead {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("writing {key:?} to storage")]
    StorageWrite {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn permission_denied() -> Error {
        Error::Api(ApiError::PermissionDenied)
    }

    pub fn empty_content() -> Error {
        Error::Api(ApiError::EmptyContent)
    }

    /// The error as seen by the presentation layer, if it is one it can act upon
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            Error::StorageRead { .. } | Error::StorageWrite { .. } => None,
        }
    }
}
