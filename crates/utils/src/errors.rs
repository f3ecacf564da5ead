use thiserror::Error;
use tonic::transport::Error as TransportError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("an I/O error has occurred")]
    IoError(#[from] std::io::Error),

    #[error("serving the Api server has failed")]
    ApiServeFailed(#[from] TransportError),

    #[error("resolution of the server address has failed: {0}")]
    AddressResolutionFailed(String),

    /// Converting the provided `Url` into a socket address has failed
    #[error("converting the `Url` into a socket address failed: {0}")]
    EndpointToSocketFailed(std::io::Error),
}
