use std::fmt;

use tower_lsp::jsonrpc;
use tower_lsp::lsp_types::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerError {
    /// The document was never opened, or was closed while a request was pending.
    DocumentNotFound(Url),
    /// Settings could not be fetched from the client or did not compile.
    Settings(String),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::DocumentNotFound(uri) => write!(f, "document not found: {uri}"),
            ServerError::Settings(message) => write!(f, "settings error: {message}"),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<pbls_core::Error> for ServerError {
    fn from(err: pbls_core::Error) -> Self {
        ServerError::Settings(err.to_string())
    }
}

impl From<ServerError> for jsonrpc::Error {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::DocumentNotFound(_) => jsonrpc::Error::invalid_params(err.to_string()),
            ServerError::Settings(_) => {
                let mut rpc = jsonrpc::Error::internal_error();
                rpc.message = err.to_string().into();
                rpc
            }
        }
    }
}
