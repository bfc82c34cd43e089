mod analysis;
mod cli;
mod config;
mod entry;
mod error;
mod handlers;
mod state;
mod store;
mod text;

pub use cli::run_cli;
pub use config::ClientSettings;
pub use entry::run;
pub use error::ServerError;
pub use state::PbLanguageServer;
pub use store::{Document, DocumentStore};
