pub mod analyzer;
pub mod server;

pub use server::run;
