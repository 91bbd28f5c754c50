pub mod error;
pub mod host;
pub mod logging;

pub use error::CliError;
pub use host::Host;
