pub mod process;
pub mod profile;
pub mod run_log;

pub use process::{ProcessRunner, ThreadSleeper};
pub use profile::ProfileWriter;
