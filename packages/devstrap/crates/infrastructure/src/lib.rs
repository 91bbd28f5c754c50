pub mod adapters;
pub mod system;
