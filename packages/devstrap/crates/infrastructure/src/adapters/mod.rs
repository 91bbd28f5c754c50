pub mod brew;

pub use brew::BrewAdapter;
