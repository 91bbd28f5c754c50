pub mod environment;
pub mod executor;
pub mod health;
pub mod install_service;
pub mod installed_filter;
pub mod package_set;
pub mod plan_executor;
pub mod preflight;

#[cfg(test)]
pub(crate) mod test_support;
