pub mod anonymizer;
pub mod api_handler;
pub mod health_handler;
pub mod postprocess;
pub mod schema_repository;
pub mod skeleton_merger;
pub mod value_provider;

#[cfg(test)]
mod anonymizer_test;
