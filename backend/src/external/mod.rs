//! External API integrations

pub mod advice;

pub use advice::AdviceClient;
