// Gemini mapper module
// v1internal wrapping of native bodies, signature harvesting from responses

pub mod signatures;
pub mod wrapper;

pub use signatures::{harvest_signatures, HarvestStats};
pub use wrapper::{unwrap_response, wrap_native};

#[cfg(test)]
mod wrapper_tests;
