pub mod config;
pub mod error;
pub mod logging;
pub mod outputs;
pub mod pipeline;
pub mod sample;
pub mod source;
pub mod transform;
