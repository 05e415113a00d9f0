//! Outbound ports - Interfaces that the application requires from external systems

mod generation_port;

pub use generation_port::{CardGeneratorPort, GeneratedCard};
