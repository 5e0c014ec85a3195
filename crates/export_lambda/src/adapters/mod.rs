pub mod clock;
pub mod exporter;
