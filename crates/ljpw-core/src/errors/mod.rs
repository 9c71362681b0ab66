//! Error handling for LJPW.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod calibration_error;
pub mod config_error;
pub mod error_code;
pub mod extraction_error;
pub mod ljpw_error;
pub mod profile_error;
pub mod scan_error;

pub use calibration_error::CalibrationError;
pub use config_error::ConfigError;
pub use error_code::LjpwErrorCode;
pub use extraction_error::ExtractionError;
pub use ljpw_error::LjpwError;
pub use profile_error::ProfileError;
pub use scan_error::ScanError;
