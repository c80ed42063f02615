//! NilmapErrorCode trait for driver-facing error codes.

/// Every error enum provides a stable code string so a driver can map
/// failures without matching on message text.
pub trait NilmapErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const STRUCTURAL_INCONSISTENCY: &str = "STRUCTURAL_INCONSISTENCY";
pub const SOURCE_ERROR: &str = "SOURCE_ERROR";
pub const THREAD_POOL_ERROR: &str = "THREAD_POOL_ERROR";
