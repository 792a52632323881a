// File: crates/spark-core/src/error.rs
// Summary: Errors raised by raster surfaces. Transient chart conditions
// (zero-size container, missing context) are retried, never reported here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SparkError {
    #[error("failed to allocate a {width}x{height} raster surface")]
    Allocation { width: i32, height: i32 },
    #[error("surface is not attached")]
    Detached,
    #[error("failed to read back {width}x{height} pixels")]
    Readback { width: i32, height: i32 },
    #[error("PNG encoding failed")]
    Encode,
}
