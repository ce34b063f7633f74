//! Image encoding and export delivery.

/// PNG/JPEG encode and decode.
pub mod codec;
/// Host capability that receives exported files.
pub mod surface;
