//! Asset publishing: content root → upload records.

mod encoding;
mod scan;
mod upload;

// Types
pub use encoding::ContentEncoding;
pub use upload::AssetUpload;

// Scanning (pure, filesystem reads only)
pub use scan::{PublishError, publish};
