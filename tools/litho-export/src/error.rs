//! Export failures that callers may want to match on

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Couldn't read image {path:?}. Is the path correct?")]
    ImageUnreadable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Animated image {path:?} has no frames")]
    NoFrames { path: PathBuf },
}
