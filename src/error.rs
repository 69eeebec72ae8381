use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop the program from showing its frame.
///
/// The [Display](std::fmt::Display) form of each variant is the single diagnostic line
/// printed before exiting: `<operation> error: <backend diagnostic>`.
#[derive(Debug, Error)]
pub enum Error {
    /// The windowing event loop could not be created
    #[error("Init error: {0}")]
    SubsystemInit(#[source] winit::error::EventLoopError),

    /// The event loop was created but stopped abnormally while the window was up
    #[error("EventLoop error: {0}")]
    EventLoop(#[source] winit::error::EventLoopError),

    /// The operating system refused to open the window
    #[error("CreateWindow error: {0}")]
    WindowCreation(#[from] winit::error::OsError),

    /// No GPU surface, adapter or device could be set up for the window
    #[error("CreateRenderer error: {0}")]
    ContextCreation(String),

    /// The bitmap could not be opened or decoded
    #[error("LoadBMP error: {}: {source}", .path.display())]
    AssetRead {
        /// File that was being read
        path: PathBuf,
        /// Why the decoder gave up
        #[source]
        source: image::ImageError,
    },

    /// Decoded pixels could not be turned into a texture
    #[error("CreateTextureFromSurface error: {0}")]
    TextureConversion(String),
}

/// Result type used throughout the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use std::io;

    use winit::error::EventLoopError;

    use super::*;

    #[test]
    fn asset_read_names_the_operation_and_file() {
        let err = Error::AssetRead {
            path: PathBuf::from("safeway.bmp"),
            source: image::ImageError::IoError(io::Error::new(
                io::ErrorKind::NotFound,
                "file not found",
            )),
        };
        let line = err.to_string();
        assert!(line.starts_with("LoadBMP error: "), "{line}");
        assert!(line.contains("safeway.bmp"));
        assert!(line.contains("file not found"));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn conversion_and_context_prefixes() {
        assert_eq!(
            Error::TextureConversion("out of memory".into()).to_string(),
            "CreateTextureFromSurface error: out of memory"
        );
        assert_eq!(
            Error::ContextCreation("no adapter".into()).to_string(),
            "CreateRenderer error: no adapter"
        );
    }

    #[test]
    fn event_loop_failures_are_told_apart_from_init() {
        let init = Error::SubsystemInit(EventLoopError::RecreationAttempt).to_string();
        let running = Error::EventLoop(EventLoopError::ExitFailure(3)).to_string();
        assert!(init.starts_with("Init error: "), "{init}");
        assert!(running.starts_with("EventLoop error: "), "{running}");
        assert!(running.contains('3'), "{running}");
    }
}
