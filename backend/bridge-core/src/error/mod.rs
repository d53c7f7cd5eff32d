pub mod config;
pub mod dispatch;
pub mod download;
pub mod file_manager;
pub mod frame;
pub mod fs_ops;
pub mod server;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Frame(#[from] frame::FrameError),

    #[error(transparent)]
    Dispatch(#[from] dispatch::DispatchError),

    #[error(transparent)]
    Server(#[from] server::ServerError),

    #[error(transparent)]
    FsOp(#[from] fs_ops::FsOpError),

    #[error(transparent)]
    FileManager(#[from] file_manager::FileManagerError),

    #[error(transparent)]
    Download(#[from] download::DownloadError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}
