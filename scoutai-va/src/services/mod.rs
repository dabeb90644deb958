//! Supporting services for the video-assessment pipeline

pub mod downloader;

pub use downloader::{DownloadError, TempClip, VideoDownloader};
