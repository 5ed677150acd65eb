//! Download Helper Port
//!
//! Defines the interface for fetching database files from a remote source.

use crate::domain::entities::{DownloadArgs, DownloadResult};
use async_trait::async_trait;
use std::path::Path;

/// Conditionally fetches and decompresses a database file.
///
/// This is an outbound port. The host supplies the implementation; fetch,
/// retry and decompression all live behind it.
#[async_trait]
pub trait DownloadHelper: Send + Sync {
    /// Fetch `url` into `destination` unless the remote file is not newer
    /// than `since` (unix timestamp, 0 = always fetch).
    ///
    /// Failures are reported inside the returned value, never as a panic.
    async fn fetch(
        &self,
        url: &str,
        args: &DownloadArgs,
        destination: &Path,
        since: u64,
    ) -> DownloadResult;
}
