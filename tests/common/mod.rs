//! Shared fixtures for integration tests.

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use tempfile::TempDir;

// The process-wide store is shared by every test in a binary.
static GLOBAL_STORE: Mutex<()> = Mutex::new(());

/// Serialize tests that touch the process-wide store.
#[allow(dead_code)]
pub fn lock_global() -> MutexGuard<'static, ()> {
    GLOBAL_STORE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Write `content` to `name` inside a fresh temporary directory.
///
/// The directory is removed when the returned `TempDir` is dropped.
pub fn write_config(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    (dir, path)
}

/// A configuration file that sets every key.
#[allow(dead_code)]
pub const FULL_CONFIG: &str = r#"
LogLevel: ERROR
Encipher: 0123456789abcdef
StreamSourceType: link
Emby:
  url: "http://emby.internal"
  port: 8096
  apiKey: "3f1a"
Frontend:
  symlinkBasePath: /mnt/strm
Backend:
  url: "http://stream.internal:60001/stream"
  storageBasePath: /mnt/media
PlayURLMaxAliveTime: 43200
Server:
  port: 60003
SpecialMedias:
  - Key: trailer
    Name: Site trailer
    MediaPath: /mnt/media/trailer.mp4
    ItemId: "9001"
    MediaSourceID: mediasource_9001
  - Key: broken
    Name: Missing source id
    MediaPath: /mnt/media/broken.mp4
    ItemId: "9002"
"#;
