//! Filesystem infrastructure — implements the `LocalFs` port.

use std::path::Path;

use crate::application::ports::LocalFs;

/// Production filesystem implementation of `LocalFs`.
pub struct OsFs;

impl LocalFs for OsFs {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}
