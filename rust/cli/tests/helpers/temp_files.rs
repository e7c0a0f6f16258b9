use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use clubhub_engine::cards::{full_deck, join_codes};

/// Temp directory that is removed on drop.
pub struct TempFileManager {
    dir: tempfile::TempDir,
}

impl Default for TempFileManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TempFileManager {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).expect("write temp file");
        path
    }

    /// Writes an executable `/bin/sh` script. It is started with the usual
    /// player arguments `<count> <seat>`.
    pub fn create_script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.create_file(name, &format!("#!/bin/sh\n{}\n", body));
        let mut perms = fs::metadata(&path).expect("script metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("chmod script");
        path
    }
}

/// One deck in index order, comma separated.
pub fn ordered_deck() -> String {
    join_codes(&full_deck())
}

/// `count` decks, each rotated a little further than the last, one card per
/// line with `.` between decks.
pub fn rotated_decks(count: usize) -> String {
    (0..count)
        .map(|i| {
            let mut cards = full_deck();
            cards.rotate_left(i * 7 % 52);
            cards
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n.\n")
}
