//! CLI runner for end-to-end tests.
//!
//! Each runner gets its own temporary storage root and a hermetic config
//! location, so binary invocations never touch the developer's real
//! snapshot namespace.

use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

pub struct CliRunner {
    storage: TempDir,
}

impl CliRunner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: TempDir::new().expect("temp storage root"),
        }
    }

    #[must_use]
    pub fn storage_root(&self) -> &Path {
        self.storage.path()
    }

    /// A preconfigured command for the netsnap binary.
    #[must_use]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("netsnap").expect("netsnap binary");
        cmd.env("NETSNAP_STORAGE_ROOT", self.storage.path())
            .env("XDG_CONFIG_HOME", self.storage.path())
            .env("NO_COLOR", "1")
            .env("RUST_LOG", "off");
        cmd
    }
}

impl Default for CliRunner {
    fn default() -> Self {
        Self::new()
    }
}
