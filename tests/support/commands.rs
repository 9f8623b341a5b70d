//! Command helper methods for Test.

use super::{Test, REPO, TOKEN};
use assert_cmd::Command;

/// Variables the binary reads that must not leak in from the host.
const SCRUBBED_ENV: &[&str] = &[
    "GITHUB_ID",
    "GITHUB_REPOSITORY",
    "GITHUB_TOKEN",
    "GH_TOKEN",
    "GITHUB_API_URL",
    "GHENV_LOG",
];

impl Test {
    /// Create a ghenv command with a clean environment.
    ///
    /// Returns a Command configured with:
    /// - Current directory set to the test directory
    /// - GitHub and logging variables removed
    /// - NO_COLOR set so output is plain
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_ghenv"));
        cmd.current_dir(self.dir.path());
        for name in SCRUBBED_ENV {
            cmd.env_remove(name);
        }
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// Command pointed at a mock server with repo and token already set.
    pub fn cmd_against(&self, api_url: &str) -> Command {
        let mut cmd = self.cmd();
        cmd.args(["--api-url", api_url, "--repo", REPO, "--token", TOKEN]);
        cmd
    }
}
