//! Exports `MEETROOM_VERSION` for `meetroom --version`.
//!
//! Order of preference: an explicit `MEETROOM_VERSION` in the build
//! environment (release pipelines), `git describe`, then the package version.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=MEETROOM_VERSION");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let version = env::var("MEETROOM_VERSION")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(git_version)
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=MEETROOM_VERSION={}", version.trim());
}

fn git_version() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();
    if described.is_empty() {
        return None;
    }

    Some(described.trim_start_matches('v').to_string())
}
