//! Stamps the build with a version and short commit id.
//!
//! `SITE_VERSION` falls back to the package version. `SITE_GIT_SHA` takes the
//! first of `SITE_GIT_SHA` / `GITHUB_SHA` that is set, then `git rev-parse`.

use std::env;
use std::process::Command;

const SHORT_SHA_LEN: usize = 7;

fn main() {
    let version = first_env(&["SITE_VERSION", "CARGO_PKG_VERSION"]).unwrap_or_else(|| "unknown".into());
    let git_sha = first_env(&["SITE_GIT_SHA", "GITHUB_SHA"])
        .map(|sha| short_sha(&sha))
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".into());

    println!("cargo:rustc-env=SITE_VERSION={version}");
    println!("cargo:rustc-env=SITE_GIT_SHA={git_sha}");

    for var in ["SITE_VERSION", "SITE_GIT_SHA", "GITHUB_SHA"] {
        println!("cargo:rerun-if-env-changed={var}");
    }
}

fn first_env(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

fn short_sha(sha: &str) -> String {
    sha.trim().chars().take(SHORT_SHA_LEN).collect()
}

fn git_head() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let sha = String::from_utf8(output.stdout).ok()?;
    Some(sha.trim().to_string()).filter(|s| !s.is_empty())
}
