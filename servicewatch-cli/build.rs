// Build script: derive the reported version from git tags.
//
// Falls back to CARGO_PKG_VERSION when git is unavailable (e.g. building
// from a published crate tarball).

use std::process::Command;

fn main() {
    let version = git_version().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=SERVICEWATCH_VERSION={}", version);
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/tags");
}

fn git_version() -> Option<String> {
    // e.g. "v0.3.0", "v0.3.0-2-g1a2b3c4-dirty", or a bare "1a2b3c4"
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();

    match described.strip_prefix('v') {
        // Tagged build: keep only the release number
        Some(tagged) => Some(tagged.split('-').next().unwrap_or(tagged).to_string()),
        // Untagged: package version plus the short hash
        None => Some(format!("{}-{}", env!("CARGO_PKG_VERSION"), described)),
    }
}
