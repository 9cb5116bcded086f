use std::error::Error;
use std::process::Command;

fn get_commit_hash() -> Result<String, Box<dyn Error>> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()?;
    let hash = String::from_utf8(output.stdout)?;
    Ok(hash.trim().to_string())
}

fn main() {
    let version = env!("CARGO_PKG_VERSION");
    let hash = get_commit_hash()
        .ok()
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=SMOOTHDUMP_VERSION={version} ({hash})");

    // Avoid rerunning the build script every time.
    println!("cargo:rerun-if-changed=build.rs");
}
