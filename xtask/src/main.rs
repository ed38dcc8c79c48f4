//! XTask - Build automation for Miqat
//!
//! Cross-platform Rust task runner for the WASM package and workspace checks.
//!
//! # Usage
//! ```sh
//! cargo xtask dist-web       # Build WASM package for the browser UI
//! cargo xtask test-all       # Run every workspace test
//! cargo xtask build-all      # Build native crates and the WASM package
//! cargo xtask sync-versions  # Copy the workspace version into dist/web/package.json
//! ```

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "dist-web" => dist_web()?,
        "test-all" => test_all()?,
        "build-all" => build_all()?,
        "sync-versions" => sync_versions()?,
        "-h" | "--help" | "help" => print_usage(),
        cmd => {
            eprintln!("❌ Unknown command: {}", cmd);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_usage() {
    println!(r#"
🕌 Miqat XTask - Build Automation

USAGE:
    cargo xtask <COMMAND>

COMMANDS:
    dist-web       Build WASM package for the web UI
                   Output: dist/web/

    test-all       Run unit, integration and property tests

    build-all      Build all targets (Rust, WASM)

    sync-versions  Sync version from Cargo.toml to dist/web/package.json
"#);
}

// =============================================================================
// Helper Functions
// =============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let root = PathBuf::from(manifest_dir)
        .parent()
        .context("Failed to find project root")?
        .to_path_buf();
    Ok(root)
}

fn run_cmd_in_dir(dir: &Path, cmd: &str, args: &[&str]) -> Result<()> {
    println!("  → [{}] {} {}", dir.display(), cmd, args.join(" "));

    let status = Command::new(cmd)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("Failed to start: {} {}", cmd, args.join(" ")))?;

    if !status.success() {
        bail!("Command '{}' failed with exit code: {:?}", cmd, status.code());
    }
    Ok(())
}

fn command_exists(cmd: &str) -> bool {
    let finder = if cfg!(windows) { "where" } else { "which" };
    Command::new(finder)
        .arg(cmd)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn read_cargo_version(root: &Path) -> Result<String> {
    let content = fs::read_to_string(root.join("Cargo.toml"))?;

    for line in content.lines() {
        if line.trim().starts_with("version") && line.contains('=') {
            if let Some(version) = line.split('"').nth(1) {
                return Ok(version.to_string());
            }
        }
    }
    bail!("Could not find version in Cargo.toml")
}

// =============================================================================
// Tasks
// =============================================================================

fn dist_web() -> Result<()> {
    println!("\n🕸️  Building WASM package...\n");

    let root = project_root()?;
    let wasm_dir = root.join("bindings").join("miqat_wasm");
    let dist_web = root.join("dist").join("web");

    if !command_exists("wasm-pack") {
        println!("  ⚠️ wasm-pack not found. Installing...");
        run_cmd_in_dir(&root, "cargo", &["install", "wasm-pack"])?;
    }

    run_cmd_in_dir(&wasm_dir, "wasm-pack", &[
        "build",
        "--target", "web",
        "--out-dir", dist_web.to_string_lossy().as_ref(),
        "--out-name", "miqat",
    ])?;

    println!("\n✅ WASM build complete: dist/web/");
    Ok(())
}

fn test_all() -> Result<()> {
    println!("\n🧪 Running workspace tests...\n");
    let root = project_root()?;
    run_cmd_in_dir(&root, "cargo", &["test", "--workspace", "--exclude", "miqat-wasm"])?;
    println!("\n✅ All tests passed");
    Ok(())
}

fn build_all() -> Result<()> {
    println!("\n🏗️  Building all targets...\n");
    let root = project_root()?;
    run_cmd_in_dir(&root, "cargo", &["build", "--workspace", "--release", "--exclude", "miqat-wasm"])?;
    dist_web()?;
    println!("\n✅ All targets built");
    Ok(())
}

fn sync_versions() -> Result<()> {
    let root = project_root()?;
    let version = read_cargo_version(&root)?;
    let pkg_json = root.join("dist").join("web").join("package.json");

    println!("🔄 Syncing version {} ...", version);
    if !pkg_json.exists() {
        println!("  ⚠️ {} not found, run dist-web first", pkg_json.display());
        return Ok(());
    }

    let content = fs::read_to_string(&pkg_json)?;
    let updated = content
        .lines()
        .map(|line| {
            if line.trim().starts_with("\"version\"") {
                format!("  \"version\": \"{}\",", version)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(&pkg_json, updated + "\n")?;

    println!("✅ Version sync complete!");
    Ok(())
}
