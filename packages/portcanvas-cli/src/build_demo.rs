use anyhow::{Context, Result, bail};
use cargo_metadata::MetadataCommand;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

const WASM_TARGET: &str = "wasm32-unknown-unknown";

pub fn check_requirements() -> Result<()> {
    let output = Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
        .context("failed to list installed targets")?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains(WASM_TARGET) {
        info!("target '{}' not found, installing", WASM_TARGET);
        let status = Command::new("rustup")
            .args(["target", "add", WASM_TARGET])
            .status()
            .context("failed to install wasm32 target")?;
        if !status.success() {
            bail!("failed to install {WASM_TARGET} target");
        }
    }

    if Command::new("wasm-bindgen").arg("--version").output().is_err() {
        bail!("wasm-bindgen not found; install it with `cargo install wasm-bindgen-cli`");
    }

    Ok(())
}

/// Compiles the demo crate in `demo_dir` to wasm and returns the path of the
/// produced `.wasm` file.
pub fn build_crate(demo_dir: &Path, release: bool) -> Result<PathBuf> {
    let manifest = demo_dir.join("Cargo.toml");
    let metadata = MetadataCommand::new()
        .manifest_path(&manifest)
        .no_deps()
        .exec()
        .with_context(|| format!("failed to read cargo metadata for {}", manifest.display()))?;

    let package = metadata
        .root_package()
        .or_else(|| metadata.packages.first())
        .context("demo manifest has no package")?;

    info!("compiling {} to wasm", package.name);
    let mut cmd = Command::new("cargo");
    cmd.arg("build")
        .arg("--manifest-path")
        .arg(&manifest)
        .args(["--target", WASM_TARGET]);
    if release {
        cmd.arg("--release");
    }
    let status = cmd.status().context("failed to run cargo build")?;
    if !status.success() {
        bail!("cargo build failed");
    }

    let mode = if release { "release" } else { "debug" };
    let wasm_path = metadata
        .target_directory
        .join(WASM_TARGET)
        .join(mode)
        .join(format!("{}.wasm", package.name.replace('-', "_")));

    if !wasm_path.exists() {
        bail!("wasm file not found at {}", wasm_path);
    }
    Ok(wasm_path.into_std_path_buf())
}

pub fn run_bindgen(wasm_path: &Path, out_dir: &Path) -> Result<()> {
    info!("generating wasm bindings into {}", out_dir.display());
    fs::create_dir_all(out_dir)?;

    let status = Command::new("wasm-bindgen")
        .arg(wasm_path)
        .arg("--out-dir")
        .arg(out_dir)
        .args(["--target", "web", "--no-typescript"])
        .status()
        .context("failed to run wasm-bindgen")?;

    if !status.success() {
        bail!("wasm-bindgen failed for {}", wasm_path.display());
    }
    Ok(())
}

/// Builds the demo into `<demo_dir>/dist` and returns that directory.
pub fn build_demo(demo_dir: &Path, release: bool) -> Result<PathBuf> {
    check_requirements()?;

    let wasm_path = build_crate(demo_dir, release)?;
    let dist = demo_dir.join("dist");
    run_bindgen(&wasm_path, &dist.join("pkg"))?;

    let index = demo_dir.join("index.html");
    fs::copy(&index, dist.join("index.html"))
        .with_context(|| format!("failed to copy {}", index.display()))?;

    info!("demo ready in {}", dist.display());
    Ok(dist)
}
