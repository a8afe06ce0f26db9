//! Build script for the reverse alert firmware
//!
//! Handles:
//! - Linker scripts for the embedded binary (cortex-m-rt and defmt)
//! - Nothing on host builds, so `cargo test` stays target-independent

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Cargo exposes enabled features to build scripts as env vars
    if std::env::var_os("CARGO_FEATURE_EMBEDDED").is_none() {
        return;
    }

    if let Ok(dir) = std::env::var("CARGO_MANIFEST_DIR") {
        println!("cargo:rustc-link-search={dir}");
    }

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
