//! Build script for labelview-server
//!
//! Rebuild the server when any embedded static file changes, including
//! the WASM client bundle built by wasm-pack.

fn main() {
    println!("cargo:rerun-if-changed=static");
    println!("cargo:rerun-if-changed=static/pkg");
}
