//! Version command implementation

use crate::error::Result;
use crate::pnp;

pub fn run() -> Result<()> {
    println!("pnp-vendorize {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Minimum Rust: {}", env!("CARGO_PKG_RUST_VERSION"));
    println!("  Profile: {}", build_profile());
    println!(
        "  PnP state files: {}, {}",
        pnp::DATA_FILE,
        pnp::RUNTIME_FILE
    );

    Ok(())
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
