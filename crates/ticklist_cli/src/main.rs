//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `ticklist_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Tiny probe so core crate wiring can be checked without the
    // Flutter/FFI runtime.
    println!("ticklist_core ping={}", ticklist_core::ping());
    println!("ticklist_core version={}", ticklist_core::core_version());
}
