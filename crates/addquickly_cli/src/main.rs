//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `addquickly_core` linkage.
//! - Allow one-shot parse checks of capture text from the shell.

use addquickly_core::parse_entries;

fn main() {
    // Tiny probe to validate core crate wiring independently from the
    // Flutter/FFI runtime setup.
    println!("addquickly_core ping={}", addquickly_core::ping());
    println!(
        "addquickly_core version={}",
        addquickly_core::core_version()
    );

    let input = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if input.is_empty() {
        return;
    }

    let parsed = parse_entries(&input);
    for tag in &parsed.tags {
        println!("tag #{}", tag.name);
    }
    for draft in &parsed.drafts {
        println!("draft {}", draft.name);
    }
}
