//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `calmly_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use calmly_core::{Journal, MemoryStateStore};

fn main() {
    let journal = Journal::load(MemoryStateStore::new());
    println!("calmly_core version={}", calmly_core::core_version());
    println!(
        "calmly_core theme={} rituals={} board_items={}",
        journal.theme().as_str(),
        journal.rituals().len(),
        journal.board().len()
    );
}
