//! dclc - driver for the reserved-syntax checker.
//!
//! ```text
//! unit text ──► dcl_parse::parse_unit ──► SourceUnit
//!                                            │
//!                                            ▼
//!                        dcl_check::check_unit ──► DiagnosticSet
//!                                            │
//!                     ┌──────────────────────┼──────────────────┐
//!                     ▼                      ▼                  ▼
//!              terminal / JSON        marker text        verify (compare)
//! ```
//!
//! The binary in `main.rs` only parses arguments; everything it runs lives
//! here so the fixture tests can drive it too.

use std::sync::Once;

pub mod commands;
pub mod verify;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=dcl_check=trace`. With `DCL_LOG_TREE=1` spans are printed as
/// an indented tree instead of flat lines.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        if std::env::var("DCL_LOG_TREE").is_ok_and(|v| v == "1") {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
