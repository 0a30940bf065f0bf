//! Message macros with debug-aware output routing.
//!
//! Every macro takes a [`Message`](super::Message) (or anything `Display`)
//! and either prints it to the console or, in debug mode, emits it through
//! `tracing` so it shows up with levels and timestamps next to the rest of
//! the diagnostics.
//!
//! ```text
//! msg_info!(..) ──▶ debug mode? ──yes──▶ tracing::info!
//!                         │
//!                         └──no───▶ println!
//! ```
//!
//! Debug mode is on when `TASKSYNC_DEBUG` or `RUST_LOG` is set.
//!
//! | Macro                | Prefix | Console  | Debug mode        |
//! |----------------------|--------|----------|-------------------|
//! | `msg_print!`         |        | stdout   | `tracing::info!`  |
//! | `msg_success!`       | ✅     | stdout   | `tracing::info!`  |
//! | `msg_info!`          | ℹ️     | stdout   | `tracing::info!`  |
//! | `msg_warning!`       | ⚠️     | stdout   | `tracing::warn!`  |
//! | `msg_error!`         | ❌     | stderr   | `tracing::error!` |
//! | `msg_debug!`         | 🔍     | (hidden) | `tracing::debug!` |
//!
//! ```rust
//! use tasksync::{msg_info, msg_success};
//! use tasksync::libs::messages::Message;
//! use tasksync::libs::filter::Filter;
//!
//! msg_success!(Message::FilterSaved(Filter::Checked));
//! msg_info!(Message::TasksHeader(Filter::All), true);
//! ```

use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Returns `true` when `TASKSYNC_DEBUG` or `RUST_LOG` is set.
///
/// The environment is read once; later calls return the cached answer.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("TASKSYNC_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Prints a plain message. Pass `true` as a second argument to surround it
/// with blank lines.
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("{}", $msg);
        } else {
            println!("{}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n{}\n", $msg);
        } else {
            println!("\n{}\n", $msg);
        }
    };
}

/// Prints a success message with the ✅ prefix.
#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("✅ {}", $msg);
        } else {
            println!("✅ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n✅ {}\n", $msg);
        } else {
            println!("\n✅ {}\n", $msg);
        }
    };
}

/// Prints an error message with the ❌ prefix to stderr.
#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("❌ {}", $msg);
        } else {
            eprintln!("❌ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("\n❌ {}\n", $msg);
        } else {
            eprintln!("\n❌ {}\n", $msg);
        }
    };
}

/// Prints a warning with the ⚠️ prefix.
///
/// Failed background synchronization is reported with this macro: the
/// local change stands, the user only needs to know the server lags behind.
#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("⚠️ {}", $msg);
        } else {
            println!("⚠️ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("\n⚠️ {}\n", $msg);
        } else {
            println!("\n⚠️ {}\n", $msg);
        }
    };
}

/// Prints an informational message with the ℹ️ prefix.
#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("ℹ️ {}", $msg);
        } else {
            println!("ℹ️ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\nℹ️ {}\n", $msg);
        } else {
            println!("\nℹ️ {}\n", $msg);
        }
    };
}

/// Emits a debug line; silent outside debug mode.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}
