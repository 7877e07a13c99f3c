//! Abandoned installs leave the previous binding usable.
//!
//! Runs as its own test binary with a single test, since the binding is
//! process-wide state.

use std::future;
use std::panic::{AssertUnwindSafe, catch_unwind};

use glyphlog_console::global::{self, Lifecycle};
use glyphlog_core::testing::RecordingSink;
use glyphlog_core::{Engine, IconFuture, IconProvider, LoggerConfig, block_on, parts};

/// Never finishes loading.
struct PendingIcons;

impl IconProvider for PendingIcons {
    fn load(&self) -> IconFuture<'_> {
        Box::pin(future::pending())
    }
}

/// Panics while loading.
struct PanickingIcons;

impl IconProvider for PanickingIcons {
    fn load(&self) -> IconFuture<'_> {
        panic!("icon provider failure")
    }
}

fn icons_config() -> LoggerConfig {
    LoggerConfig::new().with_icon_pack(true)
}

#[test]
fn abandoned_install_restores_lifecycle() {
    // Dropped before anything was ever bound
    block_on(async {
        tokio::select! {
            _ = global::install(icons_config(), RecordingSink::new(), Some(&PendingIcons)) => {
                unreachable!("pending provider finished");
            }
            () = tokio::task::yield_now() => {}
        }
    })
    .unwrap();
    assert_eq!(global::lifecycle(), Lifecycle::Constructed);

    let sink = RecordingSink::new();
    let bound = global::bind(Engine::new(LoggerConfig::new(), sink.clone()));
    global::call("log", &parts!["before"]).unwrap();

    // Re-install dropped while loading icons
    block_on(async {
        tokio::select! {
            _ = global::install(icons_config(), RecordingSink::new(), Some(&PendingIcons)) => {
                unreachable!("pending provider finished");
            }
            () = tokio::task::yield_now() => {}
        }
    })
    .unwrap();
    assert_eq!(global::lifecycle(), Lifecycle::Bound);
    assert!(std::sync::Arc::ptr_eq(&global::engine().unwrap(), &bound));
    global::call("log", &parts!["after drop"]).unwrap();

    // Re-install whose provider panics
    let result = catch_unwind(AssertUnwindSafe(|| {
        block_on(global::install(
            icons_config(),
            RecordingSink::new(),
            Some(&PanickingIcons),
        ))
    }));
    assert!(result.is_err());
    assert_eq!(global::lifecycle(), Lifecycle::Bound);
    global::call("log", &parts!["after panic"]).unwrap();

    assert_eq!(
        sink.texts(),
        vec![
            vec!["> ", "before"],
            vec!["> ", "after drop"],
            vec!["> ", "after panic"],
        ]
    );
}
