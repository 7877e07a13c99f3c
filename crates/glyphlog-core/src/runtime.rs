//! Minimal runtime helpers.
//!
//! Engine initialization is the only asynchronous step (waiting on an icon
//! provider). `block_on` lets synchronous callers drive it.

use std::future::Future;
use std::io;
use std::sync::OnceLock;

use tokio::runtime::{Builder, Handle, Runtime};

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

fn runtime() -> io::Result<&'static Runtime> {
    if let Some(runtime) = RUNTIME.get() {
        return Ok(runtime);
    }
    let built = Builder::new_current_thread().enable_all().build()?;
    // A racing caller may have installed its runtime first; either one works.
    let _ = RUNTIME.set(built);
    RUNTIME
        .get()
        .ok_or_else(|| io::Error::other("runtime was not initialized"))
}

/// Blocks the current thread on the provided future.
///
/// Uses a lazily initialized, single-thread tokio runtime. Fails with
/// [`io::ErrorKind::WouldBlock`] when called from inside a tokio runtime,
/// where callers should `.await` the future instead.
pub fn block_on<F: Future>(future: F) -> io::Result<F::Output> {
    if Handle::try_current().is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::WouldBlock,
            "block_on called from within an async runtime",
        ));
    }
    Ok(runtime()?.block_on(future))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_on_returns_output() {
        let value = block_on(async { 40 + 2 }).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn block_on_reuses_runtime() {
        block_on(async {}).unwrap();
        let first = runtime().unwrap() as *const Runtime;
        block_on(async {}).unwrap();
        assert_eq!(first, runtime().unwrap() as *const Runtime);
    }

    #[test]
    fn block_on_inside_runtime_is_an_error() {
        let outer = Builder::new_current_thread().build().unwrap();
        let err = outer.block_on(async { block_on(async { 1 }) }).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WouldBlock);
    }
}
