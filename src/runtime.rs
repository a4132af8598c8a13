//! Runtime abstraction for scheduling the viewer.
//!
//! The viewer is single-threaded: its futures hold `Rc`s and JS handles, so
//! they are spawned onto a local executor rather than a work-stealing pool.

/// Spawns `future` on the current thread's executor.
///
/// With `tokio-runtime` this must be called from inside a
/// [`tokio::task::LocalSet`]; on wasm it hands the future to the browser's
/// microtask queue.
#[cfg(any(feature = "tokio-runtime", all(feature = "wasm", target_arch = "wasm32")))]
pub fn spawn_local<F>(future: F)
where
    F: futures::Future<Output = ()> + 'static,
{
    #[cfg(all(feature = "wasm", target_arch = "wasm32"))]
    {
        wasm_bindgen_futures::spawn_local(future);
    }

    #[cfg(all(feature = "tokio-runtime", not(all(feature = "wasm", target_arch = "wasm32"))))]
    {
        log::debug!("Spawning local task");
        drop(tokio::task::spawn_local(future));
    }
}
