//! Fire-and-forget UI tasks.

#[cfg(test)]
#[path = "task_test.rs"]
mod task_test;

/// Run `fut` on the browser event loop. Off the browser there is no loop to
/// run it on, so the future is dropped unpolled.
pub fn spawn<F>(fut: F)
where
    F: Future<Output = ()> + 'static,
{
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(fut);

    #[cfg(not(feature = "csr"))]
    drop(fut);
}
