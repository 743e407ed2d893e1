use std::future::Future;
use std::pin::Pin;
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

/// Type alias for async task results (errors are already user-facing text)
pub type AsyncTaskResult<T> = Result<T, String>;

/// Type alias for boxed async tasks
pub type AsyncTask<T> = Pin<Box<dyn Future<Output = AsyncTaskResult<T>> + Send + 'static>>;

/// Spawns a background thread that runs an async task and sends the result,
/// paired with `tag`, via a channel
///
/// The tag lets the receiver tell which request a result belongs to, e.g. a
/// search generation ticket. The thread exits after sending.
///
/// # Example
/// ```ignore
/// let (tx, rx) = std::sync::mpsc::channel();
/// spawn_and_send(ticket, move || backend.search(keyword, offset), tx);
/// // Later, once per frame: if let Ok((ticket, result)) = rx.try_recv() { ... }
/// ```
pub fn spawn_and_send<F, T, K>(
    tag: K,
    task_factory: F,
    tx: Sender<(K, AsyncTaskResult<T>)>,
) -> JoinHandle<()>
where
    F: FnOnce() -> AsyncTask<T> + Send + 'static,
    T: Send + 'static,
    K: Send + 'static,
{
    std::thread::spawn(move || {
        let rt = match crate::utils::error_handling::create_runtime() {
            Ok(r) => r,
            Err(e) => {
                log::error!("[AsyncHelper] Failed to create runtime: {}", e);
                let _ = tx.send((tag, Err(e)));
                return;
            }
        };

        let result = rt.block_on(task_factory());
        let _ = tx.send((tag, result));
    })
}

/// Fire-and-forget spawn for tasks where the result only needs logging
pub fn spawn_fire_and_forget<F, T>(context: &'static str, task_factory: F)
where
    F: FnOnce() -> AsyncTask<T> + Send + 'static,
    T: Send + 'static,
{
    std::thread::spawn(move || {
        let rt = match crate::utils::error_handling::create_runtime() {
            Ok(r) => r,
            Err(e) => {
                log::error!("[AsyncHelper] Failed to create runtime: {}", e);
                return;
            }
        };

        if let Err(e) = rt.block_on(task_factory()) {
            log::warn!("[{}] Background task failed: {}", context, e);
        }
    });
}
