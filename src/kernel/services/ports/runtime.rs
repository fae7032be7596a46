use std::future::Future;
use std::pin::Pin;

pub type PortFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

pub type BoxFuture = PortFuture<()>;

pub trait AsyncExecutor: Send + Sync {
    fn spawn(&self, task: BoxFuture);
}
