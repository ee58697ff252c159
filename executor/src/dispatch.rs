use async_trait::async_trait;
use message_primitives::{Address, Bytes};
use mockall::automock;
use thiserror::Error;

type Result<T> = error_stack::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("call to target {0:?} failed")]
    Call(Address),
}

/// Callable-target capability of the destination domain.
///
/// The engine hands a destination address and an opaque payload to the
/// dispatcher and receives the raw return payload of the call. A failing
/// target surfaces as an error report carrying the target's own failure
/// reason; the engine never inspects or depends on a specific target's
/// shape, which makes this the seam for swapping execution backends or
/// adding sandboxing.
#[automock]
#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn dispatch(&self, to: Address, data: Bytes) -> Result<Bytes>;
}
