use std::fmt;

use async_trait::async_trait;
use message_primitives::{Address, DomainId, Hash, MessageNonce};
use mockall::automock;
use thiserror::Error;

type Result<T> = error_stack::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no hash reported for message {1} on domain {0}")]
    HashNotReported(DomainId, MessageNonce),
    #[error("failed to query oracle adapter")]
    Query,
}

/// Identity of an oracle adapter, used to attribute reports and failures to
/// the adapter that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AdapterId(Address);

impl From<Address> for AdapterId {
    fn from(address: Address) -> Self {
        AdapterId(address)
    }
}

impl fmt::Display for AdapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Read capability of an independent attestor.
///
/// An adapter reports the hash it believes corresponds to a given message
/// nonce on a given domain. How it obtained that hash is its own business;
/// the engine makes no assumption beyond this interface. Adapters are
/// independently operated and give no ordering guarantee relative to each
/// other.
#[automock]
#[async_trait]
pub trait OracleAdapter: Send + Sync {
    fn id(&self) -> AdapterId;

    async fn report_hash(&self, domain_id: DomainId, nonce: MessageNonce) -> Result<Hash>;
}
