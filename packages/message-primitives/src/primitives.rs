use std::fmt;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub type Address = ethers_core::types::Address;
pub type Hash = ethers_core::types::H256;
pub type Bytes = ethers_core::types::Bytes;

/// Identifier of an execution domain. Every domain has its own address space
/// and assigns message nonces independently of all other domains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DomainId(u64);

impl DomainId {
    pub const fn new(id: u64) -> Self {
        DomainId(id)
    }

    pub(crate) fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl From<u64> for DomainId {
    fn from(id: u64) -> Self {
        DomainId(id)
    }
}

impl From<DomainId> for u64 {
    fn from(id: DomainId) -> Self {
        id.0
    }
}

impl Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-domain message nonce. The dispatch contract assigns nonces strictly
/// increasing per domain and never reuses them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageNonce(u64);

impl MessageNonce {
    pub const fn new(nonce: u64) -> Self {
        MessageNonce(nonce)
    }

    pub(crate) fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl From<u64> for MessageNonce {
    fn from(nonce: u64) -> Self {
        MessageNonce(nonce)
    }
}

impl From<MessageNonce> for u64 {
    fn from(nonce: MessageNonce) -> Self {
        nonce.0
    }
}

impl Display for MessageNonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payload to execute on the destination domain. Immutable once constructed.
///
/// The payload bytes get encoded into hex at the edges (input/output), but
/// internally they are treated as raw bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub to: Address,
    pub to_chain_id: DomainId,
    pub data: Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_id_round_trips_through_u64() {
        let id = DomainId::new(42);
        assert_eq!(u64::from(id), 42);
        assert_eq!(DomainId::from(42u64), id);
    }

    #[test]
    fn message_serializes_payload_as_hex() {
        let message = Message {
            to: Address::repeat_byte(2),
            to_chain_id: DomainId::new(1),
            data: Bytes::from(vec![0x01, 0x02]),
        };

        let serialized = serde_json::to_value(&message).unwrap();
        assert_eq!(serialized["data"], "0x0102");

        let deserialized: Message = serde_json::from_value(serialized).unwrap();
        assert_eq!(deserialized, message);
    }
}
