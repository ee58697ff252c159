use sha3::{Digest, Keccak256};

use crate::{Address, DomainId, Hash, Message, MessageNonce};

/// Version tag mixed into every digest so a future change to the preimage
/// layout cannot collide with hashes produced under the current one.
const ENCODING_VERSION: u8 = 1;

/// Computes the canonical hash of a dispatched message.
///
/// The digest binds all five fields of the origination tuple: the origin
/// domain, the per-domain nonce, the dispatch contract, the original sender
/// and the message itself. Integer fields are fixed-width big-endian and the
/// payload is length-prefixed, so no two logically distinct tuples share a
/// preimage. The dispatch side must compute this hash with identical inputs,
/// field order and encoding, or verification on the destination will fail.
pub fn calculate_hash(
    domain_id: DomainId,
    nonce: MessageNonce,
    originating_contract: Address,
    sender: Address,
    message: &Message,
) -> Hash {
    let payload_len = u64::try_from(message.data.len()).expect("payload length fits into u64");

    let mut hasher = Keccak256::new();
    hasher.update([ENCODING_VERSION]);
    hasher.update(domain_id.to_be_bytes());
    hasher.update(nonce.to_be_bytes());
    hasher.update(originating_contract.as_bytes());
    hasher.update(sender.as_bytes());
    hasher.update(message.to.as_bytes());
    hasher.update(message.to_chain_id.to_be_bytes());
    hasher.update(payload_len.to_be_bytes());
    hasher.update(&message.data);

    Hash::from(<[u8; 32]>::from(hasher.finalize()))
}
