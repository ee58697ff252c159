use std::collections::HashMap;

use message_primitives::{Bytes, Hash};
use tokio::sync::{Mutex, MutexGuard, RwLock};

/// Outcome of a successfully executed message.
///
/// Presence of a record is the replay flag: a record is created when its
/// hash executes and is never deleted, so a hash transitions from
/// unexecuted to executed at most once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionRecord {
    pub return_data: Bytes,
}

/// Hash-keyed execution log shared by all batches.
///
/// The record map is the only shared mutable resource of the engine.
/// Batches hold the gate for their entire lifetime, so a replay check and
/// the corresponding record write can never interleave with another batch
/// touching the same hash; batches over disjoint hashes still complete in
/// arbitrary order. Reads stay concurrent for external observers.
#[derive(Debug, Default)]
pub struct ExecutionState {
    records: RwLock<HashMap<Hash, ExecutionRecord>>,
    batch_gate: Mutex<()>,
}

impl ExecutionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn begin_batch(&self) -> MutexGuard<'_, ()> {
        self.batch_gate.lock().await
    }

    pub async fn is_executed(&self, hash: &Hash) -> bool {
        self.records.read().await.contains_key(hash)
    }

    /// Return payload captured when the given hash executed, if it has.
    pub async fn return_data(&self, hash: &Hash) -> Option<Bytes> {
        self.records
            .read()
            .await
            .get(hash)
            .map(|record| record.return_data.clone())
    }

    pub(crate) async fn commit(&self, records: impl IntoIterator<Item = (Hash, ExecutionRecord)>) {
        self.records.write().await.extend(records);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_hash_is_not_executed() {
        let state = ExecutionState::new();
        let hash = Hash::repeat_byte(0x01);

        assert!(!state.is_executed(&hash).await);
        assert_eq!(state.return_data(&hash).await, None);
    }

    #[tokio::test]
    async fn committed_records_become_queryable() {
        let state = ExecutionState::new();
        let hash = Hash::repeat_byte(0x01);
        let return_data = Bytes::from(vec![0x0a, 0x0b]);

        state
            .commit(vec![(
                hash,
                ExecutionRecord {
                    return_data: return_data.clone(),
                },
            )])
            .await;

        assert!(state.is_executed(&hash).await);
        assert_eq!(state.return_data(&hash).await, Some(return_data));
    }

    #[tokio::test(start_paused = true)]
    async fn batch_gate_admits_one_batch_at_a_time() {
        use std::sync::Arc;
        use std::time::Duration;

        let state = Arc::new(ExecutionState::new());

        let guard = state.begin_batch().await;
        let contender = {
            let state = Arc::clone(&state);
            tokio::spawn(async move {
                state.begin_batch().await;
            })
        };

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }
}
