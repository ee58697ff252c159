use std::sync::Arc;

use error_stack::{Report, ResultExt};
use itertools::izip;
use message_primitives::hash::calculate_hash;
use message_primitives::{nonempty, Address, Bytes, DomainId, Hash, Message, MessageNonce};
use thiserror::Error;
use tracing::info;
use typed_builder::TypedBuilder;

use crate::aggregator::OracleAggregator;
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::events::{self, EventPublisher, EventSubscriber, MessageIdExecuted};
use crate::oracle::OracleAdapter;
use crate::state::{ExecutionRecord, ExecutionState};

type Result<T> = error_stack::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("domain ids, messages, message nonces and senders must have equal lengths")]
    UnequalArrayLengths,
    #[error("oracle adapters reached no consensus for message {nonce} on domain {domain_id}")]
    NoConsensus {
        domain_id: DomainId,
        nonce: MessageNonce,
    },
    #[error("computed hash {computed:?} does not match the adapter-agreed hash {agreed:?}")]
    HashMismatch { computed: Hash, agreed: Hash },
    #[error("message with hash {0:?} has already been executed")]
    AlreadyExecuted(Hash),
    #[error("call for message with hash {0:?} failed")]
    CallFailed(Hash),
}

/// Verification-and-execution engine for cross-domain messages.
///
/// A message executes only after the caller-chosen adapter set unanimously
/// attests to its canonical hash, and each hash executes at most once.
/// Batches are all-or-nothing: effects are staged locally and committed only
/// once every entry has executed, so observers never see a half-executed
/// batch.
#[derive(TypedBuilder)]
pub struct ExecutionEngine<D>
where
    D: Dispatcher,
{
    /// Dispatch contract whose address is bound into every canonical hash.
    /// Tuples advertised by any other origination contract fail verification.
    originating_contract: Address,
    aggregator: OracleAggregator,
    dispatcher: D,
    state: Arc<ExecutionState>,
    event_publisher: EventPublisher,
}

impl<D> ExecutionEngine<D>
where
    D: Dispatcher,
{
    /// Wires an engine from its configuration. Returns the subscriber end of
    /// the engine's event channel alongside it.
    pub fn from_config(
        config: Config,
        dispatcher: D,
        state: Arc<ExecutionState>,
    ) -> (Self, EventSubscriber) {
        let (event_publisher, subscriber) = events::channel(config.event_buffer_cap);
        let engine = Self::builder()
            .originating_contract(config.originating_contract)
            .aggregator(OracleAggregator::new(config.adapter_query_timeout))
            .dispatcher(dispatcher)
            .state(state)
            .event_publisher(event_publisher)
            .build();

        (engine, subscriber)
    }

    /// Verifies and executes a batch of messages in array order.
    ///
    /// For each entry the canonical hash is recomputed, checked against the
    /// hash unanimously reported by the given adapters, checked against the
    /// execution log, and only then dispatched. The first failing entry
    /// aborts the whole batch and discards all staged effects; on success
    /// the return payloads come back in input order and one
    /// [`MessageIdExecuted`] event is published per entry, in execution
    /// order.
    pub async fn execute_batch(
        &self,
        domain_ids: Vec<DomainId>,
        messages: Vec<Message>,
        nonces: Vec<MessageNonce>,
        senders: Vec<Address>,
        adapters: &nonempty::Vec<Arc<dyn OracleAdapter>>,
    ) -> Result<Vec<Bytes>> {
        if messages.len() != domain_ids.len()
            || nonces.len() != domain_ids.len()
            || senders.len() != domain_ids.len()
        {
            return Err(Report::new(Error::UnequalArrayLengths).attach_printable(format!(
                "domain_ids: {}, messages: {}, nonces: {}, senders: {}",
                domain_ids.len(),
                messages.len(),
                nonces.len(),
                senders.len()
            )));
        }

        info!(batch_size = domain_ids.len(), "executing message batch");

        let _batch = self.state.begin_batch().await;

        let mut staged: Vec<(Hash, ExecutionRecord)> = Vec::with_capacity(domain_ids.len());
        let mut events = Vec::with_capacity(domain_ids.len());
        let mut return_datas = Vec::with_capacity(domain_ids.len());

        for (domain_id, message, nonce, sender) in izip!(domain_ids, messages, nonces, senders) {
            let computed = calculate_hash(
                domain_id,
                nonce,
                self.originating_contract,
                sender,
                &message,
            );

            let agreed = self
                .aggregator
                .consensus_hash(domain_id, nonce, adapters)
                .await
                .change_context(Error::NoConsensus { domain_id, nonce })?;

            if computed != agreed {
                return Err(Report::new(Error::HashMismatch { computed, agreed }));
            }

            // a hash staged earlier in this batch counts as executed too
            if self.state.is_executed(&computed).await
                || staged.iter().any(|(hash, _)| *hash == computed)
            {
                return Err(Report::new(Error::AlreadyExecuted(computed)));
            }

            let return_data = self
                .dispatcher
                .dispatch(message.to, message.data.clone())
                .await
                .change_context(Error::CallFailed(computed))?;

            staged.push((
                computed,
                ExecutionRecord {
                    return_data: return_data.clone(),
                },
            ));
            events.push(MessageIdExecuted {
                domain_id,
                hash: computed,
            });
            return_datas.push(return_data);
        }

        // every entry passed; make the batch visible as a whole
        self.state.commit(staged).await;
        for event in events {
            info!(domain_id = %event.domain_id, hash = ?event.hash, "message executed");
            self.event_publisher.publish(event);
        }

        Ok(return_datas)
    }
}
