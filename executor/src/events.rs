use message_primitives::{DomainId, Hash};
use tokio::sync::broadcast::{self, Sender};
use tokio_stream::wrappers::BroadcastStream;

/// Completion signal emitted exactly once per newly executed hash, in
/// execution order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageIdExecuted {
    pub domain_id: DomainId,
    pub hash: Hash,
}

pub struct EventPublisher {
    tx: Sender<MessageIdExecuted>,
}

pub struct EventSubscriber {
    tx: Sender<MessageIdExecuted>,
}

/// Creates a connected publisher/subscriber pair. The engine publishes on
/// one end; any number of observers subscribe on the other.
pub fn channel(capacity: usize) -> (EventPublisher, EventSubscriber) {
    let (tx, _) = broadcast::channel(capacity);

    (EventPublisher { tx: tx.clone() }, EventSubscriber { tx })
}

impl EventPublisher {
    pub(crate) fn publish(&self, event: MessageIdExecuted) {
        // a send error only means there is no subscriber right now
        let _ = self.tx.send(event);
    }
}

impl EventSubscriber {
    pub fn subscribe(&self) -> BroadcastStream<MessageIdExecuted> {
        BroadcastStream::new(self.tx.subscribe())
    }
}
