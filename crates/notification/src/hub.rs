//! Fan-out of wallet events to any number of concurrent subscribers.
//!
//! Each event class has its own bounded broadcast channel. Publishing never blocks: a subscriber
//! that falls more than the channel capacity behind skips the overwritten events and resumes from
//! the oldest one still buffered. Dropping a subscription unsubscribes it, and closing the hub ends
//! every subscription.

use std::sync::Arc;

use ocean_proto::{TransactionEvent, UtxoEvent};
use tokio::sync::{broadcast, watch};
use tokio_stream::{
    wrappers::{errors::BroadcastStreamRecvError, BroadcastStream, WatchStream},
    Stream, StreamExt,
};
use tracing::{debug, info, warn};

use crate::COMPONENT;

#[derive(Clone, Debug)]
pub struct EventHub {
    transactions: broadcast::Sender<TransactionEvent>,
    utxos: broadcast::Sender<UtxoEvent>,
    closed: Arc<watch::Sender<bool>>,
}

impl EventHub {
    /// Creates a hub buffering up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        // A zero capacity broadcast channel panics on creation.
        let capacity = capacity.max(1);
        let (transactions, _) = broadcast::channel(capacity);
        let (utxos, _) = broadcast::channel(capacity);
        let (closed, _) = watch::channel(false);

        Self { transactions, utxos, closed: Arc::new(closed) }
    }

    /// Publishes a transaction event, returning the number of subscribers it reached.
    pub fn publish_transaction(&self, event: TransactionEvent) -> usize {
        debug!(target: COMPONENT, txid = %event.txid, kind = ?event.kind, "Publishing transaction event");
        // Sending only fails when nobody is subscribed, in which case the event is dropped.
        self.transactions.send(event).unwrap_or_default()
    }

    /// Publishes a utxo event, returning the number of subscribers it reached.
    pub fn publish_utxos(&self, event: UtxoEvent) -> usize {
        debug!(target: COMPONENT, utxos = event.utxos.len(), kind = ?event.kind, "Publishing utxo event");
        self.utxos.send(event).unwrap_or_default()
    }

    pub fn subscribe_transactions(&self) -> broadcast::Receiver<TransactionEvent> {
        self.transactions.subscribe()
    }

    pub fn subscribe_utxos(&self) -> broadcast::Receiver<UtxoEvent> {
        self.utxos.subscribe()
    }

    /// Watches for [`close`](Self::close). The value is `true` once the hub is closed.
    pub fn subscribe_closed(&self) -> watch::Receiver<bool> {
        self.closed.subscribe()
    }

    /// A stream of every transaction event published from now on, until the hub is closed.
    pub fn transaction_stream(&self) -> impl Stream<Item = TransactionEvent> + Send + 'static {
        subscription(self.subscribe_transactions(), self.subscribe_closed(), "transactions")
    }

    /// A stream of every utxo event published from now on, until the hub is closed.
    pub fn utxo_stream(&self) -> impl Stream<Item = UtxoEvent> + Send + 'static {
        subscription(self.subscribe_utxos(), self.subscribe_closed(), "utxos")
    }

    pub fn transaction_subscribers(&self) -> usize {
        self.transactions.receiver_count()
    }

    pub fn utxo_subscribers(&self) -> usize {
        self.utxos.receiver_count()
    }

    /// Ends every open and future stream of this hub and all of its clones.
    ///
    /// Events published after closing still reach raw receivers, but no stream yields them.
    pub fn close(&self) {
        if !self.closed.send_replace(true) {
            info!(target: COMPONENT, "Event hub closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }
}

fn subscription<T>(
    receiver: broadcast::Receiver<T>,
    closed: watch::Receiver<bool>,
    class: &'static str,
) -> impl Stream<Item = T> + Send + 'static
where
    T: Clone + Send + 'static,
{
    let events = BroadcastStream::new(receiver).filter_map(move |event| match event {
        Ok(event) => Some(Some(event)),
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            warn!(target: COMPONENT, class, skipped, "Subscriber lagged behind, skipping events");
            None
        },
    });
    // `None` marks the close of the hub and ends the stream.
    let closed = WatchStream::new(closed).filter(|closed| *closed).map(|_| None::<T>);

    events.merge(closed).map_while(|event| event)
}

// TESTS
// ================================================================================================
