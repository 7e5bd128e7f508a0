//! Single-slot handoff channel between the read worker and the write worker.
//!
//! The two workers exchange records through a bounded channel of capacity one, which
//! gives the pipeline its strict-alternation property: the read worker blocks on a
//! full slot until the write worker has consumed the value, so at most one record is
//! ever in flight. End of input travels in-band as [`Handoff::EndOfStream`] instead
//! of through a shared flag, and a dropped endpoint is observable by the peer rather
//! than leaving it parked forever.

use tokio::sync::mpsc;

/// A single value travelling from the read worker to the write worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handoff {
    /// The next record read from the source.
    Record(i64),
    /// The source is exhausted; no further records will be sent.
    EndOfStream,
}

/// Transmitter for the handoff channel.
pub type HandoffTx = mpsc::Sender<Handoff>;
/// Receiver for the handoff channel.
pub type HandoffRx = mpsc::Receiver<Handoff>;

/// Capacity of the handoff channel.
///
/// One slot is a contract, not a tuning knob: the read worker must not run ahead of
/// the write worker by more than a single record.
const HANDOFF_CAPACITY: usize = 1;

/// Creates the handoff channel connecting the read worker to the write worker.
pub fn create_handoff_channel() -> (HandoffTx, HandoffRx) {
    mpsc::channel(HANDOFF_CAPACITY)
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc::error::TrySendError;

    use super::*;

    #[tokio::test]
    async fn handoff_channel_holds_at_most_one_value() {
        let (tx, mut rx) = create_handoff_channel();

        tx.try_send(Handoff::Record(1)).unwrap();
        assert!(matches!(
            tx.try_send(Handoff::Record(2)),
            Err(TrySendError::Full(Handoff::Record(2)))
        ));

        // Freeing the slot unblocks the next send.
        assert_eq!(rx.recv().await, Some(Handoff::Record(1)));
        tx.try_send(Handoff::Record(2)).unwrap();
        assert_eq!(rx.recv().await, Some(Handoff::Record(2)));
    }

    #[tokio::test]
    async fn end_of_stream_is_delivered_in_order() {
        let (tx, mut rx) = create_handoff_channel();

        let producer = tokio::spawn(async move {
            tx.send(Handoff::Record(7)).await.unwrap();
            tx.send(Handoff::EndOfStream).await.unwrap();
        });

        assert_eq!(rx.recv().await, Some(Handoff::Record(7)));
        assert_eq!(rx.recv().await, Some(Handoff::EndOfStream));
        assert_eq!(rx.recv().await, None);

        producer.await.unwrap();
    }

    #[tokio::test]
    async fn dropped_endpoints_are_observable() {
        let (tx, mut rx) = create_handoff_channel();
        drop(tx);
        assert_eq!(rx.recv().await, None);

        let (tx, rx) = create_handoff_channel();
        drop(rx);
        assert!(tx.send(Handoff::Record(3)).await.is_err());
    }
}
