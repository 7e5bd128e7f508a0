use std::collections::VecDeque;

use crate::error::FerryResult;
use crate::source::Source;

/// In-memory source for testing and development purposes.
///
/// [`MemorySource`] yields a fixed sequence of records and then reports end of
/// input, and keeps reporting it on further reads, matching the termination
/// behavior of [`FileSource`](crate::source::file::FileSource).
#[derive(Debug)]
pub struct MemorySource {
    records: VecDeque<i64>,
}

impl MemorySource {
    /// Creates a source yielding `records` in order.
    pub fn new(records: impl IntoIterator<Item = i64>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }
}

impl Source for MemorySource {
    fn name() -> &'static str {
        "memory"
    }

    async fn read_record(&mut self) -> FerryResult<Option<i64>> {
        Ok(self.records.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn yields_records_in_order_then_stays_exhausted() {
        let mut source = MemorySource::new([3, -8, 0]);

        assert_eq!(source.read_record().await.unwrap(), Some(3));
        assert_eq!(source.read_record().await.unwrap(), Some(-8));
        assert_eq!(source.read_record().await.unwrap(), Some(0));
        assert_eq!(source.read_record().await.unwrap(), None);
        assert_eq!(source.read_record().await.unwrap(), None);
    }
}
