use super::{AggregateRecorder, Record, RecordStorage, RecordValue, Recorder};

/// Buffered recorder.
///
/// Keeps written records and aggregated records in memory. Aggregated records
/// carry the flushed step under key `"episode"`. Useful in tests and for
/// inspecting training runs after the fact.
#[derive(Default)]
pub struct BufferedRecorder {
    buf: Vec<Record>,
    storage: RecordStorage,
}

impl BufferedRecorder {
    /// Construct the recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an iterator over the records.
    pub fn iter(&self) -> std::slice::Iter<Record> {
        self.buf.iter()
    }

    /// The number of buffered records.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if no record has been buffered.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Recorder for BufferedRecorder {
    fn write(&mut self, record: Record) {
        self.buf.push(record);
    }
}

impl AggregateRecorder for BufferedRecorder {
    fn store(&mut self, record: Record) {
        self.storage.store(record);
    }

    fn flush(&mut self, step: i64) {
        let mut record = self.storage.aggregate();
        record.insert("episode", RecordValue::Scalar(step as f64));
        self.write(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    #[test]
    fn test_flush_aggregates_stored_records() {
        let mut recorder = BufferedRecorder::new();
        for r in [-200.0, -180.0, -160.0] {
            recorder.store(Record::from_scalar("episode_return", r));
        }
        recorder.store(Record::from_slice(&[(
            "datetime",
            RecordValue::DateTime(Local::now()),
        )]));
        recorder.flush(3);
        recorder.flush(6);

        assert_eq!(recorder.len(), 2);
        let record = recorder.iter().next().unwrap();
        assert_eq!(record.get_scalar("episode").unwrap(), 3.0);
        assert_eq!(record.get_scalar("episode_return_mean").unwrap(), -180.0);
        assert!(matches!(
            record.get("datetime"),
            Some(RecordValue::DateTime(_))
        ));

        let record = recorder.iter().nth(1).unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(record.get_scalar("episode").unwrap(), 6.0);
    }
}
