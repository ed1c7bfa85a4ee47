use std::collections::hash_map::Entry;

use tracing::trace;

use crate::error::{Error, Result};
use crate::worker::PerChunkResult;
use crate::Table;

/// Moves every entry of `from` into `into`, merging stations present in both.
pub fn merge_table(into: &mut Table, from: Table) {
    for (station, summary) in from {
        match into.entry(station) {
            Entry::Occupied(mut e) => e.get_mut().merge(&summary),
            Entry::Vacant(e) => {
                e.insert(summary);
            }
        }
    }
}

/// Single-threaded fold of per-chunk tables, in whatever order they arrive.
#[derive(Debug, Default)]
pub struct Reducer {
    table: Table,
    received: usize,
}

impl Reducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absorb(&mut self, result: PerChunkResult) {
        trace!(
            chunk = result.chunk_index,
            stations = result.summaries.len(),
            "merging chunk"
        );
        merge_table(&mut self.table, result.summaries);
        self.received += 1;
    }

    pub fn received(&self) -> usize {
        self.received
    }

    pub fn finish(self) -> Table {
        self.table
    }
}

/// Drains `results` into one table. The first error wins; a short stream is [`Error::Incomplete`].
pub fn reduce<I>(results: I, expected: usize) -> Result<Table>
where
    I: IntoIterator<Item = Result<PerChunkResult>>,
{
    let mut reducer = Reducer::new();
    for result in results {
        reducer.absorb(result?);
    }

    if reducer.received() != expected {
        return Err(Error::Incomplete {
            expected,
            received: reducer.received(),
        });
    }
    Ok(reducer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordError;
    use crate::summary::Summary;

    fn table(observations: &[(&str, f32)]) -> Table {
        let mut t = Table::default();
        for &(station, v) in observations {
            match t.get_mut(station) {
                Some(s) => s.add(v),
                None => {
                    t.insert(station.to_string(), Summary::new(v));
                }
            }
        }
        t
    }

    fn results() -> Vec<PerChunkResult> {
        vec![
            PerChunkResult {
                chunk_index: 0,
                summaries: table(&[("Oslo", 1.0), ("Oslo", -3.0), ("Rome", 20.5)]),
            },
            PerChunkResult {
                chunk_index: 1,
                summaries: table(&[("Oslo", 4.5)]),
            },
            PerChunkResult {
                chunk_index: 2,
                summaries: table(&[("Lima", 18.0), ("Lima", 19.0), ("Rome", 31.0), ("Rome", 12.25)]),
            },
        ]
    }

    #[test]
    fn merges_shared_and_moves_new_stations() {
        let mut into = table(&[("Oslo", 2.0)]);
        merge_table(&mut into, table(&[("Oslo", -1.0), ("Rome", 9.0)]));
        assert_eq!(into["Oslo"], table(&[("Oslo", 2.0), ("Oslo", -1.0)])["Oslo"]);
        assert_eq!(into["Rome"], Summary::new(9.0));
    }

    #[test]
    fn arrival_order_does_not_matter() {
        let forward = reduce(results().into_iter().map(Ok), 3).unwrap();
        let backward = reduce(results().into_iter().rev().map(Ok), 3).unwrap();
        assert_eq!(forward, backward);

        let oslo = forward["Oslo"];
        assert_eq!((oslo.min(), oslo.max(), oslo.count(), oslo.sum()), (-3.0, 4.5, 3, 2.5));
        assert_eq!(forward["Rome"].count(), 3);
        assert_eq!(forward["Lima"].mean(), 18.5);
    }

    #[test]
    fn first_error_aborts() {
        let mut stream: Vec<Result<PerChunkResult>> = results().into_iter().map(Ok).collect();
        stream.insert(
            1,
            Err(Error::MalformedRecord {
                offset: 42,
                kind: RecordError::NotUtf8,
            }),
        );
        let err = reduce(stream, 4).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { offset: 42, .. }));
    }

    #[test]
    fn missing_results_are_detected() {
        let err = reduce(results().into_iter().map(Ok), 4).unwrap_err();
        assert!(matches!(
            err,
            Error::Incomplete {
                expected: 4,
                received: 3
            }
        ));
    }
}
