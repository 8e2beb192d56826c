//! Result aggregator for ordering parallel solver results
//!
//! Buffers and orders results for streaming output using two min-heaps:
//! - One for expected keys (what we're waiting for)
//! - One for received results (buffered until their turn)

use crate::executor::SolverResult;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Key for ordering results (year, day, part) - ordered ascending
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

/// Wrapper for min-heap ordering of SolverResult
struct OrderedResult(SolverResult);

impl Ord for OrderedResult {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse ordering for min-heap (smallest first)
        ResultKey::from(&other.0).cmp(&ResultKey::from(&self.0))
    }
}

impl PartialOrd for OrderedResult {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for OrderedResult {}

impl PartialEq for OrderedResult {
    fn eq(&self, other: &Self) -> bool {
        ResultKey::from(&self.0) == ResultKey::from(&other.0)
    }
}

/// Aggregator that buffers results and emits them in sorted order
pub struct ResultAggregator {
    /// Min-heap of expected keys (next to output is at top)
    expected: BinaryHeap<Reverse<ResultKey>>,
    /// Min-heap of received results waiting to be output
    pending: BinaryHeap<OrderedResult>,
}

impl ResultAggregator {
    /// Create aggregator from list of expected keys
    pub fn new(expected_keys: Vec<ResultKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().map(Reverse).collect(),
            pending: BinaryHeap::new(),
        }
    }

    /// Add a result and return any results ready for output (in order)
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.push(OrderedResult(result));

        // Emit results while pending min matches expected min
        let mut ready = Vec::new();
        while let (Some(Reverse(next_expected)), Some(top_pending)) =
            (self.expected.peek(), self.pending.peek())
        {
            if ResultKey::from(&top_pending.0) != *next_expected {
                break;
            }
            self.expected.pop();
            if let Some(OrderedResult(result)) = self.pending.pop() {
                ready.push(result);
            }
        }
        ready
    }

    /// Drain remaining results in order (for final output)
    pub fn drain(&mut self) -> Vec<SolverResult> {
        let mut results: Vec<_> = self.pending.drain().map(|o| o.0).collect();
        results.sort_by_key(|r| ResultKey::from(r));
        results
    }

    /// Check if all expected results have been received
    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use proptest::prelude::*;

    fn key(year: u16, day: u8, part: u8) -> ResultKey {
        ResultKey { year, day, part }
    }

    fn make_result(k: ResultKey) -> SolverResult {
        SolverResult {
            year: k.year,
            day: k.day,
            part: k.part,
            answer: Ok(format!("{}_{}_{}", k.year, k.day, k.part)),
            solve_duration: TimeDelta::milliseconds(10),
            parse_duration: Some(TimeDelta::milliseconds(5)),
        }
    }

    #[test]
    fn test_in_order_results() {
        let mut agg = ResultAggregator::new(vec![key(2023, 1, 1), key(2023, 1, 2)]);

        let ready = agg.add(make_result(key(2023, 1, 1)));
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].part, 1);

        let ready = agg.add(make_result(key(2023, 1, 2)));
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].part, 2);

        assert!(agg.is_complete());
    }

    #[test]
    fn test_out_of_order_results() {
        let mut agg =
            ResultAggregator::new(vec![key(2023, 1, 1), key(2023, 1, 2), key(2023, 2, 1)]);

        assert!(agg.add(make_result(key(2023, 1, 2))).is_empty());
        assert!(agg.add(make_result(key(2023, 2, 1))).is_empty());

        let ready = agg.add(make_result(key(2023, 1, 1)));
        let keys: Vec<ResultKey> = ready.iter().map(ResultKey::from).collect();
        assert_eq!(keys, vec![key(2023, 1, 1), key(2023, 1, 2), key(2023, 2, 1)]);
        assert!(agg.is_complete());
    }

    #[test]
    fn test_drain_remaining() {
        let mut agg = ResultAggregator::new(vec![key(2023, 1, 1), key(2023, 1, 2)]);

        agg.add(make_result(key(2023, 1, 2)));

        let remaining = agg.drain();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].part, 2);
        assert!(!agg.is_complete());
    }

    proptest! {
        #[test]
        fn prop_any_arrival_order_is_emitted_sorted(
            order in Just(
                (1u8..=12)
                    .flat_map(|d| [key(2023, d, 1), key(2023, d, 2)])
                    .collect::<Vec<_>>()
            )
            .prop_shuffle()
        ) {
            let mut expected = order.clone();
            expected.sort();
            let mut agg = ResultAggregator::new(order.clone());

            let mut emitted = Vec::new();
            for k in order {
                emitted.extend(agg.add(make_result(k)).iter().map(ResultKey::from));
            }

            prop_assert_eq!(emitted, expected);
            prop_assert!(agg.is_complete());
        }
    }
}
