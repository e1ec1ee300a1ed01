//! Global sequencing and chain verification
//!
//! Every published record carries a pair of sequence numbers: its own and
//! the one issued immediately before it. The pairs form a verifiable chain:
//!
//! | record | previous | sequence |
//! |--------|----------|----------|
//! | 1st    | 0        | 1        |
//! | 2nd    | 1        | 2        |
//! | n-th   | n-1      | n        |
//!
//! The [`Sequencer`] is the single counter behind the chain. It is a plain
//! owned value: whoever holds it is the only writer, so monotonicity needs
//! no locking.

use crate::event::PublishedEvent;

/// Sequence numbers issued for one published record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencePair {
    /// Counter value before this record was appended
    pub previous: u64,
    /// Counter value after; the record's own sequence number
    pub sequence: u64,
}

/// Monotonic counter issuing [`SequencePair`]s
///
/// A fresh sequencer starts at zero, so the first issued pair is
/// `{previous: 0, sequence: 1}`. Resumed runs continue the counter from the
/// last published sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequencer {
    counter: u64,
}

impl Sequencer {
    /// Fresh counter starting at zero
    pub fn new() -> Self {
        Sequencer { counter: 0 }
    }

    /// Continue the counter after `last_sequence`
    ///
    /// The next issued pair is `{previous: last_sequence, sequence:
    /// last_sequence + 1}`, so a resumed run extends the existing chain
    /// without a gap.
    pub fn resuming_from(last_sequence: u64) -> Self {
        Sequencer {
            counter: last_sequence,
        }
    }

    /// Issue the next pair, advancing the counter
    pub fn issue(&mut self) -> SequencePair {
        let previous = self.counter;
        self.counter += 1;
        SequencePair {
            previous,
            sequence: self.counter,
        }
    }

    /// Last sequence number issued (zero for a fresh counter)
    pub fn last_sequence(&self) -> u64 {
        self.counter
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

/// Chain verification result
///
/// Returned by [`verify_chain`] to report the integrity status of a
/// published-event chain.
#[derive(Debug, Clone)]
pub struct ChainVerification {
    /// Whether the chain is valid
    pub is_valid: bool,
    /// Total length of the chain
    pub length: u64,
    /// First invalid sequence number (if any)
    pub first_invalid: Option<u64>,
    /// Error description (if any)
    pub error: Option<String>,
}

impl ChainVerification {
    /// Create a valid verification result
    pub fn valid(length: u64) -> Self {
        Self {
            is_valid: true,
            length,
            first_invalid: None,
            error: None,
        }
    }

    /// Create an invalid verification result
    pub fn invalid(length: u64, first_invalid: u64, error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            length,
            first_invalid: Some(first_invalid),
            error: Some(error.into()),
        }
    }
}

/// Verify the sequence chain of published records in append order
///
/// Checks that every record's `sequence_number` is `previous + 1` and that
/// each `previous_sequence_number` equals the sequence number of the record
/// before it. The first record's `previous` is not constrained here, so the
/// check holds for resumed suffixes as well as full chains.
pub fn verify_chain(events: &[PublishedEvent]) -> ChainVerification {
    let length = events.len() as u64;
    let mut last_sequence: Option<u64> = None;

    for event in events {
        if event.sequence_number != event.previous_sequence_number + 1 {
            return ChainVerification::invalid(
                length,
                event.sequence_number,
                format!(
                    "sequence {} does not follow previous {}",
                    event.sequence_number, event.previous_sequence_number
                ),
            );
        }
        if let Some(last) = last_sequence {
            if event.previous_sequence_number != last {
                return ChainVerification::invalid(
                    length,
                    event.sequence_number,
                    format!(
                        "previous {} does not match prior sequence {}",
                        event.previous_sequence_number, last
                    ),
                );
            }
        }
        last_sequence = Some(event.sequence_number);
    }

    ChainVerification::valid(length)
}
