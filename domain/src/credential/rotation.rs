//! Round-robin rotation state.
//!
//! [`RotationState`] is the in-memory form of the persisted cursor: the
//! 1-based number of the credential the next default-mode selection will
//! use. Selection is a pure transition `state -> (number, next_state)`;
//! reading and writing the persisted value is the caller's job.

use super::pool::CredentialNumber;

/// Normalized rotation cursor, always within `[1, pool_len]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationState {
    cursor: CredentialNumber,
    pool_len: usize,
}

impl RotationState {
    /// Cursor at the first credential
    pub fn initial(pool_len: usize) -> Self {
        Self {
            cursor: CredentialNumber::FIRST,
            pool_len: pool_len.max(1),
        }
    }

    /// Build from a raw persisted value.
    ///
    /// Absent or zero values start at 1; values past the pool size wrap.
    pub fn from_persisted(raw: Option<usize>, pool_len: usize) -> Self {
        let pool_len = pool_len.max(1);
        let cursor = raw
            .and_then(|n| CredentialNumber::new(n).ok())
            .map(|n| n.normalized(pool_len))
            .unwrap_or(CredentialNumber::FIRST);
        Self { cursor, pool_len }
    }

    /// Parse a persisted text value; anything unparsable starts at 1
    pub fn parse(raw: &str, pool_len: usize) -> Self {
        Self::from_persisted(raw.trim().parse().ok(), pool_len)
    }

    pub fn cursor(&self) -> CredentialNumber {
        self.cursor
    }

    /// Take the credential under the cursor and move one step forward
    pub fn select(self) -> (CredentialNumber, RotationState) {
        (self.cursor, self.advance(1))
    }

    /// Move the cursor `steps` positions forward, wrapping to 1
    pub fn advance(self, steps: usize) -> RotationState {
        Self {
            cursor: self.cursor.offset(steps, self.pool_len),
            pool_len: self.pool_len,
        }
    }

    /// Number handed to the agent at `index` (0-based) of a batch
    /// starting at this cursor
    pub fn nth(&self, index: usize) -> CredentialNumber {
        self.cursor.offset(index, self.pool_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_missing_value_starts_at_one() {
        assert_eq!(RotationState::from_persisted(None, 4).cursor().get(), 1);
        assert_eq!(RotationState::from_persisted(Some(0), 4).cursor().get(), 1);
    }

    #[test]
    fn test_malformed_text_starts_at_one() {
        assert_eq!(RotationState::parse("abc", 4).cursor().get(), 1);
        assert_eq!(RotationState::parse("", 4).cursor().get(), 1);
        assert_eq!(RotationState::parse("-2", 4).cursor().get(), 1);
        assert_eq!(RotationState::parse(" 3 ", 4).cursor().get(), 3);
    }

    #[test]
    fn test_out_of_range_value_wraps() {
        assert_eq!(RotationState::from_persisted(Some(25), 20).cursor().get(), 5);
        assert_eq!(RotationState::from_persisted(Some(20), 20).cursor().get(), 20);
    }

    #[test]
    fn test_select_wraps_at_pool_end() {
        let state = RotationState::from_persisted(Some(3), 3);
        let (number, next) = state.select();
        assert_eq!(number.get(), 3);
        assert_eq!(next.cursor().get(), 1);
    }

    #[test]
    fn test_single_credential_pool() {
        let (number, next) = RotationState::initial(1).select();
        assert_eq!(number.get(), 1);
        assert_eq!(next.cursor().get(), 1);
    }

    #[test]
    fn test_batch_assignment_and_advance() {
        let state = RotationState::from_persisted(Some(3), 4);
        let assigned: Vec<_> = (0..3).map(|i| state.nth(i).get()).collect();
        assert_eq!(assigned, vec![3, 4, 1]);
        assert_eq!(state.advance(3).cursor().get(), 2);
    }

    proptest! {
        #[test]
        fn prop_consecutive_selections_follow_round_robin(
            pool_len in 1usize..30,
            start in 1usize..30,
            count in 0usize..100,
        ) {
            let mut state = RotationState::from_persisted(Some(start), pool_len);
            let c0 = state.cursor().get();
            for i in 0..count {
                let (number, next) = state.select();
                prop_assert_eq!(number.get(), (c0 - 1 + i) % pool_len + 1);
                prop_assert!(next.cursor().get() >= 1 && next.cursor().get() <= pool_len);
                state = next;
            }
        }
    }
}
