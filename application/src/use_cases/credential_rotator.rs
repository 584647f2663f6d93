//! Credential rotator.
//!
//! Hands out credentials from the pool, either round-robin from the
//! persisted cursor or from a fixed position configured for the run.

use crate::ports::rotation_store::RotationStore;
use delegate_domain::{Credential, CredentialNumber, CredentialPool, RotationState};
use std::sync::Arc;
use tracing::{debug, warn};

/// Selects credentials and keeps the shared cursor up to date.
///
/// The cursor is read from the store before and written right after each
/// rotating selection; a failed write is logged and otherwise ignored.
pub struct CredentialRotator {
    pool: CredentialPool,
    store: Arc<dyn RotationStore>,
    override_number: Option<CredentialNumber>,
}

impl CredentialRotator {
    pub fn new(pool: CredentialPool, store: Arc<dyn RotationStore>) -> Self {
        Self {
            pool,
            store,
            override_number: None,
        }
    }

    /// Pin default-mode selections to one credential for this run
    pub fn with_override(mut self, number: Option<CredentialNumber>) -> Self {
        self.override_number = number;
        self
    }

    pub fn pool(&self) -> &CredentialPool {
        &self.pool
    }

    pub fn override_number(&self) -> Option<CredentialNumber> {
        self.override_number
    }

    /// Credential for a default-mode request.
    ///
    /// With an override the overridden position is returned and the cursor
    /// is left alone; otherwise this rotates.
    pub fn select(&self) -> (CredentialNumber, &Credential) {
        match self.override_number {
            Some(number) => self.select_fixed(number),
            None => self.select_rotating(),
        }
    }

    /// Take the credential under the cursor and persist the next position,
    /// ignoring any override
    pub fn select_rotating(&self) -> (CredentialNumber, &Credential) {
        let (number, next) = self.cursor().select();
        self.persist(next);
        debug!("Rotating to key {} of {}", number, self.pool.len());
        (number, self.pool.get(number))
    }

    /// Credential at a fixed position.
    ///
    /// Numbers past the pool size pick a wrapped key but are returned as
    /// given, so reports keep the operator's number.
    pub fn select_fixed(&self, number: CredentialNumber) -> (CredentialNumber, &Credential) {
        (number, self.pool.get(number))
    }

    /// Snapshot of the persisted cursor
    pub fn cursor(&self) -> RotationState {
        RotationState::from_persisted(self.store.load(), self.pool.len())
    }

    /// Persist the cursor `steps` positions past `snapshot` in one write
    pub fn advance_by(&self, snapshot: RotationState, steps: usize) -> RotationState {
        let next = snapshot.advance(steps);
        self.persist(next);
        next
    }

    fn persist(&self, state: RotationState) {
        if let Err(e) = self.store.save(state.cursor().get()) {
            warn!("Failed to persist key index {}: {}", state.cursor(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::rotation_store::RotationStoreError;
    use crate::use_cases::test_support::InMemoryRotationStore;

    fn pool(size: usize) -> CredentialPool {
        CredentialPool::from_secrets((1..=size).map(|i| format!("secret-key-{i:04}"))).unwrap()
    }

    fn number(n: usize) -> CredentialNumber {
        CredentialNumber::new(n).unwrap()
    }

    fn rotator(size: usize, cursor: Option<usize>) -> (CredentialRotator, Arc<InMemoryRotationStore>) {
        let store = Arc::new(match cursor {
            Some(c) => InMemoryRotationStore::with_cursor(c),
            None => InMemoryRotationStore::new(),
        });
        (CredentialRotator::new(pool(size), store.clone()), store)
    }

    struct FailingStore;

    impl RotationStore for FailingStore {
        fn load(&self) -> Option<usize> {
            Some(2)
        }

        fn save(&self, _cursor: usize) -> Result<(), RotationStoreError> {
            Err(RotationStoreError::Write {
                path: ".env".to_string(),
                source: std::io::Error::other("read-only"),
            })
        }
    }

    #[test]
    fn test_rotating_selection_advances_and_wraps() {
        let (rotator, store) = rotator(3, Some(2));

        let picked: Vec<usize> = (0..4).map(|_| rotator.select().0.get()).collect();

        assert_eq!(picked, vec![2, 3, 1, 2]);
        assert_eq!(store.load(), Some(3));
    }

    #[test]
    fn test_missing_cursor_starts_at_one() {
        let (rotator, store) = rotator(3, None);
        let (n, credential) = rotator.select();
        assert_eq!(n.get(), 1);
        assert_eq!(credential.expose(), "secret-key-0001");
        assert_eq!(store.load(), Some(2));
    }

    #[test]
    fn test_out_of_range_cursor_wraps() {
        let (rotator, _) = rotator(3, Some(5));
        assert_eq!(rotator.select().0.get(), 2);
    }

    #[test]
    fn test_override_never_touches_cursor() {
        let (rotator, store) = rotator(3, Some(1));
        let rotator = rotator.with_override(Some(number(2)));

        for _ in 0..3 {
            let (n, credential) = rotator.select();
            assert_eq!(n.get(), 2);
            assert_eq!(credential.expose(), "secret-key-0002");
        }
        assert_eq!(store.load(), Some(1));
    }

    #[test]
    fn test_override_wraps_past_pool_size() {
        let (rotator, _) = rotator(3, None);
        let rotator = rotator.with_override(Some(number(5)));

        let (n, credential) = rotator.select();

        assert_eq!(n.get(), 5);
        assert_eq!(credential.expose(), "secret-key-0002");
    }

    #[test]
    fn test_select_rotating_ignores_override() {
        let (rotator, store) = rotator(3, Some(3));
        let rotator = rotator.with_override(Some(number(1)));

        assert_eq!(rotator.select_rotating().0.get(), 3);
        assert_eq!(store.load(), Some(1));
    }

    #[test]
    fn test_advance_by_from_snapshot() {
        let (rotator, store) = rotator(3, Some(3));
        let snapshot = rotator.cursor();

        let next = rotator.advance_by(snapshot, 2);

        assert_eq!(next.cursor().get(), 2);
        assert_eq!(store.load(), Some(2));
    }

    #[test]
    fn test_failed_save_still_selects() {
        let rotator = CredentialRotator::new(pool(3), Arc::new(FailingStore));
        assert_eq!(rotator.select().0.get(), 2);
        assert_eq!(rotator.select().0.get(), 2);
    }
}
