//! Shared lock-guarded table set behind every in-memory repository.
//!
//! All tables live under one [`RwLock`]. Every mutation takes the write
//! lock for its whole check-and-write sequence, so writers are serialised
//! and readers never observe a half-applied commit. Guards are only held
//! inside synchronous closures and never across an `.await`.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::Hash;
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::domain::{
    Book, BookId, Category, CategoryId, Client, ClientId, Employee, EmployeeId, Loan, LoanId,
    RecordKey,
};

/// Rows ordered by store key with a secondary index on the public id.
#[derive(Debug)]
pub(super) struct Table<I, T> {
    rows: BTreeMap<RecordKey, T>,
    index: HashMap<I, RecordKey>,
}

impl<I, T> Default for Table<I, T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            index: HashMap::new(),
        }
    }
}

impl<I, T> Table<I, T>
where
    I: Eq + Hash + Copy,
{
    pub(super) fn get(&self, id: &I) -> Option<&T> {
        self.index.get(id).and_then(|key| self.rows.get(key))
    }

    pub(super) fn get_mut(&mut self, id: &I) -> Option<&mut T> {
        let key = self.index.get(id)?;
        self.rows.get_mut(key)
    }

    pub(super) fn key_of(&self, id: &I) -> Option<RecordKey> {
        self.index.get(id).copied()
    }

    pub(super) fn contains(&self, id: &I) -> bool {
        self.index.contains_key(id)
    }

    pub(super) fn insert(&mut self, key: RecordKey, id: I, row: T) {
        self.index.insert(id, key);
        self.rows.insert(key, row);
    }

    pub(super) fn remove(&mut self, id: &I) -> Option<T> {
        let key = self.index.remove(id)?;
        self.rows.remove(&key)
    }

    /// Rows in insertion order.
    pub(super) fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }
}

/// Every table of the library plus the book/category edge set.
#[derive(Debug)]
pub(super) struct LibraryTables {
    next_key: RecordKey,
    pub(super) books: Table<BookId, Book>,
    pub(super) clients: Table<ClientId, Client>,
    pub(super) employees: Table<EmployeeId, Employee>,
    pub(super) categories: Table<CategoryId, Category>,
    pub(super) loans: Table<LoanId, Loan>,
    /// Single source of truth for book/category membership.
    pub(super) edges: BTreeSet<(BookId, CategoryId)>,
}

impl Default for LibraryTables {
    fn default() -> Self {
        Self {
            next_key: RecordKey::FIRST,
            books: Table::default(),
            clients: Table::default(),
            employees: Table::default(),
            categories: Table::default(),
            loans: Table::default(),
            edges: BTreeSet::new(),
        }
    }
}

impl LibraryTables {
    pub(super) fn allocate_key(&mut self) -> RecordKey {
        let key = self.next_key;
        self.next_key = key.successor();
        key
    }

    pub(super) fn open_loan_for_book(&self, book_id: &BookId) -> Option<&Loan> {
        self.loans
            .values()
            .find(|loan| loan.is_open() && loan.book_id() == *book_id)
    }

    pub(super) fn open_loan_count_for_client(&self, client_id: &ClientId) -> usize {
        self.loans
            .values()
            .filter(|loan| loan.is_open() && loan.client_id() == *client_id)
            .count()
    }

    /// Category ids of a book, read from the edge set.
    pub(super) fn category_ids_of(&self, book_id: &BookId) -> Vec<CategoryId> {
        self.edges
            .iter()
            .filter(|(book, _)| book == book_id)
            .map(|(_, category)| *category)
            .collect()
    }

    /// Book ids of a category, read from the same edge set.
    pub(super) fn book_ids_in(&self, category_id: &CategoryId) -> Vec<BookId> {
        self.edges
            .iter()
            .filter(|(_, category)| category == category_id)
            .map(|(book, _)| *book)
            .collect()
    }

    /// Replace a book's edges: removals first, then additions.
    pub(super) fn replace_edges(&mut self, book_id: BookId, category_ids: &[CategoryId]) {
        let wanted: BTreeSet<CategoryId> = category_ids.iter().copied().collect();
        let current: BTreeSet<CategoryId> = self.category_ids_of(&book_id).into_iter().collect();
        for stale in current.difference(&wanted) {
            self.edges.remove(&(book_id, *stale));
        }
        for fresh in wanted.difference(&current) {
            self.edges.insert((book_id, *fresh));
        }
    }

    pub(super) fn first_unknown_category(&self, category_ids: &[CategoryId]) -> Option<CategoryId> {
        category_ids
            .iter()
            .find(|id| !self.categories.contains(id))
            .copied()
    }
}

/// In-process store implementing every repository port.
///
/// Cloning is cheap and every clone shares the same tables.
///
/// # Examples
/// ```
/// use library_backend::outbound::persistence::InMemoryLibraryStore;
///
/// let store = InMemoryLibraryStore::new();
/// let shared = store.clone();
/// # let _ = shared;
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryLibraryStore {
    tables: Arc<RwLock<LibraryTables>>,
}

impl InMemoryLibraryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `op` under the shared read lock.
    ///
    /// `poisoned` builds the repository's query error when a writer panicked
    /// while holding the lock.
    pub(super) fn read<T, E>(
        &self,
        poisoned: impl FnOnce(String) -> E,
        op: impl FnOnce(&LibraryTables) -> Result<T, E>,
    ) -> Result<T, E> {
        let guard = self.tables.read().map_err(|err| {
            debug!(error = %err, "library store lock poisoned");
            poisoned(err.to_string())
        })?;
        op(&guard)
    }

    /// Run `op` under the exclusive write lock. Checks and writes inside one
    /// call are atomic with respect to every other store operation.
    pub(super) fn write<T, E>(
        &self,
        poisoned: impl FnOnce(String) -> E,
        op: impl FnOnce(&mut LibraryTables) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut guard = self.tables.write().map_err(|err| {
            debug!(error = %err, "library store lock poisoned");
            poisoned(err.to_string())
        })?;
        op(&mut guard)
    }
}
