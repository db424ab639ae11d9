//! Reference-counted lists shared between the builder and built documents.

use super::{BodySection, TablesRow};
use std::cell::{BorrowError, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// A shared, mutable list.
///
/// Cloning a `SharedList` clones the handle, not the items: the builder and every
/// document built from it observe the same list. The list is `!Send`; a document
/// is meant to be handed to one renderer at a time on one thread.
pub struct SharedList<T>(Rc<RefCell<Vec<T>>>);

/// Table rows of a header, footer or signature section.
pub type RowList = SharedList<TablesRow>;

/// Top-level body sections of a document.
pub type SectionList = SharedList<BodySection>;

impl<T> SharedList<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Vec::new())))
    }

    /// Create a list holding `items`.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self(Rc::new(RefCell::new(items)))
    }

    /// Append an item.
    pub fn push(&self, item: T) {
        self.0.borrow_mut().push(item);
    }

    /// Get the number of items.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Borrow the items.
    ///
    /// # Panics
    ///
    /// Panics if the list is currently borrowed mutably.
    pub fn borrow(&self) -> Ref<'_, Vec<T>> {
        self.0.borrow()
    }

    /// Borrow the items, failing if the list is currently borrowed mutably.
    pub fn try_borrow(&self) -> Result<Ref<'_, Vec<T>>, BorrowError> {
        self.0.try_borrow()
    }

    /// Borrow the items mutably.
    ///
    /// # Panics
    ///
    /// Panics if the list is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, Vec<T>> {
        self.0.borrow_mut()
    }

    /// Check whether two handles point at the same list.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: Clone> SharedList<T> {
    /// Copy the current items out of the list.
    pub fn snapshot(&self) -> Vec<T> {
        self.0.borrow().clone()
    }

    /// Create a new, unshared list with a copy of the current items.
    pub fn deep_clone(&self) -> Self {
        Self::from_vec(self.snapshot())
    }
}

impl<T> Clone for SharedList<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> Default for SharedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.borrow().iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_shares_items() {
        let list = RowList::new();
        let alias = list.clone();
        alias.push(TablesRow::from_strings(["x"]));

        assert_eq!(list.len(), 1);
        assert!(list.ptr_eq(&alias));
        assert!(!list.ptr_eq(&RowList::new()));
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let list = SharedList::from_vec(vec![1, 2]);
        let copy = list.deep_clone();
        copy.push(3);

        assert_eq!(list.snapshot(), vec![1, 2]);
        assert_eq!(copy.snapshot(), vec![1, 2, 3]);
        assert!(!list.ptr_eq(&copy));
    }

    #[test]
    fn test_borrow_mut_edits_in_place() {
        let list = SharedList::from_vec(vec![TablesRow::from_strings(["a", "b"]).widths([3])]);
        list.borrow_mut()[0].normalize_widths();
        assert_eq!(list.borrow()[0].column_widths, Some(vec![1, 1]));
    }

    #[test]
    fn test_try_borrow_while_mutating() {
        let list = SharedList::from_vec(vec![1]);
        let guard = list.borrow_mut();
        assert!(list.try_borrow().is_err());
        drop(guard);
        assert!(list.try_borrow().is_ok());
    }
}
