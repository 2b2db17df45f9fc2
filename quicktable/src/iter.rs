//! Lazy collection operations shared by every plural entity.
//!
//! A collection implements [`Iterable`] by supplying a getter (`items`, how
//! to materialize the current element list) and a maker (`remake`, how to
//! build a new collection of the same kind from an element list). All the
//! higher-order operations are provided on top of those two, so cells, rows,
//! columns and tables share one implementation.

/// Uniform operations over a materializable collection.
pub trait Iterable: Sized {
    type Item: Clone;

    /// Materialize the current elements.
    fn items(&self) -> Vec<Self::Item>;

    /// Build a new collection of the same kind from an element list.
    fn remake(&self, items: Vec<Self::Item>) -> Self;

    fn each(&self, mut f: impl FnMut(&Self::Item)) -> &Self {
        for item in self.items() {
            f(&item);
        }
        self
    }

    fn map<R>(&self, mut f: impl FnMut(&Self::Item) -> R) -> Vec<R> {
        self.items().iter().map(|item| f(item)).collect()
    }

    fn flat_map<R>(&self, mut f: impl FnMut(&Self::Item) -> Vec<R>) -> Vec<R> {
        self.items().iter().flat_map(|item| f(item)).collect()
    }

    fn some(&self, mut pred: impl FnMut(&Self::Item) -> bool) -> bool {
        self.items().iter().any(|item| pred(item))
    }

    fn every(&self, mut pred: impl FnMut(&Self::Item) -> bool) -> bool {
        self.items().iter().all(|item| pred(item))
    }

    fn find(&self, mut pred: impl FnMut(&Self::Item) -> bool) -> Option<Self::Item> {
        self.items().into_iter().find(|item| pred(item))
    }

    fn find_last(&self, mut pred: impl FnMut(&Self::Item) -> bool) -> Option<Self::Item> {
        self.items().into_iter().rev().find(|item| pred(item))
    }

    /// Keep matching elements, as a new collection of the same kind.
    fn filter(&self, mut pred: impl FnMut(&Self::Item) -> bool) -> Self {
        self.remake(self.items().into_iter().filter(|item| pred(item)).collect())
    }

    /// Concatenate this collection's elements with all the others', in order.
    fn join_with(&self, others: &[Self]) -> Self {
        let mut items = self.items();
        for other in others {
            items.extend(other.items());
        }
        self.remake(items)
    }

    /// Split into included/excluded by the predicate.
    fn partition(&self, mut pred: impl FnMut(&Self::Item) -> bool) -> Partition<Self> {
        let (included, excluded): (Vec<_>, Vec<_>) =
            self.items().into_iter().partition(|item| pred(item));
        Partition {
            included: self.remake(included),
            excluded: self.remake(excluded),
        }
    }
}

/// An included/excluded pair of same-kind collections.
#[derive(Debug, Clone)]
pub struct Partition<C> {
    pub included: C,
    pub excluded: C,
}

impl<C: Iterable> Partition<C> {
    /// Move matching elements out of `included`, joining them into the
    /// existing `excluded` side (not replacing it).
    pub fn partition_out(self, mut pred: impl FnMut(&C::Item) -> bool) -> Self {
        let (out, keep): (Vec<_>, Vec<_>) =
            self.included.items().into_iter().partition(|item| pred(item));
        let mut excluded = self.excluded.items();
        excluded.extend(out);
        Partition {
            included: self.included.remake(keep),
            excluded: self.excluded.remake(excluded),
        }
    }

    /// Mirror of `partition_out`: move matching elements from `excluded`
    /// back into `included`.
    pub fn partition_in(self, mut pred: impl FnMut(&C::Item) -> bool) -> Self {
        let (back, keep): (Vec<_>, Vec<_>) =
            self.excluded.items().into_iter().partition(|item| pred(item));
        let mut included = self.included.items();
        included.extend(back);
        Partition {
            included: self.included.remake(included),
            excluded: self.excluded.remake(keep),
        }
    }

    /// Fold `partition_out` once per list entry, threading the running
    /// partition. The predicate sees the element, the list entry and the
    /// entry's index.
    pub fn partition_out_over<L>(
        self,
        list: &[L],
        mut pred: impl FnMut(&C::Item, &L, usize) -> bool,
    ) -> Self {
        let mut partition = self;
        for (index, entry) in list.iter().enumerate() {
            partition = partition.partition_out(|item| pred(item, entry, index));
        }
        partition
    }
}
