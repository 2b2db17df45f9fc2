//! The binding factory and the plural table collection.

use std::sync::Arc;

use tabledom::TableElement;

use crate::iter::Iterable;
use crate::table::QuickTable;
use crate::types::TypeRegistry;

/// Attachment key under which a table element memoizes its wrapper.
const ATTACHMENT_KEY: &str = "quicktable";

/// Creates [`QuickTable`] wrappers for table elements and memoizes them on
/// the element, so repeated binding of the same element returns the same
/// wrapper. Every table created by one binder shares its type registry.
#[derive(Debug, Clone, Default)]
pub struct Binder {
    registry: TypeRegistry,
}

impl Binder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: TypeRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Bind one element, returning its existing wrapper when present.
    pub fn bind_one(&self, element: &TableElement) -> QuickTable {
        self.bind_one_with(element, |_| {})
    }

    /// Bind one element, running `init` inside the initialization guard for
    /// a newly created wrapper (`draw` is a no-op while it runs). An already
    /// bound element returns its wrapper without re-running `init`.
    pub fn bind_one_with(&self, element: &TableElement, init: impl Fn(&QuickTable)) -> QuickTable {
        if let Some(existing) = element.attachment::<QuickTable>(ATTACHMENT_KEY) {
            return (*existing).clone();
        }
        let table = QuickTable::create(element.clone(), self.registry.clone());
        element.attach(ATTACHMENT_KEY, Arc::new(table.clone()));
        table.run_init(&init);
        table
    }

    /// Bind a set of elements into a [`QuickTables`] collection.
    pub fn bind(&self, elements: &[TableElement]) -> QuickTables {
        self.bind_with(elements, |_| {})
    }

    pub fn bind_with(&self, elements: &[TableElement], init: impl Fn(&QuickTable)) -> QuickTables {
        QuickTables::new(
            elements
                .iter()
                .map(|e| self.bind_one_with(e, &init))
                .collect(),
        )
    }
}

/// A collection of bound tables.
#[derive(Debug, Clone, Default)]
pub struct QuickTables {
    tables: Vec<QuickTable>,
}

impl QuickTables {
    pub fn new(tables: Vec<QuickTable>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> Vec<QuickTable> {
        self.tables.clone()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<QuickTable> {
        self.tables.get(index).cloned()
    }

    pub fn get_by_id(&self, id: &str) -> Option<QuickTable> {
        self.find(|t| t.id().as_deref() == Some(id))
    }

    pub fn get_all(&self, indexes: impl IntoIterator<Item = usize>) -> QuickTables {
        Self::new(indexes.into_iter().filter_map(|i| self.get(i)).collect())
    }

    pub fn get_all_by_id<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> QuickTables {
        Self::new(ids.into_iter().filter_map(|id| self.get_by_id(id)).collect())
    }

    /// Draw every table in the collection.
    pub fn draw(&self) -> &Self {
        self.each(|t| {
            t.draw();
        })
    }
}

impl Iterable for QuickTables {
    type Item = QuickTable;

    fn items(&self) -> Vec<QuickTable> {
        self.tables()
    }

    fn remake(&self, items: Vec<QuickTable>) -> Self {
        Self::new(items)
    }
}
