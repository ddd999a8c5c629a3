//! Store repositories shared by the integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use search_adapter::{
    BackendResult, Finder, IterativeRequest, IterativeResult, PageResult, PagedRequest, Predicate,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item {
    pub name: String,
    pub eatable: bool,
    pub born: u16,
}

impl Item {
    pub fn new(name: impl Into<String>, eatable: bool, born: u16) -> Self {
        Self {
            name: name.into(),
            eatable,
            born,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortBy {
    #[default]
    Name,
    Eatable,
}

/// What the store backend can evaluate on its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StoreSearch {
    pub name_contains: Option<String>,
    pub sort_by: SortBy,
}

impl StoreSearch {
    pub fn by_name() -> Self {
        Self::default()
    }

    pub fn containing(fragment: &str) -> Self {
        Self {
            name_contains: Some(fragment.to_string()),
            sort_by: SortBy::Name,
        }
    }
}

/// What only the client can evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ItemFilter {
    pub eatable: Option<bool>,
    pub born_before: Option<u16>,
}

impl ItemFilter {
    pub fn eatable() -> Self {
        Self {
            eatable: Some(true),
            born_before: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ItemPredicate;

impl Predicate<Item, ItemFilter> for ItemPredicate {
    fn test(&self, item: &Item, filter: &ItemFilter) -> bool {
        filter.eatable.is_none_or(|eatable| item.eatable == eatable)
            && filter.born_before.is_none_or(|year| item.born < year)
    }
}

pub fn general_store() -> Vec<Item> {
    vec![
        Item::new("Zucchini", true, 2021),
        Item::new("Hammer", false, 1998),
        Item::new("Apples", true, 2023),
        Item::new("Table", false, 1975),
        Item::new("Bananas", true, 2023),
        Item::new("Salami", true, 2019),
        Item::new("Bumerang", false, 1988),
        Item::new("Cheese", true, 2015),
        Item::new("Soja", true, 2022),
        Item::new("Bread", true, 2024),
        Item::new("Kiwis", true, 2023),
        Item::new("Peanuts", true, 2020),
    ]
}

/// `count` items with names and attributes spread deterministically.
pub fn big_store(count: u32) -> Vec<Item> {
    (0..count)
        .map(|i| {
            Item::new(
                format!("item-{:05}", (i * 7919) % 100_000),
                i % 3 != 0,
                1900 + ((i * 37) % 120) as u16,
            )
        })
        .collect()
}

fn search_store(items: &[Item], search: &StoreSearch) -> Vec<Item> {
    let mut found: Vec<Item> = items
        .iter()
        .filter(|item| {
            search
                .name_contains
                .as_deref()
                .is_none_or(|fragment| item.name.contains(fragment))
        })
        .cloned()
        .collect();
    match search.sort_by {
        SortBy::Name => found.sort_by(|a, b| a.name.cmp(&b.name)),
        SortBy::Eatable => found.sort_by_key(|item| item.eatable),
    }
    found
}

/// Output page computed the slow way, for comparison.
pub fn expected_page(
    items: &[Item],
    search: &StoreSearch,
    filter: &ItemFilter,
    page: u64,
    page_size: u64,
) -> Vec<Item> {
    search_store(items, search)
        .into_iter()
        .filter(|item| ItemPredicate.test(item, filter))
        .skip((page * page_size) as usize)
        .take(page_size as usize)
        .collect()
}

/// Page-addressed store backend.
#[derive(Debug)]
pub struct StoreRepository {
    items: Vec<Item>,
    requests: AtomicUsize,
}

impl StoreRepository {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            requests: AtomicUsize::new(0),
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl Finder<PagedRequest<StoreSearch>, PageResult<Item>> for StoreRepository {
    async fn find(&self, request: &PagedRequest<StoreSearch>) -> BackendResult<PageResult<Item>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let items = search_store(&self.items, &request.search)
            .into_iter()
            .skip((request.page * request.page_size) as usize)
            .take(request.page_size as usize)
            .collect();
        Ok(PageResult::new(items, request.page, request.page_size))
    }
}

/// Cursor-addressed store backend. The cursor is the offset of the next item
/// and the page that reaches the end carries none.
#[derive(Debug)]
pub struct StoreCursorRepository {
    items: Vec<Item>,
    requests: AtomicUsize,
}

impl StoreCursorRepository {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            requests: AtomicUsize::new(0),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl Finder<IterativeRequest<StoreSearch, usize>, IterativeResult<Item, usize>>
    for StoreCursorRepository
{
    async fn find(
        &self,
        request: &IterativeRequest<StoreSearch, usize>,
    ) -> BackendResult<IterativeResult<Item, usize>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let found = search_store(&self.items, &request.search);
        let offset = request.cursor.unwrap_or(0);
        let items: Vec<Item> = found
            .iter()
            .skip(offset)
            .take(request.page_size as usize)
            .cloned()
            .collect();
        let next = offset + items.len();
        let next_cursor = (next < found.len()).then_some(next);
        Ok(IterativeResult::new(items, next_cursor, request.page_size))
    }
}

/// Deterministic pseudo-random page numbers in `0..pages`.
#[derive(Debug, Clone)]
pub struct PageSequence {
    state: u64,
    pages: u64,
}

impl PageSequence {
    pub fn new(seed: u64, pages: u64) -> Self {
        Self { state: seed, pages }
    }
}

impl Iterator for PageSequence {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        Some((self.state >> 33) % self.pages)
    }
}
