//! Integration tests for the filtering page adapter.

mod common;

use std::sync::Arc;

use common::fixtures::{
    Item, ItemFilter, ItemPredicate, PageSequence, SortBy, StoreRepository, StoreSearch,
    big_store, expected_page, general_store,
};
use futures::future::join_all;
use search_adapter::{AdapterConfig, CacheConfig, FilterAdapter, FilteredPagedRequest};

type StoreAdapter = FilterAdapter<StoreRepository, ItemPredicate, StoreSearch, Item, ItemFilter>;

fn names(items: &[Item]) -> Vec<&str> {
    items.iter().map(|item| item.name.as_str()).collect()
}

fn cached_adapter(items: Vec<Item>) -> StoreAdapter {
    FilterAdapter::with_cache(
        StoreRepository::new(items),
        ItemPredicate,
        CacheConfig::new(256, 256),
    )
    .unwrap()
}

#[tokio::test]
async fn test_general_store_eatables_by_name() {
    let adapter = cached_adapter(general_store());
    let request = FilteredPagedRequest::new(StoreSearch::by_name(), ItemFilter::eatable(), 0, 4);

    let page0 = adapter.find_and_filter(&request).await.unwrap();
    let page1 = adapter.find_and_filter(&request.at_page(1)).await.unwrap();
    let page2 = adapter.find_and_filter(&request.at_page(2)).await.unwrap();

    assert_eq!(names(&page0.items), ["Apples", "Bananas", "Bread", "Cheese"]);
    assert_eq!(names(&page1.items), ["Kiwis", "Peanuts", "Salami", "Soja"]);
    assert_eq!(names(&page2.items), ["Zucchini"]);
}

#[tokio::test]
async fn test_backend_search_and_client_filter_combine() {
    let adapter = cached_adapter(general_store());
    let search = StoreSearch::containing("a");
    let filter = ItemFilter {
        eatable: Some(true),
        born_before: Some(2023),
    };

    let page0 = adapter
        .find_and_filter(&FilteredPagedRequest::new(search.clone(), filter, 0, 2))
        .await
        .unwrap();
    let page1 = adapter
        .find_and_filter(&FilteredPagedRequest::new(search, filter, 1, 2))
        .await
        .unwrap();

    assert_eq!(names(&page0.items), ["Peanuts", "Salami"]);
    assert_eq!(names(&page1.items), ["Soja"]);
}

#[tokio::test]
async fn test_backend_sort_order_is_preserved() {
    let adapter = cached_adapter(general_store());
    let search = StoreSearch {
        name_contains: None,
        sort_by: SortBy::Eatable,
    };
    let filter = ItemFilter {
        eatable: None,
        born_before: Some(2000),
    };

    let page0 = adapter
        .find_and_filter(&FilteredPagedRequest::new(search, filter, 0, 5))
        .await
        .unwrap();

    assert_eq!(names(&page0.items), ["Hammer", "Table", "Bumerang"]);
}

#[tokio::test]
async fn test_big_repository_cached_matches_uncached() {
    let items = big_store(1000);
    let search = StoreSearch::by_name();
    let filter = ItemFilter {
        eatable: Some(true),
        born_before: Some(1960),
    };
    let page_size = 7;

    let uncached: StoreAdapter =
        FilterAdapter::new(StoreRepository::new(items.clone()), ItemPredicate);
    let cached = cached_adapter(items.clone());

    for page in PageSequence::new(42, 60).take(80) {
        let request = FilteredPagedRequest::new(search.clone(), filter, page, page_size);
        let expected = expected_page(&items, &search, &filter, page, page_size);

        let from_uncached = uncached.find_and_filter(&request).await.unwrap();
        let from_cached = cached.find_and_filter(&request).await.unwrap();

        assert_eq!(from_uncached.items, expected, "uncached page {page}");
        assert_eq!(from_cached.items, expected, "cached page {page}");
    }

    assert!(cached.backend().request_count() < uncached.backend().request_count());
}

#[tokio::test]
async fn test_big_repository_with_larger_backend_pages() {
    let items = big_store(1000);
    let search = StoreSearch::containing("1");
    let filter = ItemFilter {
        eatable: None,
        born_before: Some(1990),
    };

    for backend_page_size in [1, 5, 50, 333] {
        let config = AdapterConfig::default()
            .with_cache(CacheConfig::new(64, 64))
            .backend_page_size(backend_page_size);
        let adapter: StoreAdapter =
            FilterAdapter::with_config(StoreRepository::new(items.clone()), ItemPredicate, config)
                .unwrap();

        for page in PageSequence::new(backend_page_size, 40).take(30) {
            let request = FilteredPagedRequest::new(search.clone(), filter, page, 9);
            let result = adapter.find_and_filter(&request).await.unwrap();
            assert_eq!(
                result.items,
                expected_page(&items, &search, &filter, page, 9),
                "backend page size {backend_page_size}, page {page}"
            );
        }
    }
}

#[tokio::test]
async fn test_filters_do_not_share_checkpoints() {
    let items = big_store(300);
    let adapter = cached_adapter(items.clone());
    let search = StoreSearch::by_name();
    let filters = [
        ItemFilter::eatable(),
        ItemFilter {
            eatable: Some(false),
            born_before: None,
        },
        ItemFilter {
            eatable: None,
            born_before: Some(1950),
        },
    ];

    for page in [3, 0, 5, 1, 4, 2] {
        for filter in filters {
            let request = FilteredPagedRequest::new(search.clone(), filter, page, 6);
            let result = adapter.find_and_filter(&request).await.unwrap();
            assert_eq!(result.items, expected_page(&items, &search, &filter, page, 6));
        }
    }
}

#[tokio::test]
async fn test_concurrent_requests_share_caches() {
    let items = big_store(200);
    let adapter = Arc::new(cached_adapter(items.clone()));
    let search = StoreSearch::by_name();
    let filter = ItemFilter::eatable();

    let requests: Vec<_> = PageSequence::new(7, 12)
        .take(32)
        .map(|page| FilteredPagedRequest::new(search.clone(), filter, page, 5))
        .collect();

    let results = join_all(requests.iter().map(|request| {
        let adapter = Arc::clone(&adapter);
        async move { adapter.find_and_filter(request).await }
    }))
    .await;

    for (request, result) in requests.iter().zip(results) {
        assert_eq!(
            result.unwrap().items,
            expected_page(&items, &search, &filter, request.page, 5)
        );
    }
}
