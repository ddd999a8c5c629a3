//! Filtered, numbered pages over a small in-memory store.
//!
//! Run with: `cargo run --example general_store --features mock`
//! (set `RUST_LOG=search_adapter=debug` to watch cache hits).

use std::fmt;

use anyhow::Result;
use search_adapter::{
    AdapterConfig, CacheConfig, FilterAdapter, FilteredPagedRequest, MockPagedBackend,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct Article {
    name: &'static str,
    eatable: bool,
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (eatable: {})", self.name, self.eatable)
    }
}

const STORE: [(&str, bool); 12] = [
    ("Apples", true),
    ("Bananas", true),
    ("Bread", true),
    ("Bumerang", false),
    ("Cheese", true),
    ("Hammer", false),
    ("Kiwis", true),
    ("Peanuts", true),
    ("Salami", true),
    ("Soja", true),
    ("Table", false),
    ("Zucchini", true),
];

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut config = AdapterConfig::from_env()?;
    if config.cache.is_none() {
        config = config.with_cache(CacheConfig::new(64, 64));
    }

    let articles = STORE
        .iter()
        .map(|&(name, eatable)| Article { name, eatable })
        .collect();
    let adapter = FilterAdapter::with_config(
        MockPagedBackend::new(articles),
        |article: &Article, eatable: &bool| article.eatable == *eatable,
        config,
    )?;

    let request = FilteredPagedRequest::new((), true, 0, 4);
    for page in [2, 1, 0, 2, 3] {
        let result = adapter.find_and_filter(&request.at_page(page)).await?;
        println!("{result}");
    }
    println!("backend requests: {}", adapter.backend().request_count());

    Ok(())
}
