use donation_whistle_test_utils::prelude::*;

use crate::server::service::cache::ResponseCache;


/// Cache pre-filled with one entry so tests can check whether an operation cleared it
async fn primed_cache() -> ResponseCache {
    let cache = ResponseCache::new();
    cache
        .insert("aliases:overview", &"stale")
        .await
        .expect("cache insert");
    cache
}
