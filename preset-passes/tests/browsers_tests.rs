//! Memoization of the affected browser set.

mod common;

use std::{sync::Arc, thread};

use common::CountingResolver;
use ngpreset_passes::browsers::{BrowserCompatCache, BrowserData, BrowserResolver};

#[test]
fn test_second_call_returns_same_set() {
    let cache = BrowserCompatCache::new();
    let resolver = CountingResolver::default();

    let first = cache.affected_browsers(&resolver).unwrap();
    let second = cache.affected_browsers(&resolver).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(resolver.calls(), 1);
}

#[test]
fn test_concurrent_first_calls_compute_once() {
    let cache = Arc::new(BrowserCompatCache::new());
    let resolver = Arc::new(CountingResolver::default());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = cache.clone();
            let resolver = resolver.clone();
            thread::spawn(move || cache.affected_browsers(resolver.as_ref()).unwrap())
        })
        .collect();
    let sets: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(resolver.calls(), 1);
    assert!(sets.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}

#[test]
fn test_affected_set_contents() {
    let cache = BrowserCompatCache::new();
    let browsers = cache.affected_browsers(&BrowserData::new()).unwrap();

    for affected in ["safari 15", "safari 14.1", "ios_saf 15.0-15.1", "ios_saf 12.2-12.5"] {
        assert!(browsers.contains(affected), "{affected}");
    }
    for unaffected in ["safari 15.1", "safari 16.0", "ios_saf 15.2-15.3", "chrome 120"] {
        assert!(!browsers.contains(unaffected), "{unaffected}");
    }
}

#[test]
fn test_resolver_queries() {
    let data = BrowserData::new();
    let resolved = data.resolve(&["chrome >= 130", "firefox > 132"]).unwrap();
    assert_eq!(resolved, vec!["chrome 130", "chrome 131", "firefox 133"]);
}
