//! Lazy loading of the linking capability.

mod common;

use std::sync::Arc;

use common::{CountingLoader, FlakyLoader};
use ngpreset_passes::linker::LinkingDecision;

const PARTIAL: &str = "static ɵcmp = i0.ɵɵngDeclareComponent({ minVersion: \"14.0.0\" });";

#[tokio::test]
async fn test_exempt_path_skips_load() {
    let loader = Arc::new(CountingLoader::default());
    let decision = LinkingDecision::new(loader.clone());

    let linked = decision
        .requires_linking("/x/@angular/core/index.mjs", PARTIAL)
        .await
        .unwrap();

    assert!(!linked);
    assert_eq!(loader.loads(), 0);
    assert!(!decision.is_loaded());
}

#[tokio::test]
async fn test_typescript_sources_skip_load() {
    let loader = Arc::new(CountingLoader::default());
    let decision = LinkingDecision::new(loader.clone());

    for path in ["/app/src/main.ts", "/app/src/view.tsx"] {
        assert!(!decision.requires_linking(path, PARTIAL).await.unwrap());
    }
    assert_eq!(loader.loads(), 0);
}

#[tokio::test]
async fn test_loads_once_and_delegates() {
    let loader = Arc::new(CountingLoader::default());
    let decision = LinkingDecision::new(loader.clone());

    assert!(
        decision
            .requires_linking("/node_modules/lib/fesm2022/lib.mjs", PARTIAL)
            .await
            .unwrap()
    );
    assert!(
        !decision
            .requires_linking("/node_modules/other/index.js", "export {};")
            .await
            .unwrap()
    );
    assert_eq!(loader.loads(), 1);
    assert!(decision.is_loaded());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_calls_share_one_load() {
    let loader = Arc::new(CountingLoader::default());
    let decision = Arc::new(LinkingDecision::new(loader.clone()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let decision = decision.clone();
            tokio::spawn(async move {
                let path = format!("/node_modules/lib{i}/index.mjs");
                decision.requires_linking(&path, PARTIAL).await
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().unwrap());
    }
    assert_eq!(loader.loads(), 1);
}

#[tokio::test]
async fn test_failed_load_is_retried() {
    let loader = Arc::new(FlakyLoader {
        failures: 1,
        ..Default::default()
    });
    let decision = LinkingDecision::new(loader.clone());

    let err = decision
        .requires_linking("/node_modules/lib/index.mjs", PARTIAL)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "linker package is not installed");
    assert!(!decision.is_loaded());

    assert!(
        decision
            .requires_linking("/node_modules/lib/index.mjs", PARTIAL)
            .await
            .unwrap()
    );
    assert_eq!(loader.attempts(), 2);
}

#[tokio::test]
async fn test_path_variant() {
    let decision = LinkingDecision::new(Arc::new(CountingLoader::default()));
    let linked = decision
        .requires_linking_path(std::path::Path::new("/node_modules/lib/index.mjs"), PARTIAL)
        .await
        .unwrap();
    assert!(linked);
}
