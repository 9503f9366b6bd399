//! Tests for NamedModel - the tag → variant map and its swap atomicity.

use std::sync::Arc;

use serde_json::json;
use serving_core::engine::LinearModel;
use serving_core::models::{ModelVariant, NamedModel};

fn variant(bias: f64) -> Arc<ModelVariant> {
    let bytes = json!({
        "input_dim": 1,
        "weights": [[1.0]],
        "bias": [bias]
    })
    .to_string()
    .into_bytes();
    let model = LinearModel::from_json(&bytes).unwrap();
    Arc::new(ModelVariant::new(Arc::new(model)))
}

#[tokio::test]
async fn test_put_then_get_returns_variant() {
    let named = NamedModel::new("iris");
    let v = variant(0.0);

    named.put("production", v.clone()).await;

    let got = named.get("production").await.unwrap();
    assert!(Arc::ptr_eq(&got, &v));
}

#[tokio::test]
async fn test_get_absent_tag_is_none() {
    let named = NamedModel::new("iris");
    assert!(named.get("staging").await.is_none());
}

#[tokio::test]
async fn test_put_replaces_and_returns_old() {
    let named = NamedModel::new("iris");
    let v1 = variant(1.0);
    let v2 = variant(2.0);

    assert!(named.put("production", v1.clone()).await.is_none());
    let old = named.put("production", v2.clone()).await.unwrap();
    assert!(Arc::ptr_eq(&old, &v1));

    let got = named.get("production").await.unwrap();
    assert!(Arc::ptr_eq(&got, &v2));
}

#[tokio::test]
async fn test_tags_snapshot() {
    let named = NamedModel::new("iris");
    named.put("production", variant(0.0)).await;
    named.put("cal-2024-06", variant(0.5)).await;

    let mut tags = named.tags().await;
    tags.sort();
    assert_eq!(tags, vec!["cal-2024-06", "production"]);
}

#[tokio::test]
async fn test_remove_tag() {
    let named = NamedModel::new("iris");
    named.put("staging", variant(0.0)).await;

    assert!(named.remove("staging").await.is_some());
    assert!(named.get("staging").await.is_none());
    assert_eq!(named.variant_count().await, 0);
}

#[tokio::test]
async fn test_select_prefers_existing_variant_id() {
    let named = NamedModel::new("iris");
    let prod = variant(0.0);
    let cal = variant(9.0);
    named.put("production", prod.clone()).await;
    named.put("cal-1", cal.clone()).await;

    let got = named.select("production", "cal-1").await.unwrap();
    assert!(Arc::ptr_eq(&got, &cal));
}

#[tokio::test]
async fn test_select_falls_back_to_stage_for_unknown_variant_id() {
    let named = NamedModel::new("iris");
    let prod = variant(0.0);
    named.put("production", prod.clone()).await;

    let got = named.select("production", "no-such-variant").await.unwrap();
    assert!(Arc::ptr_eq(&got, &prod));
}

#[tokio::test]
async fn test_select_absent_everything_is_none() {
    let named = NamedModel::new("iris");
    assert!(named.select("staging", "").await.is_none());
}

#[tokio::test]
async fn test_last_updated_tracks_max() {
    let named = NamedModel::new("iris");
    assert!(named.last_updated().await.is_none());

    named.put("production", variant(0.0)).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let later = variant(1.0);
    named.put("staging", later.clone()).await;

    assert_eq!(named.last_updated().await, Some(later.updated_at()));
}

// Concurrent readers racing replacement must always observe one of the
// published variants, never an absent tag.
#[tokio::test]
async fn test_concurrent_get_during_put_never_absent() {
    let named = Arc::new(NamedModel::new("iris"));
    let v1 = variant(1.0);
    let v2 = variant(2.0);
    named.put("production", v1.clone()).await;

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let n = named.clone();
        let (a, b) = (v1.clone(), v2.clone());
        tasks.push(tokio::spawn(async move {
            for _ in 0..200 {
                let got = n.get("production").await.expect("tag must never be absent");
                assert!(Arc::ptr_eq(&got, &a) || Arc::ptr_eq(&got, &b));
            }
        }));
    }

    let writer = {
        let n = named.clone();
        let (a, b) = (v1.clone(), v2.clone());
        tokio::spawn(async move {
            for i in 0..100 {
                let v = if i % 2 == 0 { b.clone() } else { a.clone() };
                n.put("production", v).await;
                tokio::task::yield_now().await;
            }
        })
    };

    for t in tasks {
        t.await.unwrap();
    }
    writer.await.unwrap();
}
