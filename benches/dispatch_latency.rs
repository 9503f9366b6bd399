//! Dispatch-path latency: registry resolution, validation, and a small
//! linear model invocation per request.

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::json;
use serving_core::engine::{DispatchConfig, InferenceDispatcher, PredictOptions};
use serving_core::models::{Artifact, ArtifactFormat, ModelRegistry, PublishGateway};

fn bench_artifact() -> Artifact {
    let bytes = json!({
        "input_dim": 4,
        "weights": [
            [1.0, 1.0, -1.0, -1.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0]
        ],
        "bias": [0.0, 0.0, 0.0]
    })
    .to_string()
    .into_bytes();
    Artifact::new(ArtifactFormat::LinearJson, bytes)
}

fn bench_dispatch(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let registry = Arc::new(ModelRegistry::new());
    let gateway = PublishGateway::new(registry.clone());
    rt.block_on(async {
        gateway
            .publish("bench", "production", bench_artifact())
            .await
            .unwrap();
    });
    let dispatcher = InferenceDispatcher::new(registry, DispatchConfig::default());

    c.bench_function("predict_single_record", |b| {
        b.iter(|| {
            rt.block_on(async {
                dispatcher
                    .predict(
                        "bench",
                        json!([[5.1, 3.5, 1.4, 0.2]]),
                        PredictOptions::default(),
                    )
                    .await
                    .unwrap()
            })
        })
    });

    let batch: Vec<Vec<f64>> = (0..64).map(|i| vec![i as f64, 1.0, 2.0, 3.0]).collect();
    c.bench_function("predict_64_record_batch", |b| {
        b.iter(|| {
            rt.block_on(async {
                dispatcher
                    .predict("bench", json!(batch), PredictOptions::default())
                    .await
                    .unwrap()
            })
        })
    });
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
