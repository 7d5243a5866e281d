//! Benchmarks for scan-result classification and dispatch.

use criterion::{Criterion, criterion_group, criterion_main};
use scandesk_protocol::{ScanReport, ScanResource, classify};
use std::hint::black_box;

fn representative_paths() -> Vec<String> {
    vec![
        "/scan/123/expiry-check".to_string(),
        "/scan/123/checksums".to_string(),
        "/scan/123/age-check".to_string(),
        "/scan/123/uv-dullness".to_string(),
        "/scan/123/b900-check".to_string(),
        "/scan/123/mrz".to_string(),
        "/scan/123/document/infrared".to_string(),
        "/scan/123/document/visible".to_string(),
        "/scan/123/document/ultraviolet".to_string(),
        "/scan/123/debug-log".to_string(),
    ]
}

fn bench_classify(c: &mut Criterion) {
    let paths = representative_paths();

    c.bench_function("classify_result_set", |b| {
        b.iter(|| {
            for path in &paths {
                black_box(classify(black_box(path)));
            }
        });
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let pairs: Vec<ScanResource> = representative_paths()
        .into_iter()
        .map(|resource| ScanResource {
            resource,
            payload: serde_json::json!({"testResult": "OK", "available": true}),
        })
        .collect();

    c.bench_function("dispatch_full_scan", |b| {
        b.iter(|| ScanReport::dispatch(black_box(pairs.clone())));
    });
}

criterion_group!(benches, bench_classify, bench_dispatch);
criterion_main!(benches);
