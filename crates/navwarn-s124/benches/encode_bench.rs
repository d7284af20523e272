use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use navwarn_model::{
    Feature, FeatureCollection, Geometry, MainType, Message, MessageDesc, MessagePart,
    MessagePartDesc, WarningCategory,
};
use navwarn_s124::{encode_dataset, to_xml};

fn benchmark_message() -> Message {
    let ring: Vec<Vec<f64>> = (0..64)
        .map(|i| {
            let angle = (i as f64) * std::f64::consts::TAU / 64.0;
            vec![12.0 + angle.cos() * 0.1, 56.0 + angle.sin() * 0.1]
        })
        .chain(std::iter::once(vec![12.1, 56.0]))
        .collect();

    Message {
        id: "bench-message".to_string(),
        short_id: Some("NW-100-17".to_string()),
        main_type: MainType::Nw,
        category: WarningCategory::NavareaWarning,
        number: Some(100),
        year: Some(2017),
        publish_date_from: Utc.with_ymd_and_hms(2017, 6, 1, 0, 0, 0).single(),
        publish_date_to: None,
        descs: vec![MessageDesc {
            lang: "en".to_string(),
            title: Some("Survey operations.".to_string()),
        }],
        parts: vec![MessagePart {
            index_no: 0,
            descs: vec![MessagePartDesc {
                lang: "en".to_string(),
                details: Some("Survey vessel operating with towed equipment.".to_string()),
            }],
            event_dates: vec![],
            geometry: Some(FeatureCollection {
                features: vec![Feature {
                    geometry: Some(Geometry::GeometryCollection {
                        geometries: vec![
                            Geometry::Polygon {
                                coordinates: vec![ring],
                            },
                            Geometry::MultiPoint {
                                coordinates: (0..16)
                                    .map(|i| vec![12.0 + i as f64 * 0.01, 56.0])
                                    .collect(),
                            },
                        ],
                    }),
                }],
            }),
        }],
        areas: vec![],
        references: vec![],
    }
}

fn bench_encode(c: &mut Criterion) {
    let message = benchmark_message();
    c.bench_function("encode_dataset", |b| {
        b.iter(|| encode_dataset(black_box(&message), "en").unwrap())
    });
}

fn bench_serialize(c: &mut Criterion) {
    let message = benchmark_message();
    let dataset = encode_dataset(&message, "en").unwrap();
    c.bench_function("serialize_pretty", |b| {
        b.iter(|| to_xml(black_box(&dataset), true).unwrap())
    });
    c.bench_function("serialize_compact", |b| {
        b.iter(|| to_xml(black_box(&dataset), false).unwrap())
    });
}

criterion_group!(benches, bench_encode, bench_serialize);
criterion_main!(benches);
