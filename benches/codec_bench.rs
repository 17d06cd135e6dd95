use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lgpd_consent::categories::config::ProjectCategoriesConfig;
use lgpd_consent::state::record::{ConsentSource, ConsentState};
use lgpd_consent::storage::codec;
use lgpd_consent::storage::options::ConsentCookieOptions;
use time::OffsetDateTime;

fn benchmark_encode(c: &mut Criterion) {
    let config = ProjectCategoriesConfig::with_enabled(&["analytics", "marketing", "social"]);
    let now = OffsetDateTime::now_utc();
    let mut state = ConsentState::undecided(&config, now);
    state.record.consented = true;
    let options = ConsentCookieOptions::default();

    c.bench_function("consent_encode", |b| {
        b.iter(|| {
            black_box(codec::encode(
                black_box(&state),
                &config,
                &options,
                ConsentSource::Banner,
                true,
                now,
                "lgpd-consent__v1",
            ));
        })
    });
}

fn benchmark_decode(c: &mut Criterion) {
    let config = ProjectCategoriesConfig::with_enabled(&["analytics", "marketing", "social"]);
    let now = OffsetDateTime::now_utc();
    let mut state = ConsentState::undecided(&config, now);
    state.record.consented = true;
    let cookie = codec::encode(
        &state,
        &config,
        &ConsentCookieOptions::default(),
        ConsentSource::Banner,
        true,
        now,
        "lgpd-consent__v1",
    );
    let raw = cookie.value().to_string();

    c.bench_function("consent_decode", |b| {
        b.iter(|| {
            black_box(codec::decode(black_box(Some(raw.as_str()))));
        })
    });

    let legacy = r#"{"consented":true,"preferences":{"necessary":true,"analytics":true}}"#;
    c.bench_function("consent_decode_legacy", |b| {
        b.iter(|| {
            black_box(codec::decode(black_box(Some(legacy))));
        })
    });
}

criterion_group!(benches, benchmark_encode, benchmark_decode);
criterion_main!(benches);
