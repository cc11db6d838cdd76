use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use envsecret::core::config::{Format, ServiceConfig};
use envsecret::core::lifecycle::{HostContext, Session};
use envsecret::core::template::{augment, secret_string, Template, TemplateFragment};
use serde_json::{json, Map, Value};
use std::time::Duration;

/// Build a config with `size` entries, every third one a secret value.
fn generate_config(size: usize) -> ServiceConfig {
    let mut environment = Map::new();
    for i in 0..size {
        let value = if i % 3 == 0 {
            json!({ "SecretValue": format!("secret-{}", i) })
        } else {
            json!(format!("value-{}", i))
        };
        environment.insert(format!("VAR_{}", i), value);
    }

    let contents = json!({
        "service": "bench",
        "custom": { "environment": environment },
    })
    .to_string();
    ServiceConfig::parse(&contents, Format::Json, "bench.json").unwrap()
}

fn compiled_template() -> Template {
    Template::from_value(json!({
        "Resources": {
            "IamRoleLambdaExecution": {
                "Type": "AWS::IAM::Role",
                "Properties": {
                    "Policies": [{
                        "PolicyName": { "Fn::Join": ["-", ["bench", "dev", "lambda"]] },
                        "PolicyDocument": { "Version": "2012-10-17", "Statement": [] }
                    }]
                }
            }
        },
        "Outputs": {}
    }))
    .unwrap()
}

/// Benchmark building the template fragment for varying environment sizes.
fn bench_build_fragment(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_fragment");
    group.sample_size(50);
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    let sizes = [4, 32, 128, 512];

    for size in sizes {
        let config = generate_config(size);
        let (session, _) = Session::initialize(&config, HostContext::default()).unwrap();

        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("entries", size), &session, |b, session| {
            b.iter(|| {
                let fragment = TemplateFragment::build(
                    black_box(session.environment()),
                    black_box(session.collected()),
                    black_box(session.naming()),
                );
                black_box(fragment);
            });
        });
    }

    group.finish();
}

/// Benchmark the full merge into a compiled template.
fn bench_augment(c: &mut Criterion) {
    let mut group = c.benchmark_group("augment");
    group.sample_size(50);
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    let sizes = [4, 32, 128, 512];

    for size in sizes {
        let config = generate_config(size);
        let (session, _) = Session::initialize(&config, HostContext::default()).unwrap();
        let template = compiled_template();

        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("entries", size), &session, |b, session| {
            b.iter(|| {
                let augmented = augment(
                    black_box(template.clone()),
                    session.environment(),
                    session.collected(),
                    session.naming(),
                )
                .unwrap();
                black_box(augmented);
            });
        });
    }

    group.finish();
}

/// Benchmark rendering the secret string expression to template JSON.
fn bench_secret_string(c: &mut Criterion) {
    let mut group = c.benchmark_group("secret_string");
    group.sample_size(50);

    for size in [32, 512] {
        let config = generate_config(size);
        let (session, _) = Session::initialize(&config, HostContext::default()).unwrap();

        group.bench_with_input(BenchmarkId::new("to_template", size), &session, |b, session| {
            b.iter(|| {
                let rendered: Value = secret_string(black_box(session.environment())).to_template();
                black_box(rendered);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build_fragment, bench_augment, bench_secret_string);
criterion_main!(benches);
