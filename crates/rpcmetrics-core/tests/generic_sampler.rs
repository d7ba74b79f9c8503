#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::{Arc, Mutex};
use std::thread;

use rpcmetrics_core::{EventType, GenericSampler, MetricsKey, MetricsSampler, SamplerConfig};

mod test_key;
use test_key::TestKey;

/// Raw thing an event is derived from.
struct Call {
    method: &'static str,
}

fn to_key(call: &Call) -> TestKey {
    TestKey::provider(call.method)
}

fn method_sampler() -> GenericSampler<Call, EventType, TestKey> {
    GenericSampler::new(SamplerConfig::new(to_key), SamplerConfig::new(to_key))
}

fn snapshot(sampler: &impl MetricsSampler) -> Vec<(String, Vec<(String, String)>, u64)> {
    let mut out: Vec<_> = sampler
        .sample()
        .into_iter()
        .map(|s| {
            let tags = s.tags().iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            (s.name().to_string(), tags, s.value())
        })
        .collect();
    out.sort();
    out
}

#[test]
fn counters_come_first_in_standard_order_then_rt() {
    let sampler = method_sampler();
    let call = Call { method: "sayHello" };

    sampler.increment(EventType::TotalFailed, &call);
    sampler.increment(EventType::Succeed, &call);
    sampler.increment(EventType::Total, &call);
    sampler.record_rt(&call, 12);

    let names: Vec<String> = sampler.sample().iter().map(|s| s.name().to_string()).collect();
    assert_eq!(
        names,
        vec![
            "rpc.provider.requests.total",
            "rpc.provider.requests.succeed.total",
            "rpc.provider.requests.failed.total",
            "rpc.provider.rt.milliseconds.last",
            "rpc.provider.rt.milliseconds.min",
            "rpc.provider.rt.milliseconds.max",
            "rpc.provider.rt.milliseconds.sum",
            "rpc.provider.rt.milliseconds.avg",
        ]
    );
}

#[test]
fn unseen_event_types_are_absent() {
    let sampler = method_sampler();
    let call = Call { method: "sayHello" };
    for _ in 0..5 {
        sampler.increment(EventType::Succeed, &call);
    }

    let succeed = sampler.get_count(EventType::Succeed).unwrap();
    assert_eq!(succeed.len(), 1);
    assert!(sampler.get_count(EventType::TotalFailed).is_none());

    let samples = sampler.sample();
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].name(), "rpc.provider.requests.succeed.total");
    assert_eq!(samples[0].value(), 5);
    assert!(samples
        .iter()
        .all(|s| s.name() != MetricsKey::RequestsTotalFailed.name_by_type("provider")));
}

#[test]
fn sample_is_idempotent_when_quiet() {
    let sampler = method_sampler();
    for method in ["a", "b", "c"] {
        let call = Call { method };
        sampler.increment(EventType::Total, &call);
        sampler.increment(EventType::Processing, &call);
        sampler.record_rt(&call, 3);
        sampler.record_rt(&call, 8);
    }

    assert_eq!(snapshot(&sampler), snapshot(&sampler));
}

#[test]
fn sampling_while_writing_never_blocks_progress() {
    let sampler = method_sampler();

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let call = Call { method: "busy" };
                for i in 0..2_000u64 {
                    sampler.increment(EventType::Total, &call);
                    sampler.record_rt(&call, i % 50);
                }
            });
        }
        s.spawn(|| {
            for _ in 0..200 {
                for sample in sampler.sample() {
                    let _ = sample.value();
                }
            }
        });
    });

    let call = Call { method: "busy" };
    assert_eq!(sampler.counts().get(&to_key(&call), EventType::Total), Some(8_000));
    assert_eq!(sampler.rt().stats(&to_key(&call)).unwrap().count(), 8_000);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum RegistryEvent {
    Register,
    Subscribe,
}

#[test]
fn reusable_with_other_event_and_source_types() {
    let published: Arc<Mutex<Vec<(TestKey, RegistryEvent)>>> = Arc::default();
    let p = Arc::clone(&published);

    let sampler: GenericSampler<String, RegistryEvent, TestKey> = GenericSampler::new(
        SamplerConfig::new(|svc: &String| TestKey::consumer(if svc == "demo" { "demo" } else { "other" }))
            .with_handler(move |key: &TestKey, event: &RegistryEvent| {
                p.lock().unwrap().push((key.clone(), *event));
                Ok(())
            }),
        SamplerConfig::new(|_: &String| TestKey::consumer("rt")),
    );

    sampler.increment(RegistryEvent::Register, &"demo".to_string());
    sampler.increment(RegistryEvent::Subscribe, &"demo".to_string());
    sampler.increment(RegistryEvent::Register, &"x".to_string());

    let samples = sampler.emit(&[(RegistryEvent::Register, MetricsKey::Requests)]);
    assert_eq!(samples.len(), 2);
    assert!(samples.iter().all(|s| s.name() == "rpc.consumer.requests.total"));
    assert_eq!(published.lock().unwrap().len(), 3);
    assert_eq!(
        published.lock().unwrap()[1],
        (TestKey::consumer("demo"), RegistryEvent::Subscribe)
    );
}
