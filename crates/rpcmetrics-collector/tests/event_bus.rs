#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rpcmetrics_collector::{
    DefaultMetricsCollector, Invocation, MetricsEvent, MetricsListener, Outcome, Side,
};
use rpcmetrics_core::error::{MetricsError, Result};
use rpcmetrics_core::{EventType, Tags};

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<MetricsEvent>>,
}

impl MetricsListener for Recorder {
    fn name(&self) -> &'static str {
        "recorder"
    }

    fn on_event(&self, event: &MetricsEvent) -> Result<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

struct Failing;

impl MetricsListener for Failing {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn on_event(&self, event: &MetricsEvent) -> Result<()> {
        match event {
            MetricsEvent::Request { .. } => Err(MetricsError::Listener("sink unavailable".into())),
            MetricsEvent::Rt { .. } => panic!("sink exploded"),
        }
    }
}

fn inv() -> Invocation {
    Invocation::new("org.demo.Greeter", "sayHello", Side::Consumer)
}

#[test]
fn every_update_is_published_after_commit() {
    let c = DefaultMetricsCollector::new("app", Tags::new());
    let recorder = Arc::new(Recorder::default());
    c.event_multicaster().add_listener(recorder.clone());

    c.on_invoke(&inv());
    c.on_complete(&inv(), Outcome::Succeed, Duration::from_millis(7));

    let events = recorder.events.lock().unwrap();
    let kinds: Vec<String> = events
        .iter()
        .map(|e| match e {
            MetricsEvent::Request { event, .. } => event.as_str().to_string(),
            MetricsEvent::Rt { rt, .. } => format!("RT={rt}"),
        })
        .collect();
    assert_eq!(kinds, vec!["TOTAL", "PROCESSING", "SUCCEED", "RT=7"]);

    let metric = events[0].metric();
    assert_eq!(metric.application_name(), "app");
    assert_eq!(metric.method(), "sayHello");
    assert_eq!(metric.side(), Side::Consumer);
}

#[test]
fn listener_failures_do_not_reach_the_caller() {
    let c = DefaultMetricsCollector::new("app", Tags::new());
    let recorder = Arc::new(Recorder::default());
    let bus = c.event_multicaster();
    bus.add_listener(Arc::new(Failing));
    bus.add_listener(recorder.clone());

    c.increase_total_requests(&inv());
    c.add_rt(&inv(), 3);

    assert_eq!(c.sampler().count(&inv(), EventType::Total), 1);
    assert_eq!(c.sampler().rt_stats(&inv()).unwrap().last(), 3);
    // the healthy listener still got both events
    assert_eq!(recorder.events.lock().unwrap().len(), 2);
}

#[test]
fn listeners_are_keyed_by_name() {
    let c = DefaultMetricsCollector::new("app", Tags::new());
    let bus = c.event_multicaster();
    let first = Arc::new(Recorder::default());
    let second = Arc::new(Recorder::default());

    bus.add_listener(first.clone());
    bus.add_listener(second.clone());
    assert_eq!(bus.listener_names(), vec!["recorder"]);

    c.increase_total_requests(&inv());
    assert!(first.events.lock().unwrap().is_empty());
    assert_eq!(second.events.lock().unwrap().len(), 1);

    assert!(bus.remove_listener("recorder"));
    assert!(!bus.remove_listener("recorder"));
    c.increase_total_requests(&inv());
    assert_eq!(second.events.lock().unwrap().len(), 1);
}

#[test]
fn disabled_collector_publishes_nothing() {
    let c = DefaultMetricsCollector::new("app", Tags::new());
    let recorder = Arc::new(Recorder::default());
    c.event_multicaster().add_listener(recorder.clone());
    c.set_collect_enabled(false);

    c.on_invoke(&inv());
    c.on_complete(&inv(), Outcome::Timeout, Duration::from_millis(1));

    assert!(recorder.events.lock().unwrap().is_empty());
}
