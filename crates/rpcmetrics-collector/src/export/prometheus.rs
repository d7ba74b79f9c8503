//! Prometheus text exposition (format 0.0.4).
//!
//! Samples are grouped into families by name in first-seen order. Dots in
//! metric and label names become underscores (`:` too, in labels); labels keep the key's (sorted)
//! tag order.

use std::collections::HashMap;
use std::fmt::Write;

use rpcmetrics_core::MetricSample;

pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Map a dotted name onto the Prometheus name charset.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .enumerate()
        .map(|(i, c)| match c {
            'a'..='z' | 'A'..='Z' | '_' | ':' => c,
            '0'..='9' if i > 0 => c,
            _ => '_',
        })
        .collect()
}

/// Map a tag key onto the Prometheus label name charset (no `:`).
pub fn sanitize_label(name: &str) -> String {
    name.chars()
        .enumerate()
        .map(|(i, c)| match c {
            'a'..='z' | 'A'..='Z' | '_' => c,
            '0'..='9' if i > 0 => c,
            _ => '_',
        })
        .collect()
}

/// True if `name` is already a valid label name.
pub fn is_valid_label(name: &str) -> bool {
    !name.is_empty() && sanitize_label(name) == name
}

/// Render samples as gauge families.
pub fn render(samples: &[MetricSample]) -> String {
    let mut order: Vec<&str> = Vec::new();
    let mut families: HashMap<&str, Vec<&MetricSample>> = HashMap::new();
    for s in samples {
        families
            .entry(s.name())
            .or_insert_with(|| {
                order.push(s.name());
                Vec::new()
            })
            .push(s);
    }

    let mut out = String::new();
    for name in order {
        let Some(members) = families.get(name) else { continue };
        let Some(first) = members.first() else { continue };
        let prom_name = sanitize_name(name);
        let _ = writeln!(out, "# HELP {} {}", prom_name, escape_help(first.description()));
        let _ = writeln!(out, "# TYPE {} gauge", prom_name);
        for s in members {
            let label_str = s
                .tags()
                .iter()
                .map(|(k, v)| format!("{}=\"{}\"", sanitize_label(k), escape_label(v)))
                .collect::<Vec<_>>()
                .join(",");
            if label_str.is_empty() {
                let _ = writeln!(out, "{} {}", prom_name, s.value());
            } else {
                let _ = writeln!(out, "{}{{{}}} {}", prom_name, label_str, s.value());
            }
        }
    }
    out
}
