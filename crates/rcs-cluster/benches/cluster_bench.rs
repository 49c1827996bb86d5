// Copyright (c) 2026 - present rcs-commits contributors
// SPDX-License-Identifier: MIT

use chrono::{DateTime, TimeDelta};
use criterion::{Criterion, criterion_group, criterion_main};
use indexmap::IndexMap;
use rcs_cluster::{BucketOptions, GapOptions, bucket::bucket, cluster};
use rcs_log::{FileLog, Revision};

/// Synthetic history: `files` files, each touched `depth` times by two
/// alternating authors, with bursts of check-ins a few seconds apart.
fn history(files: usize, depth: usize) -> Vec<FileLog> {
    let base = DateTime::from_timestamp(820_454_400, 0).expect("valid base");
    (0..files)
        .map(|f| {
            let working_file = format!("src/file{f}.c");
            let revisions: IndexMap<String, Revision> = (1..=depth)
                .rev()
                .map(|n| {
                    let timestamp =
                        base + TimeDelta::seconds((n * 7200 + f * 3) as i64);
                    let revision = Revision {
                        revision: format!("1.{n}"),
                        author: if n % 2 == 0 { "mark" } else { "jane" }.to_string(),
                        date: timestamp.format("%Y/%m/%d %H:%M:%S").to_string(),
                        timestamp,
                        description: format!("change {n}\n"),
                    };
                    (revision.revision.clone(), revision)
                })
                .collect();
            FileLog {
                repository_file: format!("RCS/{working_file},v"),
                working_file,
                head: format!("1.{depth}"),
                description: String::new(),
                revisions,
            }
        })
        .collect()
}

fn cluster_benchmark(c: &mut Criterion) {
    let logs = history(200, 50);

    c.bench_function("greedy_10000_revisions", |b| {
        b.iter(|| cluster(std::hint::black_box(&logs), &GapOptions::default()))
    });
    c.bench_function("bucket_10000_revisions", |b| {
        b.iter(|| bucket(std::hint::black_box(&logs), &BucketOptions::default()))
    });
}

criterion_group!(benches, cluster_benchmark);
criterion_main!(benches);
