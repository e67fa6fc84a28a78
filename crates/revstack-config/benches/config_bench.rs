use criterion::{black_box, criterion_group, criterion_main, Criterion};
use revstack_config::{HgConfig, ToolConfig};

const TYPICAL_RC: &[u8] = b"\
[ui]
safe_mode = false
[hg]
binary = /usr/bin/hg
timeout = 60
";

fn typical_hg_config() -> Vec<String> {
    let mut lines = vec![
        "ui.username=Alice <alice@example.com>".to_string(),
        "ui.editor=vim".to_string(),
        "extensions.evolve=".to_string(),
        "extensions.shelve=".to_string(),
        "extensions.histedit=".to_string(),
        "paths.default=https://hg.example.com/repo".to_string(),
        "experimental.evolution=all".to_string(),
    ];
    for i in 0..50 {
        lines.push(format!("alias.a{i}=log -r . -T {{node}}"));
    }
    lines
}

fn bench_hg_config(c: &mut Criterion) {
    let lines = typical_hg_config();
    c.bench_function("parse_hg_config_output", |b| {
        b.iter(|| {
            let config = HgConfig::from_lines(black_box(&lines));
            black_box(config);
        });
    });

    let config = HgConfig::from_lines(&lines);
    c.bench_function("extension_lookup", |b| {
        b.iter(|| black_box(config.extension_enabled(black_box("evolve"))));
    });
}

fn bench_tool_config(c: &mut Criterion) {
    c.bench_function("parse_tool_config", |b| {
        b.iter(|| {
            let config = ToolConfig::from_bytes(black_box(TYPICAL_RC), "bench").unwrap();
            black_box(config);
        });
    });
}

criterion_group!(benches, bench_hg_config, bench_tool_config);
criterion_main!(benches);
