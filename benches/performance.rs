use criterion::{black_box, criterion_group, criterion_main, Criterion};
use digest2graph::core::{DigestChunks, DigestConverter};
use std::io::Cursor;

fn sample_digest(files: usize) -> String {
    let mut digest = String::from("Directory structure:\n└── bench/\n\n");

    for i in 0..files {
        digest.push_str(&format!(
            r#"================================================
FILE: bench/module_{i}.py
================================================
class TestClass{i}(Base):
    def __init__(self):
        self.value = {i}

    def process(self):
        return compute(self.value) * 2

    def calculate(self):
        return helper(self.value + 10)

def helper(v):
    return v

def main():
    instance = TestClass{i}()
    return instance.process()

if __name__ == "__main__":
    main()

================================================
FILE: bench/notes_{i}.md
================================================
# Notes {i}

Plain text that is never parsed.

"#
        ));
    }

    digest
}

fn benchmark_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("digest_conversion");
    let digest = sample_digest(50);

    group.bench_function("chunking", |b| {
        b.iter(|| {
            let count = DigestChunks::from_text(black_box(&digest))
                .filter_map(Result::ok)
                .count();
            black_box(count)
        })
    });

    group.bench_function("full_conversion", |b| {
        b.iter(|| {
            let graph = DigestConverter::new()
                .convert_reader(Cursor::new(black_box(digest.as_str())))
                .unwrap();
            black_box(graph.node_count())
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_conversion);
criterion_main!(benches);
