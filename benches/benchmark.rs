use criterion::{Criterion, criterion_group, criterion_main};
use dossier_nav::model::{Descriptor, NavTree};
use dossier_nav::render::{HtmlTarget, NavListBuilder};
use std::hint::black_box;

/// (name, namespaces, types per namespace)
const REGISTRY_SIZES: &[(&str, usize, usize)] = &[
    ("small", 10, 10),
    ("medium", 50, 40),
    ("large", 200, 50),
];

/// Synthetic registry with nested namespaces, plain entities shadowing
/// namespaces, and single-child wrapper chains.
fn synthetic_types(namespaces: usize, types_per_namespace: usize) -> Vec<Descriptor> {
    let mut descriptors = Vec::with_capacity(namespaces * (types_per_namespace + 2));
    for n in 0..namespaces {
        let ns = format!("lib{}.pkg{n}", n % 7);
        descriptors.push(Descriptor::new(ns.as_str(), format!("{ns}.html")).as_namespace());
        for t in 0..types_per_namespace {
            let name = format!("{ns}.Type{t}");
            descriptors.push(Descriptor::new(name.as_str(), format!("{name}.html")));
        }
        let wrapped = format!("{ns}.internal.deep.Wrapped");
        descriptors.push(Descriptor::new(wrapped.as_str(), format!("{wrapped}.html")));
        let shadowed = format!("{ns}.Type0.Inner");
        descriptors.push(Descriptor::new(shadowed.as_str(), format!("{shadowed}.html")));
    }
    descriptors
}

fn build_tree(c: &mut Criterion) {
    for (name, namespaces, types) in REGISTRY_SIZES {
        let descriptors = synthetic_types(*namespaces, *types);
        c.bench_function(&format!("build/{name}"), |b| {
            b.iter(|| NavTree::build(black_box(&descriptors), false));
        });
    }
}

fn render_html(c: &mut Criterion) {
    for (name, namespaces, types) in REGISTRY_SIZES {
        let descriptors = synthetic_types(*namespaces, *types);
        let builder = NavListBuilder::new()
            .with_base_path("..")
            .with_current_path("lib0.pkg0.Type0.html");
        c.bench_function(&format!("render/{name}"), |b| {
            b.iter(|| {
                builder
                    .build(black_box(&descriptors), &mut HtmlTarget::new())
                    .to_html()
            });
        });
    }
}

criterion_group!(benches, build_tree, render_html);
criterion_main!(benches);
