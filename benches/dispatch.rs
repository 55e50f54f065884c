use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ferrous_caconfig::*;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SiteConfig {
    site_name: String,
    max_items: u32,
}

impl Configuration for SiteConfig {
    const NAME: &'static str = "bench.SiteConfig";
}

struct Setup {
    injector: ContextAwareConfigurationInjector,
    page: Resource,
}

fn setup(items: usize) -> Setup {
    let tree = ResourceTree::new();
    tree.create("/content/site", ValueMap::new().with(CONFIG_REF_PROPERTY, "/conf/site"));
    let page = tree.create("/content/site/en/products/detail", ValueMap::new());

    let engine = MemoryConfigurationResolver::new(tree);
    engine
        .write_schema::<SiteConfig>(
            "/content/site",
            ValueMap::new().with("siteName", "Bench").with("maxItems", 10),
        )
        .unwrap();
    engine
        .write_schema_collection::<SiteConfig>(
            "/content/site",
            (0..items).map(|i| ValueMap::new().with("siteName", format!("site-{}", i))),
        )
        .unwrap();

    let registry = ServiceRegistry::new();
    registry.register_trait::<dyn ConfigurationResolver>(Arc::new(engine), 0);
    Setup {
        injector: ContextAwareConfigurationInjector::from_registry(&registry).unwrap(),
        page,
    }
}

fn caconfig_field() -> AnnotatedElement {
    AnnotatedElement::field("config")
        .with(Annotation::ContextAwareConfiguration(ContextAwareConfiguration::new()))
}

// ===== Micro Benchmarks =====

fn bench_shape(c: &mut Criterion) {
    let ty = ConfigType::schema::<SiteConfig>();
    let declared = [
        DeclaredType::class(ty),
        DeclaredType::list_of(ty),
        DeclaredType::parameterized(RawType::Map, vec![ty, ty]),
    ];

    c.bench_function("declared_type_shape", |b| {
        b.iter(|| {
            for declared_type in &declared {
                black_box(declared_type.shape());
            }
        })
    });
}

fn bench_single_schema(c: &mut Criterion) {
    let setup = setup(0);
    let element = caconfig_field();
    let declared_type = DeclaredType::class(ConfigType::schema::<SiteConfig>());

    c.bench_function("inject_single_schema", |b| {
        b.iter(|| {
            let value = setup
                .injector
                .get_value(Adaptable::Resource(&setup.page), None, &declared_type, &element)
                .unwrap();
            black_box(value);
        })
    });
}

fn bench_decline(c: &mut Criterion) {
    let setup = setup(0);
    let element = AnnotatedElement::field("config").with(Annotation::Inject);
    let declared_type = DeclaredType::class(ConfigType::schema::<SiteConfig>());
    let injector = setup.injector.clone().with_options(InjectorOptions {
        warn_on_decline: false,
        ..InjectorOptions::default()
    });

    c.bench_function("decline_without_annotation", |b| {
        b.iter(|| {
            let value = injector
                .get_value(Adaptable::Resource(&setup.page), None, &declared_type, &element)
                .unwrap();
            black_box(value);
        })
    });
}

// ===== Macro Benchmarks =====

fn bench_collection_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("inject_schema_list");
    let element = caconfig_field();
    let declared_type = DeclaredType::list_of(ConfigType::schema::<SiteConfig>());

    for items in [1usize, 10, 100] {
        let setup = setup(items);
        group.bench_with_input(BenchmarkId::from_parameter(items), &items, |b, _| {
            b.iter(|| {
                let value = setup
                    .injector
                    .get_value(Adaptable::Resource(&setup.page), None, &declared_type, &element)
                    .unwrap();
                black_box(value);
            })
        });
    }
    group.finish();
}

fn bench_detection_strategies(c: &mut Criterion) {
    struct Miss;
    impl ConfigurationInjectResourceDetectionStrategy for Miss {
        fn detect_resource(&self, _request: &dyn Request) -> Option<Resource> {
            None
        }
    }

    let mut group = c.benchmark_group("detection_strategies");
    for strategies in [0usize, 4, 16] {
        let registry = ServiceRegistry::new();
        for ranking in 0..strategies {
            registry.register_trait::<dyn ConfigurationInjectResourceDetectionStrategy>(
                Arc::new(Miss),
                ranking as i32,
            );
        }
        let multiplexer = RankedStrategyMultiplexer::new(registry);
        let request = ContentRequest::new(Resource::new("/content/site/en", ValueMap::new()));

        group.bench_with_input(BenchmarkId::from_parameter(strategies), &strategies, |b, _| {
            b.iter(|| black_box(multiplexer.detect_resource(&request)))
        });
    }
    group.finish();
}

criterion_group!(micro_benches, bench_shape, bench_single_schema, bench_decline);

criterion_group!(macro_benches, bench_collection_sizes, bench_detection_strategies);

criterion_main!(micro_benches, macro_benches);
