/// Concurrent access integration tests
///
/// One injector serves many threads at once while configurations and
/// detection strategies change underneath it.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::*;
use crossbeam_utils::thread;
use ferrous_caconfig::{
    Adaptable, ConfigType, ConfigurationInjectResourceDetectionStrategy, ContentRequest,
    DeclaredType, Injector, Request, Resource, ValueMap,
};

const THREADS: usize = 8;
const ITERATIONS: usize = 200;

struct CountingStrategy {
    calls: AtomicUsize,
}

impl ConfigurationInjectResourceDetectionStrategy for CountingStrategy {
    fn detect_resource(&self, _request: &dyn Request) -> Option<Resource> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        None
    }
}

#[test]
fn test_concurrent_single_resolution() {
    let fixture = Fixture::new();
    let injector = fixture.injector();
    let declared_type = DeclaredType::class(ConfigType::schema::<SingleConfig>());
    let element = caconfig_field("config");

    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|_| {
                let request = ContentRequest::new(fixture.page.clone());
                for _ in 0..ITERATIONS {
                    let value = injector
                        .get_value(Adaptable::Request(&request), None, &declared_type, &element)
                        .unwrap()
                        .unwrap();
                    assert_eq!(value.single::<SingleConfig>().unwrap().string_param, "value1");
                }
            });
        }
    })
    .unwrap();
}

#[test]
fn test_concurrent_collection_resolution() {
    let fixture = Fixture::new();
    let injector = fixture.injector();
    let element = caconfig_field("configs");

    thread::scope(|s| {
        for i in 0..THREADS {
            let injector = &injector;
            let element = &element;
            let page = &fixture.page;
            s.spawn(move |_| {
                let ty = ConfigType::schema::<ListConfig>();
                let declared_type = match i % 3 {
                    0 => DeclaredType::array_of(ty),
                    1 => DeclaredType::list_of(ty),
                    _ => DeclaredType::collection_of(ty),
                };
                for _ in 0..ITERATIONS {
                    let value = injector
                        .get_value(Adaptable::Resource(page), None, &declared_type, element)
                        .unwrap()
                        .unwrap();
                    assert_eq!(value.len(), 2);
                }
            });
        }
    })
    .unwrap();
}

#[test]
fn test_resolution_during_writes() {
    let fixture = Fixture::new();
    let injector = fixture.injector();
    let declared_type = DeclaredType::class(ConfigType::value_map());
    let element = named_caconfig_field("config", "app.caconfig.Counter");

    thread::scope(|s| {
        s.spawn(|_| {
            for n in 0..ITERATIONS {
                fixture
                    .engine
                    .write_configuration(SITE_PATH, "app.caconfig.Counter", ValueMap::new().with("n", n))
                    .unwrap();
            }
        });
        for _ in 0..THREADS {
            s.spawn(|_| {
                for _ in 0..ITERATIONS {
                    let value = injector
                        .get_value(Adaptable::Resource(&fixture.page), None, &declared_type, &element)
                        .unwrap()
                        .unwrap();
                    let map = value.single::<ValueMap>().unwrap();
                    // either not written yet or one complete write
                    assert!(map.is_empty() || map.get::<usize>("n").is_some());
                }
            });
        }
    })
    .unwrap();

    let value = injector
        .get_value(Adaptable::Resource(&fixture.page), None, &declared_type, &element)
        .unwrap()
        .unwrap();
    assert_eq!(value.single::<ValueMap>().unwrap().get::<usize>("n"), Some(ITERATIONS - 1));
}

#[test]
fn test_strategies_registered_concurrently() {
    let fixture = Fixture::new();
    let injector = fixture.injector();
    let strategy = Arc::new(CountingStrategy {
        calls: AtomicUsize::new(0),
    });

    thread::scope(|s| {
        s.spawn(|_| {
            fixture
                .registry
                .register_trait::<dyn ConfigurationInjectResourceDetectionStrategy>(strategy.clone(), 0);
        });
        for _ in 0..THREADS {
            s.spawn(|_| {
                let request = ContentRequest::new(fixture.page.clone());
                for _ in 0..ITERATIONS {
                    let resource = injector.resolve_resource(Adaptable::Request(&request)).unwrap();
                    assert_eq!(resource.path(), PAGE_PATH);
                }
            });
        }
    })
    .unwrap();

    let request = ContentRequest::new(fixture.page.clone());
    let before = strategy.calls.load(Ordering::SeqCst);
    injector.resolve_resource(Adaptable::Request(&request));
    assert_eq!(strategy.calls.load(Ordering::SeqCst), before + 1);
}
