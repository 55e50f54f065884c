/// Property-based tests for type-directed dispatch
///
/// Classification depends only on the declared type's structure, and
/// collection results keep the stored items in order regardless of shape.

mod common;

use common::*;
use ferrous_caconfig::{
    Adaptable, ConfigType, Configuration, DeclaredType, Injector, RawType, TypeShape, ValueMap,
};
use proptest::prelude::*;

fn raw_type() -> impl Strategy<Value = RawType> {
    prop_oneof![
        Just(RawType::List),
        Just(RawType::Collection),
        Just(RawType::Set),
        Just(RawType::Map),
        Just(RawType::Option),
        Just(RawType::Other("Supplier")),
    ]
}

fn config_type() -> impl Strategy<Value = ConfigType> {
    prop_oneof![
        Just(ConfigType::value_map()),
        Just(ConfigType::schema::<ListConfig>()),
        Just(ConfigType::adaptable::<ConfigurationValues>()),
    ]
}

// Property: only lists and collections with exactly one type argument are collection shapes
proptest! {
    #[test]
    fn parameterized_arity_must_be_one(
        raw in raw_type(),
        args in prop::collection::vec(config_type(), 0..4),
    ) {
        let shape = DeclaredType::parameterized(raw, args.clone()).shape();
        match (raw, args.as_slice()) {
            (RawType::List, [ty]) => prop_assert_eq!(shape, TypeShape::ListOf(*ty)),
            (RawType::Collection, [ty]) => prop_assert_eq!(shape, TypeShape::CollectionOf(*ty)),
            _ => prop_assert_eq!(shape, TypeShape::Unsupported),
        }
    }
}

// Property: classes and arrays always dispatch on their component type
proptest! {
    #[test]
    fn class_and_array_shapes(ty in config_type()) {
        prop_assert_eq!(DeclaredType::class(ty).shape(), TypeShape::Single(ty));
        prop_assert_eq!(DeclaredType::array_of(ty).shape(), TypeShape::ArrayOf(ty));
    }
}

// Property: every collection shape yields all stored items in stored order
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn collection_order_is_preserved(
        items in prop::collection::vec("[a-z0-9]{1,12}", 0..8),
        shape in 0usize..3,
    ) {
        let fixture = Fixture::new();
        fixture
            .engine
            .write_schema_collection::<ListConfig>(
                SITE_PATH,
                items.iter().map(|item| ValueMap::new().with("stringParam", item.as_str())),
            )
            .unwrap();

        let ty = ConfigType::schema::<ListConfig>();
        let declared_type = match shape {
            0 => DeclaredType::array_of(ty),
            1 => DeclaredType::list_of(ty),
            _ => DeclaredType::collection_of(ty),
        };
        let value = fixture
            .injector()
            .get_value(Adaptable::Resource(&fixture.page), None, &declared_type, &caconfig_field("configs"))
            .unwrap()
            .unwrap();

        let configs = value.elements_as::<ListConfig>().unwrap();
        let params: Vec<String> = configs.iter().map(|c| c.string_param.clone()).collect();
        prop_assert_eq!(params, items);
    }
}

// Property: value map collections are the raw stored items
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn value_map_collections_are_raw(values in prop::collection::vec(any::<i32>(), 0..6)) {
        let fixture = Fixture::new();
        let stored: Vec<ValueMap> = values.iter().map(|v| ValueMap::new().with("intParam", *v)).collect();
        fixture
            .engine
            .write_schema_collection::<ListConfig>(SITE_PATH, stored.clone())
            .unwrap();

        let value = fixture
            .injector()
            .get_value(
                Adaptable::Resource(&fixture.page),
                None,
                &DeclaredType::list_of(ConfigType::value_map()),
                &named_caconfig_field("configs", ListConfig::NAME),
            )
            .unwrap()
            .unwrap();

        let maps: Vec<ValueMap> = value
            .elements_as::<ValueMap>()
            .unwrap()
            .iter()
            .map(|m| (**m).clone())
            .collect();
        prop_assert_eq!(maps, stored);
    }
}
