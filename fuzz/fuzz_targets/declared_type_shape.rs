#![no_main]

use ferrous_caconfig::{ConfigType, DeclaredType, RawType, TypeShape};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };

    let types = [
        ConfigType::value_map(),
        ConfigType::adaptable::<serde_json::Value>(),
        ConfigType::adaptable::<String>(),
    ];
    let args: Vec<ConfigType> = rest.iter().take(8).map(|b| types[*b as usize % types.len()]).collect();

    let raw = match selector % 6 {
        0 => RawType::List,
        1 => RawType::Collection,
        2 => RawType::Set,
        3 => RawType::Map,
        4 => RawType::Option,
        _ => RawType::Other("Fuzz"),
    };

    let shape = DeclaredType::parameterized(raw, args.clone()).shape();
    match (raw, args.as_slice()) {
        (RawType::List, [ty]) => assert_eq!(shape, TypeShape::ListOf(*ty)),
        (RawType::Collection, [ty]) => assert_eq!(shape, TypeShape::CollectionOf(*ty)),
        _ => assert_eq!(shape, TypeShape::Unsupported),
    }

    if let Some(ty) = args.first() {
        assert_eq!(DeclaredType::class(*ty).shape(), TypeShape::Single(*ty));
        assert_eq!(DeclaredType::array_of(*ty).shape(), TypeShape::ArrayOf(*ty));
    }
});
