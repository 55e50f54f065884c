#![no_main]

use ferrous_caconfig::{ConfigType, Configuration, ValueMap};
use libfuzzer_sys::fuzz_target;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FuzzConfig {
    string_param: String,
    int_param: i32,
    bool_param: bool,
    list_param: Vec<String>,
}

impl Configuration for FuzzConfig {
    const NAME: &'static str = "fuzz.FuzzConfig";
}

fuzz_target!(|data: &[u8]| {
    // arbitrary property maps must map or fail, never panic
    let Ok(properties) = serde_json::from_slice::<ValueMap>(data) else {
        return;
    };

    for ty in [
        ConfigType::value_map(),
        ConfigType::schema::<FuzzConfig>(),
        ConfigType::adaptable::<FuzzConfig>(),
    ] {
        match ty.construct(&properties) {
            Ok(object) => assert_eq!(object.type_name(), ty.type_name()),
            Err(e) => assert!(!e.message().is_empty()),
        }
    }
});
