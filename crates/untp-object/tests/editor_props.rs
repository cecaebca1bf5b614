use proptest::prelude::*;
use serde_json::{Map, Value};
use untp_object::{flatten_into, rename_key_preserving_order, strip_fields};

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-e]{1,2}", inner), 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

fn arb_object() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::vec(("[a-h]{1,2}", arb_json()), 0..8)
        .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_strip_fields_idempotent(
        mut value in arb_json(),
        fields in prop::collection::vec("[a-e]{1,2}", 0..4)
    ) {
        let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
        strip_fields(&mut value, &fields);
        let once = value.clone();
        strip_fields(&mut value, &fields);
        prop_assert_eq!(value, once);
    }

    #[test]
    fn prop_rename_preserves_order(obj in arb_object(), index in any::<prop::sample::Index>()) {
        prop_assume!(!obj.is_empty());
        prop_assume!(!obj.contains_key("renamed"));

        let before: Vec<String> = obj.keys().cloned().collect();
        let old_key = before[index.index(before.len())].clone();
        let old_value = obj[&old_key].clone();

        let mut edited = obj.clone();
        let returned = rename_key_preserving_order(&mut edited, &old_key, "renamed").cloned();

        let expected: Vec<String> = before
            .iter()
            .map(|k| if *k == old_key { "renamed".to_owned() } else { k.clone() })
            .collect();
        let after: Vec<String> = edited.keys().cloned().collect();

        prop_assert_eq!(after, expected);
        prop_assert_eq!(returned, Some(old_value.clone()));
        prop_assert_eq!(&edited["renamed"], &old_value);
    }

    #[test]
    fn prop_rename_absent_is_noop(obj in arb_object()) {
        prop_assume!(!obj.contains_key("zz-absent"));
        let mut edited = obj.clone();
        prop_assert!(rename_key_preserving_order(&mut edited, "zz-absent", "x").is_none());
        prop_assert_eq!(edited, obj);
    }

    #[test]
    fn prop_flatten_nested_wins(outer in arb_object(), nested in arb_object()) {
        let mut obj = outer.clone();
        obj.insert("nested".to_owned(), Value::Object(nested.clone()));
        flatten_into(&mut obj, "nested").unwrap();

        prop_assert!(!obj.contains_key("nested") || nested.contains_key("nested"));
        for (key, value) in &nested {
            prop_assert_eq!(&obj[key], value);
        }
        for (key, value) in &outer {
            if key != "nested" && !nested.contains_key(key) {
                prop_assert_eq!(&obj[key], value);
            }
        }
    }
}
