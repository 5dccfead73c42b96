//! Collection construction and the transformation operations: sorting,
//! null stripping, extraction, key filtering.

use serde::Serialize;
use serde_json::json;
use trove::{collect, Collection, Key, TroveError, Value};

fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn keys_of(c: &Collection) -> Vec<Key> {
    c.keys().cloned().collect()
}

mod construction {
    use super::*;

    #[test]
    fn lists_become_positionally_keyed() {
        let c = collect(json!(["a", "b"]));
        assert_eq!(c.len(), 2);
        assert_eq!(keys_of(&c), vec![Key::Int(0), Key::Int(1)]);
        assert_eq!(c.get(&Key::Int(1)), Some(&Value::from("b")));
    }

    #[test]
    fn maps_keep_their_keys() {
        let c = collect(json!({"a": 1, "b": 2}));
        assert_eq!(c.len(), 2);
        assert_eq!(c.get(&Key::from("a")), Some(&Value::from(1)));
    }

    #[test]
    fn nil_is_empty_and_scalars_wrap() {
        assert!(collect(serde_json::Value::Null).is_empty());
        let c = collect(json!(42));
        assert_eq!(c.len(), 1);
        assert_eq!(c.get(&Key::Int(0)), Some(&Value::from(42)));
    }

    #[test]
    fn push_uses_the_next_free_integer_key() {
        let c = Collection::new()
            .insert(Key::Int(5), Value::from("x"))
            .insert(Key::from("name"), Value::from("y"))
            .push(Value::from("z"));
        assert_eq!(c.get(&Key::Int(6)), Some(&Value::from("z")));
    }

    #[test]
    fn insert_overwrites_in_place() {
        let c = collect(json!({"a": 1, "b": 2})).insert(Key::from("a"), Value::from(9));
        assert_eq!(keys_of(&c), vec![Key::from("a"), Key::from("b")]);
        assert_eq!(c.get(&Key::from("a")), Some(&Value::from(9)));
    }
}

mod sorting {
    use super::*;

    #[test]
    fn sorted_by_orders_ascending_on_the_field() {
        let c = collect(json!([{"k": 3}, {"k": 1}, {"k": 2}]));
        let sorted = c.sorted_by("k");
        assert_eq!(sorted.pluck("k").to_vec(), vec![
            Value::from(1),
            Value::from(2),
            Value::from(3)
        ]);
    }

    #[test]
    fn sorted_by_is_stable_on_equal_keys() {
        let c = collect(json!([
            {"k": 1, "tag": "a"},
            {"k": 1, "tag": "b"},
            {"k": 0, "tag": "c"}
        ]));
        let tags = c.sorted_by("k").pluck("tag").to_vec();
        assert_eq!(tags, vec![
            Value::from("c"),
            Value::from("a"),
            Value::from("b")
        ]);
    }

    #[test]
    fn sorted_by_resolves_nested_fields() {
        let c = collect(json!([
            {"user": {"age": 40}},
            {"user": {"age": 25}}
        ]));
        assert_eq!(
            c.sorted_by("user.age").pluck("user.age").to_vec(),
            vec![Value::from(25), Value::from(40)]
        );
    }

    #[test]
    fn sorted_iterator_is_restartable() {
        let c = collect(json!([3, 1, 2]));
        let iter = c.sorted_iter_on("");
        let first_pass: Vec<Value> = iter.clone().collect();
        let second_pass: Vec<Value> = iter.restart().collect();
        assert_eq!(first_pass, second_pass);
        assert_eq!(first_pass, vec![
            Value::from(1),
            Value::from(2),
            Value::from(3)
        ]);
    }

    #[test]
    fn sorted_without_field_uses_natural_ordering() {
        let c = collect(json!(["pear", "apple", "plum"]));
        assert_eq!(c.sorted().to_vec(), vec![
            Value::from("apple"),
            Value::from("pear"),
            Value::from("plum")
        ]);
    }

    #[test]
    fn sorted_results_are_rekeyed_positionally() {
        let c = collect(json!({"x": 2, "y": 1}));
        let sorted = c.sorted();
        assert_eq!(keys_of(&sorted), vec![Key::Int(0), Key::Int(1)]);
    }
}

mod null_stripping {
    use super::*;

    #[test]
    fn without_null_drops_exactly_the_empty_values() {
        let c = collect(json!([1, null, "", "x", 0, [], false]));
        assert_eq!(c.without_null().to_vec(), vec![
            Value::from(1),
            Value::from("x")
        ]);
    }

    #[test]
    fn without_null_preserves_original_keys() {
        let c = collect(json!({"a": null, "b": 2}));
        let stripped = c.without_null();
        assert_eq!(keys_of(&stripped), vec![Key::from("b")]);
    }

    #[test]
    fn without_null_at_tests_the_resolved_value() {
        let c = collect(json!([
            {"name": "x"},
            {"name": ""},
            {"other": 1}
        ]));
        let kept = c.without_null_at("name");
        assert_eq!(kept.len(), 1);
        assert_eq!(kept.pluck("name").to_vec(), vec![Value::from("x")]);
    }
}

mod extraction {
    use super::*;

    #[test]
    fn extract_flattens_and_sorts() {
        let c = collect(json!([
            {"tags": ["b", "a"]},
            {"tags": ["c"]},
            {"tags": null}
        ]));
        assert_eq!(c.extract("tags").to_vec(), vec![
            Value::from("a"),
            Value::from("b"),
            Value::from("c")
        ]);
    }

    #[test]
    fn extract_preserves_duplicates() {
        let c = collect(json!([{"n": 2}, {"n": 1}, {"n": 2}]));
        assert_eq!(c.extract("n").to_vec(), vec![
            Value::from(1),
            Value::from(2),
            Value::from(2)
        ]);
    }

    #[test]
    fn extract_is_idempotent_on_its_own_output() {
        let c = collect(json!([{"n": 2}, {"n": 1}, {"n": 2}]));
        let once = c.extract("n");
        let twice = once.extract("");
        assert_eq!(once, twice);
    }
}

mod key_filtering {
    use super::*;

    #[test]
    fn filter_by_key_keeps_the_named_keys() {
        let c = collect(json!({"a": 1, "b": 2, "c": 3}));
        let kept = c.filter_by_key(&[Key::from("a"), Key::from("c")]);
        assert_eq!(keys_of(&kept), vec![Key::from("a"), Key::from("c")]);
        assert_eq!(kept.get(&Key::from("c")), Some(&Value::from(3)));
    }

    #[test]
    fn filter_by_key_on_positional_collections() {
        let c = collect(json!(["a", "b", "c"]));
        let kept = c.filter_by_key(&[Key::Int(0), Key::Int(2)]);
        assert_eq!(kept.to_vec(), vec![Value::from("a"), Value::from("c")]);
        assert_eq!(keys_of(&kept), vec![Key::Int(0), Key::Int(2)]);
    }
}

mod reflection {
    use super::*;

    #[derive(Serialize)]
    struct Basket {
        collection: Vec<u32>,
        label: String,
    }

    fn basket() -> Basket {
        Basket {
            collection: vec![3, 1],
            label: "fruit".to_string(),
        }
    }

    #[test]
    fn extract_collection_reads_the_default_field() {
        let c = Collection::extract_collection(&basket()).unwrap();
        assert_eq!(c.to_vec(), vec![Value::from(3), Value::from(1)]);
    }

    #[test]
    fn extract_collection_at_reads_a_named_field() {
        let c = Collection::extract_collection_at(&basket(), "label").unwrap();
        // A scalar field wraps into a single-element collection.
        assert_eq!(c.to_vec(), vec![Value::from("fruit")]);
    }

    #[test]
    fn extract_collection_at_follows_dot_paths() {
        #[derive(Serialize)]
        struct Wrapper {
            inner: Basket,
        }
        let c = Collection::extract_collection_at(
            &Wrapper { inner: basket() },
            "inner.collection",
        )
        .unwrap();
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn missing_field_is_an_error() {
        let err = Collection::extract_collection_at(&basket(), "absent").unwrap_err();
        assert!(matches!(err, TroveError::FieldNotFound { .. }));
    }

    #[test]
    fn private_fields_are_reachable_through_serialize() {
        #[derive(Serialize)]
        struct Hidden {
            collection: Vec<i32>,
        }
        let c = Collection::extract_collection(&Hidden { collection: vec![7] }).unwrap();
        assert_eq!(c.to_vec(), vec![Value::from(7)]);
    }
}

mod serialization {
    use super::*;

    #[test]
    fn collections_serialize_as_keyed_maps() {
        let c = collect(json!({"a": 1})).push(Value::from("x"));
        let serialized = serde_json::to_value(&c).unwrap();
        assert_eq!(serialized, json!({"a": 1, "0": "x"}));
    }

    #[test]
    fn values_round_trip_through_serde() {
        let original = v(json!({"nested": {"list": [1, "two", null]}}));
        let text = serde_json::to_string(&original).unwrap();
        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, original);
    }
}
