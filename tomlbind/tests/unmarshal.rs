#![allow(non_snake_case)]

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use tomlbind::{Bind, Value};

#[derive(Bind, Debug, PartialEq)]
#[bind(rename_all = "PascalCase")]
struct Basic {
    string: String,
    int: i32,
    int64: i64,
}

#[tomlbind_testhelpers::test]
fn struct_basic_fields() {
    let s: Basic = tomlbind::from_str("String = \"str\"\nInt = 10\nInt64 = 20").unwrap();
    assert_eq!(
        s,
        Basic {
            string: "str".into(),
            int: 10,
            int64: 20,
        }
    );
}

#[derive(Bind, Debug, Default, PartialEq)]
struct Root {
    Main: Main,
}

#[derive(Bind, Debug, Default, PartialEq)]
struct Main {
    MainDeep: Deep,
}

#[derive(Bind, Debug, Default, PartialEq)]
struct Deep {
    Field: i64,
}

#[tomlbind_testhelpers::test]
fn nested_structs_start_zeroed() {
    let r: Root = tomlbind::from_str("").unwrap();
    assert_eq!(r, Root::default());
}

#[tomlbind_testhelpers::test]
fn nested_structs_from_dotted_table() {
    let r: Root = tomlbind::from_str("[Main.MainDeep]\nField = 42").unwrap();
    assert_eq!(r.Main.MainDeep.Field, 42);
}

#[derive(Bind, Debug, PartialEq)]
struct PtrRoot {
    Main: PtrMain,
}

#[derive(Bind, Debug, PartialEq)]
struct PtrMain {
    MainDeep: Option<Box<Deep>>,
}

#[tomlbind_testhelpers::test]
fn optional_struct_is_allocated_when_present() {
    let r: PtrRoot = tomlbind::from_str("[Main.MainDeep]\nField = 42").unwrap();
    assert_eq!(r.Main.MainDeep, Some(Box::new(Deep { Field: 42 })));
}

#[tomlbind_testhelpers::test]
fn optional_struct_stays_empty_when_absent() {
    let r: PtrRoot = tomlbind::from_str("").unwrap();
    assert_eq!(r.Main.MainDeep, None);

    // a table for the parent alone doesn't allocate the child either
    let r: PtrRoot = tomlbind::from_str("[Main]").unwrap();
    assert_eq!(r.Main.MainDeep, None);
}

#[tomlbind_testhelpers::test]
fn optional_struct_is_replaced_not_merged() {
    let mut r = PtrRoot {
        Main: PtrMain {
            MainDeep: Some(Box::new(Deep { Field: 7 })),
        },
    };
    tomlbind::from_str_into("[Main.MainDeep]", &mut r).unwrap();
    assert_eq!(r.Main.MainDeep, Some(Box::new(Deep { Field: 0 })));
}

#[tomlbind_testhelpers::test]
fn root_map() {
    let m: HashMap<String, i32> = tomlbind::from_str("a = 1\nb = 2\nc = 3").unwrap();
    let expected: HashMap<String, i32> = [("a", 1), ("b", 2), ("c", 3)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    assert_eq!(m, expected);
}

#[tomlbind_testhelpers::test]
fn root_map_is_merged_not_erased() {
    let mut m: HashMap<String, i32> = HashMap::new();
    m.insert("a".into(), 9999);
    m.insert("c".into(), 3);

    tomlbind::from_str_into("a = 1\nb = 2", &mut m).unwrap();

    let mut entries: Vec<_> = m.into_iter().collect();
    entries.sort();
    assert_eq!(
        entries,
        [("a".to_string(), 1), ("b".to_string(), 2), ("c".to_string(), 3)]
    );
}

#[derive(Bind, Debug)]
struct Counts {
    counts: HashMap<String, i64>,
}

#[tomlbind_testhelpers::test]
fn map_field_is_merged_not_erased() {
    let mut s = Counts {
        counts: [("keep".to_string(), 7), ("a".to_string(), 9999)].into(),
    };

    tomlbind::from_str_into("[counts]\na = 1", &mut s).unwrap();

    assert_eq!(s.counts.len(), 2);
    assert_eq!(s.counts["keep"], 7);
    assert_eq!(s.counts["a"], 1);
}

#[tomlbind_testhelpers::test]
fn root_value_map_is_merged_not_erased() {
    let mut v: Value = [("c", Value::Int(3)), ("a", Value::Int(9999))]
        .into_iter()
        .collect();

    tomlbind::from_str_into("a = 1\nb = 2", &mut v).unwrap();

    let expected: Value = [("a", 1i64), ("b", 2), ("c", 3)].into_iter().collect();
    assert_eq!(v, expected);
}

#[derive(Bind, Debug)]
struct Extra {
    name: String,
    extra: Value,
}

#[tomlbind_testhelpers::test]
fn value_field_map_is_merged_not_erased() {
    let mut s = Extra {
        name: "x".into(),
        extra: [("keep", 7i64)].into_iter().collect(),
    };

    tomlbind::from_str_into("[extra]\na = 1", &mut s).unwrap();

    let expected: Value = [("keep", 7i64), ("a", 1)].into_iter().collect();
    assert_eq!(s.extra, expected);
    assert_eq!(s.name, "x");
}

#[tomlbind_testhelpers::test]
fn value_field_is_replaced_by_non_table() {
    let mut s = Extra {
        name: "x".into(),
        extra: [("keep", 7i64)].into_iter().collect(),
    };

    tomlbind::from_str_into("extra = [1, 2]", &mut s).unwrap();
    assert_eq!(s.extra, Value::from(vec![1i64, 2]));

    // a scalar previously in place is replaced by a table wholesale
    s.extra = Value::Int(5);
    tomlbind::from_str_into("[extra]\na = 1", &mut s).unwrap();
    assert_eq!(s.extra, [("a", 1i64)].into_iter().collect::<Value>());
}

#[derive(Bind, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[bind(key)]
struct Letter(String);

#[tomlbind_testhelpers::test]
fn map_with_typed_key() {
    let m: BTreeMap<Letter, i32> = tomlbind::from_str("a = 1\nb = 2\nc = 3").unwrap();
    let keys: Vec<_> = m.keys().map(|l| l.0.as_str()).collect();
    assert_eq!(keys, ["a", "b", "c"]);
    assert_eq!(m[&Letter("b".into())], 2);
}

#[tomlbind_testhelpers::test]
fn map_with_numeric_key() {
    let m: BTreeMap<u16, String> = tomlbind::from_str("80 = \"http\"\n443 = \"https\"").unwrap();
    assert_eq!(m.get(&443).map(String::as_str), Some("https"));
}

#[derive(Bind, Debug)]
struct Things {
    Things: HashMap<String, Value>,
}

#[tomlbind_testhelpers::test]
fn dynamic_values_in_struct_map() {
    let s: Things = tomlbind::from_str("[Things]\na=1\nb=\"string\"").unwrap();
    assert_eq!(s.Things["a"], Value::Int(1));
    assert_eq!(s.Things["b"], Value::String("string".into()));
}

#[derive(Bind, Debug, PartialEq)]
struct Inner274 {
    #[bind(default = "456")]
    V2: i32,
}

#[derive(Bind, Debug, PartialEq)]
struct Config274 {
    #[bind(default = "123")]
    V1: i32,
    Inner: Inner274,
}

#[tomlbind_testhelpers::test]
fn defaults_reach_nested_structs_without_data() {
    let config: Config274 = tomlbind::from_str("").unwrap();
    assert_eq!(config.V1, 123);
    assert_eq!(config.Inner.V2, 456);
}

#[tomlbind_testhelpers::test]
fn map_in_map() {
    let v: IndexMap<String, IndexMap<String, Value>> =
        tomlbind::from_str("[a]\naa = 1\n[b.c]\nbca = 1\nbcb = \"two\"").unwrap();

    assert_eq!(v["a"]["aa"], Value::Int(1));
    let c: Value = [("bca", Value::Int(1)), ("bcb", Value::from("two"))]
        .into_iter()
        .collect();
    assert_eq!(v["b"]["c"], c);
}

#[tomlbind_testhelpers::test]
fn array_in_dynamic_map() {
    let m: HashMap<String, Value> = tomlbind::from_str("[hello]\nworld = [1,2,3]").unwrap();
    let world = m["hello"].get("world").and_then(Value::as_seq).unwrap();
    assert_eq!(world, [Value::Int(1), Value::Int(2), Value::Int(3)]);
}

#[tomlbind_testhelpers::test]
fn array_in_dynamic_map_root() {
    let m: HashMap<String, Value> = tomlbind::from_str("world = [1,2,3]").unwrap();
    assert_eq!(m["world"], Value::from(vec![1i64, 2, 3]));
}

#[derive(Bind, Debug)]
struct Ints {
    Ints: Vec<i64>,
}

#[tomlbind_testhelpers::test]
fn struct_array() {
    let s: Ints = tomlbind::from_str("Ints = [1,2,3]").unwrap();
    assert_eq!(s.Ints, [1, 2, 3]);
}

#[tomlbind_testhelpers::test]
fn arrays_replace_existing_contents() {
    let mut s = Ints {
        Ints: vec![9, 9, 9, 9, 9],
    };
    tomlbind::from_str_into("Ints = [1]", &mut s).unwrap();
    assert_eq!(s.Ints, [1]);

    // no key, no change
    tomlbind::from_str_into("", &mut s).unwrap();
    assert_eq!(s.Ints, [1]);
}

#[derive(Bind, Debug, PartialEq)]
struct Server {
    host: String,
    #[bind(default = 8080)]
    port: u16,
}

#[derive(Bind, Debug)]
struct Fleet {
    servers: Vec<Server>,
}

#[tomlbind_testhelpers::test]
fn array_of_tables_into_struct_list() {
    let fleet: Fleet = tomlbind::from_str(
        r#"
        [[servers]]
        host = "a"

        [[servers]]
        host = "b"
        port = 9000
        "#,
    )
    .unwrap();

    assert_eq!(
        fleet.servers,
        [
            Server {
                host: "a".into(),
                port: 8080,
            },
            Server {
                host: "b".into(),
                port: 9000,
            },
        ]
    );
}

#[derive(Bind, Debug)]
struct Fixed {
    rgb: [u8; 3],
    origin: [f64; 2],
}

#[tomlbind_testhelpers::test]
fn fixed_arrays() {
    let f: Fixed = tomlbind::from_str("rgb = [255, 128, 0]\norigin = [1, 2.5]").unwrap();
    assert_eq!(f.rgb, [255, 128, 0]);
    assert_eq!(f.origin, [1.0, 2.5]);
}

#[derive(Bind, Debug, PartialEq)]
struct Scalars {
    flag: bool,
    ratio: f32,
    initial: char,
    label: Option<String>,
    missing: Option<i32>,
    when: tomlbind::Datetime,
}

#[tomlbind_testhelpers::test]
fn scalar_kinds() {
    let s: Scalars = tomlbind::from_str(
        r#"
        flag = true
        ratio = 3
        initial = "λ"
        label = "x"
        when = 1979-05-27T07:32:00Z
        "#,
    )
    .unwrap();

    assert!(s.flag);
    assert_eq!(s.ratio, 3.0);
    assert_eq!(s.initial, 'λ');
    assert_eq!(s.label.as_deref(), Some("x"));
    assert_eq!(s.missing, None);
    assert_eq!(s.when.to_string(), "1979-05-27T07:32:00Z");
}

#[tomlbind_testhelpers::test]
fn unknown_keys_are_ignored() {
    let s: Ints = tomlbind::from_str("Ints = [1]\nOther = \"x\"\n[Extra]\nk = 1").unwrap();
    assert_eq!(s.Ints, [1]);
}

#[tomlbind_testhelpers::test]
fn decoding_is_deterministic() {
    let doc = tomlbind::parse_document(
        r#"
        [[servers]]
        host = "a"
        [[servers]]
        host = "b"
        "#,
    )
    .unwrap();

    let first: Fleet = tomlbind::decode(&doc).unwrap();
    let second: Fleet = tomlbind::decode(&doc).unwrap();
    assert_eq!(first.servers, second.servers);
}

#[tomlbind_testhelpers::test]
fn whole_document_into_value() {
    let v: Value = tomlbind::from_str("a = 1\n[b]\nc = [true]").unwrap();
    assert_eq!(v.get("a"), Some(&Value::Int(1)));
    assert_eq!(
        v.get("b").and_then(|b| b.get("c")),
        Some(&Value::from(vec![true]))
    );
}

#[tomlbind_testhelpers::test]
fn eyre_interop() -> eyre::Result<()> {
    let s: Ints = tomlbind::from_str("Ints = [4, 5]")?;
    assert_eq!(s.Ints.iter().sum::<i64>(), 9);
    Ok(())
}
