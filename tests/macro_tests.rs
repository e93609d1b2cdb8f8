use engine_data::{decode, encode, engine_data, Dict, Element, List, Property, Tag};

#[test]
fn test_engine_data_macro_booleans() {
    assert_eq!(engine_data!(true), Element::Boolean(true));
    assert_eq!(engine_data!(false), Element::Boolean(false));
}

#[test]
fn test_engine_data_macro_numbers() {
    assert_eq!(engine_data!(42), Element::Integer(42));
    assert_eq!(engine_data!(3.5), Element::Float(3.5));
    assert_eq!(engine_data!(-123), Element::Integer(-123));
    assert_eq!(engine_data!(7u8), Element::Integer(7));
}

#[test]
fn test_engine_data_macro_strings() {
    assert_eq!(engine_data!("hello world"), Element::from("hello world"));
    assert_eq!(engine_data!(""), Element::String(String::new()));
}

#[test]
fn test_engine_data_macro_symbols() {
    assert_eq!(
        engine_data!(Property::new("EnglishUS")),
        Element::Property(Property::new("EnglishUS"))
    );
    assert_eq!(
        engine_data!(Tag::new(b"(hwid)".to_vec())),
        Element::Tag(Tag::new(b"(hwid)".to_vec()))
    );
}

#[test]
fn test_engine_data_macro_lists() {
    assert_eq!(engine_data!([]), Element::List(List::new()));

    let values = engine_data!([1.0, 0.0, 0.0, 0.0]);
    assert_eq!(
        values,
        Element::from(vec![
            Element::Float(1.0),
            Element::Float(0.0),
            Element::Float(0.0),
            Element::Float(0.0),
        ])
    );

    let mixed = engine_data!([1, "x", true, [2]]);
    let items = mixed.as_list().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[3], Element::from(vec![Element::Integer(2)]));
}

#[test]
fn test_engine_data_macro_dicts() {
    assert_eq!(engine_data!({}), Element::Dict(Dict::new()));

    let value = engine_data!({
        "Name": "Normal RGB",
        "FontSize": 12.0,
        "AutoKerning": true,
    });
    let dict = value.as_dict().unwrap();
    assert_eq!(dict.len(), 3);
    assert_eq!(dict["FontSize"], Element::Float(12.0));
    assert_eq!(dict.get("Name").and_then(Element::as_str), Some("Normal RGB"));
}

#[test]
fn test_engine_data_macro_preserves_key_order() {
    let value = engine_data!({ "Z": 1, "A": 2, "M": 3 });
    let keys: Vec<&str> = value
        .as_dict()
        .unwrap()
        .keys()
        .map(Property::as_str)
        .collect();
    assert_eq!(keys, ["Z", "A", "M"]);
}

#[test]
fn test_engine_data_macro_nested() {
    let value = engine_data!({
        "ResourceDict": {
            "FontSet": [
                { "Name": "Arial", "Script": 0 },
                { "Name": "Myriad", "Script": 0 }
            ],
            "SmallCapSize": 0.7
        }
    });

    let fonts = value
        .pointer(&["ResourceDict", "FontSet"])
        .and_then(Element::as_list)
        .unwrap();
    assert_eq!(fonts.len(), 2);
    assert_eq!(fonts[1].get("Name").and_then(Element::as_str), Some("Myriad"));
}

#[test]
fn test_engine_data_macro_encodes() {
    let value = engine_data!({ "Version": 1, "Ratio": 0.5, "Values": [1, 2] });
    let bytes = encode(&value);
    assert_eq!(
        bytes,
        b"\n\n<<\n\t/Version 1\n\t/Ratio .5\n\t/Values [ 1 2 ]\n>>"
    );
    assert_eq!(decode(&bytes).unwrap(), value);
}

#[test]
fn test_engine_data_macro_with_variables() {
    let name = "Minion";
    let size = 9.5;
    let value = engine_data!({ "Name": name, "Size": size });
    assert_eq!(value.get("Name").and_then(Element::as_str), Some("Minion"));
    assert_eq!(value.get("Size").and_then(Element::as_f64), Some(9.5));
}
