use engine_data::{
    decode, decode_dict, encode, encode_flat, encode_with_options, from_reader, to_writer,
    to_writer_with_options, Dict, EncodeOptions, Element, Error, Layout, List, Property, Tag,
};

/// A trimmed-down type layer document as written by the host encoder.
const TYPE_LAYER: &[u8] = b"\n\n<<\n\
\t/EngineDict\n\
\t<<\n\
\t\t/Editor\n\
\t\t<<\n\
\t\t\t/Text (\xfe\xff\x00H\x00e\x00l\x00l\x00o\x00\r)\n\
\t\t>>\n\
\t\t/ParagraphRun\n\
\t\t<<\n\
\t\t\t/DefaultRunData\n\
\t\t\t<<\n\
\t\t\t\t/ParagraphSheet\n\
\t\t\t\t<<\n\
\t\t\t\t\t/DefaultStyleSheet 0\n\
\t\t\t\t\t/Properties\n\
\t\t\t\t\t<<\n\
\t\t\t\t\t>>\n\
\t\t\t\t>>\n\
\t\t\t>>\n\
\t\t\t/RunArray [\n\
\t\t\t<<\n\
\t\t\t\t/ParagraphSheet\n\
\t\t\t\t<<\n\
\t\t\t\t\t/DefaultStyleSheet 0\n\
\t\t\t\t\t/Properties\n\
\t\t\t\t\t<<\n\
\t\t\t\t\t\t/Justification 0\n\
\t\t\t\t\t\t/FirstLineIndent 0.0\n\
\t\t\t\t\t\t/AutoLeading 1.2\n\
\t\t\t\t\t\t/Hanging false\n\
\t\t\t\t\t>>\n\
\t\t\t\t>>\n\
\t\t\t\t/Adjustments\n\
\t\t\t\t<<\n\
\t\t\t\t\t/Axis [ 1.0 0.0 1.0 ]\n\
\t\t\t\t\t/XY [ 0.0 0.0 ]\n\
\t\t\t\t>>\n\
\t\t\t>>\n\
\t\t\t]\n\
\t\t\t/RunLengthArray [ 6 ]\n\
\t\t\t/IsJoinable 1\n\
\t\t>>\n\
\t\t/AntiAlias 4\n\
\t\t/Rendered\n\
\t\t<<\n\
\t\t\t/Version 1\n\
\t\t\t/Shapes\n\
\t\t\t<<\n\
\t\t\t\t/WritingDirection 0\n\
\t\t\t\t/Children [\n\
\t\t\t\t<<\n\
\t\t\t\t\t/ShapeType 0\n\
\t\t\t\t\t/Cookie\n\
\t\t\t\t\t<<\n\
\t\t\t\t\t\t/Photoshop\n\
\t\t\t\t\t\t<<\n\
\t\t\t\t\t\t\t/ShapeType 0\n\
\t\t\t\t\t\t\t/PointBase [ 0.0 0.0 ]\n\
\t\t\t\t\t\t\t/Base\n\
\t\t\t\t\t\t\t<<\n\
\t\t\t\t\t\t\t\t/ShapeType 0\n\
\t\t\t\t\t\t\t\t/TransformPoint0 [ 1.0 0.0 ]\n\
\t\t\t\t\t\t\t>>\n\
\t\t\t\t\t\t>>\n\
\t\t\t\t\t>>\n\
\t\t\t\t>>\n\
\t\t\t\t]\n\
\t\t\t>>\n\
\t\t>>\n\
\t>>\n\
\t/ResourceDict\n\
\t<<\n\
\t\t/KinsokuSet [\n\
\t\t<<\n\
\t\t\t/Name (\xfe\xff\x00P\x00h\x00o\x00t\x00o\x00s\x00h\x00o\x00p\x00K\x00i\x00n\x00s\x00o\x00k\x00u\x00H\x00a\x00r\x00d)\n\
\t\t\t/Hanging (\xfe\xff0\x010\x02)\n\
\t\t>>\n\
\t\t]\n\
\t\t/FontSet [\n\
\t\t<<\n\
\t\t\t/Name (\xfe\xff\x00A\x00d\x00o\x00b\x00e\x00I\x00n\x00v\x00i\x00s\x00F\x00o\x00n\x00t)\n\
\t\t\t/Script 0\n\
\t\t\t/FontType 0\n\
\t\t\t/Synthetic 0\n\
\t\t>>\n\
\t\t]\n\
\t\t/SuperscriptSize .583\n\
\t\t/SuperscriptPosition .333\n\
\t\t/SubscriptPosition -.333\n\
\t\t/SmallCapSize .7\n\
\t>>\n\
\t/DocumentResources\n\
\t<<\n\
\t\t/TheNormalStyleSheet 0\n\
\t\t/Language /EnglishUS\n\
\t>>\n\
>>";

#[test]
fn test_type_layer_is_byte_stable() {
    let root = decode(TYPE_LAYER).unwrap();
    let encoded = encode(&root);
    assert_eq!(
        String::from_utf8_lossy(&encoded),
        String::from_utf8_lossy(TYPE_LAYER)
    );
    assert_eq!(encoded, TYPE_LAYER);
}

#[test]
fn test_type_layer_structure() {
    let root = decode(TYPE_LAYER).unwrap();

    assert_eq!(
        root.pointer(&["EngineDict", "Editor", "Text"])
            .and_then(Element::as_str),
        Some("Hello\r")
    );
    assert_eq!(
        root.pointer(&["EngineDict", "AntiAlias"]),
        Some(&Element::Integer(4))
    );
    assert_eq!(
        root.pointer(&["ResourceDict", "SubscriptPosition"]),
        Some(&Element::Float(-0.333))
    );
    assert_eq!(
        root.pointer(&["DocumentResources", "Language"]),
        Some(&Element::Property(Property::new("EnglishUS")))
    );

    let run = root
        .pointer(&["EngineDict", "ParagraphRun", "RunArray"])
        .and_then(Element::as_list)
        .and_then(List::first)
        .unwrap();
    assert_eq!(
        run.pointer(&["ParagraphSheet", "Properties", "AutoLeading"]),
        Some(&Element::Float(1.2))
    );
    assert_eq!(
        run.pointer(&["Adjustments", "Axis"]),
        Some(&Element::from(vec![
            Element::Float(1.0),
            Element::Float(0.0),
            Element::Float(1.0)
        ]))
    );

    let empty = root
        .pointer(&[
            "EngineDict",
            "ParagraphRun",
            "DefaultRunData",
            "ParagraphSheet",
            "Properties",
        ])
        .and_then(Element::as_dict)
        .unwrap();
    assert!(empty.is_empty());
}

#[test]
fn test_cjk_string() {
    let root = decode(TYPE_LAYER).unwrap();
    let hanging = root
        .pointer(&["ResourceDict", "KinsokuSet"])
        .and_then(Element::as_list)
        .and_then(List::first)
        .and_then(|set| set.get("Hanging"))
        .and_then(Element::as_str);
    assert_eq!(hanging, Some("\u{3001}\u{3002}"));
}

#[test]
fn test_root_keys_in_document_order() {
    let root = decode(TYPE_LAYER).unwrap();
    let keys: Vec<&str> = root
        .as_dict()
        .unwrap()
        .keys()
        .map(Property::as_str)
        .collect();
    assert_eq!(keys, ["EngineDict", "ResourceDict", "DocumentResources"]);
}

#[test]
fn test_edit_and_reencode() {
    let mut root = decode(TYPE_LAYER).unwrap();
    let editor = root
        .as_dict_mut()
        .and_then(|d| d.get_mut("EngineDict"))
        .and_then(Element::as_dict_mut)
        .and_then(|d| d.get_mut("Editor"))
        .and_then(Element::as_dict_mut)
        .unwrap();
    editor.insert("Text", "Hello (world)\r");

    let encoded = encode(&root);
    let reparsed = decode(&encoded).unwrap();
    assert_eq!(
        reparsed
            .pointer(&["EngineDict", "Editor", "Text"])
            .and_then(Element::as_str),
        Some("Hello (world)\r")
    );
    assert_eq!(reparsed, root);
}

#[test]
fn test_escaped_parens_survive() {
    let input: &[u8] = b"<< /Text (\xfe\xff\x00\\(\x00x\x00\\)) /After 1 >>";
    let root = decode(input).unwrap();
    assert_eq!(root.get("Text").and_then(Element::as_str), Some("(x)"));
    assert_eq!(root.get("After"), Some(&Element::Integer(1)));
}

#[test]
fn test_strings_ending_in_escape_byte_roundtrip() {
    let value = engine_data::engine_data!({
        "Text": "すごいぜ",
        "After": 1,
        "Path": "C:\\",
        "Runs": ["Ŝ", "ok", "ぜ"]
    });

    let document = encode(&value);
    let decoded = decode(&document).unwrap();
    assert_eq!(decoded.get("Text").and_then(Element::as_str), Some("すごいぜ"));
    assert_eq!(decoded.get("After"), Some(&Element::Integer(1)));
    assert_eq!(decoded, value);

    let flat = encode_with_options(&value, EncodeOptions::flat());
    assert_eq!(decode(&flat).unwrap(), value);
}

#[test]
fn test_string_with_separator_bytes() {
    // U+0920 and U+0A09 have code-unit bytes equal to space, tab and newline.
    let input: &[u8] = b"<< /Text (\xfe\xff\x09\x20\x0a\x09) >>";
    let root = decode(input).unwrap();
    assert_eq!(
        root.get("Text").and_then(Element::as_str),
        Some("\u{0920}\u{0a09}")
    );
}

#[test]
fn test_lenient_dict_terminator() {
    let root = decode(b"<< /A << /B 1 >>\0\0 /C 2 >>\0").unwrap();
    assert_eq!(root.pointer(&["A", "B"]), Some(&Element::Integer(1)));
    assert_eq!(root.get("C"), Some(&Element::Integer(2)));
}

#[test]
fn test_whitespace_is_insignificant() {
    let spaced = decode(b"<<\n\t/A\n\n   1\t/B [\t.5\n]\n>>").unwrap();
    let compact = decode(b"<< /A 1 /B [ .5 ] >>").unwrap();
    assert_eq!(spaced, compact);
}

#[test]
fn test_unknown_token_reports_offset() {
    let err = decode(b"<< /A @@ >>").unwrap_err();
    assert_eq!(
        err,
        Error::UnknownToken {
            offset: 6,
            token: "@@".to_string()
        }
    );
    assert!(err.is_malformed());
}

#[test]
fn test_unterminated_string() {
    let err = decode(b"<< /A (\xfe\xff\x00a >>").unwrap_err();
    assert!(matches!(err, Error::MalformedInput { offset: 6, .. }));
}

#[test]
fn test_flat_layout_roundtrip() {
    let root = decode(TYPE_LAYER).unwrap();
    let dict = root.as_dict().unwrap();

    let flat = encode_flat(dict);
    assert!(!flat.contains(&b'\n'));
    assert!(!flat.contains(&b'\t'));
    assert!(flat.starts_with(b" /EngineDict << /Editor << /Text (\xfe\xff"));

    assert_eq!(
        encode_with_options(&root, EncodeOptions::flat()),
        flat
    );
    assert_eq!(decode_dict(&flat).unwrap(), *dict);
    assert_eq!(decode(&flat).unwrap(), root);
}

#[test]
fn test_layouts_share_content() {
    let value = engine_data::engine_data!({
        "Sheets": [ { "Name": "A" }, { "Name": "B" } ],
        "Ratio": 0.25
    });
    let document = encode_with_options(&value, EncodeOptions::new().with_layout(Layout::Document));
    let flat = encode_with_options(&value, EncodeOptions::flat());

    assert_ne!(document, flat);
    assert_eq!(decode(&document).unwrap(), decode(&flat).unwrap());
}

#[test]
fn test_io_helpers() {
    let root = decode(TYPE_LAYER).unwrap();

    let mut buffer = Vec::new();
    to_writer(&mut buffer, &root).unwrap();
    assert_eq!(buffer, TYPE_LAYER);

    let mut flat = Vec::new();
    to_writer_with_options(&mut flat, &root, EncodeOptions::flat()).unwrap();
    assert_eq!(from_reader(flat.as_slice()).unwrap(), root);
}

#[test]
fn test_build_and_encode() {
    let mut properties = Dict::new();
    properties.insert("Justification", 0);
    properties.insert("Hanging", false);

    let mut sheet = Dict::new();
    sheet.insert("Name", "Normal RGB");
    sheet.insert("Properties", properties);

    let mut root = Dict::new();
    root.insert("StyleSheetSet", List::from(vec![Element::from(sheet)]));
    root.insert("Kind", Tag::new(b"(hwid)".to_vec()));

    let encoded = encode(&Element::Dict(root.clone()));
    let expected: &[u8] = b"\n\n<<\n\
\t/StyleSheetSet [\n\
\t<<\n\
\t\t/Name (\xfe\xff\x00N\x00o\x00r\x00m\x00a\x00l\x00 \x00R\x00G\x00B)\n\
\t\t/Properties\n\
\t\t<<\n\
\t\t\t/Justification 0\n\
\t\t\t/Hanging false\n\
\t\t>>\n\
\t>>\n\
\t]\n\
\t/Kind (hwid)\n\
>>";
    assert_eq!(encoded, expected);
    assert_eq!(decode_dict(&encoded).unwrap(), root);
}

#[test]
fn test_serde_json_view() {
    let root = decode(b"<< /Name (\xfe\xff\x00A) /Size 12.0 /Tags [ 1 true ] >>").unwrap();
    let json = serde_json::to_value(&root).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "Name": "A", "Size": 12.0, "Tags": [1, true] })
    );

    let back: Element = serde_json::from_value(json).unwrap();
    assert_eq!(back, root);
}
