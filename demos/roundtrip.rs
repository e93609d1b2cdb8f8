//! Decoding, editing and re-encoding an EngineData blob.
//!
//! Run with: cargo run --example roundtrip [path/to/engine_data.bin]

use engine_data::{decode, encode, encode_flat, engine_data, Element};
use std::error::Error;
use std::fs;

fn describe(element: &Element, depth: usize) {
    let pad = "  ".repeat(depth);
    match element {
        Element::Dict(dict) => {
            for (key, value) in dict {
                if value.is_container() {
                    println!("{}{}", pad, key);
                    describe(value, depth + 1);
                } else {
                    println!("{}{} = {}", pad, key, value);
                }
            }
        }
        Element::List(list) => {
            for (i, item) in list.iter().enumerate() {
                println!("{}[{}]", pad, i);
                describe(item, depth + 1);
            }
        }
        leaf => println!("{}{}", pad, leaf),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Use the blob given on the command line, or a small built-in document
    let bytes = match std::env::args().nth(1) {
        Some(path) => fs::read(path)?,
        None => encode(&engine_data!({
            "EngineDict": {
                "Editor": { "Text": "Hello (world)\r" },
                "AntiAlias": 4
            },
            "ResourceDict": {
                "FontSet": [ { "Name": "MyriadPro-Regular", "Script": 0 } ],
                "SmallCapSize": 0.7
            }
        })),
    };

    let mut root = decode(&bytes)?;
    println!("Decoded {} bytes:", bytes.len());
    describe(&root, 1);

    let reencoded = encode(&root);
    println!("\nByte-stable re-encode: {}", reencoded == bytes);

    // Replace the layer text and write it back
    if let Some(editor) = root
        .as_dict_mut()
        .and_then(|d| d.get_mut("EngineDict"))
        .and_then(Element::as_dict_mut)
        .and_then(|d| d.get_mut("Editor"))
        .and_then(Element::as_dict_mut)
    {
        editor.insert("Text", "Edited\r");
    }
    let edited = encode(&root);
    println!("Edited document is {} bytes", edited.len());

    if let Some(dict) = root.as_dict() {
        let flat = encode_flat(dict);
        println!("Flat layout:\n{}", String::from_utf8_lossy(&flat));
    }

    Ok(())
}
