//! Decodes encoder output with the `prost` schema messages.

use pretty_assertions::assert_eq;
use prost::Message;
use stylebin_core::schema::{
    BucketMessage, BucketType, ClassMessage, FillClassMessage, LineClassMessage, PropertyFunction,
    PropertyMessage, StructureMessage, StyleMessage, ValueMessage,
};
use stylebin_core::{encode_style, EncodeMode, EncoderConfig, Error, Style, StyleEncoder};

const STYLE: &str = r##"{
    "buckets": {
        "water": {"type": "fill", "datasource": "osm", "layer": "water"},
        "road": {"type": "line", "datasource": "osm", "layer": "road",
                 "field": "class", "value": ["motorway", "trunk"], "cap": "round", "join": "butt"},
        "tunnel": {"type": "line", "datasource": "osm", "layer": "road",
                   "field": "tunnel", "value": true}
    },
    "structure": [
        {"name": "background", "layers": [{"name": "water", "bucket": "water"}]},
        {"name": "roads", "layers": [
            {"name": "tunnels", "bucket": "tunnel"},
            {"name": "road", "bucket": "road"}
        ]},
        {"name": "reserved"}
    ],
    "classes": [
        {"name": "default", "layers": {
            "water": {"type": "fill", "antialias": false, "color": "#73B6E6", "opacity": 0.75},
            "road": {"type": "line", "color": "#ff0000",
                     "width": ["stops", {"z": 8, "val": 0.5}, {"z": 14, "val": 3}]},
            "tunnel": {"type": "line", "width": 1.5}
        }}
    ]
}"##;

fn decode(style: &Style) -> StyleMessage {
    let bytes = encode_style(style).unwrap();
    StyleMessage::decode(bytes).unwrap()
}

#[test]
fn test_full_style_decodes() {
    let style = Style::from_json_str(STYLE).unwrap();
    let message = decode(&style);

    assert_eq!(
        message.bucket,
        vec![
            BucketMessage {
                name: "water".into(),
                kind: BucketType::Fill.wire_value(),
                source_name: "osm".into(),
                source_layer: "water".into(),
                source_field: None,
                source_value: vec![],
                cap: None,
                join: None,
            },
            BucketMessage {
                name: "road".into(),
                kind: BucketType::Line.wire_value(),
                source_name: "osm".into(),
                source_layer: "road".into(),
                source_field: Some("class".into()),
                source_value: vec![
                    ValueMessage {
                        string_value: Some("motorway".into()),
                        bool_value: None,
                    },
                    ValueMessage {
                        string_value: Some("trunk".into()),
                        bool_value: None,
                    },
                ],
                cap: Some(1),
                join: Some(1),
            },
            BucketMessage {
                name: "tunnel".into(),
                kind: BucketType::Line.wire_value(),
                source_name: "osm".into(),
                source_layer: "road".into(),
                source_field: Some("tunnel".into()),
                source_value: vec![ValueMessage {
                    string_value: None,
                    bool_value: Some(true),
                }],
                cap: None,
                join: None,
            },
        ]
    );

    let leaf = |name: &str, bucket: &str| StructureMessage {
        name: name.into(),
        bucket_name: Some(bucket.into()),
        child_layer: vec![],
    };
    assert_eq!(
        message.structure,
        vec![
            StructureMessage {
                name: "background".into(),
                bucket_name: None,
                child_layer: vec![leaf("water", "water")],
            },
            StructureMessage {
                name: "roads".into(),
                bucket_name: None,
                child_layer: vec![leaf("tunnels", "tunnel"), leaf("road", "road")],
            },
            StructureMessage {
                name: "reserved".into(),
                bucket_name: None,
                child_layer: vec![],
            },
        ]
    );

    let constant = |value: f32| PropertyMessage {
        function: PropertyFunction::Constant.wire_value(),
        value: vec![value],
    };
    assert_eq!(
        message.class,
        vec![ClassMessage {
            name: "default".into(),
            fill: vec![FillClassMessage {
                layer_name: "water".into(),
                antialias: Some(constant(0.0)),
                fill_color: Some(0x73B6E6FF),
                opacity: Some(constant(0.75)),
            }],
            line: vec![
                LineClassMessage {
                    layer_name: "road".into(),
                    color: Some(0xFF0000FF),
                    width: Some(PropertyMessage {
                        function: PropertyFunction::Stops.wire_value(),
                        value: vec![8.0, 0.5, 14.0, 3.0],
                    }),
                },
                LineClassMessage {
                    layer_name: "tunnel".into(),
                    color: None,
                    width: Some(constant(1.5)),
                },
            ],
        }]
    );
}

#[test]
fn test_structure_order_is_preserved() {
    let orders = [
        ["a", "b", "c"],
        ["c", "a", "b"],
        ["b", "c", "a"],
    ];
    for order in orders {
        let json = format!(
            r#"{{"structure": [{{"name": "root", "layers": [{}]}}]}}"#,
            order
                .iter()
                .map(|n| format!(r#"{{"name": "{n}", "bucket": "{n}"}}"#))
                .collect::<Vec<_>>()
                .join(",")
        );
        let message = decode(&Style::from_json_str(&json).unwrap());
        let names: Vec<_> = message.structure[0]
            .child_layer
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, order);
    }
}

#[test]
fn test_numeric_filter_value_is_rejected() {
    let style = Style::from_json_str(
        r#"{"buckets": {"lanes": {"type": "line", "datasource": "osm", "layer": "road",
                                  "field": "lanes", "value": [5, 10]}}}"#,
    )
    .unwrap();
    let err = encode_style(&style).unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedValueKind { ref bucket, index: 0, ref value } if bucket == "lanes" && value == "5"
    ));
}

#[test]
fn test_lenient_mode_drops_invalid_entries() {
    let style = Style::from_json_str(
        r#"{"classes": [{"name": "night", "layers": {
            "water": {"type": "fill", "color": "darkblue", "opacity": 0.5},
            "labels": {"type": "symbol"}
        }}]}"#,
    )
    .unwrap();

    assert!(matches!(encode_style(&style), Err(Error::InvalidColor { .. })));

    let encoder = StyleEncoder::with_config(EncoderConfig::new().mode(EncodeMode::Lenient));
    let (bytes, stats) = encoder.encode_with_stats(&style).unwrap();
    let message = StyleMessage::decode(bytes).unwrap();

    assert_eq!(stats.omitted_fields, 2);
    assert_eq!(message.class[0].fill.len(), 1);
    assert_eq!(message.class[0].fill[0].fill_color, None);
    assert!(message.class[0].fill[0].opacity.is_some());
    assert!(message.class[0].line.is_empty());
}
