//! Render buckets: source binding, filter and line cap/join.

use crate::error::{Error, Result};
use crate::pbf::PbfWriter;
use crate::schema::{tags, BucketType, CapType, JoinType};
use crate::style::{Bucket, Literal};
use tracing::trace;

use super::value::encode_value;

/// Encodes one bucket as a `Bucket` message.
pub fn encode_bucket(name: &str, bucket: &Bucket) -> Result<PbfWriter> {
    let mut pbf = PbfWriter::new();
    pbf.write_tagged_string(tags::bucket::NAME, name);

    let kind = BucketType::from_name(&bucket.kind)
        .ok_or_else(|| Error::unknown_bucket_type(name, &bucket.kind))?;
    pbf.write_tagged_varint(tags::bucket::TYPE, u64::from(kind.wire_value()));

    pbf.write_tagged_string(tags::bucket::SOURCE_NAME, &bucket.datasource);
    pbf.write_tagged_string(tags::bucket::SOURCE_LAYER, &bucket.layer);

    if let Some(field) = &bucket.field {
        pbf.write_tagged_string(tags::bucket::SOURCE_FIELD, field);

        // A field with no value filters on null, which has no wire form.
        let null = Literal::Null;
        let values: Vec<&Literal> = match &bucket.value {
            Some(values) => values.iter().collect(),
            None => vec![&null],
        };
        for (index, value) in values.into_iter().enumerate() {
            let encoded = encode_value(name, index, value)?;
            pbf.write_message(tags::bucket::SOURCE_VALUE, &encoded);
        }
    }

    if let Some(cap) = &bucket.cap {
        let cap = CapType::from_name(cap).ok_or_else(|| Error::unknown_cap_or_join(name, "cap", cap))?;
        pbf.write_tagged_varint(tags::bucket::CAP, u64::from(cap.wire_value()));
    }

    if let Some(join) = &bucket.join {
        let join =
            JoinType::from_name(join).ok_or_else(|| Error::unknown_cap_or_join(name, "join", join))?;
        pbf.write_tagged_varint(tags::bucket::JOIN, u64::from(join.wire_value()));
    }

    trace!("Encoded bucket '{}' ({} bytes)", name, pbf.len());
    Ok(pbf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pbf::read_fields;
    use pretty_assertions::assert_eq;

    fn tags_of(pbf: &PbfWriter) -> Vec<u32> {
        read_fields(pbf.as_bytes()).unwrap().iter().map(|f| f.tag).collect()
    }

    #[test]
    fn test_type_table() {
        for (kind, wire) in [("fill", 1), ("line", 2), ("point", 3)] {
            let pbf = encode_bucket("b", &Bucket::new(kind, "osm", "layer")).unwrap();
            let fields = read_fields(pbf.as_bytes()).unwrap();
            assert_eq!(fields[1].tag, 2);
            assert_eq!(fields[1].as_varint(), Some(wire));
        }
    }

    #[test]
    fn test_unknown_type() {
        let err = encode_bucket("b", &Bucket::new("polygon", "osm", "layer")).unwrap_err();
        assert!(matches!(err, Error::UnknownBucketType { ref kind, .. } if kind == "polygon"));
    }

    #[test]
    fn test_minimal_bucket_fields() {
        let pbf = encode_bucket("water", &Bucket::new("fill", "osm", "water")).unwrap();
        let fields = read_fields(pbf.as_bytes()).unwrap();

        assert_eq!(tags_of(&pbf), vec![1, 2, 3, 4]);
        assert_eq!(fields[0].as_str(), Some("water"));
        assert_eq!(fields[2].as_str(), Some("osm"));
        assert_eq!(fields[3].as_str(), Some("water"));
    }

    #[test]
    fn test_filter_values_keep_order() {
        let bucket = Bucket::new("line", "osm", "road")
            .filter("class", vec![Literal::from("a"), Literal::from("b")]);
        let pbf = encode_bucket("road", &bucket).unwrap();
        let fields = read_fields(pbf.as_bytes()).unwrap();

        assert_eq!(tags_of(&pbf), vec![1, 2, 3, 4, 5, 6, 6]);
        assert_eq!(fields[4].as_str(), Some("class"));

        let first = fields[5].as_message().unwrap();
        let second = fields[6].as_message().unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].tag, 1);
        assert_eq!(first[0].as_str(), Some("a"));
        assert_eq!(second[0].as_str(), Some("b"));
    }

    #[test]
    fn test_scalar_value_is_one_entry() {
        let bucket: Bucket = serde_json::from_str(
            r#"{"type": "fill", "datasource": "osm", "layer": "landuse", "field": "park", "value": true}"#,
        )
        .unwrap();
        let pbf = encode_bucket("parks", &bucket).unwrap();
        assert_eq!(tags_of(&pbf), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_numeric_value_reports_position() {
        let bucket = Bucket::new("line", "osm", "road")
            .filter("lanes", vec![Literal::from("two"), Literal::Number(4.0)]);
        let err = encode_bucket("road", &bucket).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedValueKind { ref bucket, index: 1, .. } if bucket == "road"
        ));
    }

    #[test]
    fn test_field_without_value() {
        let mut bucket = Bucket::new("fill", "osm", "landuse");
        bucket.field = Some("park".into());
        let err = encode_bucket("parks", &bucket).unwrap_err();
        assert!(matches!(err, Error::UnsupportedValueKind { index: 0, .. }));
    }

    #[test]
    fn test_cap_and_join() {
        let bucket = Bucket::new("line", "osm", "road").cap("round").join("bevel");
        let pbf = encode_bucket("road", &bucket).unwrap();
        let fields = read_fields(pbf.as_bytes()).unwrap();

        assert_eq!(tags_of(&pbf), vec![1, 2, 3, 4, 7, 8]);
        assert_eq!(fields[4].as_varint(), Some(1));
        assert_eq!(fields[5].as_varint(), Some(2));
    }

    #[test]
    fn test_unknown_cap_or_join() {
        let err = encode_bucket("road", &Bucket::new("line", "osm", "road").cap("square")).unwrap_err();
        assert!(matches!(err, Error::UnknownCapOrJoin { property: "cap", .. }));

        let err = encode_bucket("road", &Bucket::new("line", "osm", "road").join("miter")).unwrap_err();
        assert!(matches!(err, Error::UnknownCapOrJoin { property: "join", .. }));
    }
}
