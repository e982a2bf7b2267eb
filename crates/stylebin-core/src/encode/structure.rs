//! The structure tree that fixes draw order.

use crate::pbf::PbfWriter;
use crate::schema::tags;
use crate::style::{StructureContent, StructureNode};
use tracing::warn;

use super::Session;

/// Encodes a structure node and its subtree, depth-first, pre-order.
///
/// Children keep their authored order: it is the renderer's draw order.
pub(crate) fn encode_structure(node: &StructureNode, session: &mut Session<'_>) -> PbfWriter {
    session.stats.structure_nodes += 1;

    let mut pbf = PbfWriter::new();
    pbf.write_tagged_string(tags::structure::NAME, &node.name);

    match &node.content {
        StructureContent::Bucket(bucket) => {
            if !session.has_bucket(bucket) {
                warn!(
                    "Structure node '{}' references unknown bucket '{}'",
                    node.name, bucket
                );
            }
            pbf.write_tagged_string(tags::structure::BUCKET_NAME, bucket);
        }
        StructureContent::Layers(children) => {
            for child in children {
                let encoded = encode_structure(child, session);
                pbf.write_message(tags::structure::CHILD_LAYER, &encoded);
            }
        }
        StructureContent::Empty => {}
    }

    pbf
}
