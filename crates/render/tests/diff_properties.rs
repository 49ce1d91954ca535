use dexscan_graph::model::{EnrichedNode, NodeFont};
use dexscan_render::prelude::*;
use proptest::prelude::*;
use std::collections::BTreeSet;

const IDS: &[&str] = &["0xa", "0xb", "0xc", "0xd", "0xe", "0xf", "0x10", "0x11"];

fn node(id: &str, size: u32) -> EnrichedNode {
    EnrichedNode {
        id: id.to_string(),
        label: id.to_uppercase(),
        shape: "circularImage".to_string(),
        image: String::new(),
        broken_image: String::new(),
        size,
        font: NodeFont {
            size: 16,
            color: "#FFFFFF".to_string(),
        },
    }
}

fn dataset_strategy() -> impl Strategy<Value = Vec<EnrichedNode>> {
    prop::collection::vec(prop::option::of(30u32..34), IDS.len()).prop_map(|slots| {
        slots
            .into_iter()
            .enumerate()
            .filter_map(|(i, size)| size.map(|size| node(IDS[i], size)))
            .collect()
    })
}

fn ids(nodes: &[EnrichedNode]) -> BTreeSet<String> {
    nodes.iter().map(|n| n.id.clone()).collect()
}

proptest! {
    /// Adds, updates and removes partition the two id sets exactly.
    #[test]
    fn prop_diff_partitions_ids(old in dataset_strategy(), new in dataset_strategy()) {
        let diff = diff_nodes(&old, &new);
        let (old_ids, new_ids) = (ids(&old), ids(&new));

        let update_ids = ids(&diff.to_update);
        let expected: BTreeSet<String> = old_ids.intersection(&new_ids).cloned().collect();
        prop_assert_eq!(update_ids, expected);

        let add_ids = ids(&diff.to_add);
        let expected: BTreeSet<String> = new_ids.difference(&old_ids).cloned().collect();
        prop_assert_eq!(add_ids, expected);

        let remove_ids: BTreeSet<String> = diff.to_remove.into_iter().collect();
        let expected: BTreeSet<String> = old_ids.difference(&new_ids).cloned().collect();
        prop_assert_eq!(remove_ids, expected);
    }

    /// Update payloads always carry the new version of an item.
    #[test]
    fn prop_updates_take_new_values(old in dataset_strategy(), new in dataset_strategy()) {
        for update in diff_nodes(&old, &new).to_update {
            prop_assert!(new.contains(&update));
        }
    }
}
