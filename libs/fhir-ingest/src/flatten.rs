//! Bundle flattening.
//!
//! Specification packages nest resources in `Bundle` containers, and a
//! bundle's entries may themselves be bundles. Flattening unrolls that tree
//! into a flat stream of leaf resources with an explicit work queue, so
//! nesting depth never touches the call stack.

use serde_json::Value;
use std::collections::VecDeque;
use tracing::warn;

/// Expand every `Bundle` in `records` and return the remaining leaf
/// resources in breadth-first (FIFO) order.
///
/// Records without a `resourceType` discriminator are dropped with a
/// warning; they are neither expanded nor yielded.
pub fn flatten<I>(records: I) -> Vec<Value>
where
    I: IntoIterator<Item = Value>,
{
    let mut queue: VecDeque<Value> = records.into_iter().collect();
    let mut leaves = Vec::new();

    while let Some(mut record) = queue.pop_front() {
        match record.get("resourceType").and_then(Value::as_str) {
            None => {
                warn!("expecting \"resourceType\" to be present, dropping record");
                continue;
            }
            Some("Bundle") => {}
            Some(_) => {
                leaves.push(record);
                continue;
            }
        }

        // re-enqueue each entry's payload for the same treatment
        let Some(Value::Array(entries)) =
            record.as_object_mut().and_then(|obj| obj.remove("entry"))
        else {
            continue;
        };
        for mut entry in entries {
            match entry.as_object_mut().and_then(|obj| obj.remove("resource")) {
                Some(resource) => queue.push_back(resource),
                None => warn!("bundle entry without a resource payload, dropping"),
            }
        }
    }

    leaves
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bundle(entries: Vec<Value>) -> Value {
        json!({
            "resourceType": "Bundle",
            "entry": entries.into_iter().map(|resource| json!({ "resource": resource })).collect::<Vec<_>>(),
        })
    }

    #[test]
    fn triply_nested_bundle_yields_the_leaf_exactly_once() {
        let leaf = json!({ "resourceType": "ValueSet", "url": "http://x/vs/1" });
        let nested = bundle(vec![bundle(vec![bundle(vec![leaf.clone()])])]);

        let leaves = flatten(vec![nested]);

        assert_eq!(leaves, vec![leaf]);
    }

    #[test]
    fn leaves_come_out_in_fifo_order() {
        let first = json!({ "resourceType": "CodeSystem", "url": "http://x/cs/1" });
        let second = json!({ "resourceType": "ValueSet", "url": "http://x/vs/1" });
        let third = json!({ "resourceType": "ValueSet", "url": "http://x/vs/2" });

        // a top-level leaf is yielded before resources nested in an earlier bundle
        let leaves = flatten(vec![bundle(vec![second.clone(), third.clone()]), first.clone()]);

        assert_eq!(leaves, vec![first, second, third]);
    }

    #[test]
    fn records_without_a_discriminator_are_dropped() {
        let keeper = json!({ "resourceType": "ValueSet", "url": "http://x/vs/1" });
        let leaves = flatten(vec![json!({ "url": "http://x/untyped" }), keeper.clone()]);
        assert_eq!(leaves, vec![keeper]);
    }

    #[test]
    fn bundle_without_entries_produces_nothing() {
        assert!(flatten(vec![json!({ "resourceType": "Bundle" })]).is_empty());
    }

    #[test]
    fn entries_without_a_resource_payload_are_skipped() {
        let keeper = json!({ "resourceType": "ValueSet", "url": "http://x/vs/1" });
        let mixed = json!({
            "resourceType": "Bundle",
            "entry": [
                { "fullUrl": "http://x/vs/1" },
                { "resource": keeper },
            ],
        });
        let leaves = flatten(vec![mixed]);
        assert_eq!(leaves.len(), 1);
    }
}
