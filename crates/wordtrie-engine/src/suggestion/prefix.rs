// Plain prefix completion: depth-first walk below the prefix node
//
// A node's word is emitted before its children are visited, and children
// are visited in ascending letter order, so results come out in
// lexicographic order without a sort.

use wordtrie_core::metrics::{Metrics, Operation};

use crate::index::{NodeId, TrieIndex};

use super::status::CompletionStatus;

/// Complete `prefix` until `status` is full.
///
/// Does nothing if the prefix is not a path in the index.
pub fn complete_prefix(
    index: &TrieIndex,
    prefix: &str,
    status: &mut CompletionStatus,
    metrics: &mut dyn Metrics,
) {
    let Some(start) = index.lookup_with(prefix, metrics) else {
        return;
    };
    let mut buf = prefix.to_string();
    walk(index, start, &mut buf, status, metrics);
}

/// Emit every word in the subtree of `node`, `buf` holding the path to it.
pub(crate) fn walk(
    index: &TrieIndex,
    node: NodeId,
    buf: &mut String,
    status: &mut CompletionStatus,
    metrics: &mut dyn Metrics,
) {
    if status.is_full() {
        return;
    }
    metrics.record(Operation::NodeVisit);

    if index.is_terminal(node) {
        status.push(buf.clone());
    }

    for (letter, child) in index.children(node) {
        metrics.record(Operation::EdgeProbe);
        if status.is_full() {
            break;
        }
        buf.push(letter.as_char());
        walk(index, child, buf, status, metrics);
        buf.pop();
    }
}
