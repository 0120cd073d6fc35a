// Prefix tree storage: an arena of nodes addressed by `NodeId`
//
// Each node owns up to 26 child handles and a terminal flag. A node is only
// ever referenced from its parent's slot, so the tree has no cycles and no
// back-references. Removing a word frees the slots of nodes that become
// childless and non-terminal; freed slots are reused by later inserts.

use log::debug;
use wordtrie_core::alphabet::{ALPHABET_SIZE, Letter, MAX_WORD_LEN, to_letters};
use wordtrie_core::error::WordError;
use wordtrie_core::metrics::{Metrics, NoopMetrics, Operation};

/// Handle to a node in a [`TrieIndex`].
///
/// Handles are valid until the next mutation of the index that produced
/// them. A stale handle never panics; it reads as an empty, non-terminal
/// node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct TrieNode {
    children: [Option<NodeId>; ALPHABET_SIZE],
    terminal: bool,
}

impl TrieNode {
    const EMPTY: TrieNode = TrieNode {
        children: [None; ALPHABET_SIZE],
        terminal: false,
    };

    #[inline]
    fn child(&self, letter: Letter) -> Option<NodeId> {
        self.children[letter.index()]
    }

    #[inline]
    fn is_leafless(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }
}

static EMPTY_NODE: TrieNode = TrieNode::EMPTY;

const ROOT: NodeId = NodeId(0);

/// The prefix tree.
///
/// A word is stored iff the node reached by following its letters from the
/// root is terminal. Every non-root node either is terminal or has at least
/// one child.
#[derive(Debug, Clone)]
pub struct TrieIndex {
    nodes: Vec<TrieNode>,
    /// Released slots, reused before the arena grows.
    free: Vec<NodeId>,
    word_count: usize,
}

impl TrieIndex {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::EMPTY],
            free: Vec::new(),
            word_count: 0,
        }
    }

    /// Handle of the root node (the empty prefix).
    #[inline]
    pub fn root(&self) -> NodeId {
        ROOT
    }

    #[inline]
    fn node(&self, id: NodeId) -> &TrieNode {
        self.nodes.get(id.index()).unwrap_or(&EMPTY_NODE)
    }

    fn alloc(&mut self) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.index()] = TrieNode::EMPTY;
                id
            }
            None => {
                let id = NodeId(self.nodes.len() as u32);
                self.nodes.push(TrieNode::EMPTY);
                id
            }
        }
    }

    fn release(&mut self, id: NodeId) {
        debug_assert_ne!(id, ROOT, "the root is never released");
        self.nodes[id.index()] = TrieNode::EMPTY;
        self.free.push(id);
    }

    /// Insert a word, creating missing nodes along its path.
    ///
    /// Returns `Ok(true)` if the word was not stored before. Inserting a word
    /// that is already present changes nothing. The empty word marks the
    /// root terminal.
    pub fn insert(&mut self, word: &str) -> Result<bool, WordError> {
        WordError::check(word)?;

        let mut current = ROOT;
        for letter in word.chars().filter_map(Letter::from_char) {
            current = match self.node(current).child(letter) {
                Some(next) => next,
                None => {
                    let next = self.alloc();
                    self.nodes[current.index()].children[letter.index()] = Some(next);
                    next
                }
            };
        }

        let node = &mut self.nodes[current.index()];
        let added = !node.terminal;
        node.terminal = true;
        if added {
            self.word_count += 1;
            debug!("index: inserted {word:?}");
        }
        Ok(added)
    }

    /// Remove a word. Returns `false` (and changes nothing) if it is absent.
    ///
    /// Nodes on the word's path that end up with no children are released,
    /// except those that are still terminal for a shorter word.
    pub fn remove(&mut self, word: &str) -> bool {
        if word.len() > MAX_WORD_LEN {
            return false;
        }
        let Some(letters) = to_letters(word) else {
            return false;
        };
        let removed = self.remove_below(ROOT, &letters);
        if removed {
            self.word_count -= 1;
            debug!("index: removed {word:?}");
        }
        removed
    }

    fn remove_below(&mut self, node: NodeId, rest: &[Letter]) -> bool {
        let Some((&first, tail)) = rest.split_first() else {
            let end = &mut self.nodes[node.index()];
            let was_terminal = end.terminal;
            end.terminal = false;
            return was_terminal;
        };

        let Some(child) = self.node(node).child(first) else {
            return false;
        };
        let removed = self.remove_below(child, tail);

        if removed {
            let child_node = self.node(child);
            if child_node.is_leafless() && !child_node.terminal {
                self.release(child);
                self.nodes[node.index()].children[first.index()] = None;
            }
        }
        removed
    }

    /// Follow `prefix` from the root. Returns `None` as soon as a letter has
    /// no matching child.
    pub fn lookup(&self, prefix: &str) -> Option<NodeId> {
        self.lookup_with(prefix, &mut NoopMetrics)
    }

    /// [`lookup`](Self::lookup), counting one edge probe per character.
    pub fn lookup_with(&self, prefix: &str, metrics: &mut dyn Metrics) -> Option<NodeId> {
        let mut current = ROOT;
        for c in prefix.chars() {
            metrics.record(Operation::EdgeProbe);
            let letter = Letter::from_char(c)?;
            current = self.node(current).child(letter)?;
        }
        Some(current)
    }

    /// Returns `true` if `word` is stored.
    pub fn contains(&self, word: &str) -> bool {
        self.lookup(word).is_some_and(|id| self.is_terminal(id))
    }

    #[inline]
    pub fn is_terminal(&self, id: NodeId) -> bool {
        self.node(id).terminal
    }

    /// Returns `true` if the node has no children.
    #[inline]
    pub fn is_leafless(&self, id: NodeId) -> bool {
        self.node(id).is_leafless()
    }

    #[inline]
    pub fn child(&self, id: NodeId, letter: Letter) -> Option<NodeId> {
        self.node(id).child(letter)
    }

    /// Existing children of a node, in ascending letter order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (Letter, NodeId)> + '_ {
        let node = self.node(id);
        Letter::ALL
            .into_iter()
            .filter_map(move |letter| node.child(letter).map(|child| (letter, child)))
    }

    /// Number of stored words.
    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Number of live nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Release every node except the root.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(TrieNode::EMPTY);
        self.free.clear();
        self.word_count = 0;
    }

    /// All stored words in lexicographic order.
    pub fn words(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.word_count);
        let mut buf = String::new();
        self.collect_words(ROOT, &mut buf, &mut out);
        out
    }

    fn collect_words(&self, id: NodeId, buf: &mut String, out: &mut Vec<String>) {
        if self.is_terminal(id) {
            out.push(buf.clone());
        }
        for (letter, child) in self.children(id) {
            buf.push(letter.as_char());
            self.collect_words(child, buf, out);
            buf.pop();
        }
    }
}

impl Default for TrieIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TrieIndex {
    /// Build an index from words, skipping any that fail validation.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut index = TrieIndex::new();
        for word in iter {
            let _ = index.insert(word.as_ref());
        }
        index
    }
}
