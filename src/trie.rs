use std::collections::HashMap;
use tracing::trace;

/// A directory or file in the token-count tree.
#[derive(Debug, Default)]
pub struct TrieNode {
    pub children: HashMap<String, TrieNode>,
    pub token_count: Option<usize>,
}

impl TrieNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_file(&self) -> bool {
        self.token_count.is_some()
    }

    /// Sum of token counts in this subtree.
    pub fn total_tokens(&self) -> usize {
        self.token_count.unwrap_or(0)
            + self
                .children
                .values()
                .map(TrieNode::total_tokens)
                .sum::<usize>()
    }
}

/// Token counts arranged by path component.
#[derive(Debug, Default)]
pub struct Trie {
    root: TrieNode,
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a forward-slash relative path. Re-inserting a path overwrites its count.
    pub fn insert(&mut self, path: &str, token_count: usize) {
        let mut current_node = &mut self.root;
        for component in path.split('/').filter(|c| !c.is_empty()) {
            current_node = current_node
                .children
                .entry(component.to_owned())
                .or_default();
        }
        if current_node.token_count.is_some() {
            trace!("Overwriting existing token count for path: {}", path);
        }
        current_node.token_count = Some(token_count);
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }
}
