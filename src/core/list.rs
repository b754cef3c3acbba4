#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub index: usize,
    pub text: String,
}

/// Ordered list of owned `(index, text)` records.
///
/// History keeps one line per node and uses `index` as its sequence number.
/// Aliases and environment variables store `key=value` text and look nodes up
/// by their leading key, so at most one node exists per key.
#[derive(Debug, Clone, Default)]
pub struct StringList {
    nodes: Vec<Node>,
}

impl StringList {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn push_back(&mut self, text: impl Into<String>, index: usize) {
        self.nodes.push(Node {
            index,
            text: text.into(),
        });
    }

    pub fn remove_at(&mut self, position: usize) -> Option<Node> {
        if position < self.nodes.len() {
            Some(self.nodes.remove(position))
        } else {
            None
        }
    }

    pub fn position_of_key(&self, key: &str, sep: char) -> Option<usize> {
        self.nodes
            .iter()
            .position(|node| split_key(&node.text, sep).0 == key)
    }

    pub fn find_key(&self, key: &str, sep: char) -> Option<&Node> {
        self.position_of_key(key, sep).map(|pos| &self.nodes[pos])
    }

    pub fn upsert_key(&mut self, key: &str, sep: char, text: impl Into<String>) {
        let text = text.into();
        match self.position_of_key(key, sep) {
            Some(pos) => self.nodes[pos].text = text,
            None => {
                let index = self.nodes.len();
                self.push_back(text, index);
            }
        }
    }

    pub fn remove_key(&mut self, key: &str, sep: char) -> bool {
        match self.position_of_key(key, sep) {
            Some(pos) => {
                self.nodes.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn renumber(&mut self, start: usize) {
        for (offset, node) in self.nodes.iter_mut().enumerate() {
            node.index = start + offset;
        }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.nodes.iter().map(|node| node.text.as_str()).collect()
    }
}

pub fn split_key(text: &str, sep: char) -> (&str, Option<&str>) {
    match text.split_once(sep) {
        Some((key, value)) => (key, Some(value)),
        None => (text, None),
    }
}
