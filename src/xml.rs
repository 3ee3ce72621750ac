use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// A normalized XML subtree.
///
/// A leaf element becomes its text content; a branching element becomes a
/// map from child element name to the child's normalized value, with
/// repeated sibling names collected into a list in document order. Empty
/// leaves are dropped from their parent map rather than inserted as
/// placeholders, which means optional elements the gateway leaves blank
/// simply don't appear.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Map(HashMap<String, Value>),
    List(Vec<Value>),
}

impl Value {
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(key),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Text content of a direct child, if it exists and is a leaf.
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::text)
    }

    /// Every child under `key`, whether the element occurred once or many
    /// times. Journal reports carry one `TN` sibling per transaction.
    pub fn get_all(&self, key: &str) -> Vec<&Value> {
        match self.get(key) {
            Some(Value::List(items)) => items.iter().collect(),
            Some(value) => vec![value],
            None => Vec::new(),
        }
    }
}

/// Applies the normalization rule to one element.
pub fn normalize(node: roxmltree::Node<'_, '_>) -> Value {
    let mut map = HashMap::new();
    let mut has_children = false;
    for child in node.children().filter(|c| c.is_element()) {
        has_children = true;
        let value = normalize(child);
        if matches!(&value, Value::Text(text) if text.is_empty()) {
            continue;
        }
        match map.entry(child.tag_name().name().to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Value::List(items) => items.push(value),
                existing => {
                    let first = std::mem::replace(existing, Value::List(Vec::with_capacity(2)));
                    if let Value::List(items) = existing {
                        items.push(first);
                        items.push(value);
                    }
                }
            },
        }
    }
    if has_children {
        Value::Map(map)
    } else {
        Value::Text(node.text().unwrap_or_default().to_string())
    }
}

/// Finds the first descendant element with the given local name, ignoring
/// namespaces. The gateway qualifies result elements with its own namespace
/// while nested payloads come back unqualified, so matching on the local
/// name is the only stable option.
pub fn find_element<'a, 'input>(
    doc: &'a roxmltree::Document<'input>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    doc.descendants()
        .find(|node| node.is_element() && node.tag_name().name() == name)
}
