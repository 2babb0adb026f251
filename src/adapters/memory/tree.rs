//! In-memory container tree

use std::collections::BTreeMap;

/// Attribute value stored on a group
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Int(i64),
    Float(f64),
    Text(String),
}

/// A member of a group
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Group(Group),
    Dataset(Vec<u8>),
}

/// A group with attributes and named members
///
/// Members are kept in name order, mirroring the alphabetical link order an
/// HDF5 group reports by default.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub attrs: BTreeMap<String, AttrValue>,
    pub members: BTreeMap<String, Node>,
}

impl Group {
    /// Create an empty group
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set an attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: AttrValue) -> Self {
        self.attrs.insert(name.into(), value);
        self
    }

    /// Builder: add a child group
    pub fn with_group(mut self, name: impl Into<String>, group: Group) -> Self {
        self.members.insert(name.into(), Node::Group(group));
        self
    }

    /// Builder: add a dataset
    pub fn with_dataset(mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.members.insert(name.into(), Node::Dataset(data.into()));
        self
    }

    /// Look up a node by slash-separated path
    pub fn get(&self, path: &str) -> Option<&Node> {
        let mut parts = path.split('/').filter(|p| !p.is_empty());
        let first = parts.next()?;
        let mut node = self.members.get(first)?;
        for part in parts {
            match node {
                Node::Group(group) => node = group.members.get(part)?,
                Node::Dataset(_) => return None,
            }
        }
        Some(node)
    }

    /// Look up a group by slash-separated path
    pub fn group(&self, path: &str) -> Option<&Group> {
        match self.get(path)? {
            Node::Group(group) => Some(group),
            Node::Dataset(_) => None,
        }
    }

    fn group_mut(&mut self, path: &str) -> Option<&mut Group> {
        let mut current = self;
        for part in path.split('/').filter(|p| !p.is_empty()) {
            match current.members.get_mut(part)? {
                Node::Group(group) => current = group,
                Node::Dataset(_) => return None,
            }
        }
        Some(current)
    }

    /// Insert a node at `path`
    ///
    /// The parent group must exist and `path` must not be taken.
    pub fn insert(&mut self, path: &str, node: Node) -> Result<(), String> {
        let path = path.trim_matches('/');
        let (parent, name) = match path.rsplit_once('/') {
            Some((parent, name)) => (parent, name),
            None => ("", path),
        };
        if name.is_empty() {
            return Err("empty member name".to_string());
        }
        let parent_group = self
            .group_mut(parent)
            .ok_or_else(|| format!("parent group '{parent}' does not exist"))?;
        if parent_group.members.contains_key(name) {
            return Err(format!("'{path}' already exists"));
        }
        parent_group.members.insert(name.to_string(), node);
        Ok(())
    }
}
