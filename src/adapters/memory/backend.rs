//! In-memory implementation of the container traits

use super::tree::{AttrValue, Group, Node};
use crate::adapters::container::{
    Fast5Backend, MultiReadSource, ReadHandle, SingleReadSink, FILE_VERSION_ATTR,
    READ_GROUP_PREFIX, SINGLE_READ_FILE_VERSION,
};
use crate::domain::ContainerError;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Debug, Default)]
struct Store {
    files: BTreeMap<PathBuf, Group>,
    failing_members: BTreeSet<String>,
    failing_creates: BTreeSet<String>,
}

/// Backend holding containers in process memory
///
/// Cloning the backend shares the underlying store.
///
/// Opening a path that is not registered fails: if the path exists on disk it
/// is reported as an invalid container, otherwise as missing. Creating a
/// single-read file requires its parent directory to exist on disk, so the
/// caller's directory handling is exercised for real.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    store: Rc<RefCell<Store>>,
}

impl MemoryBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a container under `path`
    pub fn insert_file(&self, path: impl Into<PathBuf>, root: Group) {
        self.store.borrow_mut().files.insert(path.into(), root);
    }

    /// Register a multi-read container holding the given `(read_id, group)` pairs
    pub fn insert_multi_read<'a>(
        &self,
        path: impl Into<PathBuf>,
        reads: impl IntoIterator<Item = (&'a str, Group)>,
    ) {
        let mut root = Group::new();
        for (read_id, group) in reads {
            root = root.with_group(format!("{READ_GROUP_PREFIX}{read_id}"), group);
        }
        self.insert_file(path, root);
    }

    /// Make every copy of a member with this name fail
    pub fn fail_copies_of(&self, member: impl Into<String>) {
        self.store.borrow_mut().failing_members.insert(member.into());
    }

    /// Make creating a container with this file name fail
    ///
    /// The failure happens after an empty file has been written at the path,
    /// like a library that fails while initialising a file it just created.
    pub fn fail_creates_of(&self, file_name: impl Into<String>) {
        self.store.borrow_mut().failing_creates.insert(file_name.into());
    }

    /// Snapshot of the container registered under `path`
    pub fn file(&self, path: impl AsRef<Path>) -> Option<Group> {
        self.store.borrow().files.get(path.as_ref()).cloned()
    }

    /// Paths of every registered container under `dir`
    pub fn files_under(&self, dir: impl AsRef<Path>) -> Vec<PathBuf> {
        let dir = dir.as_ref();
        self.store
            .borrow()
            .files
            .keys()
            .filter(|p| p.starts_with(dir))
            .cloned()
            .collect()
    }
}

impl Fast5Backend for MemoryBackend {
    type Read = MemoryRead;
    type Source = MemorySource;
    type Sink = MemorySink;

    fn open_multi(&self, path: &Path) -> Result<MemorySource, ContainerError> {
        match self.store.borrow().files.get(path) {
            Some(root) => Ok(MemorySource { root: root.clone() }),
            None if path.exists() => Err(ContainerError::Unreadable(format!(
                "{} is not a valid container",
                path.display()
            ))),
            None => Err(ContainerError::Unreadable(format!(
                "{} does not exist",
                path.display()
            ))),
        }
    }

    fn create_single(&self, path: &Path) -> Result<MemorySink, ContainerError> {
        let parent_exists = path.parent().map_or(true, |p| p.as_os_str().is_empty() || p.is_dir());
        if !parent_exists {
            return Err(ContainerError::CreateFailed(format!(
                "directory of {} does not exist",
                path.display()
            )));
        }
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.store.borrow().failing_creates.contains(&file_name) {
            std::fs::write(path, b"").map_err(|e| ContainerError::CreateFailed(e.to_string()))?;
            return Err(ContainerError::CreateFailed("injected failure".to_string()));
        }
        let root = Group::new().with_attr(
            FILE_VERSION_ATTR,
            AttrValue::Float(SINGLE_READ_FILE_VERSION),
        );
        Ok(MemorySink {
            path: path.to_path_buf(),
            root,
            store: Rc::clone(&self.store),
        })
    }
}

/// Opened in-memory multi-read container
#[derive(Debug)]
pub struct MemorySource {
    root: Group,
}

impl MultiReadSource for MemorySource {
    type Read = MemoryRead;

    fn read_ids(&self) -> Result<Vec<String>, ContainerError> {
        Ok(self
            .root
            .members
            .iter()
            .filter(|(_, node)| matches!(node, Node::Group(_)))
            .filter_map(|(name, _)| name.strip_prefix(READ_GROUP_PREFIX))
            .map(str::to_string)
            .collect())
    }

    fn read(&self, read_id: &str) -> Result<Option<MemoryRead>, ContainerError> {
        let name = format!("{READ_GROUP_PREFIX}{read_id}");
        Ok(self.root.group(&name).map(|group| MemoryRead {
            group: group.clone(),
        }))
    }
}

/// One read of an in-memory container
#[derive(Debug, Clone)]
pub struct MemoryRead {
    group: Group,
}

impl ReadHandle for MemoryRead {
    fn member_names(&self) -> Result<Vec<String>, ContainerError> {
        Ok(self.group.members.keys().cloned().collect())
    }

    fn int_attr(&self, member: &str, attribute: &str) -> Result<i64, ContainerError> {
        let group = self
            .group
            .group(member)
            .ok_or_else(|| ContainerError::MemberNotFound(member.to_string()))?;
        match group.attrs.get(attribute) {
            Some(AttrValue::Int(value)) => Ok(*value),
            Some(_) => Err(ContainerError::AttributeType {
                member: member.to_string(),
                attribute: attribute.to_string(),
            }),
            None => Err(ContainerError::AttributeNotFound {
                member: member.to_string(),
                attribute: attribute.to_string(),
            }),
        }
    }
}

/// In-memory single-read container being written
///
/// Committed to the backend's store on [`SingleReadSink::close`].
#[derive(Debug)]
pub struct MemorySink {
    path: PathBuf,
    root: Group,
    store: Rc<RefCell<Store>>,
}

impl SingleReadSink for MemorySink {
    type Read = MemoryRead;

    fn contains(&self, path: &str) -> bool {
        self.root.get(path).is_some()
    }

    fn create_group(&mut self, path: &str) -> Result<(), ContainerError> {
        self.root
            .insert(path, Node::Group(Group::new()))
            .map_err(|reason| ContainerError::GroupCreation {
                path: path.to_string(),
                reason,
            })
    }

    fn copy_member(
        &mut self,
        read: &MemoryRead,
        member: &str,
        destination: &str,
    ) -> Result<(), ContainerError> {
        let copy_failed = |reason: String| ContainerError::CopyFailed {
            from: member.to_string(),
            to: destination.to_string(),
            reason,
        };
        if self.store.borrow().failing_members.contains(member) {
            return Err(copy_failed("injected failure".to_string()));
        }
        let node = read
            .group
            .members
            .get(member)
            .cloned()
            .ok_or_else(|| ContainerError::MemberNotFound(member.to_string()))?;
        self.root.insert(destination, node).map_err(copy_failed)
    }

    fn close(self) -> Result<(), ContainerError> {
        self.store.borrow_mut().files.insert(self.path, self.root);
        Ok(())
    }
}
