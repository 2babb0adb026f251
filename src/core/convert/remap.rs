//! Structural remapping from the multi-read to the single-read layout
//!
//! Each top-level member of a read group is classified by name and placed
//! in the single-read file according to its kind:
//!
//! | Member                                       | Destination                  |
//! |----------------------------------------------|------------------------------|
//! | `Raw`                                        | `Raw/Reads/Read_<read_number>` |
//! | `channel_id`, `context_tags`, `tracking_id`  | `UniqueGlobalKey/<name>`     |
//! | anything else                                | `<name>`                     |
//!
//! Remapping is split into planning ([`plan_read`]), which only reads from
//! the source, and applying ([`apply_plan`]), which writes the output. A read
//! that cannot be planned never causes an output file to be created.

use crate::adapters::{ReadHandle, SingleReadSink};
use crate::domain::{ContainerError, Fast5Error, ReadId, Result};

/// Raw signal group of a read
pub const RAW_GROUP: &str = "Raw";

/// Attribute of [`RAW_GROUP`] holding the read number
pub const READ_NUMBER_ATTR: &str = "read_number";

/// Shared parent of the global-key groups in a single-read file
pub const GLOBAL_KEY_GROUP: &str = "UniqueGlobalKey";

/// Per-run metadata groups relocated under [`GLOBAL_KEY_GROUP`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalKeyField {
    ChannelId,
    ContextTags,
    TrackingId,
}

impl GlobalKeyField {
    /// All global-key fields
    pub const ALL: [GlobalKeyField; 3] = [
        GlobalKeyField::ChannelId,
        GlobalKeyField::ContextTags,
        GlobalKeyField::TrackingId,
    ];

    /// Group name of this field
    pub fn as_str(self) -> &'static str {
        match self {
            GlobalKeyField::ChannelId => "channel_id",
            GlobalKeyField::ContextTags => "context_tags",
            GlobalKeyField::TrackingId => "tracking_id",
        }
    }

    /// Match a group name against the global-key fields
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

/// Kind of a top-level read member
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupKind {
    /// The `Raw` signal group
    Raw,
    /// One of the per-run metadata groups
    GlobalKey(GlobalKeyField),
    /// Any other member, copied as-is
    Verbatim(String),
}

impl GroupKind {
    /// Classify a top-level member by name
    pub fn classify(name: &str) -> Self {
        if name == RAW_GROUP {
            return GroupKind::Raw;
        }
        match GlobalKeyField::from_name(name) {
            Some(field) => GroupKind::GlobalKey(field),
            None => GroupKind::Verbatim(name.to_string()),
        }
    }
}

/// Where one source member goes in the single-read file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Top-level member name in the read group
    pub member: String,
    /// Slash-separated destination path in the output file
    pub destination: String,
}

impl Placement {
    /// Parent group of the destination, if not the root
    pub fn parent(&self) -> Option<&str> {
        self.destination.rsplit_once('/').map(|(parent, _)| parent)
    }
}

/// Ordered placements for every member of one read
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemapPlan {
    placements: Vec<Placement>,
}

impl RemapPlan {
    /// Placements in source member order
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Destination of a source member, if planned
    pub fn destination_of(&self, member: &str) -> Option<&str> {
        self.placements
            .iter()
            .find(|p| p.member == member)
            .map(|p| p.destination.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Destination path of the raw group for a given read number
pub fn raw_destination(read_number: i64) -> String {
    format!("{RAW_GROUP}/Reads/Read_{read_number}")
}

/// Plan the single-read layout of one read
///
/// # Errors
///
/// Returns [`Fast5Error::Remap`] if the read's members cannot be listed or if
/// its `Raw` group has no integer `read_number` attribute.
pub fn plan_read<R: ReadHandle>(read_id: &ReadId, read: &R) -> Result<RemapPlan> {
    let remap_error = |e: ContainerError| Fast5Error::Remap {
        read_id: read_id.to_string(),
        reason: e.to_string(),
    };

    let mut placements = Vec::new();
    for member in read.member_names().map_err(remap_error)? {
        let destination = match GroupKind::classify(&member) {
            GroupKind::Raw => {
                let read_number = read
                    .int_attr(RAW_GROUP, READ_NUMBER_ATTR)
                    .map_err(remap_error)?;
                raw_destination(read_number)
            }
            GroupKind::GlobalKey(field) => format!("{GLOBAL_KEY_GROUP}/{}", field.as_str()),
            GroupKind::Verbatim(name) => name,
        };
        placements.push(Placement {
            member,
            destination,
        });
    }

    tracing::trace!(
        read_id = %read_id,
        members = placements.len(),
        "Planned single-read layout"
    );

    Ok(RemapPlan { placements })
}

/// Write every placement of `plan` into `sink`
///
/// Parent groups are created on demand; creating a parent that already exists
/// (e.g. `UniqueGlobalKey` for the second metadata group) is a no-op.
pub fn apply_plan<S: SingleReadSink>(
    plan: &RemapPlan,
    read: &S::Read,
    sink: &mut S,
) -> std::result::Result<(), ContainerError> {
    for placement in plan.placements() {
        if let Some(parent) = placement.parent() {
            sink.ensure_group(parent)?;
        }
        sink.copy_member(read, &placement.member, &placement.destination)?;
    }
    Ok(())
}
