//! HDF5 implementation of the container traits

use crate::adapters::container::{
    Fast5Backend, MultiReadSource, ReadHandle, SingleReadSink, FILE_VERSION_ATTR,
    READ_GROUP_PREFIX, SINGLE_READ_FILE_VERSION,
};
use crate::domain::ContainerError;
use hdf5::types::TypeDescriptor;
use hdf5::{File, Group};
use std::ffi::CString;
use std::path::{Path, PathBuf};

/// Backend reading and writing fast5 files through libhdf5
#[derive(Debug, Clone, Copy, Default)]
pub struct Hdf5Backend;

impl Hdf5Backend {
    /// Create the backend
    pub fn new() -> Self {
        Self
    }
}

impl Fast5Backend for Hdf5Backend {
    type Read = Hdf5Read;
    type Source = Hdf5Source;
    type Sink = Hdf5Sink;

    fn open_multi(&self, path: &Path) -> Result<Hdf5Source, ContainerError> {
        let file = File::open(path).map_err(|e| ContainerError::Unreadable(e.to_string()))?;
        Ok(Hdf5Source { file })
    }

    fn create_single(&self, path: &Path) -> Result<Hdf5Sink, ContainerError> {
        let file = File::create(path).map_err(|e| ContainerError::CreateFailed(e.to_string()))?;
        let version = file
            .new_attr::<f64>()
            .shape(())
            .create(FILE_VERSION_ATTR)
            .and_then(|attr| attr.write_scalar(&SINGLE_READ_FILE_VERSION));
        if let Err(e) = version {
            drop(file);
            let _ = std::fs::remove_file(path);
            return Err(ContainerError::CreateFailed(e.to_string()));
        }
        Ok(Hdf5Sink {
            file,
            path: path.to_path_buf(),
        })
    }
}

/// Opened multi-read fast5 file
#[derive(Debug)]
pub struct Hdf5Source {
    file: File,
}

impl MultiReadSource for Hdf5Source {
    type Read = Hdf5Read;

    fn read_ids(&self) -> Result<Vec<String>, ContainerError> {
        let names = self
            .file
            .member_names()
            .map_err(|e| ContainerError::Library(e.to_string()))?;
        Ok(names
            .iter()
            .filter_map(|name| name.strip_prefix(READ_GROUP_PREFIX))
            .map(str::to_string)
            .collect())
    }

    fn read(&self, read_id: &str) -> Result<Option<Hdf5Read>, ContainerError> {
        let name = format!("{READ_GROUP_PREFIX}{read_id}");
        if !self.file.link_exists(&name) {
            return Ok(None);
        }
        let group = self
            .file
            .group(&name)
            .map_err(|e| ContainerError::Library(e.to_string()))?;
        Ok(Some(Hdf5Read { group }))
    }
}

/// One `read_<id>` group of a multi-read file
#[derive(Debug, Clone)]
pub struct Hdf5Read {
    group: Group,
}

impl ReadHandle for Hdf5Read {
    fn member_names(&self) -> Result<Vec<String>, ContainerError> {
        self.group
            .member_names()
            .map_err(|e| ContainerError::Library(e.to_string()))
    }

    fn int_attr(&self, member: &str, attribute: &str) -> Result<i64, ContainerError> {
        let not_found = || ContainerError::AttributeNotFound {
            member: member.to_string(),
            attribute: attribute.to_string(),
        };
        let wrong_type = || ContainerError::AttributeType {
            member: member.to_string(),
            attribute: attribute.to_string(),
        };

        if !self.group.link_exists(member) {
            return Err(ContainerError::MemberNotFound(member.to_string()));
        }
        let target = self
            .group
            .group(member)
            .map_err(|e| ContainerError::Library(e.to_string()))?;
        let names = target
            .attr_names()
            .map_err(|e| ContainerError::Library(e.to_string()))?;
        if !names.iter().any(|n| n == attribute) {
            return Err(not_found());
        }

        let attr = target.attr(attribute).map_err(|_| not_found())?;
        let descriptor = attr
            .dtype()
            .and_then(|dtype| dtype.to_descriptor())
            .map_err(|e| ContainerError::Library(e.to_string()))?;
        match descriptor {
            TypeDescriptor::Integer(_) | TypeDescriptor::Unsigned(_) => {
                attr.read_scalar::<i64>().map_err(|_| wrong_type())
            }
            _ => Err(wrong_type()),
        }
    }
}

/// Single-read fast5 file being written
///
/// The underlying HDF5 handle is closed when the sink is dropped.
#[derive(Debug)]
pub struct Hdf5Sink {
    file: File,
    path: PathBuf,
}

impl SingleReadSink for Hdf5Sink {
    type Read = Hdf5Read;

    fn contains(&self, path: &str) -> bool {
        self.file.link_exists(path)
    }

    fn create_group(&mut self, path: &str) -> Result<(), ContainerError> {
        self.file
            .create_group(path)
            .map(|_| ())
            .map_err(|e| ContainerError::GroupCreation {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }

    fn copy_member(
        &mut self,
        read: &Hdf5Read,
        member: &str,
        destination: &str,
    ) -> Result<(), ContainerError> {
        let copy_failed = |reason: String| ContainerError::CopyFailed {
            from: member.to_string(),
            to: destination.to_string(),
            reason,
        };
        let src_name = CString::new(member).map_err(|e| copy_failed(e.to_string()))?;
        let dst_name = CString::new(destination).map_err(|e| copy_failed(e.to_string()))?;

        // The raw call must hold the library lock like every safe hdf5 call.
        // SAFETY: both ids are live handles owned by `read` and `self`, and the
        // names are NUL-terminated strings that outlive the call.
        let status = hdf5::sync::sync(|| unsafe {
            hdf5_sys::h5o::H5Ocopy(
                read.group.id(),
                src_name.as_ptr(),
                self.file.id(),
                dst_name.as_ptr(),
                hdf5_sys::h5p::H5P_DEFAULT,
                hdf5_sys::h5p::H5P_DEFAULT,
            )
        });
        if status < 0 {
            return Err(copy_failed(format!(
                "H5Ocopy returned {status} while writing {}",
                self.path.display()
            )));
        }
        Ok(())
    }

    fn close(self) -> Result<(), ContainerError> {
        self.file.flush().map_err(|e| ContainerError::Library(e.to_string()))
    }
}
