//! # Writer module
//!
//! The [`Writer`] opens or creates one group of an h5features file, stamps
//! or verifies its version attribute, and dispatches writes to the
//! matching codec.  A group is born at one version and keeps it: writing
//! a different version into a non-empty group is refused.

use crate::codec::{v1,v2};
use crate::error::Error;
use crate::item::Item;
use crate::version::{read_version,write_version,Version};

#[derive(Debug)]
enum Codec {
    V1(v1::Writer),
    V2(v2::Writer)
}

/// Writes items into one group of an h5features file.
#[derive(Debug)]
pub struct Writer {
    filename: String,
    groupname: String,
    version: Version,
    codec: Codec
}

impl Writer {
    /// Open `groupname` in the file at `filename` for writing.
    ///
    /// * `overwrite` truncates the file; otherwise it is opened
    ///   read-write, created if absent.
    /// * `compress` enables deflate on the datasets written.
    /// * `version` selects the on-disk layout; version 1.0 is read-only
    ///   and refused here.  A group that already holds data must have
    ///   been written at the same version.
    pub fn new(filename: &str,groupname: &str,overwrite: bool,compress: bool,version: Version) -> Result<Self,Error> {
        hdf5::silence_errors(true);
        if version == Version::V1_0 {
            return Err(Error::Unsupported("version 1.0 is read-only".to_string()));
        }
        let file = match overwrite {
            true => hdf5::File::create(filename),
            false => hdf5::File::append(filename)
        }.map_err(|e| Error::Io(e.to_string()))?;
        let group = match file.group(groupname) {
            Ok(group) => {
                if group.member_names()?.is_empty() && group.attr_names()?.is_empty() {
                    // the group exists but holds nothing, adopt it
                    write_version(&group,version)?;
                } else {
                    let stored = read_version(&group)?;
                    if stored != version {
                        return Err(Error::InvariantViolation(
                            format!("group '{}' stores version {}, requested version {}",groupname,stored,version)));
                    }
                }
                group
            },
            Err(_) => {
                let group = file.create_group(groupname)
                    .map_err(|e| Error::Io(e.to_string()))?;
                write_version(&group,version)?;
                group
            }
        };
        let codec = match version {
            Version::V2_0 => Codec::V2(v2::Writer::new(group,compress)?),
            _ => Codec::V1(v1::Writer::new(group,compress,version)?)
        };
        Ok(Self {
            filename: filename.to_string(),
            groupname: groupname.to_string(),
            version,
            codec
        })
    }
    pub fn filename(&self) -> &str {
        &self.filename
    }
    pub fn groupname(&self) -> &str {
        &self.groupname
    }
    pub fn version(&self) -> Version {
        self.version
    }
    /// Write one item into the group
    pub fn write(&mut self,item: &Item) -> Result<(),Error> {
        match &mut self.codec {
            Codec::V1(writer) => writer.write(item),
            Codec::V2(writer) => writer.write(item)
        }
    }
    /// Write a batch of items in order
    pub fn write_all<'a>(&mut self,items: impl IntoIterator<Item = &'a Item>) -> Result<(),Error> {
        for item in items {
            self.write(item)?;
        }
        Ok(())
    }
}
