//! # Reader module
//!
//! The [`Reader`] opens one group of an h5features file, detects its
//! version, and dispatches every operation to the matching codec.  The
//! version set is closed, so the dispatch is a tagged enum rather than a
//! trait object.

use crate::codec::{v1,v2};
use crate::error::Error;
use crate::item::Item;
use crate::version::{read_version,Version};

enum Codec {
    V1(v1::Reader),
    V2(v2::Reader)
}

/// Reads items from one group of an h5features file.
pub struct Reader {
    filename: String,
    groupname: String,
    version: Version,
    codec: Codec
}

impl Reader {
    /// Open `groupname` in the file at `filename` read-only.
    pub fn new(filename: &str,groupname: &str) -> Result<Self,Error> {
        hdf5::silence_errors(true);
        let file = hdf5::File::open(filename)
            .map_err(|e| Error::Io(e.to_string()))?;
        let group = file.group(groupname)
            .map_err(|_| Error::NotFound(format!("group '{}' does not exist in {}",groupname,filename)))?;
        let version = read_version(&group)?;
        let codec = match version {
            Version::V2_0 => Codec::V2(v2::Reader::new(group)),
            _ => Codec::V1(v1::Reader::new(group,version)?)
        };
        Ok(Self {
            filename: filename.to_string(),
            groupname: groupname.to_string(),
            version,
            codec
        })
    }
    /// The top-level group names of the file at `filename`.
    pub fn list_groups(filename: &str) -> Result<Vec<String>,Error> {
        hdf5::silence_errors(true);
        let file = hdf5::File::open(filename)
            .map_err(|e| Error::Io(e.to_string()))?;
        let mut ans = Vec::new();
        for name in file.member_names()? {
            if file.group(&name).is_ok() {
                ans.push(name);
            }
        }
        Ok(ans)
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
    /// The item names stored in the group
    pub fn items(&self) -> Result<Vec<String>,Error> {
        match &self.codec {
            Codec::V1(reader) => Ok(reader.items()),
            Codec::V2(reader) => reader.items()
        }
    }
    /// Read one item in full
    pub fn read_item(&self,name: &str,ignore_properties: bool) -> Result<Item,Error> {
        match &self.codec {
            Codec::V1(reader) => reader.read_item(name,ignore_properties),
            Codec::V2(reader) => reader.read_item(name,ignore_properties)
        }
    }
    /// Read the frames of one item whose timestamps fall in `[start, stop]`
    pub fn read_item_partial(&self,name: &str,start: f64,stop: f64,ignore_properties: bool) -> Result<Item,Error> {
        match &self.codec {
            Codec::V1(reader) => reader.read_item_partial(name,start,stop,ignore_properties),
            Codec::V2(reader) => reader.read_item_partial(name,start,stop,ignore_properties)
        }
    }
    /// Read every item of the group, in `items()` order
    pub fn read_all(&self,ignore_properties: bool) -> Result<Vec<Item>,Error> {
        let mut ans = Vec::new();
        for name in self.items()? {
            ans.push(self.read_item(&name,ignore_properties)?);
        }
        Ok(ans)
    }
}
