//! # Codec module
//!
//! Translation between the value model and the HDF5 container, one
//! submodule per on-disk layout:
//!
//! * `v1` packs every item of a group into three growing datasets plus an
//!   index (versions 1.0 through 1.2),
//! * `v2` gives each item its own sub-group (version 2.0),
//! * `props` maps the recursive property variant onto attribute, dataset
//!   and group primitives; both layouts share it.
//!
//! The reader and writer façades pick a codec from the group's version
//! attribute and delegate every per-item operation to it.

pub(crate) mod props;
pub(crate) mod v1;
pub(crate) mod v2;

use hdf5::types::{VarLenAscii,VarLenUnicode};
use crate::error::Error;

/// Encode a string as a variable-length HDF5 string.
pub(crate) fn h5_str(s: &str) -> Result<VarLenUnicode,Error> {
    s.parse::<VarLenUnicode>()
        .map_err(|e| Error::InvalidValue(format!("cannot encode string '{}': {}",s,e)))
}

/// Read a variable-length string attribute, unicode or ascii.
pub(crate) fn read_str_attr(loc: &hdf5::Location,name: &str) -> Result<String,Error> {
    let attr = loc.attr(name)?;
    match attr.read_scalar::<VarLenUnicode>() {
        Ok(s) => Ok(s.as_str().to_string()),
        Err(_) => Ok(attr.read_scalar::<VarLenAscii>()?.as_str().to_string())
    }
}

/// Create a variable-length string attribute.
pub(crate) fn write_str_attr(loc: &hdf5::Location,name: &str,value: &str) -> Result<(),Error> {
    loc.new_attr::<VarLenUnicode>().create(name)?.write_scalar(&h5_str(value)?)?;
    Ok(())
}
