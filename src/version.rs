//! # Version module
//!
//! Each h5features group carries a string attribute `version` naming the
//! on-disk layout it was born at.  A group is never migrated: it keeps its
//! version for life.  [`read_version`] and [`write_version`] translate
//! between the attribute and the [`Version`] symbol set.

use std::fmt;
use std::str::FromStr;
use hdf5::types::VarLenUnicode;
use crate::error::Error;

/// Enumerates the supported on-disk format versions.
/// Version 1.0 is read-only.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum Version {
    V1_0,
    V1_1,
    V1_2,
    V2_0
}

impl Version {
    /// The most recent layout, the natural choice for new groups
    pub const CURRENT: Version = Version::V2_0;

    /// The on-disk attribute string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1_0 => "1.0",
            Self::V1_1 => "1.1",
            Self::V1_2 => "1.2",
            Self::V2_0 => "2.0"
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self,f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,"{}",self.as_str())
    }
}

impl FromStr for Version {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self,Self::Err> {
        match s {
            "1.0" => Ok(Self::V1_0),
            "1.1" => Ok(Self::V1_1),
            "1.2" => Ok(Self::V1_2),
            "2.0" => Ok(Self::V2_0),
            _ => Err(Error::InvariantViolation(format!("invalid h5features version '{}'",s)))
        }
    }
}

/// Read the `version` attribute of a group.
/// A missing attribute or an unrecognized string is an error.
pub fn read_version(group: &hdf5::Group) -> Result<Version,Error> {
    let attr = group.attr("version")
        .map_err(|_| Error::InvariantViolation("failed to read h5features version".to_string()))?;
    let version = attr.read_scalar::<VarLenUnicode>()
        .map_err(|_| Error::InvariantViolation("failed to read h5features version".to_string()))?;
    version.as_str().parse()
}

/// Create or overwrite the `version` attribute of a group.
pub fn write_version(group: &hdf5::Group,version: Version) -> Result<(),Error> {
    let value = crate::codec::h5_str(version.as_str())?;
    match group.attr("version") {
        Ok(attr) => attr.write_scalar(&value)?,
        Err(_) => group.new_attr::<VarLenUnicode>().create("version")?.write_scalar(&value)?
    };
    Ok(())
}

#[test]
fn test_version_strings() {
    assert_eq!(Version::V1_2.as_str(),"1.2");
    assert_eq!("2.0".parse::<Version>().expect("known version"),Version::V2_0);
    assert!("0.1".parse::<Version>().is_err());
    assert_eq!(format!("{}",Version::V1_0),"1.0");
}
