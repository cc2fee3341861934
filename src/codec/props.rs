//! # Property codec
//!
//! A property map occupies one HDF5 group.  Scalars become attributes,
//! homogeneous vectors become 1-D datasets, nested maps become child
//! groups, and vectors of maps become a child group holding one sub-group
//! per element named `<key>__<index>$$`.  The double-underscore /
//! double-dollar sentinel is how the reader tells a vector of maps from a
//! plain nested map, so user keys carrying the sentinel are refused.

use regex::Regex;
use hdf5::types::{VarLenAscii,VarLenUnicode,TypeDescriptor,IntSize,FloatSize};
use crate::error::Error;
use crate::properties::{Properties,Value};
use super::h5_str;

const SENTINEL_PATT: &str = r"^(.*)__(\d+)\$\$$";

/// Write a property map into `group`, which must have no child objects.
pub(crate) fn write_properties(props: &Properties,group: &hdf5::Group,compress: bool) -> Result<(),Error> {
    if !group.member_names()?.is_empty() {
        return Err(Error::InvariantViolation(format!("group {} is not empty",group.name())));
    }
    let reserved = Regex::new(SENTINEL_PATT).expect("unreachable");
    for (name,value) in props.iter() {
        if reserved.is_match(name) {
            return Err(Error::InvalidValue(format!("property name '{}' is reserved",name)));
        }
        write_value(name,value,group,compress)?;
    }
    Ok(())
}

fn write_value(name: &str,value: &Value,group: &hdf5::Group,compress: bool) -> Result<(),Error> {
    match value {
        Value::Bool(b) => {
            // booleans are stored as 8 bit integers
            group.new_attr::<i8>().create(name)?.write_scalar(&(*b as i8))?;
        },
        Value::Int(i) => {
            group.new_attr::<i32>().create(name)?.write_scalar(i)?;
        },
        Value::Float(x) => {
            group.new_attr::<f64>().create(name)?.write_scalar(x)?;
        },
        Value::Str(s) => {
            group.new_attr::<VarLenUnicode>().create(name)?.write_scalar(&h5_str(s)?)?;
        },
        Value::IntVec(v) => write_vector(name,v,group,compress)?,
        Value::FloatVec(v) => write_vector(name,v,group,compress)?,
        Value::StrVec(v) => {
            let encoded = v.iter().map(|s| h5_str(s)).collect::<Result<Vec<_>,Error>>()?;
            write_vector(name,&encoded,group,compress)?;
        },
        Value::Props(sub) => {
            let child = group.create_group(name)?;
            write_properties(sub,&child,compress)?;
        },
        Value::PropsVec(subs) => {
            let child = group.create_group(name)?;
            for (i,sub) in subs.iter().enumerate() {
                let elem = child.create_group(&format!("{}__{}$$",name,i))?;
                write_properties(sub,&elem,compress)?;
            }
        }
    }
    Ok(())
}

fn write_vector<T: hdf5::H5Type>(name: &str,data: &[T],group: &hdf5::Group,compress: bool) -> Result<(),Error> {
    let builder = group.new_dataset::<T>();
    let builder = match compress && !data.is_empty() {
        true => builder.chunk(data.len()).deflate(9),
        false => builder
    };
    let dataset = builder.shape(data.len()).create(name)?;
    dataset.write(data)?;
    Ok(())
}

/// Read a property map back from `group`.  An empty group yields an empty
/// map.  Shapes matching no documented encoding are refused.
pub(crate) fn read_properties(group: &hdf5::Group) -> Result<Properties,Error> {
    let mut props = Properties::new();
    for name in group.attr_names()? {
        let value = read_scalar(&group.attr(&name)?)?;
        props.set(&name,value)?;
    }
    let sentinel = Regex::new(SENTINEL_PATT).expect("unreachable");
    for name in group.member_names()? {
        if let Ok(dataset) = group.dataset(&name) {
            props.set(&name,read_vector(&dataset)?)?;
        } else if let Ok(sub) = group.group(&name) {
            props.set(&name,read_group_value(&sub,&name,&sentinel)?)?;
        } else {
            return Err(Error::CorruptData(format!("property '{}' is neither a dataset nor a group",name)));
        }
    }
    Ok(props)
}

/// A child group is a vector of maps when every one of its children is
/// named `<key>__<index>$$`; otherwise it is a nested map.
fn read_group_value(sub: &hdf5::Group,name: &str,sentinel: &Regex) -> Result<Value,Error> {
    let children = sub.member_names()?;
    let mut elements: Vec<(usize,String)> = Vec::new();
    let mut is_vector = !children.is_empty();
    for child in &children {
        match sentinel.captures(child) {
            Some(caps) if &caps[1] == name => {
                let index = caps[2].parse::<usize>()
                    .map_err(|_| Error::CorruptData(format!("bad element index in '{}'",child)))?;
                elements.push((index,child.clone()));
            },
            _ => {
                is_vector = false;
                break;
            }
        }
    }
    match is_vector {
        true => {
            elements.sort_by_key(|e| e.0);
            let mut maps = Vec::with_capacity(elements.len());
            for (_,child) in elements {
                maps.push(read_properties(&sub.group(&child)?)?);
            }
            Ok(Value::PropsVec(maps))
        },
        false => Ok(Value::Props(read_properties(sub)?))
    }
}

fn read_scalar(attr: &hdf5::Attribute) -> Result<Value,Error> {
    match attr.dtype()?.to_descriptor()? {
        TypeDescriptor::Boolean => Ok(Value::Bool(attr.read_scalar::<bool>()?)),
        TypeDescriptor::Integer(IntSize::U1) => Ok(Value::Bool(attr.read_scalar::<i8>()? != 0)),
        TypeDescriptor::Unsigned(IntSize::U1) => Ok(Value::Bool(attr.read_scalar::<u8>()? != 0)),
        TypeDescriptor::Integer(IntSize::U2) => Ok(Value::Int(attr.read_scalar::<i16>()? as i32)),
        TypeDescriptor::Integer(IntSize::U4) => Ok(Value::Int(attr.read_scalar::<i32>()?)),
        TypeDescriptor::Integer(IntSize::U8) => Ok(Value::Int(attr.read_scalar::<i64>()? as i32)),
        TypeDescriptor::Unsigned(IntSize::U2) => Ok(Value::Int(attr.read_scalar::<u16>()? as i32)),
        TypeDescriptor::Unsigned(IntSize::U4) => Ok(Value::Int(attr.read_scalar::<u32>()? as i32)),
        TypeDescriptor::Unsigned(IntSize::U8) => Ok(Value::Int(attr.read_scalar::<u64>()? as i32)),
        TypeDescriptor::Float(FloatSize::U4) => Ok(Value::Float(attr.read_scalar::<f32>()? as f64)),
        TypeDescriptor::Float(FloatSize::U8) => Ok(Value::Float(attr.read_scalar::<f64>()?)),
        TypeDescriptor::VarLenUnicode => Ok(Value::Str(attr.read_scalar::<VarLenUnicode>()?.as_str().to_string())),
        TypeDescriptor::VarLenAscii => Ok(Value::Str(attr.read_scalar::<VarLenAscii>()?.as_str().to_string())),
        _ => Err(Error::CorruptData(format!("property attribute '{}' has an unsupported type",attr.name())))
    }
}

fn read_vector(dataset: &hdf5::Dataset) -> Result<Value,Error> {
    if dataset.ndim() != 1 {
        return Err(Error::CorruptData(format!("property dataset '{}' is not a vector",dataset.name())));
    }
    match dataset.dtype()?.to_descriptor()? {
        TypeDescriptor::Integer(IntSize::U1) => Ok(Value::IntVec(
            dataset.read_raw::<i8>()?.iter().map(|i| *i as i32).collect())),
        TypeDescriptor::Integer(IntSize::U2) => Ok(Value::IntVec(
            dataset.read_raw::<i16>()?.iter().map(|i| *i as i32).collect())),
        TypeDescriptor::Integer(IntSize::U4) => Ok(Value::IntVec(dataset.read_raw::<i32>()?)),
        TypeDescriptor::Integer(IntSize::U8) => Ok(Value::IntVec(
            dataset.read_raw::<i64>()?.iter().map(|i| *i as i32).collect())),
        TypeDescriptor::Unsigned(IntSize::U1) => Ok(Value::IntVec(
            dataset.read_raw::<u8>()?.iter().map(|i| *i as i32).collect())),
        TypeDescriptor::Unsigned(IntSize::U2) => Ok(Value::IntVec(
            dataset.read_raw::<u16>()?.iter().map(|i| *i as i32).collect())),
        TypeDescriptor::Unsigned(IntSize::U4) => Ok(Value::IntVec(
            dataset.read_raw::<u32>()?.iter().map(|i| *i as i32).collect())),
        TypeDescriptor::Unsigned(IntSize::U8) => Ok(Value::IntVec(
            dataset.read_raw::<u64>()?.iter().map(|i| *i as i32).collect())),
        TypeDescriptor::Float(FloatSize::U4) => Ok(Value::FloatVec(
            dataset.read_raw::<f32>()?.iter().map(|x| *x as f64).collect())),
        TypeDescriptor::Float(FloatSize::U8) => Ok(Value::FloatVec(dataset.read_raw::<f64>()?)),
        TypeDescriptor::VarLenUnicode => Ok(Value::StrVec(
            dataset.read_raw::<VarLenUnicode>()?.iter().map(|s| s.as_str().to_string()).collect())),
        TypeDescriptor::VarLenAscii => Ok(Value::StrVec(
            dataset.read_raw::<VarLenAscii>()?.iter().map(|s| s.as_str().to_string()).collect())),
        _ => Err(Error::CorruptData(format!("property dataset '{}' has an unsupported type",dataset.name())))
    }
}

#[test]
fn test_sentinel_matching() {
    let sentinel = Regex::new(SENTINEL_PATT).expect("unreachable");
    let caps = sentinel.captures("stats__12$$").expect("matches");
    assert_eq!(&caps[1],"stats");
    assert_eq!(&caps[2],"12");
    assert!(!sentinel.is_match("stats__12$"));
    assert!(!sentinel.is_match("stats__x$$"));
    assert!(!sentinel.is_match("plain"));
}
