//! # Properties module
//!
//! Properties are a set of `(name, value)` pairs attached to an item, used
//! to store attributes such as generation parameters.  A [`Value`] is a
//! scalar, a homogeneous vector, a nested [`Properties`] map, or a vector
//! of nested maps; the last two make the type recursive.
//!
//! Equality is structural, including through nested maps.  Key ordering is
//! not part of the model, only the set of names is.

use std::collections::BTreeMap;
use crate::error::Error;

/// The value of a single property.
///
/// The vector-of-maps arm is distinct from the scalar vectors: the on-disk
/// codec disambiguates by this tag, never by inspecting element types.
#[derive(Clone,Debug,PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Float(f64),
    Str(String),
    IntVec(Vec<i32>),
    FloatVec(Vec<f64>),
    StrVec(Vec<String>),
    Props(Properties),
    PropsVec(Vec<Properties>)
}

impl From<bool> for Value {
    fn from(v: bool) -> Self { Self::Bool(v) }
}
impl From<i32> for Value {
    fn from(v: i32) -> Self { Self::Int(v) }
}
impl From<f64> for Value {
    fn from(v: f64) -> Self { Self::Float(v) }
}
impl From<&str> for Value {
    fn from(v: &str) -> Self { Self::Str(v.to_string()) }
}
impl From<String> for Value {
    fn from(v: String) -> Self { Self::Str(v) }
}
impl From<Vec<i32>> for Value {
    fn from(v: Vec<i32>) -> Self { Self::IntVec(v) }
}
impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self { Self::FloatVec(v) }
}
impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self { Self::StrVec(v) }
}
impl From<Properties> for Value {
    fn from(v: Properties) -> Self { Self::Props(v) }
}
impl From<Vec<Properties>> for Value {
    fn from(v: Vec<Properties>) -> Self { Self::PropsVec(v) }
}

/// A mapping from names to property values, possibly recursive.
#[derive(Clone,Debug,Default,PartialEq)]
pub struct Properties {
    props: BTreeMap<String,Value>
}

impl Properties {
    /// An empty property map
    pub fn new() -> Self {
        Self::default()
    }
    /// Add or replace the `(name, value)` pair.  The name must not be empty.
    pub fn set<T: Into<Value>>(&mut self,name: &str,value: T) -> Result<(),Error> {
        if name.is_empty() {
            return Err(Error::InvalidValue("property name must not be empty".to_string()));
        }
        self.props.insert(name.to_string(),value.into());
        Ok(())
    }
    pub fn get(&self,name: &str) -> Option<&Value> {
        self.props.get(name)
    }
    pub fn contains(&self,name: &str) -> bool {
        self.props.contains_key(name)
    }
    /// Delete the given name from the properties if present
    pub fn remove(&mut self,name: &str) -> Option<Value> {
        self.props.remove(name)
    }
    /// The names of the stored properties
    pub fn names(&self) -> Vec<String> {
        self.props.keys().cloned().collect()
    }
    /// Number of `(name, value)` pairs stored
    pub fn len(&self) -> usize {
        self.props.len()
    }
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&String,&Value)> {
        self.props.iter()
    }
}

#[test]
fn test_properties_basic() {
    let mut props = Properties::new();
    props.set("flag",true).expect("valid name");
    props.set("count",42).expect("valid name");
    props.set("pi",3.14).expect("valid name");
    props.set("name","hello").expect("valid name");
    assert!(props.set("",0).is_err());
    assert_eq!(props.len(),4);
    assert!(props.contains("pi"));
    assert_eq!(props.get("count"),Some(&Value::Int(42)));
    assert_eq!(props.names(),vec!["count","flag","name","pi"]);
    props.remove("flag");
    assert!(!props.contains("flag"));
}

#[test]
fn test_properties_recursive_equality() {
    let mut inner = Properties::new();
    inner.set("x",vec![1,2,3]).expect("valid name");
    let mut a = Properties::new();
    a.set("nested",inner.clone()).expect("valid name");
    a.set("list",vec![inner.clone(),Properties::new()]).expect("valid name");
    let b = a.clone();
    assert_eq!(a,b);
    let mut c = b.clone();
    c.set("nested",Properties::new()).expect("valid name");
    assert_ne!(a,c);
}
