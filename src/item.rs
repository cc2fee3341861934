//! # Item module
//!
//! An [`Item`] bundles a name with its [`Features`], [`Times`] and
//! [`Properties`].  It is the unit of storage: readers return items and
//! writers consume them.

use crate::error::Error;
use crate::features::Features;
use crate::times::Times;
use crate::properties::Properties;

/// A named bundle of time-aligned feature frames with optional properties.
#[derive(Clone,Debug,PartialEq)]
pub struct Item {
    name: String,
    features: Features,
    times: Times,
    properties: Properties
}

impl Item {
    /// Create an item.  When `check` is true the item is deep-validated.
    pub fn new(name: &str,features: Features,times: Times,properties: Properties,check: bool) -> Result<Self,Error> {
        let ans = Self {
            name: name.to_string(),
            features,
            times,
            properties
        };
        if check {
            ans.validate(true)?;
        }
        Ok(ans)
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Width of one feature vector
    pub fn dim(&self) -> usize {
        self.features.dim()
    }
    /// Number of frames
    pub fn size(&self) -> usize {
        self.features.size()
    }
    pub fn features(&self) -> &Features {
        &self.features
    }
    pub fn times(&self) -> &Times {
        &self.times
    }
    pub fn properties(&self) -> &Properties {
        &self.properties
    }
    pub fn has_properties(&self) -> bool {
        !self.properties.is_empty()
    }
    pub fn into_parts(self) -> (String,Features,Times,Properties) {
        (self.name,self.features,self.times,self.properties)
    }
    /// Error unless the name is non-empty, features and times agree on the
    /// frame count, and there is at least one frame.  When `deep`, the
    /// contained features and times are validated first.
    pub fn validate(&self,deep: bool) -> Result<(),Error> {
        if deep {
            self.times.validate()?;
            self.features.validate()?;
        }
        if self.times.size() != self.features.size() {
            return Err(Error::InvalidValue("times and features must have the same size".to_string()));
        }
        if self.size() == 0 {
            return Err(Error::InvalidValue("item must not be empty".to_string()));
        }
        if self.name.is_empty() {
            return Err(Error::InvalidValue("item name must not be empty".to_string()));
        }
        Ok(())
    }
}

#[test]
fn test_item_validation() {
    use crate::times::TimesFormat;
    let features = Features::new(vec![0.0,1.0,2.0,3.0],2,true).expect("valid");
    let times = Times::new(vec![0.0,1.0],TimesFormat::Simple,true).expect("valid");
    assert!(Item::new("a",features.clone(),times.clone(),Properties::new(),true).is_ok());
    assert!(Item::new("",features.clone(),times.clone(),Properties::new(),true).is_err());
    let short = Times::new(vec![0.0],TimesFormat::Simple,true).expect("valid");
    assert!(Item::new("a",features,short,Properties::new(),true).is_err());
}
