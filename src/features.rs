//! # Features module
//!
//! The [`Features`] type stores the feature frames of an item as a dense
//! row-major matrix: `size` frames of `dim` float64 values each, kept in a
//! single flat vector so element `(i, j)` lives at offset `i*dim + j`.

use crate::error::Error;

/// A dense matrix of feature frames.
///
/// Constructed either by the client (validated) or by a reader that trusts
/// the on-disk layout (unvalidated, `check=false`).
#[derive(Clone,Debug,PartialEq)]
pub struct Features {
    data: Vec<f64>,
    dim: usize
}

impl Features {
    /// Create features from flat row-major data.
    /// When `check` is false the instance may be transiently invalid.
    pub fn new(data: Vec<f64>,dim: usize,check: bool) -> Result<Self,Error> {
        let ans = Self { data, dim };
        if check {
            ans.validate()?;
        }
        Ok(ans)
    }
    /// Width of one feature vector
    pub fn dim(&self) -> usize {
        self.dim
    }
    /// Number of frames
    pub fn size(&self) -> usize {
        match self.dim {
            0 => self.data.len(),
            dim => self.data.len() / dim
        }
    }
    /// The flat row-major data
    pub fn data(&self) -> &[f64] {
        &self.data
    }
    pub fn into_data(self) -> Vec<f64> {
        self.data
    }
    /// Error unless `dim >= 1`, the data is non-empty, and its length is a multiple of `dim`.
    pub fn validate(&self) -> Result<(),Error> {
        if self.dim == 0 {
            return Err(Error::InvalidValue("features dimension must be greater than zero".to_string()));
        }
        if self.data.is_empty() {
            return Err(Error::InvalidValue("features must have a non-zero size".to_string()));
        }
        if self.data.len() % self.dim != 0 {
            return Err(Error::InvalidValue("features size must be a multiple of dim".to_string()));
        }
        Ok(())
    }
}

#[test]
fn test_features_validation() {
    assert!(Features::new(vec![1.0,2.0,3.0,4.0],2,true).is_ok());
    assert!(Features::new(vec![1.0,2.0,3.0],2,true).is_err());
    assert!(Features::new(vec![],2,true).is_err());
    assert!(Features::new(vec![1.0],0,true).is_err());
    // unchecked construction defers the failure to validate()
    let bad = Features::new(vec![1.0],0,false).expect("unchecked");
    assert!(bad.validate().is_err());
}

#[test]
fn test_features_accessors() {
    let f = Features::new(vec![0.0,1.0,2.0,3.0,4.0,5.0],3,true).expect("valid");
    assert_eq!(f.dim(),3);
    assert_eq!(f.size(),2);
    assert_eq!(f.data(),&[0.0,1.0,2.0,3.0,4.0,5.0]);
}
