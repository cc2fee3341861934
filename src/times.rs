//! # Times module
//!
//! The [`Times`] type stores the timestamps of an item, one per feature
//! frame, in seconds as float64 values.  Two formats exist:
//!
//! * [`TimesFormat::Simple`]: one scalar per frame, the center of the
//!   frame's time window.
//! * [`TimesFormat::Interval`]: a `(tstart, tstop)` pair per frame, stored
//!   interleaved so `data[2*i]` is the start and `data[2*i+1]` the stop of
//!   frame `i`.
//!
//! Partial reads go through [`Times::get_indices`], which maps a time
//! window onto a frame index window using lower/upper bounds over the
//! (possibly strided) timestamp sequences.

use std::fmt;
use std::str::FromStr;
use crate::error::Error;

/// The available timestamp formats, `Simple` is 1d and `Interval` is 2d.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum TimesFormat {
    Simple,
    Interval
}

impl TimesFormat {
    /// Returns the format given the timestamp dimension (1 or 2)
    pub fn from_dim(dim: usize) -> Result<Self,Error> {
        match dim {
            1 => Ok(Self::Simple),
            2 => Ok(Self::Interval),
            d => Err(Error::InvalidValue(format!("invalid times dimension {}",d)))
        }
    }
    /// Returns the timestamp dimension (1 or 2)
    pub fn dim(&self) -> usize {
        match self {
            Self::Simple => 1,
            Self::Interval => 2
        }
    }
}

impl fmt::Display for TimesFormat {
    fn fmt(&self,f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => write!(f,"simple"),
            Self::Interval => write!(f,"interval")
        }
    }
}

impl FromStr for TimesFormat {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self,Self::Err> {
        match s {
            "simple" => Ok(Self::Simple),
            "interval" => Ok(Self::Interval),
            _ => Err(Error::CorruptData(format!("unknown times format '{}'",s)))
        }
    }
}

/// View of every `stride`-th element of a slice starting at `offset`.
/// Gives allocation-free bounds over the start (even) and stop (odd)
/// sub-sequences of the interleaved interval layout.
struct Strided<'a> {
    data: &'a [f64],
    offset: usize,
    stride: usize
}

impl<'a> Strided<'a> {
    fn new(data: &'a [f64],offset: usize,stride: usize) -> Self {
        Self { data, offset, stride }
    }
    fn len(&self) -> usize {
        match self.data.len() > self.offset {
            true => (self.data.len() - self.offset + self.stride - 1) / self.stride,
            false => 0
        }
    }
    fn get(&self,i: usize) -> f64 {
        self.data[self.offset + i*self.stride]
    }
    fn is_sorted(&self) -> bool {
        (1..self.len()).all(|i| self.get(i-1) <= self.get(i))
    }
    /// index of the first element not less than `val`
    fn lower_bound(&self,val: f64) -> usize {
        let mut lo = 0;
        let mut hi = self.len();
        while lo < hi {
            let mid = (lo + hi) / 2;
            if self.get(mid) < val {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }
    /// index of the first element greater than `val`
    fn upper_bound(&self,val: f64) -> usize {
        let mut lo = 0;
        let mut hi = self.len();
        while lo < hi {
            let mid = (lo + hi) / 2;
            if self.get(mid) <= val {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }
}

/// The timestamps of an item, one or two scalars per frame.
#[derive(Clone,Debug,PartialEq)]
pub struct Times {
    data: Vec<f64>,
    format: TimesFormat
}

impl Times {
    /// Create timestamps from raw data in the given format.
    /// When `check` is false the instance may be transiently invalid.
    pub fn new(data: Vec<f64>,format: TimesFormat,check: bool) -> Result<Self,Error> {
        let ans = Self { data, format };
        if check {
            ans.validate()?;
        }
        Ok(ans)
    }
    /// Create interval timestamps from separate start and stop vectors.
    pub fn from_start_stop(start: Vec<f64>,stop: Vec<f64>,check: bool) -> Result<Self,Error> {
        if start.len() != stop.len() {
            return Err(Error::InvalidValue("tstart and tstop must have the same size".to_string()));
        }
        let mut data = Vec::with_capacity(2 * start.len());
        for (t0,t1) in start.iter().zip(stop.iter()) {
            data.push(*t0);
            data.push(*t1);
        }
        Self::new(data,TimesFormat::Interval,check)
    }
    /// Number of frames
    pub fn size(&self) -> usize {
        match self.format {
            TimesFormat::Simple => self.data.len(),
            TimesFormat::Interval => self.data.len() / 2
        }
    }
    /// Timestamp dimension (1 or 2)
    pub fn dim(&self) -> usize {
        self.format.dim()
    }
    pub fn format(&self) -> TimesFormat {
        self.format
    }
    /// The raw (interleaved for intervals) data
    pub fn data(&self) -> &[f64] {
        &self.data
    }
    pub fn into_data(self) -> Vec<f64> {
        self.data
    }
    /// The first stored timestamp
    pub fn start(&self) -> Result<f64,Error> {
        match self.data.first() {
            Some(t) => Ok(*t),
            None => Err(Error::InvalidValue("times is empty".to_string()))
        }
    }
    /// The last stored timestamp
    pub fn stop(&self) -> Result<f64,Error> {
        match self.data.last() {
            Some(t) => Ok(*t),
            None => Err(Error::InvalidValue("times is empty".to_string()))
        }
    }
    /// Error unless non-empty, sorted in increasing order, and (for
    /// intervals) even-sized with `tstart <= tstop` on every frame.
    pub fn validate(&self) -> Result<(),Error> {
        if self.data.is_empty() {
            return Err(Error::InvalidValue("timestamps must be non-empty".to_string()));
        }
        match self.format {
            TimesFormat::Simple => {
                if !Strided::new(&self.data,0,1).is_sorted() {
                    return Err(Error::InvalidValue("timestamps must be sorted in increasing order".to_string()));
                }
            },
            TimesFormat::Interval => {
                if self.data.len() % 2 != 0 {
                    return Err(Error::InvalidValue("timestamps must have an even size (as [start, stop] pairs)".to_string()));
                }
                if !Strided::new(&self.data,0,2).is_sorted() || !Strided::new(&self.data,1,2).is_sorted() {
                    return Err(Error::InvalidValue("timestamps must be sorted in increasing order".to_string()));
                }
                if self.data.chunks_exact(2).any(|pair| pair[0] > pair[1]) {
                    return Err(Error::InvalidValue("tstart must be lower or equal to tstop for all timestamps".to_string()));
                }
            }
        }
        Ok(())
    }
    /// Returns the frame index window `[i, j)` closest to the time window
    /// `[start, stop]`: a lower bound over centers (simple) or start times
    /// (interval), and an upper bound over centers or stop times.
    pub fn get_indices(&self,start: f64,stop: f64) -> Result<(usize,usize),Error> {
        if start >= stop {
            return Err(Error::InvalidRange("start must be lower than stop".to_string()));
        }
        let (i,j) = match self.format {
            TimesFormat::Simple => {
                let centers = Strided::new(&self.data,0,1);
                (centers.lower_bound(start),centers.upper_bound(stop))
            },
            TimesFormat::Interval => {
                let starts = Strided::new(&self.data,0,2);
                let stops = Strided::new(&self.data,1,2);
                (starts.lower_bound(start),stops.upper_bound(stop))
            }
        };
        if i >= j {
            return Err(Error::InvalidRange(format!("no valid indices for time interval ({}, {})",start,stop)));
        }
        Ok((i,j))
    }
    /// Returns the sub-vector of frames `[start, stop)`
    pub fn select(&self,start: usize,stop: usize) -> Result<Self,Error> {
        if start >= stop {
            return Err(Error::InvalidRange("start index must be lower than stop index".to_string()));
        }
        if stop > self.size() {
            return Err(Error::InvalidRange("stop index must be lower or equal to size".to_string()));
        }
        let dim = self.dim();
        Ok(Self {
            data: self.data[start*dim..stop*dim].to_vec(),
            format: self.format
        })
    }
}

#[test]
fn test_times_validation() {
    assert!(Times::new(vec![0.0,1.0,2.0],TimesFormat::Simple,true).is_ok());
    assert!(Times::new(vec![],TimesFormat::Simple,true).is_err());
    assert!(Times::new(vec![1.0,0.0],TimesFormat::Simple,true).is_err());
    // odd interleaved length
    assert!(Times::new(vec![0.0,1.0,2.0],TimesFormat::Interval,true).is_err());
    // start > stop on the second frame
    assert!(Times::new(vec![0.0,1.0,2.0,1.5],TimesFormat::Interval,true).is_err());
    // start and stop sequences each sorted
    assert!(Times::new(vec![0.0,0.3,0.2,0.5,0.4,0.7],TimesFormat::Interval,true).is_ok());
    assert!(Times::from_start_stop(vec![0.0,0.2],vec![0.3],true).is_err());
}

#[test]
fn test_times_indices() {
    let t = Times::from_start_stop(vec![0.0,0.2,0.4],vec![0.3,0.5,0.7],true).expect("valid");
    assert_eq!(t.get_indices(0.0,0.6).expect("valid window"),(0,2));
    assert_eq!(t.get_indices(0.0,1.0).expect("valid window"),(0,3));
    assert!(t.get_indices(1.0,1.0).is_err());
    assert!(t.get_indices(1.0,1.1).is_err());
    let sub = t.select(0,2).expect("valid selection");
    assert_eq!(sub.data(),&[0.0,0.3,0.2,0.5]);
    assert!(t.select(2,2).is_err());
    assert!(t.select(1,4).is_err());
}

#[test]
fn test_simple_indices() {
    let t = Times::new(vec![0.0,1.0,2.0,3.0],TimesFormat::Simple,true).expect("valid");
    assert_eq!(t.get_indices(0.5,2.5).expect("valid window"),(1,3));
    assert_eq!(t.get_indices(1.0,2.0).expect("valid window"),(1,3));
    assert_eq!(t.start().expect("non-empty"),0.0);
    assert_eq!(t.stop().expect("non-empty"),3.0);
}
