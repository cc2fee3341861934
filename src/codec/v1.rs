//! # Packed layout codec (versions 1.0, 1.1 and 1.2)
//!
//! In this layout every item of a group lives in three growing datasets:
//! `features` and `labels` hold all frames concatenated along the leading
//! axis, `items` holds the item names in append order, and `index` holds
//! the inclusive last-frame index of each item, so the frame range of item
//! `k` is `[index[k-1]+1, index[k]+1)` (`[0, index[0]+1)` for the first).
//! Version 1.0 predates the rename of the datasets and is read-only:
//! `files`, `file_index` and `times` stand in for `items`, `index` and
//! `labels`.  Version 1.2 adds a `properties` sub-group with one child
//! group per item; earlier versions warn and drop properties.
//!
//! The writer initializes the on-disk schema lazily from the first item
//! and caches the name list and both dimensions, which are frozen for the
//! lifetime of the group.

use log::warn;
use hdf5::types::VarLenUnicode;
use ndarray::{s,ArrayView2};
use crate::error::Error;
use crate::features::Features;
use crate::times::{Times,TimesFormat};
use crate::properties::Properties;
use crate::item::Item;
use crate::version::Version;
use super::{props,h5_str,read_str_attr,write_str_attr};

/// leading-axis chunk of the features and labels datasets
const FRAME_CHUNK: usize = 128;
/// chunk of the items and index datasets
const INDEX_CHUNK: usize = 10;

fn items_dataset(version: Version) -> &'static str {
    match version {
        Version::V1_0 => "files",
        _ => "items"
    }
}

fn index_dataset(version: Version) -> &'static str {
    match version {
        Version::V1_0 => "file_index",
        _ => "index"
    }
}

fn times_dataset(version: Version) -> &'static str {
    match version {
        Version::V1_0 => "times",
        _ => "labels"
    }
}

/// Reads items back from a packed group.  The name list and index are
/// loaded once at construction; frame payloads are fetched per request.
pub(crate) struct Reader {
    group: hdf5::Group,
    version: Version,
    items: Vec<String>,
    index: Vec<i64>
}

impl Reader {
    /// Load the name list and index of the group.  A group holding only
    /// its version attribute (nothing written yet) reads as empty.
    pub fn new(group: hdf5::Group,version: Version) -> Result<Self,Error> {
        let items_name = items_dataset(version);
        let index_name = index_dataset(version);
        let (items,index) = match group.link_exists(items_name) {
            true => {
                if version != Version::V1_0 {
                    let format = read_str_attr(&group,"format")
                        .map_err(|_| Error::CorruptData("missing 'format' attribute on a packed group".to_string()))?;
                    if format != "dense" {
                        return Err(Error::CorruptData(format!("unsupported packed format '{}'",format)));
                    }
                }
                let items = group.dataset(items_name)
                    .map_err(|_| Error::CorruptData(format!("object '{}' is not a dataset",items_name)))?
                    .read_raw::<VarLenUnicode>()?
                    .iter().map(|s| s.as_str().to_string()).collect::<Vec<String>>();
                let index = group.dataset(index_name)
                    .map_err(|_| Error::CorruptData(format!("dataset '{}' is missing",index_name)))?
                    .read_raw::<i64>()?;
                (items,index)
            },
            false => (Vec::new(),Vec::new())
        };
        if items.len() != index.len() {
            return Err(Error::CorruptData(format!("'{}' and '{}' have different sizes",items_name,index_name)));
        }
        if index.first().map_or(false,|first| *first < 0) || index.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(Error::CorruptData("item index is not strictly increasing".to_string()));
        }
        Ok(Self { group, version, items, index })
    }
    pub fn items(&self) -> Vec<String> {
        self.items.clone()
    }
    pub fn read_item(&self,name: &str,ignore_properties: bool) -> Result<Item,Error> {
        let k = self.find(name)?;
        self.warn_properties(name,ignore_properties);
        let (start,stop) = self.position(k);
        Item::new(
            name,
            self.read_features(start,stop)?,
            self.read_times(start,stop)?,
            self.read_properties(name,ignore_properties)?,
            false)
    }
    pub fn read_item_partial(&self,name: &str,t0: f64,t1: f64,ignore_properties: bool) -> Result<Item,Error> {
        let k = self.find(name)?;
        self.warn_properties(name,ignore_properties);
        let (start,stop) = self.position(k);
        let times = self.read_times(start,stop)?;
        let (i,j) = times.get_indices(t0,t1)?;
        Item::new(
            name,
            self.read_features(start+i,start+j)?,
            times.select(i,j)?,
            self.read_properties(name,ignore_properties)?,
            false)
    }
    fn find(&self,name: &str) -> Result<usize,Error> {
        self.items.iter().position(|n| n == name)
            .ok_or_else(|| Error::NotFound(format!("item '{}' does not exist",name)))
    }
    /// frame range `[start, stop)` of item `k`
    fn position(&self,k: usize) -> (usize,usize) {
        match k {
            0 => (0,(self.index[0] + 1) as usize),
            _ => ((self.index[k-1] + 1) as usize,(self.index[k] + 1) as usize)
        }
    }
    fn warn_properties(&self,name: &str,ignore_properties: bool) {
        if self.version != Version::V1_2 && !ignore_properties && self.group.link_exists("properties") {
            warn!("h5features v{}: ignoring properties while reading item {}",self.version,name);
        }
    }
    fn read_features(&self,start: usize,stop: usize) -> Result<Features,Error> {
        let dataset = self.group.dataset("features")
            .map_err(|_| Error::CorruptData("dataset 'features' is missing".to_string()))?;
        let dim = match dataset.shape().get(1) {
            Some(dim) => *dim,
            None => return Err(Error::CorruptData("features dataset is not two-dimensional".to_string()))
        };
        let data = dataset.read_slice_2d::<f64,_>(s![start..stop,..])?.into_raw_vec();
        Features::new(data,dim,false)
    }
    fn read_times(&self,start: usize,stop: usize) -> Result<Times,Error> {
        let name = times_dataset(self.version);
        let dataset = self.group.dataset(name)
            .map_err(|_| Error::CorruptData(format!("dataset '{}' is missing",name)))?;
        let dim = match dataset.shape().get(1) {
            Some(dim) => *dim,
            None => return Err(Error::CorruptData(format!("{} dataset is not two-dimensional",name)))
        };
        let data = dataset.read_slice_2d::<f64,_>(s![start..stop,..])?.into_raw_vec();
        Times::new(data,TimesFormat::from_dim(dim)?,false)
    }
    fn read_properties(&self,name: &str,ignore_properties: bool) -> Result<Properties,Error> {
        if self.version == Version::V1_2 && !ignore_properties && self.group.link_exists("properties") {
            let pgroup = self.group.group("properties")?;
            if pgroup.link_exists(name) {
                return props::read_properties(&pgroup.group(name)?);
            }
        }
        Ok(Properties::new())
    }
}

/// On-disk state of a packed group: created but schema-less, or holding
/// items under frozen dimensions.
#[derive(Clone,Copy,Debug)]
enum State {
    Fresh,
    Populated {
        dim_features: usize,
        dim_times: usize,
        last_index: i64,
        total_frames: usize
    }
}

/// Appends items to a packed group.  The first write creates the schema;
/// every later write must agree with the frozen dimensions and bring a
/// new name.
#[derive(Debug)]
pub(crate) struct Writer {
    group: hdf5::Group,
    version: Version,
    compress: bool,
    names: Vec<String>,
    state: State
}

impl Writer {
    pub fn new(group: hdf5::Group,compress: bool,version: Version) -> Result<Self,Error> {
        if version == Version::V1_0 {
            return Err(Error::Unsupported("writing version 1.0 is not supported".to_string()));
        }
        let (names,state) = match group.member_names()?.is_empty() {
            true => (Vec::new(),State::Fresh),
            false => {
                let names = group.dataset("items")
                    .map_err(|_| Error::CorruptData("dataset 'items' is missing".to_string()))?
                    .read_raw::<VarLenUnicode>()?
                    .iter().map(|s| s.as_str().to_string()).collect::<Vec<String>>();
                let index = group.dataset("index")
                    .map_err(|_| Error::CorruptData("dataset 'index' is missing".to_string()))?
                    .read_raw::<i64>()?;
                let last_index = match index.last() {
                    Some(last) => *last,
                    None => return Err(Error::CorruptData("item index is empty".to_string()))
                };
                let fshape = group.dataset("features")
                    .map_err(|_| Error::CorruptData("dataset 'features' is missing".to_string()))?
                    .shape();
                let tshape = group.dataset("labels")
                    .map_err(|_| Error::CorruptData("dataset 'labels' is missing".to_string()))?
                    .shape();
                if fshape.len() != 2 || tshape.len() != 2 {
                    return Err(Error::CorruptData("features and labels datasets must be two-dimensional".to_string()));
                }
                (names,State::Populated {
                    dim_features: fshape[1],
                    dim_times: tshape[1],
                    last_index,
                    total_frames: fshape[0]
                })
            }
        };
        Ok(Self { group, version, compress, names, state })
    }
    pub fn write(&mut self,item: &Item) -> Result<(),Error> {
        match self.state {
            State::Fresh => self.lazy_init(item.dim(),item.times().dim())?,
            State::Populated {..} => self.check_appendable(item)?
        }
        if self.version != Version::V1_2 && item.has_properties() {
            warn!("h5features v{}: ignoring properties while writing item {}",self.version,item.name());
        }
        self.append(item)?;
        if self.version == Version::V1_2 && item.has_properties() {
            self.write_properties(item)?;
        }
        Ok(())
    }
    /// Create the packed schema with the dimensions of the first item,
    /// which are fixed for the lifetime of the group.
    fn lazy_init(&mut self,dim_features: usize,dim_times: usize) -> Result<(),Error> {
        write_str_attr(&self.group,"format","dense")?;
        let builder = self.group.new_dataset::<i64>().chunk(INDEX_CHUNK);
        let builder = match self.compress {
            true => builder.deflate(9),
            false => builder
        };
        builder.shape(0..).create("index")?;
        self.group.new_dataset::<VarLenUnicode>().chunk(INDEX_CHUNK).shape(0..).create("items")?;
        let builder = self.group.new_dataset::<f64>().chunk((FRAME_CHUNK,dim_features));
        let builder = match self.compress {
            true => builder.deflate(9),
            false => builder
        };
        builder.shape((0..,dim_features)).create("features")?;
        let builder = self.group.new_dataset::<f64>().chunk((FRAME_CHUNK,dim_times));
        let builder = match self.compress {
            true => builder.deflate(9),
            false => builder
        };
        builder.shape((0..,dim_times)).create("labels")?;
        self.state = State::Populated {
            dim_features,
            dim_times,
            last_index: -1,
            total_frames: 0
        };
        Ok(())
    }
    fn check_appendable(&self,item: &Item) -> Result<(),Error> {
        let (dim_features,dim_times) = match self.state {
            State::Populated { dim_features, dim_times, .. } => (dim_features,dim_times),
            State::Fresh => return Ok(())
        };
        if self.names.iter().any(|n| n == item.name()) {
            return Err(Error::InvariantViolation(
                format!("cannot append to existing group: item {} already exists",item.name())));
        }
        if dim_features != item.dim() {
            return Err(Error::InvariantViolation(
                format!("cannot append to existing group: features dimension is {}, cannot write features of dimension {}",
                    dim_features,item.dim())));
        }
        if dim_times != item.times().dim() {
            return Err(Error::InvariantViolation(
                format!("cannot append to existing group: times dimension is {}, cannot write times of dimension {}",
                    dim_times,item.times().dim())));
        }
        Ok(())
    }
    fn append(&mut self,item: &Item) -> Result<(),Error> {
        let (dim_features,dim_times,last_index,total_frames) = match self.state {
            State::Populated { dim_features, dim_times, last_index, total_frames } =>
                (dim_features,dim_times,last_index,total_frames),
            State::Fresh => return Err(Error::InvariantViolation("group schema is not initialized".to_string()))
        };
        let size = item.size();
        let new_last = last_index + size as i64;
        let count = self.names.len();

        let index = self.group.dataset("index")?;
        index.resize((count + 1,))?;
        index.write_slice(&[new_last],s![count..count+1])?;

        let items = self.group.dataset("items")?;
        items.resize((count + 1,))?;
        items.write_slice(&[h5_str(item.name())?],s![count..count+1])?;

        let features = self.group.dataset("features")?;
        features.resize((total_frames + size,dim_features))?;
        features.write_slice(
            ArrayView2::from_shape((size,dim_features),item.features().data())?,
            s![total_frames..total_frames+size,..])?;

        let labels = self.group.dataset("labels")?;
        labels.resize((total_frames + size,dim_times))?;
        labels.write_slice(
            ArrayView2::from_shape((size,dim_times),item.times().data())?,
            s![total_frames..total_frames+size,..])?;

        self.names.push(item.name().to_string());
        self.state = State::Populated {
            dim_features,
            dim_times,
            last_index: new_last,
            total_frames: total_frames + size
        };
        Ok(())
    }
    fn write_properties(&self,item: &Item) -> Result<(),Error> {
        let pgroup = match self.group.link_exists("properties") {
            true => self.group.group("properties")?,
            false => self.group.create_group("properties")?
        };
        let child = pgroup.create_group(item.name())?;
        props::write_properties(item.properties(),&child,self.compress)
    }
}
