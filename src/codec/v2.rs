//! # Per-item layout codec (version 2.0)
//!
//! Every item of a group gets its own sub-group named after it, holding a
//! flat `features` dataset (with a scalar `dim` attribute), a flat `times`
//! dataset (with a string `format` attribute) and an optional `properties`
//! sub-group.  The group itself carries `dim_features` and `dim_times`
//! attributes, set by the first write and enforced on every later one.

use ndarray::s;
use crate::error::Error;
use crate::features::Features;
use crate::times::{Times,TimesFormat};
use crate::properties::Properties;
use crate::item::Item;
use super::{props,read_str_attr,write_str_attr};

/// largest number of frames per chunk of a features dataset
const FRAME_CHUNK: usize = 128;
/// largest chunk of a times dataset
const TIMES_CHUNK: usize = 32768;

fn features_dataset(group: &hdf5::Group) -> Result<hdf5::Dataset,Error> {
    if !group.link_exists("features") {
        return Err(Error::CorruptData("object 'features' does not exist in the group".to_string()));
    }
    group.dataset("features")
        .map_err(|_| Error::CorruptData("object 'features' is not a dataset".to_string()))
}

fn read_dim_attr(dataset: &hdf5::Dataset) -> Result<usize,Error> {
    let attr = dataset.attr("dim")
        .map_err(|_| Error::CorruptData("features dataset has no 'dim' attribute".to_string()))?;
    Ok(attr.read_scalar::<u64>()? as usize)
}

fn read_times_full(group: &hdf5::Group) -> Result<Times,Error> {
    if !group.link_exists("times") {
        return Err(Error::CorruptData("object 'times' does not exist in the group".to_string()));
    }
    let dataset = group.dataset("times")
        .map_err(|_| Error::CorruptData("object 'times' is not a dataset".to_string()))?;
    let format: TimesFormat = read_str_attr(&dataset,"format")?.parse()?;
    Times::new(dataset.read_raw::<f64>()?,format,false)
}

/// Reads items back from a per-item group.
pub(crate) struct Reader {
    group: hdf5::Group
}

impl Reader {
    pub fn new(group: hdf5::Group) -> Self {
        Self { group }
    }
    pub fn items(&self) -> Result<Vec<String>,Error> {
        Ok(self.group.member_names()?)
    }
    pub fn read_item(&self,name: &str,ignore_properties: bool) -> Result<Item,Error> {
        let group = self.item_group(name)?;
        let dataset = features_dataset(&group)?;
        let features = Features::new(dataset.read_raw::<f64>()?,read_dim_attr(&dataset)?,false)?;
        Item::new(
            name,
            features,
            read_times_full(&group)?,
            Self::read_properties(&group,ignore_properties)?,
            false)
    }
    pub fn read_item_partial(&self,name: &str,t0: f64,t1: f64,ignore_properties: bool) -> Result<Item,Error> {
        let group = self.item_group(name)?;
        let times = read_times_full(&group)?;
        let (i,j) = times.get_indices(t0,t1)?;
        let dataset = features_dataset(&group)?;
        let dim = read_dim_attr(&dataset)?;
        let length = dataset.size();
        let offset = i * dim;
        let count = (j - i) * dim;
        if offset >= length {
            return Err(Error::InvariantViolation("partial read failed: start index is past the end of features".to_string()));
        }
        if offset + count > length {
            return Err(Error::InvariantViolation("partial read failed: stop index is past the end of features".to_string()));
        }
        let data = dataset.read_slice_1d::<f64,_>(s![offset..offset+count])?.to_vec();
        Item::new(
            name,
            Features::new(data,dim,false)?,
            times.select(i,j)?,
            Self::read_properties(&group,ignore_properties)?,
            false)
    }
    fn item_group(&self,name: &str) -> Result<hdf5::Group,Error> {
        if !self.group.link_exists(name) {
            return Err(Error::NotFound(format!("item '{}' does not exist",name)));
        }
        self.group.group(name)
            .map_err(|_| Error::CorruptData(format!("object '{}' is not a group",name)))
    }
    fn read_properties(group: &hdf5::Group,ignore_properties: bool) -> Result<Properties,Error> {
        match !ignore_properties && group.link_exists("properties") {
            true => props::read_properties(&group.group("properties")?),
            false => Ok(Properties::new())
        }
    }
}

/// Writes items into a per-item group, one sub-group each.
#[derive(Debug)]
pub(crate) struct Writer {
    group: hdf5::Group,
    compress: bool,
    dim_features: Option<usize>,
    dim_times: Option<usize>
}

impl Writer {
    pub fn new(group: hdf5::Group,compress: bool) -> Result<Self,Error> {
        let dim_features = match group.attr("dim_features") {
            Ok(attr) => Some(attr.read_scalar::<u64>()? as usize),
            Err(_) => None
        };
        let dim_times = match group.attr("dim_times") {
            Ok(attr) => Some(attr.read_scalar::<u64>()? as usize),
            Err(_) => None
        };
        Ok(Self { group, compress, dim_features, dim_times })
    }
    pub fn write(&mut self,item: &Item) -> Result<(),Error> {
        if self.group.link_exists(item.name()) {
            return Err(Error::Duplicate(format!("item {} already exists in the group",item.name())));
        }
        self.check_dim_features(item)?;
        self.check_dim_times(item)?;
        let item_group = self.group.create_group(item.name())?;
        Self::write_times(item.times(),&item_group,self.compress)?;
        Self::write_features(item.features(),&item_group,self.compress)?;
        if item.has_properties() {
            let pgroup = item_group.create_group("properties")?;
            props::write_properties(item.properties(),&pgroup,self.compress)?;
        }
        Ok(())
    }
    /// The first item fixes the features dimension of the group and
    /// persists it as an attribute; later items must agree with it.
    fn check_dim_features(&mut self,item: &Item) -> Result<(),Error> {
        match self.dim_features {
            Some(dim) if dim != item.dim() => Err(Error::InvariantViolation(
                format!("dimension of existing features is {}, cannot write features of dimension {}",dim,item.dim()))),
            Some(_) => Ok(()),
            None => {
                self.group.new_attr::<u64>().create("dim_features")?.write_scalar(&(item.dim() as u64))?;
                self.dim_features = Some(item.dim());
                Ok(())
            }
        }
    }
    fn check_dim_times(&mut self,item: &Item) -> Result<(),Error> {
        let dim = item.times().dim();
        match self.dim_times {
            Some(existing) if existing != dim => Err(Error::InvariantViolation(
                format!("dimension of existing times is {}, cannot write times of dimension {}",existing,dim))),
            Some(_) => Ok(()),
            None => {
                self.group.new_attr::<u64>().create("dim_times")?.write_scalar(&(dim as u64))?;
                self.dim_times = Some(dim);
                Ok(())
            }
        }
    }
    // The features can be read partially so chunking matters: 128 frames
    // per chunk, a frame never split across chunks.
    fn write_features(features: &Features,group: &hdf5::Group,compress: bool) -> Result<(),Error> {
        let chunk = features.dim() * features.size().min(FRAME_CHUNK);
        let builder = group.new_dataset::<f64>().chunk(chunk);
        let builder = match compress {
            true => builder.deflate(9),
            false => builder
        };
        let dataset = builder.shape(features.data().len()).create("features")?;
        dataset.write(features.data())?;
        dataset.new_attr::<u64>().create("dim")?.write_scalar(&(features.dim() as u64))?;
        Ok(())
    }
    // The times are always read entirely, so they are only chunked when
    // compression requires it.
    fn write_times(times: &Times,group: &hdf5::Group,compress: bool) -> Result<(),Error> {
        let length = times.data().len();
        let builder = group.new_dataset::<f64>();
        let builder = match compress {
            true => builder.chunk(length.min(TIMES_CHUNK)).deflate(9),
            false => builder
        };
        let dataset = builder.shape(length).create("times")?;
        dataset.write(times.data())?;
        write_str_attr(&dataset,"format",&times.format().to_string())?;
        Ok(())
    }
}
