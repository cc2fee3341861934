// test of the per-item (version 2.0) layout
use h5features::{Error,Features,Item,Properties,Reader,Times,TimesFormat,Version,Writer};
use h5features::testing::{generate_item,init_logger,temp_h5};

/// the item of the reference round-trip scenario: 3 frames of dimension 4
/// with interval timestamps
fn reference_item() -> Item {
    Item::new(
        "a",
        Features::new(vec![0.0,1.0,2.0,3.0,4.0,5.0,2.0,1.0,0.0,0.0,0.0,0.0],4,true).expect("valid features"),
        Times::from_start_stop(vec![0.0,0.2,0.4],vec![0.3,0.5,0.7],true).expect("valid times"),
        Properties::new(),
        true).expect("valid item")
}

#[test]
fn test_round_trip() {
    init_logger();
    let (_dir,filename) = temp_h5();
    let item = reference_item();
    let mut writer = Writer::new(&filename,"group",true,true,Version::V2_0).expect("writer opens");
    writer.write(&item).expect("write succeeds");
    drop(writer);

    let reader = Reader::new(&filename,"group").expect("reader opens");
    assert_eq!(reader.version(),Version::V2_0);
    assert_eq!(reader.items().expect("items"),vec!["a"]);
    let back = reader.read_item("a",false).expect("read succeeds");
    assert_eq!(back,item);
}

#[test]
fn test_partial_read() {
    init_logger();
    let (_dir,filename) = temp_h5();
    Writer::new(&filename,"group",true,true,Version::V2_0)
        .expect("writer opens")
        .write(&reference_item())
        .expect("write succeeds");

    let reader = Reader::new(&filename,"group").expect("reader opens");
    let back = reader.read_item_partial("a",0.0,0.6,false).expect("partial read succeeds");
    assert_eq!(back.size(),2);
    assert_eq!(back.times().data(),&[0.0,0.3,0.2,0.5]);
    assert_eq!(back.features().data(),&[0.0,1.0,2.0,3.0,4.0,5.0,2.0,1.0]);

    // a window covering the full range equals the full read
    let full = reader.read_item("a",false).expect("full read succeeds");
    let covering = reader.read_item_partial("a",-1.0,1.0,false).expect("covering read succeeds");
    assert_eq!(covering,full);
}

#[test]
fn test_partial_read_degenerate() {
    init_logger();
    let (_dir,filename) = temp_h5();
    Writer::new(&filename,"group",true,true,Version::V2_0)
        .expect("writer opens")
        .write(&reference_item())
        .expect("write succeeds");

    let reader = Reader::new(&filename,"group").expect("reader opens");
    assert!(matches!(reader.read_item_partial("a",1.0,1.0,false),Err(Error::InvalidRange(_))));
    assert!(matches!(reader.read_item_partial("a",1.0,1.1,false),Err(Error::InvalidRange(_))));
}

#[test]
fn test_dimension_mismatch() {
    init_logger();
    let (_dir,filename) = temp_h5();
    let mut writer = Writer::new(&filename,"group",true,false,Version::V2_0).expect("writer opens");
    writer.write(&generate_item("first",6,4,false,TimesFormat::Interval)).expect("write succeeds");

    let err = writer.write(&generate_item("second",6,5,false,TimesFormat::Interval))
        .expect_err("dimension mismatch is refused");
    match err {
        Error::InvariantViolation(msg) => assert!(msg.contains("4"),"message names the existing dimension: {}",msg),
        other => panic!("unexpected error {:?}",other)
    }

    // times dimension is checked the same way
    let err = writer.write(&generate_item("third",6,4,false,TimesFormat::Simple))
        .expect_err("times dimension mismatch is refused");
    assert!(matches!(err,Error::InvariantViolation(_)));
}

#[test]
fn test_duplicate_item() {
    init_logger();
    let (_dir,filename) = temp_h5();
    let mut writer = Writer::new(&filename,"group",true,false,Version::V2_0).expect("writer opens");
    writer.write(&generate_item("same",6,4,false,TimesFormat::Interval)).expect("write succeeds");
    let err = writer.write(&generate_item("same",6,4,false,TimesFormat::Interval))
        .expect_err("duplicate name is refused");
    assert!(matches!(err,Error::Duplicate(_)));
}

#[test]
fn test_simple_times_round_trip() {
    init_logger();
    let (_dir,filename) = temp_h5();
    let item = generate_item("simple",12,3,true,TimesFormat::Simple);
    Writer::new(&filename,"group",true,true,Version::V2_0)
        .expect("writer opens")
        .write(&item)
        .expect("write succeeds");
    let back = Reader::new(&filename,"group").expect("reader opens")
        .read_item("simple",false).expect("read succeeds");
    assert_eq!(back,item);
    assert_eq!(back.times().format(),TimesFormat::Simple);
}

#[test]
fn test_ignore_properties() {
    init_logger();
    let (_dir,filename) = temp_h5();
    let item = generate_item("props",6,4,true,TimesFormat::Interval);
    Writer::new(&filename,"group",true,false,Version::V2_0)
        .expect("writer opens")
        .write(&item)
        .expect("write succeeds");
    let back = Reader::new(&filename,"group").expect("reader opens")
        .read_item("props",true).expect("read succeeds");
    assert!(!back.has_properties());
    assert_eq!(back.features(),item.features());
    assert_eq!(back.times(),item.times());
}

#[test]
fn test_on_disk_layout() {
    init_logger();
    let (_dir,filename) = temp_h5();
    let item = generate_item("layout",6,4,true,TimesFormat::Interval);
    Writer::new(&filename,"group",true,true,Version::V2_0)
        .expect("writer opens")
        .write(&item)
        .expect("write succeeds");

    let file = hdf5::File::open(&filename).expect("file opens");
    let group = file.group("group").expect("group exists");
    assert_eq!(group.attr("dim_features").expect("attr exists").read_scalar::<u64>().expect("readable"),4);
    assert_eq!(group.attr("dim_times").expect("attr exists").read_scalar::<u64>().expect("readable"),2);
    let sub = group.group("layout").expect("item sub-group exists");
    let features = sub.dataset("features").expect("features dataset exists");
    assert_eq!(features.shape(),vec![24]);
    assert_eq!(features.attr("dim").expect("dim attr").read_scalar::<u64>().expect("readable"),4);
    let times = sub.dataset("times").expect("times dataset exists");
    assert_eq!(times.shape(),vec![12]);
    assert!(sub.group("properties").is_ok());
}
