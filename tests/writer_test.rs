// test of the writer facade
use h5features::{Error,Reader,TimesFormat,Version,Writer};
use h5features::testing::{generate_item,temp_h5};

#[test]
fn test_accessors() {
    for version in [Version::V1_1,Version::V1_2,Version::V2_0] {
        let (_dir,filename) = temp_h5();
        let writer = Writer::new(&filename,"group",false,true,version).expect("writer opens");
        assert_eq!(writer.filename(),filename);
        assert_eq!(writer.groupname(),"group");
        assert_eq!(writer.version(),version);
    }
}

#[test]
fn test_v1_0_unsupported() {
    let (_dir,filename) = temp_h5();
    assert!(matches!(
        Writer::new(&filename,"group",true,false,Version::V1_0),
        Err(Error::Unsupported(_))));
}

#[test]
fn test_version_mismatch_on_reopen() {
    let (_dir,filename) = temp_h5();
    Writer::new(&filename,"group",true,false,Version::V2_0).expect("writer opens");
    // the group now carries version 2.0, so a 1.1 writer is refused
    let err = Writer::new(&filename,"group",false,false,Version::V1_1)
        .expect_err("version mismatch is refused");
    assert!(matches!(err,Error::InvariantViolation(_)));
    // with overwrite the file is truncated and the request wins
    let writer = Writer::new(&filename,"group",true,false,Version::V1_1).expect("writer opens");
    assert_eq!(writer.version(),Version::V1_1);
}

#[test]
fn test_same_version_reopen() {
    let (_dir,filename) = temp_h5();
    Writer::new(&filename,"group",true,false,Version::V2_0).expect("writer opens")
        .write(&generate_item("a",5,3,false,TimesFormat::Interval)).expect("write succeeds");
    Writer::new(&filename,"group",false,false,Version::V2_0).expect("writer reopens")
        .write(&generate_item("b",5,3,false,TimesFormat::Interval)).expect("write succeeds");
    let reader = Reader::new(&filename,"group").expect("reader opens");
    assert_eq!(reader.items().expect("items").len(),2);
}

#[test]
fn test_adopts_empty_group() {
    let (_dir,filename) = temp_h5();
    {
        // a bare group with no attributes and no children
        let file = hdf5::File::create(&filename).expect("file creates");
        file.create_group("group").expect("group creates");
    }
    // the writer stamps the requested version on it
    let writer = Writer::new(&filename,"group",false,false,Version::V1_2).expect("writer opens");
    assert_eq!(writer.version(),Version::V1_2);
    drop(writer);
    assert_eq!(Reader::new(&filename,"group").expect("reader opens").version(),Version::V1_2);
}

#[test]
fn test_overwrite_truncates() {
    let (_dir,filename) = temp_h5();
    Writer::new(&filename,"old",true,false,Version::V2_0).expect("writer opens")
        .write(&generate_item("a",5,3,false,TimesFormat::Interval)).expect("write succeeds");
    Writer::new(&filename,"new",true,false,Version::V2_0).expect("writer truncates");
    let groups = Reader::list_groups(&filename).expect("list succeeds");
    assert_eq!(groups,vec!["new"]);
}

#[test]
fn test_batched_write() {
    let (_dir,filename) = temp_h5();
    let items = vec![
        generate_item("a",10,5,false,TimesFormat::Interval),
        generate_item("b",7,5,true,TimesFormat::Interval),
        generate_item("c",3,5,false,TimesFormat::Interval)
    ];
    Writer::new(&filename,"group",true,true,Version::V2_0).expect("writer opens")
        .write_all(&items).expect("batch write succeeds");
    let reader = Reader::new(&filename,"group").expect("reader opens");
    assert_eq!(reader.read_all(false).expect("read_all"),items);
}

#[test]
fn test_two_groups_one_file() {
    let (_dir,filename) = temp_h5();
    let packed = generate_item("p",6,4,false,TimesFormat::Interval);
    let per_item = generate_item("q",6,9,true,TimesFormat::Simple);
    Writer::new(&filename,"packed",true,false,Version::V1_1).expect("writer opens")
        .write(&packed).expect("write succeeds");
    Writer::new(&filename,"modern",false,true,Version::V2_0).expect("writer opens")
        .write(&per_item).expect("write succeeds");

    assert_eq!(Reader::new(&filename,"packed").expect("reader opens")
        .read_item("p",false).expect("read succeeds"),packed);
    assert_eq!(Reader::new(&filename,"modern").expect("reader opens")
        .read_item("q",false).expect("read succeeds"),per_item);
}
