// test of the properties warnings on version 1.1 groups
use h5features::{Reader,TimesFormat,Version,Writer};
use h5features::testing::{capture_warnings,generate_item,temp_h5};

#[test]
fn test_properties_dropped_on_write() {
    let (_dir,filename) = temp_h5();
    let item = generate_item("test",6,4,true,TimesFormat::Interval);

    let warnings = capture_warnings(|| {
        Writer::new(&filename,"group",true,true,Version::V1_1).expect("writer opens")
            .write(&item).expect("write succeeds");
    });
    assert_eq!(warnings.len(),1);
    assert!(warnings[0].contains("ignoring properties while writing"),"got: {}",warnings[0]);
    assert!(warnings[0].contains("test"),"got: {}",warnings[0]);

    // features and times survive, properties do not
    let back = Reader::new(&filename,"group").expect("reader opens")
        .read_item("test",false).expect("read succeeds");
    assert_eq!(back.features(),item.features());
    assert_eq!(back.times(),item.times());
    assert!(!back.has_properties());
}

#[test]
fn test_no_warning_without_properties() {
    let (_dir,filename) = temp_h5();
    let item = generate_item("plain",6,4,false,TimesFormat::Interval);
    let warnings = capture_warnings(|| {
        Writer::new(&filename,"group",true,true,Version::V1_1).expect("writer opens")
            .write(&item).expect("write succeeds");
    });
    assert!(warnings.is_empty(),"got: {:?}",warnings);
}

#[test]
fn test_warning_on_read() {
    let (_dir,filename) = temp_h5();
    let item = generate_item("legacy",6,4,false,TimesFormat::Interval);
    Writer::new(&filename,"group",true,false,Version::V1_1).expect("writer opens")
        .write(&item).expect("write succeeds");
    {
        // simulate a foreign properties group on a 1.1 file
        let file = hdf5::File::open_rw(&filename).expect("file opens");
        file.group("group").expect("group exists").create_group("properties").expect("group creates");
    }

    let reader = Reader::new(&filename,"group").expect("reader opens");
    let warnings = capture_warnings(|| {
        let back = reader.read_item("legacy",false).expect("read succeeds");
        assert!(!back.has_properties());
    });
    assert_eq!(warnings.len(),1);
    assert!(warnings[0].contains("ignoring properties while reading"),"got: {}",warnings[0]);

    // requesting no properties silences the warning
    let silent = capture_warnings(|| {
        reader.read_item("legacy",true).expect("read succeeds");
    });
    assert!(silent.is_empty(),"got: {:?}",silent);
}
