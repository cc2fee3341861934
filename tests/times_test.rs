// test of the value model invariants
use h5features::{Features,Item,Properties,Times,TimesFormat};
use h5features::testing::{generate_range,generate_times,generate_vector};

#[test]
fn test_indices_monotonicity() {
    // get_indices is non-increasing in the window start and non-decreasing
    // in the window stop
    for format in [TimesFormat::Simple,TimesFormat::Interval] {
        let times = generate_times(50,format);
        let mut previous = times.get_indices(-1.0,100.0).expect("covering window");
        for step in 1..40 {
            let start = -1.0 + step as f64;
            match times.get_indices(start,100.0) {
                Ok((i,j)) => {
                    assert!(i >= previous.0,"lower bound moved backwards");
                    assert_eq!(j,previous.1,"upper bound depends only on the stop time");
                    previous = (i,j);
                },
                Err(_) => break
            }
        }
        let mut previous = times.get_indices(-1.0,0.6).expect("narrow window");
        for step in 1..60 {
            let stop = 0.6 + step as f64;
            let (i,j) = times.get_indices(-1.0,stop).expect("widening window");
            assert_eq!(i,previous.0);
            assert!(j >= previous.1,"upper bound moved backwards");
            previous = (i,j);
        }
    }
}

#[test]
fn test_window_containment() {
    let times = generate_times(30,TimesFormat::Interval);
    let (i,j) = times.get_indices(4.0,11.0).expect("valid window");
    let sub = times.select(i,j).expect("valid selection");
    assert!(sub.start().expect("non-empty") >= 4.0);
    assert!(sub.stop().expect("non-empty") <= 11.0);
}

#[test]
fn test_validation_totality() {
    // every generated value validates; every broken one is refused
    let times = generate_times(20,TimesFormat::Interval);
    times.validate().expect("generated times are valid");
    let features = Features::new(generate_vector(60),3,true).expect("valid features");
    features.validate().expect("generated features are valid");

    let mut reversed = times.into_data();
    reversed.reverse();
    assert!(Times::new(reversed,TimesFormat::Interval,true).is_err());
    assert!(Features::new(generate_vector(61),3,true).is_err());

    let item = Item::new(
        "ok",
        features.clone(),
        generate_times(20,TimesFormat::Simple),
        Properties::new(),
        true).expect("valid item");
    item.validate(true).expect("valid item revalidates");
    assert!(Item::new("ok",features,generate_times(19,TimesFormat::Simple),Properties::new(),true).is_err());
}

#[test]
fn test_start_stop_interleaving() {
    let start = generate_range(0.0,10.0);
    let stop = generate_range(0.5,10.5);
    let times = Times::from_start_stop(start.clone(),stop.clone(),true).expect("valid times");
    assert_eq!(times.dim(),2);
    assert_eq!(times.size(),10);
    for i in 0..10 {
        assert_eq!(times.data()[2*i],start[i]);
        assert_eq!(times.data()[2*i+1],stop[i]);
    }
}
