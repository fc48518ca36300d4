use kundali::houses::{
    house_for_longitude, houses_from_ascendant, HouseCalculator, HouseCusps, HouseFrame, HouseSystem,
    HouseSystemKind, SignAlignedHouses, WholeSignHouses,
};
use kundali::ChartError;

#[test]
fn test_houses_from_fifteen_degree_ascendant() {
    let cusps = houses_from_ascendant(15.0);
    assert_eq!(
        cusps.0,
        [15.0, 45.0, 75.0, 105.0, 135.0, 165.0, 195.0, 225.0, 255.0, 285.0, 315.0, 345.0]
    );
}

#[test]
fn test_wraparound_arc_is_matched() {
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = (350.0 + 30.0 * i as f64) % 360.0;
    }
    let cusps = HouseCusps(cusps);
    assert_eq!(cusps.0[1], 20.0);
    assert_eq!(house_for_longitude(359.0, &cusps), 1);
    assert_eq!(house_for_longitude(5.0, &cusps), 1);
    assert_eq!(house_for_longitude(20.0, &cusps), 2);
    assert_eq!(house_for_longitude(349.9, &cusps), 12);
}

#[test]
fn test_every_longitude_has_exactly_one_house() {
    let cusps = houses_from_ascendant(347.525);
    for tenth in 0..3600 {
        let lon = tenth as f64 / 10.0;
        let house = house_for_longitude(lon, &cusps);
        assert!((1..=12).contains(&house));
        let start = cusps.cusp(house).unwrap();
        let arc = (lon - start).rem_euclid(360.0);
        assert!(arc < 30.0 + 1e-9, "lon {lon} in house {house} starting {start}");
    }
}

#[test]
fn test_ascendant_rises_in_the_east() {
    let calculator = HouseCalculator::default();
    for lst in (0..360).step_by(15) {
        for lat in [-60.0, -23.4, 0.0, 28.6, 51.5, 65.0] {
            let asc = calculator.ascendant(lst as f64, lat).unwrap();
            let mc = calculator.midheaven(lst as f64);
            assert!((0.0..360.0).contains(&asc));
            let ahead = (asc - mc).rem_euclid(360.0);
            assert!(ahead > 0.0 && ahead < 180.0, "lst {lst} lat {lat}: asc {asc} mc {mc}");
        }
    }
}

#[test]
fn test_polar_latitude_rejected() {
    let calculator = HouseCalculator::default();
    assert_eq!(
        calculator.ascendant(100.0, 70.0),
        Err(ChartError::UnsupportedLatitude {
            latitude: 70.0,
            limit: 66.0
        })
    );
    assert!(HouseCalculator::new(75.0).ascendant(100.0, 70.0).is_ok());
}

#[test]
fn test_systems_are_interchangeable() {
    let frame = HouseFrame {
        ascendant: 47.5,
        midheaven: 320.0,
        lst: 0.0,
        latitude: 0.0,
        obliquity: 23.44,
    };
    let systems: Vec<Box<dyn HouseSystem>> = vec![Box::new(WholeSignHouses), Box::new(SignAlignedHouses)];
    let second: Vec<f64> = systems.iter().map(|s| s.cusps(&frame).cusp(2).unwrap()).collect();
    assert_eq!(second, vec![77.5, 60.0]);
    for system in &systems {
        assert_eq!(system.cusps(&frame).cusp(1), Some(47.5), "{:?}", system.kind());
    }

    assert_eq!("sign-aligned".parse::<HouseSystemKind>().unwrap(), HouseSystemKind::SignAligned);
    assert!(matches!(
        "placidus".parse::<HouseSystemKind>(),
        Err(ChartError::InvalidHouseSystem { .. })
    ));
}
