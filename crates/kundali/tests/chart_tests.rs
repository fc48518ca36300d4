use std::collections::BTreeMap;
use std::sync::Arc;

use kundali::houses::house_for_longitude;
use kundali::math::forward_arc;
use kundali::{
    AyanamsaCorrector, AyanamsaModel, ChartAssembler, ChartError, ChartSettings, EphemerisSource, Graha,
    HouseCalculator, HouseSystemKind, Location, Moment, Rashi,
};

fn j2000() -> Moment {
    Moment::utc(2000, 1, 1, 12, 0, 0.0)
}

fn delhi() -> Location {
    Location::new(28.6139, 77.2090).unwrap()
}

#[test]
fn test_chart_at_j2000_greenwich_equator() {
    let chart = ChartAssembler::default()
        .assemble(&j2000(), &Location::new(0.0, 0.0).unwrap())
        .unwrap();

    assert_eq!(chart.julian_day, 2451545.0);
    assert!((chart.sidereal_time.gmst - 280.46).abs() < 0.01);
    assert_eq!(chart.sidereal_time.lst, chart.sidereal_time.gmst);
    assert!((chart.ayanamsa - 23.853).abs() < 1e-9);
    assert_eq!(chart.ayanamsa_model, AyanamsaModel::Lahiri);
    assert_eq!(chart.house_system, HouseSystemKind::WholeSign);

    assert!((chart.tropical_ascendant - 11.378).abs() < 0.01);
    assert!((chart.ascendant - 347.525).abs() < 0.01);
    assert_eq!(chart.houses.cusp(1), Some(chart.ascendant));
    assert_eq!(chart.ascendant_rashi(), Rashi::Meena);
    assert_eq!(chart.planets.len(), 9);
}

#[test]
fn test_out_of_range_latitude_is_invalid_location() {
    let location = Location {
        latitude: 95.0,
        longitude: 0.0,
    };
    match ChartAssembler::default().assemble(&j2000(), &location) {
        Err(ChartError::InvalidLocation { field, value, .. }) => {
            assert_eq!(field, "latitude");
            assert_eq!(value, 95.0);
        }
        other => panic!("expected InvalidLocation, got {other:?}"),
    }
}

#[test]
fn test_polar_and_moment_errors_propagate() {
    let assembler = ChartAssembler::default();
    let tromso = Location::new(69.65, 18.96).unwrap();
    assert!(matches!(
        assembler.assemble(&j2000(), &tromso),
        Err(ChartError::UnsupportedLatitude { .. })
    ));

    let bad = Moment::utc(2021, 2, 29, 0, 0, 0.0);
    assert!(matches!(
        assembler.assemble(&bad, &delhi()),
        Err(ChartError::InvalidMoment { field: "day", .. })
    ));
}

#[test]
fn test_sidereal_longitudes_follow_ayanamsa() {
    let moment = Moment::utc(1990, 5, 15, 6, 30, 0.0).with_utc_offset(330);
    let chart = ChartAssembler::default().assemble(&moment, &delhi()).unwrap();

    for position in chart.planets.values() {
        if position.graha == Graha::Ketu {
            continue;
        }
        let shift = forward_arc(position.longitude, position.tropical_longitude);
        assert!((shift - chart.ayanamsa).abs() < 1e-9, "{}", position.graha);
    }
    assert!((forward_arc(chart.ascendant, chart.tropical_ascendant) - chart.ayanamsa).abs() < 1e-9);

    let sun = chart.planet(Graha::Sun).unwrap();
    assert_eq!(sun.rashi, Rashi::Vrishabha);
    assert!(sun.degree_in_rashi < 1.0);
    assert!(!sun.retrograde);
}

#[test]
fn test_chart_invariants_across_dates_and_places() {
    let assembler = ChartAssembler::default();
    let places = [(0.0, 0.0), (28.6139, 77.2090), (-33.87, 151.21), (40.71, -74.01), (64.9, -147.7)];

    for year in (1900..=2050).step_by(10) {
        for (lat, lon) in places {
            let moment = Moment::utc(year, 7, 14, 3, 17, 42.5);
            let chart = assembler.assemble(&moment, &Location::new(lat, lon).unwrap()).unwrap();

            assert!((0.0..360.0).contains(&chart.ascendant));
            assert!(chart.houses.iter().all(|c| (0.0..360.0).contains(c)));

            let rahu = chart.planets[&Graha::Rahu].longitude;
            let ketu = chart.planets[&Graha::Ketu].longitude;
            assert!((ketu - (rahu + 180.0).rem_euclid(360.0)).abs() < 1e-9);

            for position in chart.planets.values() {
                assert!((0.0..360.0).contains(&position.longitude));
                assert!((0.0..360.0).contains(&position.tropical_longitude));
                assert_eq!(position.house, house_for_longitude(position.longitude, &chart.houses));
                let expected = (forward_arc(chart.ascendant, position.longitude) / 30.0).floor() as u8 + 1;
                assert_eq!(position.house, expected.min(12), "{} in {year}", position.graha);
            }
        }
    }
}

#[test]
fn test_settings_drive_the_pipeline() {
    let settings = ChartSettings {
        ayanamsa: AyanamsaModel::FaganBradley,
        house_system: HouseSystemKind::SignAligned,
        polar_latitude_limit: 60.0,
    };
    let assembler = ChartAssembler::from_settings(&settings);

    let chart = assembler.assemble(&j2000(), &delhi()).unwrap();
    assert!((chart.ayanamsa - 24.736).abs() < 1e-9);
    assert_eq!(chart.house_system, HouseSystemKind::SignAligned);
    assert_eq!(chart.houses.cusp(1), Some(chart.ascendant));
    let next_sign = (chart.ascendant_rashi().start() + 30.0) % 360.0;
    assert_eq!(chart.houses.cusp(2), Some(next_sign));

    let helsinki = Location::new(60.17, 24.94).unwrap();
    assert!(matches!(
        assembler.assemble(&j2000(), &helsinki),
        Err(ChartError::UnsupportedLatitude { limit, .. }) if limit == 60.0
    ));
}

#[test]
fn test_first_cusp_is_the_ascendant_for_every_house_system() {
    let places = [(0.0, 0.0), (28.6, 77.2), (-33.87, 151.21), (51.5, -0.13)];
    for kind in HouseSystemKind::ALL {
        let assembler = ChartAssembler::from_settings(&ChartSettings {
            house_system: kind,
            ..ChartSettings::default()
        });
        for (lat, lon) in places {
            let chart = assembler.assemble(&j2000(), &Location::new(lat, lon).unwrap()).unwrap();
            assert_eq!(chart.houses.0[0], chart.ascendant, "{kind} at ({lat}, {lon})");
            let sun = chart.planets[&Graha::Sun];
            assert_eq!(sun.house, house_for_longitude(sun.longitude, &chart.houses));
        }
    }
}

#[test]
fn test_occupants_partition_the_grahas() {
    let chart = ChartAssembler::default().assemble(&j2000(), &delhi()).unwrap();
    let mut seen = 0;
    for house in 1..=12u8 {
        for position in chart.occupants(house) {
            assert_eq!(position.house, house);
            seen += 1;
        }
    }
    assert_eq!(seen, 9);
    assert_eq!(chart.occupants(13).count(), 0);

    let nodes: Vec<Graha> = chart.planets.keys().copied().filter(Graha::is_node).collect();
    assert_eq!(nodes, vec![Graha::Rahu, Graha::Ketu]);
}

#[test]
fn test_chart_json_shape() {
    let chart = ChartAssembler::default().assemble(&j2000(), &delhi()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&chart.to_json(false).unwrap()).unwrap();

    assert_eq!(value["julianDay"], 2451545.0);
    assert!(value["siderealTime"]["gmst"].is_number());
    assert_eq!(value["ayanamsaModel"]["model"], "lahiri");
    assert_eq!(value["houseSystem"], "whole_sign");
    assert_eq!(value["houses"].as_array().unwrap().len(), 12);
    assert_eq!(value["planets"].as_object().unwrap().len(), 9);
    assert!(value["planets"]["ketu"]["tropicalLongitude"].is_number());
    assert!(value["planets"]["moon"]["nakshatra"]["pada"].is_u64());

    let pretty = chart.to_json(true).unwrap();
    assert!(pretty.contains("\n  \"julianDay\""));
}

#[derive(Debug)]
struct OfflineEphemeris;

impl EphemerisSource for OfflineEphemeris {
    fn name(&self) -> &str {
        "offline"
    }

    fn positions_at(&self, julian_day: f64) -> Result<BTreeMap<Graha, f64>, ChartError> {
        Err(ChartError::EphemerisUnavailable {
            ephemeris: self.name().to_string(),
            julian_day,
            message: "data files not installed".to_string(),
        })
    }
}

#[derive(Debug)]
struct LuminariesOnly;

impl EphemerisSource for LuminariesOnly {
    fn name(&self) -> &str {
        "luminaries"
    }

    fn positions_at(&self, _julian_day: f64) -> Result<BTreeMap<Graha, f64>, ChartError> {
        Ok(BTreeMap::from([(Graha::Sun, 100.0), (Graha::Moon, 200.0)]))
    }
}

#[test]
fn test_ephemeris_failure_aborts_the_chart() {
    let assembler = ChartAssembler::default().with_ephemeris(Arc::new(OfflineEphemeris));
    match assembler.assemble(&j2000(), &delhi()) {
        Err(ChartError::EphemerisUnavailable {
            ephemeris,
            julian_day,
            message,
        }) => {
            assert_eq!(ephemeris, "offline");
            assert_eq!(julian_day, 2451545.0);
            assert_eq!(message, "data files not installed");
        }
        other => panic!("expected EphemerisUnavailable, got {other:?}"),
    }

    let assembler = ChartAssembler::default().with_ephemeris(Arc::new(LuminariesOnly));
    assert!(matches!(
        assembler.assemble(&j2000(), &delhi()),
        Err(ChartError::EphemerisUnavailable { ref message, .. }) if message.contains("mars")
    ));
}

#[test]
fn test_custom_components() {
    let corrector = AyanamsaCorrector::new(AyanamsaModel::Custom {
        reference_j2000_deg: 0.0,
        annual_rate_deg: 0.0,
        annual_acceleration_deg: 0.0,
    });
    let assembler = ChartAssembler::new(
        corrector,
        HouseCalculator::default(),
        HouseSystemKind::WholeSign.strategy(),
        Arc::new(LuminariesOnly),
    );
    // a zero ayanamsa makes the chart tropical; the missing grahas still fail it
    assert!(assembler.assemble(&j2000(), &delhi()).is_err());
    assert_eq!(assembler.corrector().ayanamsa_for(2451545.0), 0.0);
}
