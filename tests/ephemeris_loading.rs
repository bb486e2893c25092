mod common;

use std::io::Write;

use approx::assert_relative_eq;
use camino::Utf8PathBuf;
use nalgebra::Vector3;
use starframe::jpl_ephem::{
    ephemeris_header::{ByteOrder, EphemerisKind},
    ephemeris_source::EphemerisSource,
    EphemerisItem, JplEphemeris,
};
use starframe::StarframeError;

use common::{quadratic_ephemeris, SyntheticEphemeris, DE405, INPOP};

const START: f64 = 2_451_545.0;
const END: f64 = 2_451_565.0;

/// One coefficient per component: each record holds a constant position that encodes the
/// record number.
fn step_ephemeris(builder: &SyntheticEphemeris) -> Vec<u8> {
    let interval = builder.interval;
    builder.to_bytes(|item, component, mid, _| {
        let record = (mid / interval).floor();
        vec![1000.0 * (record + 1.0) + 10.0 * item as usize as f64 + component as f64]
    })
}

#[test]
fn test_byte_order_detection() {
    let cases = [
        (SyntheticEphemeris::new(DE405, START, END, 10.0), EphemerisKind::De, ByteOrder::Native),
        (
            SyntheticEphemeris::new(DE405, START, END, 10.0).swapped(),
            EphemerisKind::De,
            ByteOrder::Swapped,
        ),
        (SyntheticEphemeris::new(INPOP, START, END, 10.0), EphemerisKind::Inpop, ByteOrder::Native),
        (
            SyntheticEphemeris::new(INPOP, START, END, 10.0).swapped(),
            EphemerisKind::Inpop,
            ByteOrder::Swapped,
        ),
    ];

    for (builder, kind, order) in cases {
        let bytes = step_ephemeris(&builder);
        let ephem = JplEphemeris::load(bytes.as_slice()).unwrap();

        assert_eq!(ephem.kind(), kind);
        assert_eq!(ephem.byte_order(), order);
        assert_eq!(ephem.ephemeris_number(), builder.ephemeris_number);
        assert_eq!(ephem.start_date(), START);
        assert_eq!(ephem.end_date(), END);
        assert_eq!(ephem.days_per_interval(), 10.0);
        assert_eq!(ephem.record_count(), 2);
        assert_eq!(ephem.earth_moon_mass_ratio(), builder.earth_moon_mass_ratio);
        assert_eq!(ephem.header().labels[0], "SYNTHETIC EPHEMERIS");
        assert_eq!(ephem.header().record_size, builder.layout().1);
    }
}

#[test]
fn test_swapped_file_decodes_like_native() {
    let native = SyntheticEphemeris::new(DE405, START, END, 10.0).with_coeffs(3);
    let swapped = SyntheticEphemeris::new(DE405, START, END, 10.0)
        .with_coeffs(3)
        .swapped();

    let a = JplEphemeris::load(quadratic_ephemeris(&native).as_slice()).unwrap();
    let b = JplEphemeris::load(quadratic_ephemeris(&swapped).as_slice()).unwrap();

    for t in [START, START + 3.3, START + 12.0, END] {
        assert_eq!(
            a.planet_position(EphemerisItem::Mars, t),
            b.planet_position(EphemerisItem::Mars, t)
        );
    }
}

#[test]
fn test_two_record_scenario() {
    let builder = SyntheticEphemeris::new(DE405, START, END, 10.0);
    let ephem = JplEphemeris::load(step_ephemeris(&builder).as_slice()).unwrap();

    // Jupiter is item 4
    let first = ephem.planet_position(EphemerisItem::Jupiter, START);
    assert_eq!(first, Vector3::new(1040.0, 1041.0, 1042.0));

    let last = ephem.planet_position(EphemerisItem::Jupiter, END);
    assert_eq!(last, Vector3::new(2040.0, 2041.0, 2042.0));

    let beyond = ephem.planet_position(EphemerisItem::Jupiter, 2_451_575.0);
    assert_eq!(beyond, last);

    let before = ephem.planet_position(EphemerisItem::Jupiter, 2_400_000.0);
    assert_eq!(before, first);

    assert_eq!(
        ephem.planet_position(EphemerisItem::SolarSystemBarycenter, START + 4.0),
        Vector3::zeros()
    );
}

#[test]
fn test_nutation_has_two_components() {
    let builder = SyntheticEphemeris::new(DE405, START, END, 10.0);
    let ephem = JplEphemeris::load(step_ephemeris(&builder).as_slice()).unwrap();

    let nutation = ephem.planet_position(EphemerisItem::Nutation, START + 1.0);
    assert_eq!(nutation, Vector3::new(1110.0, 1111.0, 0.0));
}

#[test]
fn test_truncated_stream() {
    let builder = SyntheticEphemeris::new(DE405, START, END, 10.0);
    let mut bytes = step_ephemeris(&builder);
    let record_bytes = builder.layout().1 * 8;

    bytes.truncate(bytes.len() - record_bytes / 2);
    assert_eq!(
        JplEphemeris::load(bytes.as_slice()).unwrap_err(),
        StarframeError::TruncatedEphemeris {
            expected: 2,
            read: 1
        }
    );

    bytes.truncate(record_bytes + 10);
    assert_eq!(
        JplEphemeris::load(bytes.as_slice()).unwrap_err(),
        StarframeError::TruncatedEphemeris {
            expected: 2,
            read: 0
        }
    );
    assert!(JplEphemeris::load_opt(bytes.as_slice()).is_none());
}

#[test]
fn test_trailing_bytes_are_ignored() {
    let builder = SyntheticEphemeris::new(DE405, START, END, 10.0);
    let mut bytes = step_ephemeris(&builder);
    bytes.extend_from_slice(&[0xAB; 1000]);

    let ephem = JplEphemeris::load(bytes.as_slice()).unwrap();
    assert_eq!(ephem.record_count(), 2);
}

#[test]
fn test_unknown_ephemeris_number() {
    let builder = SyntheticEphemeris::new(42, START, END, 10.0);
    let err = JplEphemeris::load(step_ephemeris(&builder).as_slice()).unwrap_err();
    assert_eq!(err, StarframeError::UnknownEphemerisNumber(42));
}

#[test]
fn test_bad_date_range_is_rejected() {
    let builder = SyntheticEphemeris::new(DE405, END, START, 10.0);
    let err = JplEphemeris::load(step_ephemeris(&builder).as_slice()).unwrap_err();
    assert!(matches!(err, StarframeError::InvalidEphemerisLayout(_)));
}

#[test]
fn test_load_from_source() {
    let builder = SyntheticEphemeris::new(DE405, START, END, 10.0).with_coeffs(3);
    let bytes = quadratic_ephemeris(&builder);

    let dir = std::env::temp_dir();
    let path = Utf8PathBuf::from_path_buf(dir.join(format!(
        "starframe_synthetic_{}.bin",
        std::process::id()
    )))
    .unwrap();
    std::fs::File::create(&path)
        .unwrap()
        .write_all(&bytes)
        .unwrap();

    let source: EphemerisSource = format!("jpl:{path}").parse().unwrap();
    let ephem = JplEphemeris::from_source(&source).unwrap();
    assert_eq!(ephem.ephemeris_number(), DE405);
    assert_relative_eq!(
        ephem.planet_position(EphemerisItem::Sun, START),
        JplEphemeris::load(bytes.as_slice())
            .unwrap()
            .planet_position(EphemerisItem::Sun, START)
    );

    let inpop: EphemerisSource = format!("inpop:{path}").parse().unwrap();
    assert!(matches!(
        JplEphemeris::from_source(&inpop),
        Err(StarframeError::InvalidEphemerisSource(_))
    ));

    std::fs::remove_file(&path).unwrap();
}
