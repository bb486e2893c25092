use nom::{
    multi::count,
    number::{complete as number, Endianness},
    IResult, Parser,
};

use super::ephemeris_header::CoefficientInfo;

/// One fixed-size data record of a DE / INPOP file.
///
/// A record covers `[t0, t1]` (TDB Julian dates) and packs, item after item, the Chebyshev
/// coefficients of every granule: for an item with `n` coefficients and `c` components, each
/// granule holds `c` consecutive blocks of `n` coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisRecord {
    pub t0: f64,
    pub t1: f64,
    /// Coefficients, dates excluded
    pub coeffs: Vec<f64>,
}

impl EphemerisRecord {
    /// Decode one record of `record_size` doubles.
    ///
    /// Arguments
    /// -----------------
    /// * `input`: the raw record bytes
    /// * `endian`: byte order of the file
    /// * `record_size`: number of doubles in the record, dates included
    pub fn parse(input: &[u8], endian: Endianness, record_size: usize) -> IResult<&[u8], Self> {
        let (input, t0) = number::f64(endian)(input)?;
        let (input, t1) = number::f64(endian)(input)?;
        let (input, coeffs) =
            count(number::f64(endian), record_size.saturating_sub(2)).parse(input)?;

        Ok((input, EphemerisRecord { t0, t1, coeffs }))
    }

    /// Coefficients of one component of an item in a granule.
    ///
    /// The slice is empty if the layout points outside the record, which a validated header
    /// rules out.
    pub fn component(
        &self,
        info: &CoefficientInfo,
        granule: usize,
        component: usize,
        components: usize,
    ) -> &[f64] {
        let start = info.start_index(granule, component, components);
        self.coeffs
            .get(start..start + info.n_coeffs)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod test_ephemeris_records {
    use super::*;

    fn record_bytes(values: &[f64]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_ne_bytes()).collect()
    }

    #[test]
    fn test_parse_record() {
        let bytes = record_bytes(&[10.0, 42.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let (rest, record) = EphemerisRecord::parse(&bytes, Endianness::Native, 8).unwrap();

        assert!(rest.is_empty());
        assert_eq!(record.t0, 10.0);
        assert_eq!(record.t1, 42.0);
        assert_eq!(record.coeffs, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_short_record_fails() {
        let bytes = record_bytes(&[10.0, 42.0, 1.0]);
        assert!(EphemerisRecord::parse(&bytes, Endianness::Native, 8).is_err());
    }

    #[test]
    fn test_component_slices() {
        let record = EphemerisRecord {
            t0: 0.0,
            t1: 32.0,
            coeffs: (0..12).map(f64::from).collect(),
        };
        // two granules of 2 coefficients for a 3-component item
        let info = CoefficientInfo {
            offset: 3,
            n_coeffs: 2,
            n_granules: 2,
        };

        assert_eq!(record.component(&info, 0, 0, 3), &[0.0, 1.0]);
        assert_eq!(record.component(&info, 0, 2, 3), &[4.0, 5.0]);
        assert_eq!(record.component(&info, 1, 1, 3), &[8.0, 9.0]);

        let outside = CoefficientInfo {
            offset: 20,
            n_coeffs: 2,
            n_granules: 1,
        };
        assert!(record.component(&outside, 0, 0, 3).is_empty());
    }
}
