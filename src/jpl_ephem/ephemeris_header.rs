//! Header of a JPL DE / INPOP binary ephemeris.
//!
//! The first record of the file is a fixed layout followed by padding up to the record size:
//!
//! | Offset | Content                                                           |
//! |-------:|-------------------------------------------------------------------|
//! |      0 | three 84-byte title labels                                        |
//! |    252 | 400 six-character constant names                                  |
//! |   2652 | start date, end date, days per record (3 × `f64`)                 |
//! |   2676 | number of constants (`u32`)                                       |
//! |   2680 | kilometers per AU, Earth/Moon mass ratio (2 × `f64`)              |
//! |   2696 | 12 coefficient triples `(offset, n_coeffs, n_granules)` (`u32`)   |
//! |   2840 | ephemeris number (`u32`)                                          |
//! |   2844 | libration coefficient triple                                      |
//! |   2856 | INPOP only: record size in doubles (`u32`)                        |
//!
//! Neither format records its byte order. [`detect_byte_order`] reads the ephemeris number
//! under both assumptions and classifies the file; every other field is then decoded with
//! the detected order.

use std::fmt;

use nom::{
    bytes::complete::take,
    multi::count,
    number::{complete as number, Endianness},
    IResult, Parser,
};

use crate::starframe_errors::StarframeError;

use super::{
    chebyshev::MAX_CHEBYSHEV_COEFFS,
    ephemeris_items::{EphemerisItem, STORED_ITEMS},
};

const LABEL_SIZE: usize = 84;
const LABEL_COUNT: usize = 3;
const CONSTANT_NAME_SIZE: usize = 6;
const CONSTANT_NAME_COUNT: usize = 400;

/// Byte offset of the ephemeris number.
pub const EPHEMERIS_NUMBER_OFFSET: usize = 2840;

/// Number of bytes of the first record actually decoded.
pub const HEADER_LEN: usize = 2860;

/// Ephemeris number written by INPOP files in place of a DE number.
pub const INPOP_NUMBER: u32 = 100;

/// Smallest ephemeris number accepted as a JPL DE file.
const MIN_DE_NUMBER: u32 = 200;

/// Any DE number above this value must have been read with the wrong byte order.
const MAX_DE_NUMBER: u32 = 1 << 15;

/// Byte order of the numeric fields of an ephemeris file, relative to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Native,
    Swapped,
}

impl ByteOrder {
    /// nom endianness to decode fields written in this order.
    pub fn endianness(self) -> Endianness {
        match self {
            ByteOrder::Native => Endianness::Native,
            ByteOrder::Swapped if cfg!(target_endian = "little") => Endianness::Big,
            ByteOrder::Swapped => Endianness::Little,
        }
    }
}

/// Family of the ephemeris file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EphemerisKind {
    /// JPL Development Ephemeris (DE200, DE405, DE406, ...)
    De,
    /// IMCCE INPOP, written in the DE layout with an explicit record size
    Inpop,
}

impl fmt::Display for EphemerisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EphemerisKind::De => write!(f, "DE"),
            EphemerisKind::Inpop => write!(f, "INPOP"),
        }
    }
}

/// Classify a file from its raw ephemeris-number field.
///
/// Arguments
/// ---------
/// * `raw`: the four bytes at [`EPHEMERIS_NUMBER_OFFSET`], read in host order
///
/// Return
/// ------
/// * the file family and the byte order of its numeric fields
/// * [`StarframeError::UnknownEphemerisNumber`] if neither order gives a plausible number
pub fn classify_ephemeris_number(raw: u32) -> Result<(EphemerisKind, ByteOrder), StarframeError> {
    let swapped = raw.swap_bytes();

    if raw == INPOP_NUMBER {
        Ok((EphemerisKind::Inpop, ByteOrder::Native))
    } else if swapped == INPOP_NUMBER {
        Ok((EphemerisKind::Inpop, ByteOrder::Swapped))
    } else if raw > MAX_DE_NUMBER && swapped >= MIN_DE_NUMBER {
        Ok((EphemerisKind::De, ByteOrder::Swapped))
    } else if (MIN_DE_NUMBER..=MAX_DE_NUMBER).contains(&raw) {
        Ok((EphemerisKind::De, ByteOrder::Native))
    } else {
        Err(StarframeError::UnknownEphemerisNumber(raw))
    }
}

/// Read the ephemeris number at its fixed offset and classify the file.
///
/// `input` must start at the beginning of the file.
pub fn detect_byte_order(input: &[u8]) -> Result<(EphemerisKind, ByteOrder), StarframeError> {
    let (input, _) = take::<_, _, nom::error::Error<&[u8]>>(EPHEMERIS_NUMBER_OFFSET)(input)?;
    let (_, raw) = parse_u32(input, Endianness::Native)?;
    classify_ephemeris_number(raw)
}

/// Location of one item's coefficients inside a data record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoefficientInfo {
    /// 1-based position, in doubles, of the first coefficient in the record (the two record
    /// dates occupy positions 1 and 2)
    pub offset: usize,
    /// Chebyshev coefficients per component and granule
    pub n_coeffs: usize,
    /// Number of sub-intervals the record is split into for this item
    pub n_granules: usize,
}

impl CoefficientInfo {
    /// True when the file carries no data for this item.
    pub fn is_empty(&self) -> bool {
        self.n_coeffs == 0
    }

    /// Number of doubles used by this item in one record, for `components` components.
    pub fn len(&self, components: usize) -> usize {
        self.n_coeffs * self.n_granules * components
    }

    /// Index, in the coefficient array of a record (dates excluded), of the first coefficient
    /// of `component` in `granule`.
    pub fn start_index(&self, granule: usize, component: usize, components: usize) -> usize {
        (self.offset - 3) + granule * self.n_coeffs * components + component * self.n_coeffs
    }
}

/// Decoded header of a DE / INPOP ephemeris.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisHeader {
    pub labels: Vec<String>,
    pub constant_names: Vec<String>,
    pub kind: EphemerisKind,
    pub byte_order: ByteOrder,
    /// DE number (405, 430, ...) or 100 for INPOP
    pub ephemeris_number: u32,
    pub start_date: f64,
    pub end_date: f64,
    pub days_per_interval: f64,
    pub n_constants: u32,
    pub km_per_au: f64,
    pub earth_moon_mass_ratio: f64,
    /// Indexed by [`EphemerisItem`] for the 13 stored items
    pub coefficient_info: [CoefficientInfo; STORED_ITEMS + 1],
    /// Size of one record, in doubles
    pub record_size: usize,
}

fn parse_u32(input: &[u8], endian: Endianness) -> IResult<&[u8], u32> {
    number::u32(endian)(input)
}

fn parse_f64(input: &[u8], endian: Endianness) -> IResult<&[u8], f64> {
    number::f64(endian)(input)
}

fn parse_label(input: &[u8], size: usize) -> IResult<&[u8], String> {
    let (rest, raw) = take(size)(input)?;
    Ok((rest, String::from_utf8_lossy(raw).trim_end().to_string()))
}

fn parse_triple(input: &[u8], endian: Endianness) -> IResult<&[u8], CoefficientInfo> {
    let (input, offset) = parse_u32(input, endian)?;
    let (input, n_coeffs) = parse_u32(input, endian)?;
    let (input, n_granules) = parse_u32(input, endian)?;
    Ok((
        input,
        CoefficientInfo {
            offset: offset as usize,
            n_coeffs: n_coeffs as usize,
            n_granules: n_granules as usize,
        },
    ))
}

/// Record size of a DE file, in doubles, deduced from the item layout.
fn compute_record_size(info: &[CoefficientInfo; STORED_ITEMS + 1]) -> usize {
    EphemerisItem::stored()
        .iter()
        .zip(info.iter())
        .filter(|(_, ci)| !ci.is_empty())
        .map(|(item, ci)| ci.offset - 1 + ci.len(item.components()))
        .max()
        .unwrap_or(0)
}

impl EphemerisHeader {
    /// Decode the header from the first bytes of the file.
    ///
    /// Arguments
    /// -----------------
    /// * `input`: at least [`HEADER_LEN`] bytes from the start of the file
    /// * `kind`, `byte_order`: the classification returned by [`detect_byte_order`]
    ///
    /// Return
    /// ----------
    /// * the remaining input and the decoded header, without any layout validation
    pub fn parse(
        input: &[u8],
        kind: EphemerisKind,
        byte_order: ByteOrder,
    ) -> IResult<&[u8], Self> {
        let endian = byte_order.endianness();

        let (input, labels) = count(|i| parse_label(i, LABEL_SIZE), LABEL_COUNT).parse(input)?;
        let (input, constant_names) =
            count(|i| parse_label(i, CONSTANT_NAME_SIZE), CONSTANT_NAME_COUNT).parse(input)?;

        let (input, start_date) = parse_f64(input, endian)?;
        let (input, end_date) = parse_f64(input, endian)?;
        let (input, days_per_interval) = parse_f64(input, endian)?;
        let (input, n_constants) = parse_u32(input, endian)?;
        let (input, km_per_au) = parse_f64(input, endian)?;
        let (input, earth_moon_mass_ratio) = parse_f64(input, endian)?;

        let mut coefficient_info = [CoefficientInfo::default(); STORED_ITEMS + 1];
        let (input, triples) = count(|i| parse_triple(i, endian), STORED_ITEMS).parse(input)?;
        coefficient_info[..STORED_ITEMS].copy_from_slice(&triples);

        let (input, ephemeris_number) = parse_u32(input, endian)?;
        let (input, librations) = parse_triple(input, endian)?;
        coefficient_info[EphemerisItem::Librations as usize] = librations;

        let (input, record_size) = match kind {
            EphemerisKind::Inpop => {
                let (input, size) = parse_u32(input, endian)?;
                (input, size as usize)
            }
            EphemerisKind::De => (input, compute_record_size(&coefficient_info)),
        };

        Ok((
            input,
            EphemerisHeader {
                labels,
                constant_names,
                kind,
                byte_order,
                ephemeris_number,
                start_date,
                end_date,
                days_per_interval,
                n_constants,
                km_per_au,
                earth_moon_mass_ratio,
                coefficient_info,
                record_size,
            },
        ))
    }

    /// Coefficient layout of a stored item, `None` for derived items.
    pub fn coefficient_info(&self, item: EphemerisItem) -> Option<&CoefficientInfo> {
        if item.is_derived() {
            None
        } else {
            self.coefficient_info.get(item as usize)
        }
    }

    /// Record size in bytes.
    pub fn record_bytes(&self) -> usize {
        self.record_size * 8
    }

    /// Number of data records the date range calls for.
    pub fn expected_record_count(&self) -> usize {
        ((self.end_date - self.start_date) / self.days_per_interval).round() as usize
    }

    /// Check that the decoded values describe a usable file.
    ///
    /// Return
    /// ----------
    /// * [`StarframeError::InvalidEphemerisLayout`] when the date range, a coefficient triple
    ///   or the record size is inconsistent
    pub fn validate(&self) -> Result<(), StarframeError> {
        let invalid = |msg: String| Err(StarframeError::InvalidEphemerisLayout(msg));

        let dates_valid = self.start_date.is_finite()
            && self.end_date.is_finite()
            && self.days_per_interval.is_finite()
            && self.days_per_interval > 0.0
            && self.end_date > self.start_date;
        if !dates_valid {
            return invalid(format!(
                "bad date range [{}, {}] with {} days per record",
                self.start_date, self.end_date, self.days_per_interval
            ));
        }

        if self.expected_record_count() == 0 {
            return invalid("date range shorter than one record".into());
        }

        if self.record_bytes() < HEADER_LEN {
            return invalid(format!(
                "record size of {} bytes is smaller than the header",
                self.record_bytes()
            ));
        }

        for (item, info) in EphemerisItem::stored().iter().zip(self.coefficient_info.iter()) {
            if info.is_empty() {
                continue;
            }
            if info.n_coeffs > MAX_CHEBYSHEV_COEFFS {
                return invalid(format!(
                    "{item:?} has {} coefficients, at most {MAX_CHEBYSHEV_COEFFS} are supported",
                    info.n_coeffs
                ));
            }
            if info.n_granules == 0 || info.offset < 3 {
                return invalid(format!("{item:?} has an invalid coefficient triple {info:?}"));
            }
            if info.offset - 1 + info.len(item.components()) > self.record_size {
                return invalid(format!(
                    "{item:?} coefficients overflow the {} doubles of a record",
                    self.record_size
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test_ephemeris_header {
    use super::*;

    #[test]
    fn test_classify_native_de() {
        assert_eq!(
            classify_ephemeris_number(405),
            Ok((EphemerisKind::De, ByteOrder::Native))
        );
        assert_eq!(
            classify_ephemeris_number(1 << 15),
            Ok((EphemerisKind::De, ByteOrder::Native))
        );
    }

    #[test]
    fn test_classify_swapped_de() {
        assert_eq!(
            classify_ephemeris_number(405u32.swap_bytes()),
            Ok((EphemerisKind::De, ByteOrder::Swapped))
        );
    }

    #[test]
    fn test_classify_inpop() {
        assert_eq!(
            classify_ephemeris_number(100),
            Ok((EphemerisKind::Inpop, ByteOrder::Native))
        );
        assert_eq!(
            classify_ephemeris_number(100u32.swap_bytes()),
            Ok((EphemerisKind::Inpop, ByteOrder::Swapped))
        );
    }

    #[test]
    fn test_classify_rejects_implausible_numbers() {
        assert_eq!(
            classify_ephemeris_number(0),
            Err(StarframeError::UnknownEphemerisNumber(0))
        );
        assert_eq!(
            classify_ephemeris_number(150),
            Err(StarframeError::UnknownEphemerisNumber(150))
        );
    }

    #[test]
    fn test_swapped_endianness_is_opposite_of_host() {
        let value: u32 = 0x0102_0304;
        let bytes = value.to_ne_bytes();
        let swapped = value.swap_bytes().to_ne_bytes();

        let (_, native) = parse_u32(&bytes, ByteOrder::Native.endianness()).unwrap();
        let (_, other) = parse_u32(&swapped, ByteOrder::Swapped.endianness()).unwrap();
        assert_eq!(native, value);
        assert_eq!(other, value);
    }

    #[test]
    fn test_record_size_from_layout() {
        let mut info = [CoefficientInfo::default(); STORED_ITEMS + 1];
        info[0] = CoefficientInfo {
            offset: 3,
            n_coeffs: 14,
            n_granules: 4,
        };
        info[EphemerisItem::Nutation as usize] = CoefficientInfo {
            offset: 171,
            n_coeffs: 10,
            n_granules: 4,
        };
        // mercury ends at 2 + 168, nutation at 170 + 80
        assert_eq!(compute_record_size(&info), 250);
    }

    #[test]
    fn test_start_index() {
        let info = CoefficientInfo {
            offset: 3,
            n_coeffs: 13,
            n_granules: 8,
        };
        assert_eq!(info.start_index(0, 0, 3), 0);
        assert_eq!(info.start_index(0, 2, 3), 26);
        assert_eq!(info.start_index(1, 0, 3), 39);
    }
}
