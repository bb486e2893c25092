//! In-memory JPL DE / INPOP ephemeris and its position queries.
//!
//! Loading
//! -------
//! [`JplEphemeris::load`] reads the whole file from any [`Read`] source:
//!
//! 1. the first [`HEADER_LEN`] bytes are buffered and the byte order is detected from the
//!    ephemeris number,
//! 2. the same buffer is decoded again as a full header with that byte order,
//! 3. the rest of the header record and the constants record are skipped,
//! 4. the data records required by the date range are read one by one.
//!
//! A file that ends before the last expected record is rejected as a whole. Bytes after the
//! last expected record are ignored.
//!
//! Queries
//! -------
//! Query times are TDB Julian dates. Times outside `[start_date, end_date]` are clamped to
//! the nearest bound, so a query never fails. Positions are in kilometers, velocities in
//! kilometers per day, in the ICRF/equatorial J2000 frame of the file, relative to the solar
//! system barycenter except for the Moon, which is geocentric.

use std::{
    fs::File,
    io::{self, BufReader, Read},
};

use camino::Utf8Path;
use hifitime::Epoch;
use log::debug;
use nalgebra::Vector3;

use crate::{constants::JulianDay, starframe_errors::StarframeError, time::epoch_to_tdb};

use super::{
    chebyshev::{chebyshev_derivative_sum, chebyshev_sum},
    ephemeris_header::{
        detect_byte_order, ByteOrder, CoefficientInfo, EphemerisHeader, EphemerisKind,
        HEADER_LEN,
    },
    ephemeris_items::EphemerisItem,
    ephemeris_records::EphemerisRecord,
    ephemeris_source::EphemerisSource,
};

/// A fully loaded, read-only DE / INPOP ephemeris.
#[derive(Debug, Clone)]
pub struct JplEphemeris {
    header: EphemerisHeader,
    records: Vec<EphemerisRecord>,
}

/// Skip `n` bytes of `reader`, returning how many were actually available.
fn skip_bytes<R: Read>(reader: &mut R, n: usize) -> io::Result<u64> {
    io::copy(&mut reader.by_ref().take(n as u64), &mut io::sink())
}

impl JplEphemeris {
    /// Decode an ephemeris from a byte stream.
    ///
    /// Arguments
    /// -----------------
    /// * `reader`: the binary file, positioned at its first byte
    ///
    /// Return
    /// ----------
    /// * the loaded ephemeris
    /// * [`StarframeError::UnknownEphemerisNumber`] if the byte order cannot be determined,
    ///   [`StarframeError::InvalidEphemerisLayout`] or [`StarframeError::NomParsingError`]
    ///   for a malformed header, [`StarframeError::TruncatedEphemeris`] if the stream ends
    ///   early
    pub fn load<R: Read>(mut reader: R) -> Result<Self, StarframeError> {
        let mut header_bytes = vec![0u8; HEADER_LEN];
        reader.read_exact(&mut header_bytes).map_err(|err| match err.kind() {
            io::ErrorKind::UnexpectedEof => StarframeError::InvalidEphemerisLayout(format!(
                "file shorter than the {HEADER_LEN} byte header"
            )),
            _ => StarframeError::IoError(err),
        })?;

        let (kind, byte_order) = detect_byte_order(&header_bytes)?;
        let (_, header) = EphemerisHeader::parse(&header_bytes, kind, byte_order)?;
        header.validate()?;

        let record_bytes = header.record_bytes();
        let expected = header.expected_record_count();

        // remainder of the header record, then the constants record
        let to_skip = record_bytes - HEADER_LEN + record_bytes;
        let skipped = skip_bytes(&mut reader, to_skip)?;
        if skipped < to_skip as u64 {
            return Err(StarframeError::TruncatedEphemeris { expected, read: 0 });
        }

        let endian = byte_order.endianness();
        let mut buffer = vec![0u8; record_bytes];
        let mut records = Vec::with_capacity(expected);

        for read in 0..expected {
            reader.read_exact(&mut buffer).map_err(|err| match err.kind() {
                io::ErrorKind::UnexpectedEof => {
                    StarframeError::TruncatedEphemeris { expected, read }
                }
                _ => StarframeError::IoError(err),
            })?;

            let (_, record) = EphemerisRecord::parse(&buffer, endian, header.record_size)?;
            records.push(record);
        }

        debug!(
            "Loaded {}{} ephemeris ({:?} byte order): {} records of {} days over [{}, {}]",
            header.kind,
            header.ephemeris_number,
            header.byte_order,
            records.len(),
            header.days_per_interval,
            header.start_date,
            header.end_date
        );

        Ok(JplEphemeris { header, records })
    }

    /// Same as [`Self::load`], reporting only whether the ephemeris is available.
    pub fn load_opt<R: Read>(reader: R) -> Option<Self> {
        JplEphemeris::load(reader)
            .map_err(|err| debug!("Ephemeris unavailable: {err}"))
            .ok()
    }

    /// Load an ephemeris file from disk.
    pub fn from_path(path: &Utf8Path) -> Result<Self, StarframeError> {
        let file = File::open(path)?;
        JplEphemeris::load(BufReader::new(file))
    }

    /// Load the file described by an [`EphemerisSource`].
    ///
    /// Return
    /// ----------
    /// * [`StarframeError::InvalidEphemerisSource`] if the source names a family the file does
    ///   not belong to
    pub fn from_source(source: &EphemerisSource) -> Result<Self, StarframeError> {
        let ephemeris = JplEphemeris::from_path(source.path())?;

        match source.expected_kind() {
            Some(kind) if kind != ephemeris.kind() => {
                Err(StarframeError::InvalidEphemerisSource(format!(
                    "{source} is a {} ephemeris, not {kind}",
                    ephemeris.kind()
                )))
            }
            _ => Ok(ephemeris),
        }
    }

    pub fn header(&self) -> &EphemerisHeader {
        &self.header
    }

    /// DE number, or 100 for an INPOP file.
    pub fn ephemeris_number(&self) -> u32 {
        self.header.ephemeris_number
    }

    pub fn kind(&self) -> EphemerisKind {
        self.header.kind
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.header.byte_order
    }

    pub fn start_date(&self) -> JulianDay {
        self.header.start_date
    }

    pub fn end_date(&self) -> JulianDay {
        self.header.end_date
    }

    pub fn days_per_interval(&self) -> f64 {
        self.header.days_per_interval
    }

    pub fn km_per_au(&self) -> f64 {
        self.header.km_per_au
    }

    pub fn earth_moon_mass_ratio(&self) -> f64 {
        self.header.earth_moon_mass_ratio
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Position of an item at `t` (TDB Julian date), in kilometers.
    ///
    /// * `SolarSystemBarycenter` is the origin and always returns zero.
    /// * `Earth` is derived as `EMB − Moon / (EMRAT + 1)`.
    /// * `Nutation` returns its two angles in `x` and `y` (radians).
    /// * `Librations` returns the three libration angles (radians).
    /// * An item absent from the file returns zero.
    pub fn planet_position(&self, item: EphemerisItem, t: JulianDay) -> Vector3<f64> {
        self.evaluate(item, t, chebyshev_sum, |_| 1.0)
    }

    /// Velocity of an item at `t`, in kilometers (or radians) per day.
    ///
    /// Obtained by differentiating the Chebyshev series, with the same derived items as
    /// [`Self::planet_position`].
    pub fn planet_velocity(&self, item: EphemerisItem, t: JulianDay) -> Vector3<f64> {
        self.evaluate(item, t, chebyshev_derivative_sum, |days_per_granule| {
            2.0 / days_per_granule
        })
    }

    /// [`Self::planet_position`] at a hifitime epoch, in any time scale.
    pub fn planet_position_at_epoch(&self, item: EphemerisItem, epoch: &Epoch) -> Vector3<f64> {
        self.planet_position(item, epoch_to_tdb(epoch))
    }

    /// [`Self::planet_velocity`] at a hifitime epoch, in any time scale.
    pub fn planet_velocity_at_epoch(&self, item: EphemerisItem, epoch: &Epoch) -> Vector3<f64> {
        self.planet_velocity(item, epoch_to_tdb(epoch))
    }

    fn evaluate(
        &self,
        item: EphemerisItem,
        t: JulianDay,
        series: fn(&[f64], f64) -> f64,
        scale: fn(f64) -> f64,
    ) -> Vector3<f64> {
        match item {
            EphemerisItem::SolarSystemBarycenter => Vector3::zeros(),
            EphemerisItem::Earth => {
                let emb = self.interpolate(EphemerisItem::EarthMoonBarycenter, t, series, scale);
                let moon = self.interpolate(EphemerisItem::Moon, t, series, scale);
                emb - moon / (self.header.earth_moon_mass_ratio + 1.0)
            }
            _ => self.interpolate(item, t, series, scale),
        }
    }

    /// Index of the record holding `t`, with `t` already clamped to the date range.
    fn record_index(&self, t: JulianDay) -> usize {
        let index = ((t - self.header.start_date) / self.header.days_per_interval) as usize;
        index.min(self.records.len().saturating_sub(1))
    }

    fn interpolate(
        &self,
        item: EphemerisItem,
        t: JulianDay,
        series: fn(&[f64], f64) -> f64,
        scale: fn(f64) -> f64,
    ) -> Vector3<f64> {
        let info: CoefficientInfo = match self.header.coefficient_info(item) {
            Some(info) if !info.is_empty() => *info,
            _ => return Vector3::zeros(),
        };
        let t = t.clamp(self.header.start_date, self.header.end_date);
        let Some(record) = self.records.get(self.record_index(t)) else {
            return Vector3::zeros();
        };

        let days_per_granule = self.header.days_per_interval / info.n_granules as f64;

        let (granule, u) = if info.n_granules == 1 {
            (0, 2.0 * (t - record.t0) / self.header.days_per_interval - 1.0)
        } else {
            let granule = (((t - record.t0) / days_per_granule).max(0.0) as usize)
                .min(info.n_granules - 1);
            let granule_start = record.t0 + days_per_granule * granule as f64;
            (granule, 2.0 * (t - granule_start) / days_per_granule - 1.0)
        };

        let components = item.components();
        let factor = scale(days_per_granule);
        let mut out = Vector3::zeros();
        for c in 0..components {
            out[c] = series(record.component(&info, granule, c, components), u) * factor;
        }
        out
    }
}
