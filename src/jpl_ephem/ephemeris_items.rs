/// Items that can be queried from a JPL DE / INPOP binary ephemeris.
///
/// The first twelve variants are stored in the file, in this order, each described by one
/// `(offset, n_coeffs, n_granules)` triple of the header; `Librations` is described by the
/// extra triple that follows the DE number. `Earth` and `SolarSystemBarycenter` are not
/// stored: the Earth is derived from the Earth–Moon barycenter and the geocentric Moon, and
/// the barycenter is the origin of the ephemeris.
///
/// Conversions
/// -----------
/// * Use [`TryFrom<u8>`] to convert from a raw index to an `EphemerisItem`. Invalid values
///   return an error.
/// * Use [`From<EphemerisItem>`] to recover the index (`u8`).
///
/// Examples
/// --------
/// ```rust
/// use starframe::jpl_ephem::ephemeris_items::EphemerisItem;
///
/// let item = EphemerisItem::try_from(3).unwrap();
/// assert_eq!(item, EphemerisItem::Mars);
///
/// let raw: u8 = EphemerisItem::Moon.into();
/// assert_eq!(raw, 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EphemerisItem {
    Mercury = 0,
    Venus = 1,
    EarthMoonBarycenter = 2,
    Mars = 3,
    Jupiter = 4,
    Saturn = 5,
    Uranus = 6,
    Neptune = 7,
    Pluto = 8,
    /// Geocentric Moon
    Moon = 9,
    Sun = 10,
    /// Nutation angles in longitude and obliquity (two components)
    Nutation = 11,
    /// Lunar libration angles (three components)
    Librations = 12,
    Earth = 13,
    SolarSystemBarycenter = 14,
}

/// Number of coefficient triples stored before the DE number in the header.
pub const STORED_ITEMS: usize = 12;

impl EphemerisItem {
    /// Number of interpolated components stored for this item.
    pub fn components(self) -> usize {
        match self {
            EphemerisItem::Nutation => 2,
            _ => 3,
        }
    }

    /// True for the two items that are computed instead of read from a record.
    pub fn is_derived(self) -> bool {
        matches!(
            self,
            EphemerisItem::Earth | EphemerisItem::SolarSystemBarycenter
        )
    }

    /// Items stored in a file, in header order.
    pub fn stored() -> [EphemerisItem; 13] {
        use EphemerisItem::*;
        [
            Mercury,
            Venus,
            EarthMoonBarycenter,
            Mars,
            Jupiter,
            Saturn,
            Uranus,
            Neptune,
            Pluto,
            Moon,
            Sun,
            Nutation,
            Librations,
        ]
    }
}

impl TryFrom<u8> for EphemerisItem {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EphemerisItem::Mercury),
            1 => Ok(EphemerisItem::Venus),
            2 => Ok(EphemerisItem::EarthMoonBarycenter),
            3 => Ok(EphemerisItem::Mars),
            4 => Ok(EphemerisItem::Jupiter),
            5 => Ok(EphemerisItem::Saturn),
            6 => Ok(EphemerisItem::Uranus),
            7 => Ok(EphemerisItem::Neptune),
            8 => Ok(EphemerisItem::Pluto),
            9 => Ok(EphemerisItem::Moon),
            10 => Ok(EphemerisItem::Sun),
            11 => Ok(EphemerisItem::Nutation),
            12 => Ok(EphemerisItem::Librations),
            13 => Ok(EphemerisItem::Earth),
            14 => Ok(EphemerisItem::SolarSystemBarycenter),
            _ => Err(format!("Invalid ephemeris item: {value}")),
        }
    }
}

impl From<EphemerisItem> for u8 {
    fn from(item: EphemerisItem) -> Self {
        item as u8
    }
}
