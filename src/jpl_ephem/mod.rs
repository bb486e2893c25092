//! Reader for JPL DE and IMCCE INPOP binary planetary ephemerides.
//!
//! * [`ephemeris_header`]: header layout and byte-order detection,
//! * [`ephemeris_records`]: fixed-size data records,
//! * [`ephemeris_data::JplEphemeris`]: loading and position/velocity queries,
//! * [`ephemeris_source::EphemerisSource`]: `"jpl:<path>"` style source descriptions.

pub mod chebyshev;
pub mod ephemeris_data;
pub mod ephemeris_header;
pub mod ephemeris_items;
pub mod ephemeris_records;
pub mod ephemeris_source;

pub use ephemeris_data::JplEphemeris;
pub use ephemeris_items::EphemerisItem;
