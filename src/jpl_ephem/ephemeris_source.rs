//! Textual description of where an ephemeris file lives.
//!
//! Accepted forms:
//!
//! * `"jpl:<path>"`: a JPL DE binary file,
//! * `"inpop:<path>"`: an IMCCE INPOP binary file,
//! * `"<path>"`: either family, classified from the file itself.
//!
//! ```rust
//! use std::str::FromStr;
//! use starframe::jpl_ephem::ephemeris_source::EphemerisSource;
//!
//! let source = EphemerisSource::from_str("jpl:/data/lnxp1600p2200.405").unwrap();
//! assert_eq!(source.path().as_str(), "/data/lnxp1600p2200.405");
//! ```

use std::{fmt, str::FromStr};

use camino::{Utf8Path, Utf8PathBuf};

use crate::starframe_errors::StarframeError;

use super::ephemeris_header::EphemerisKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EphemerisSource {
    Jpl(Utf8PathBuf),
    Inpop(Utf8PathBuf),
    Path(Utf8PathBuf),
}

impl EphemerisSource {
    pub fn path(&self) -> &Utf8Path {
        match self {
            EphemerisSource::Jpl(p) | EphemerisSource::Inpop(p) | EphemerisSource::Path(p) => p,
        }
    }

    /// Family the file must belong to, if the source names one.
    pub fn expected_kind(&self) -> Option<EphemerisKind> {
        match self {
            EphemerisSource::Jpl(_) => Some(EphemerisKind::De),
            EphemerisSource::Inpop(_) => Some(EphemerisKind::Inpop),
            EphemerisSource::Path(_) => None,
        }
    }
}

impl FromStr for EphemerisSource {
    type Err = StarframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let non_empty = |p: &str| {
            if p.is_empty() {
                Err(StarframeError::InvalidEphemerisSource(format!(
                    "missing file path in {s:?}"
                )))
            } else {
                Ok(Utf8PathBuf::from(p))
            }
        };

        match s.split_once(':') {
            Some(("jpl", path)) => Ok(EphemerisSource::Jpl(non_empty(path)?)),
            Some(("inpop", path)) => Ok(EphemerisSource::Inpop(non_empty(path)?)),
            // single letter prefix: a Windows drive
            Some((prefix, _)) if prefix.len() > 1 => Err(StarframeError::InvalidEphemerisSource(
                format!("unknown ephemeris prefix {prefix:?}"),
            )),
            _ => Ok(EphemerisSource::Path(non_empty(s)?)),
        }
    }
}

impl fmt::Display for EphemerisSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EphemerisSource::Jpl(p) => write!(f, "jpl:{p}"),
            EphemerisSource::Inpop(p) => write!(f, "inpop:{p}"),
            EphemerisSource::Path(p) => write!(f, "{p}"),
        }
    }
}
