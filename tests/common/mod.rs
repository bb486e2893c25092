#![allow(dead_code)]

use starframe::jpl_ephem::ephemeris_items::EphemerisItem;

/// Route `log` output to the test harness; set `RUST_LOG` to see it.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Builder of small DE / INPOP files written in memory.
///
/// Every item is laid out with `n_coeffs` coefficients per component; the librations are
/// placed at the end of a record of at least [`MIN_RECORD_SIZE`] doubles so that a record is
/// never shorter than the header.
pub struct SyntheticEphemeris {
    pub ephemeris_number: u32,
    pub swapped: bool,
    pub start: f64,
    pub end: f64,
    pub interval: f64,
    pub n_coeffs: usize,
    pub granules: [usize; 13],
    pub km_per_au: f64,
    pub earth_moon_mass_ratio: f64,
}

pub const MIN_RECORD_SIZE: usize = 400;

pub const DE405: u32 = 405;
pub const INPOP: u32 = 100;

impl SyntheticEphemeris {
    pub fn new(ephemeris_number: u32, start: f64, end: f64, interval: f64) -> Self {
        SyntheticEphemeris {
            ephemeris_number,
            swapped: false,
            start,
            end,
            interval,
            n_coeffs: 1,
            granules: [1; 13],
            km_per_au: 149_597_870.7,
            earth_moon_mass_ratio: 81.300_568_94,
        }
    }

    /// Write every numeric field in the byte order opposite to the host's.
    pub fn swapped(mut self) -> Self {
        self.swapped = true;
        self
    }

    pub fn with_coeffs(mut self, n_coeffs: usize) -> Self {
        self.n_coeffs = n_coeffs;
        self
    }

    pub fn with_granules(mut self, item: EphemerisItem, granules: usize) -> Self {
        self.granules[item as usize] = granules;
        self
    }

    fn put_u32(&self, out: &mut Vec<u8>, v: u32) {
        let v = if self.swapped { v.swap_bytes() } else { v };
        out.extend_from_slice(&v.to_ne_bytes());
    }

    fn put_f64(&self, out: &mut Vec<u8>, v: f64) {
        let bits = if self.swapped {
            v.to_bits().swap_bytes()
        } else {
            v.to_bits()
        };
        out.extend_from_slice(&bits.to_ne_bytes());
    }

    /// `(offset, n_coeffs, n_granules)` of the 13 stored items and the record size in doubles.
    pub fn layout(&self) -> ([(usize, usize, usize); 13], usize) {
        let items = EphemerisItem::stored();
        let mut triples = [(0, 0, 0); 13];

        let mut offset = 3;
        for (i, item) in items.iter().take(12).enumerate() {
            triples[i] = (offset, self.n_coeffs, self.granules[i]);
            offset += self.n_coeffs * self.granules[i] * item.components();
        }

        let librations_len = self.n_coeffs * self.granules[12] * 3;
        let record_size = MIN_RECORD_SIZE.max(offset - 1 + librations_len);
        triples[12] = (record_size + 1 - librations_len, self.n_coeffs, self.granules[12]);

        (triples, record_size)
    }

    pub fn record_count(&self) -> usize {
        ((self.end - self.start) / self.interval).round() as usize
    }

    /// Serialize the file.
    ///
    /// `coeffs(item, component, mid, half_span)` returns the Chebyshev coefficients of one
    /// component over the segment `[mid - half_span, mid + half_span]`, with `mid` in days
    /// since `start`.
    pub fn to_bytes<F>(&self, coeffs: F) -> Vec<u8>
    where
        F: Fn(EphemerisItem, usize, f64, f64) -> Vec<f64>,
    {
        let (triples, record_size) = self.layout();
        let record_bytes = record_size * 8;
        let mut out = Vec::new();

        for label in ["SYNTHETIC EPHEMERIS", "START", "END"] {
            out.extend_from_slice(format!("{label:<84}").as_bytes());
        }
        for i in 0..400 {
            out.extend_from_slice(format!("C{i:<5}").as_bytes());
        }
        self.put_f64(&mut out, self.start);
        self.put_f64(&mut out, self.end);
        self.put_f64(&mut out, self.interval);
        self.put_u32(&mut out, 400);
        self.put_f64(&mut out, self.km_per_au);
        self.put_f64(&mut out, self.earth_moon_mass_ratio);
        for &(offset, n, g) in &triples[..12] {
            self.put_u32(&mut out, offset as u32);
            self.put_u32(&mut out, n as u32);
            self.put_u32(&mut out, g as u32);
        }
        self.put_u32(&mut out, self.ephemeris_number);
        let (offset, n, g) = triples[12];
        self.put_u32(&mut out, offset as u32);
        self.put_u32(&mut out, n as u32);
        self.put_u32(&mut out, g as u32);
        if self.ephemeris_number == INPOP {
            self.put_u32(&mut out, record_size as u32);
        }

        // header record padding, then the constants record
        out.resize(2 * record_bytes, 0);

        let items = EphemerisItem::stored();
        for r in 0..self.record_count() {
            let t0 = self.start + r as f64 * self.interval;
            let mut values = vec![0.0; record_size];
            values[0] = t0;
            values[1] = t0 + self.interval;

            for (i, item) in items.iter().enumerate() {
                let (offset, n, g) = triples[i];
                let components = item.components();
                let half_span = self.interval / g as f64 / 2.0;

                for granule in 0..g {
                    let mid = (t0 - self.start) + half_span * (2 * granule + 1) as f64;
                    for c in 0..components {
                        let block = coeffs(*item, c, mid, half_span);
                        let start = offset - 1 + (granule * components + c) * n;
                        for (k, v) in block.iter().take(n).enumerate() {
                            values[start + k] = *v;
                        }
                    }
                }
            }

            for v in values {
                self.put_f64(&mut out, v);
            }
        }

        out
    }
}

/// Chebyshev coefficients of `a + b τ + c τ²` (τ in days since the start of the file) over
/// the segment centered on `mid` with half width `h`.
pub fn quadratic_coeffs(a: f64, b: f64, c: f64, mid: f64, h: f64) -> Vec<f64> {
    vec![
        a + b * mid + c * mid * mid + c * h * h / 2.0,
        b * h + 2.0 * c * mid * h,
        c * h * h / 2.0,
    ]
}

/// Smooth test trajectory of an item: a distinct quadratic per item and component.
pub fn quadratic_for(item: EphemerisItem, component: usize) -> (f64, f64, f64) {
    let i = item as usize as f64;
    let c = component as f64;
    (
        1.0e6 * (i + 1.0) + 1.0e3 * c,
        250.0 * (i + 1.0) - 40.0 * c,
        -3.5 + 0.25 * i + c,
    )
}

pub fn quadratic_ephemeris(builder: &SyntheticEphemeris) -> Vec<u8> {
    builder.to_bytes(|item, component, mid, h| {
        let (a, b, c) = quadratic_for(item, component);
        quadratic_coeffs(a, b, c, mid, h)
    })
}
