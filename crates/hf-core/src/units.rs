// hf-core/src/units.rs

use uom::si::f64::{Length as UomLength, VolumeRate as UomVolumeRate};

// Public canonical unit types (SI, f64)
pub type Length = UomLength;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn lpm(v: f64) -> VolumeRate {
    use uom::si::volume_rate::liter_per_minute;
    VolumeRate::new::<liter_per_minute>(v)
}

pub mod constants {
    /// Meters of water head per bar. The precise figure is ~10.2 m; the
    /// field rule of thumb of 10 m is used everywhere.
    pub const METERS_HEAD_PER_BAR: f64 = 10.0;

    /// Every hose in the catalog is a standard 20 m section.
    pub const HOSE_SECTION_LENGTH_M: f64 = 20.0;

    /// Flow at which catalog friction coefficients were measured (l/min).
    pub const REFERENCE_FLOW_LPM: f64 = 500.0;

    /// Hazen-Williams roughness coefficient for fire hose.
    pub const HAZEN_WILLIAMS_C: f64 = 120.0;
}
