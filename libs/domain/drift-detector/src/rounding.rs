// [libs/domain/drift-detector/src/rounding.rs]
//! Redondeo consistente para los campos numéricos de `DriftDetails`.

pub fn round_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn round_4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
