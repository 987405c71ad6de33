// [libs/domain/drift-detector/src/lib.rs]
/*!
 * =================================================================
 * APARATO: DRIFT DETECTOR (C4)
 * CLASIFICACIÓN: PURE DOMAIN FUNCTION (ESTRATO L2)
 * RESPONSABILIDAD: DIFF ESTRUCTURAL Y MÉTRICO ENTRE DOS SNAPSHOTS
 * =================================================================
 */

mod detector;
mod rounding;

pub use detector::diff;
