//! Écriture d'une valeur réelle dans un canal 8 bits.

/// Stocke une valeur réelle dans un octet : clamp [0, 255], arrondi au plus
/// proche avec égalité vers le pair, NaN → 0.
///
/// Same rule as an HTML canvas `Uint8ClampedArray` store, so 127.5 becomes
/// 128 and 0.5 becomes 0.
///
/// # Example
/// ```
/// use ts_filter::store::clamped;
/// assert_eq!(clamped(18.64), 19);
/// assert_eq!(clamped(-3.0), 0);
/// assert_eq!(clamped(300.0), 255);
/// assert_eq!(clamped(2.5), 2);
/// assert_eq!(clamped(f64::NAN), 0);
/// ```
#[inline(always)]
#[must_use]
pub fn clamped(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0).round_ties_even() as u8
}
