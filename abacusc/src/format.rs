/// Renders a result the way the calculator display shows it.
///
/// Integral values carry no fractional part and everything else uses the
/// shortest representation that parses back to the same `f64`. `Display`
/// for `f64` never switches to exponent notation, so the output is always
/// valid input again. Negative zero shows as `0`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}
