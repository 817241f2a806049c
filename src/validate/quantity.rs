/// Strict parse of a quantity field as a base-10 integer.
///
/// Accepts an optional sign followed by ASCII digits only. Fractions,
/// exponents, thousands separators, and surrounding garbage are all
/// rejected; callers trim their input first. Values outside `i64` are
/// rejected as well and surface as invalid rows.
pub fn parse_quantity(s: &str) -> Option<i64> {
    let mut chars = s.chars();
    match chars.next() {
        Some('+') | Some('-') => {
            if !chars.clone().next().is_some_and(|c| c.is_ascii_digit()) {
                return None;
            }
        }
        Some(c) if c.is_ascii_digit() => {}
        _ => return None,
    }
    if !chars.all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse::<i64>().ok()
}
