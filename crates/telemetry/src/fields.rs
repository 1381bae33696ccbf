/// Coerce a CSV field to a number.  Empty or unparsable fields become `NaN`.
pub fn parse_number(field: &str) -> f64 {
    let field = field.trim();
    if field.is_empty() {
        return f64::NAN;
    }
    field.parse().unwrap_or(f64::NAN)
}

/// Like [`parse_number`], but strips a trailing unit first (`"12.5%"`,
/// `"812MiB"`).  Fields without the unit are parsed as-is.
pub fn parse_with_suffix(field: &str, suffix: &str) -> f64 {
    let field = field.trim();
    parse_number(field.strip_suffix(suffix).unwrap_or(field))
}

/// Numeric value of an optional field; a missing column is `NaN`.
pub(crate) fn number_at(record: &csv::StringRecord, idx: usize) -> f64 {
    record.get(idx).map_or(f64::NAN, parse_number)
}
