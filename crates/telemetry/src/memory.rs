/// Format a MiB quantity as a human-readable string (e.g. `"1.5 GiB"`).
pub fn format_mebibytes(mib: f64) -> String {
    const GIB: f64 = 1024.0;

    if !mib.is_finite() {
        "n/a".to_string()
    } else if mib >= GIB {
        format!("{:.1} GiB", mib / GIB)
    } else if mib >= 1.0 {
        format!("{mib:.1} MiB")
    } else {
        format!("{:.1} KiB", mib * 1024.0)
    }
}
