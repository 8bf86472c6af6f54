/// Megabytes as recorded by the probe, converted to gigabytes.
pub fn mb_to_gb(mb: f64) -> f64 {
    mb / 1024.0
}

/// Format a megabyte amount as gigabytes with two decimals, e.g. `1.50 GB`.
pub fn format_gb(mb: f64) -> String {
    format!("{:.2} GB", mb_to_gb(mb))
}
