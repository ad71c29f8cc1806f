const UNITS: [&str; 5] = ["KB", "MB", "GB", "TB", "PB"];

/// Approximate, human readable size using binary multiples, up to petabytes.
pub fn human_bytes(size: u64) -> String {
    if size < 1024 {
        return format!("{} B", size);
    }
    let mut scaled = size as f64 / 1024.0;
    let mut unit = 0;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", scaled, UNITS[unit])
}
