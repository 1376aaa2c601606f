const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Size label shown next to the held file, e.g. `1.50 MB`.
pub fn format_size(size: u64) -> String {
    let mut value = size as f64;
    let mut unit_index = 0;

    while value >= 1024.0 && unit_index < UNITS.len() - 1 {
        value /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size, UNITS[0])
    } else {
        format!("{:.2} {}", value, UNITS[unit_index])
    }
}
