/// Wraps any finite angle into `[0, 360)`.
pub fn normalize_heading(degrees: f64) -> f64 {
    let heading = degrees.rem_euclid(360.0);
    // rem_euclid can round tiny negative inputs up to exactly 360.0
    if heading >= 360.0 { 0.0 } else { heading }
}

/// Whole degrees for display. North is shown as 360, never 000.
pub fn display_heading(degrees: f64) -> u16 {
    match normalize_heading(degrees).round() as u16 {
        0 | 360 => 360,
        heading => heading,
    }
}

/// Smallest absolute angle between two headings, in `[0, 180]`.
pub fn diff_angle(a: f64, b: f64) -> f64 {
    let diff = normalize_heading(a - b);
    if diff > 180.0 { 360.0 - diff } else { diff }
}
