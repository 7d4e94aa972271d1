/// Letter shown next to an option: A, B, C… then numbers past Z.
#[must_use]
pub fn option_letter(index: usize) -> String {
    match u8::try_from(index) {
        Ok(offset) if offset < 26 => char::from(b'A' + offset).to_string(),
        _ => (index + 1).to_string(),
    }
}

/// Display label for a question kind: `true_false` becomes `true false`.
#[must_use]
pub fn kind_label(kind: Option<&str>) -> String {
    kind.map_or_else(|| "General".to_string(), |kind| kind.replace('_', " "))
}

/// Whole percentages print without a fraction; others keep one decimal.
#[must_use]
pub fn format_percentage(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}%")
    } else {
        format!("{rounded:.1}%")
    }
}
