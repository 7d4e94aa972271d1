/// Compact elapsed time, e.g. `45s` or `2m 05s`.
#[must_use]
pub fn format_elapsed(seconds: u64) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    if minutes == 0 {
        format!("{remainder}s")
    } else {
        format!("{minutes}m {remainder:02}s")
    }
}

#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    format!("⏰ {seconds}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_switches_to_minutes() {
        assert_eq!(format_elapsed(0), "0s");
        assert_eq!(format_elapsed(59), "59s");
        assert_eq!(format_elapsed(125), "2m 05s");
    }
}
