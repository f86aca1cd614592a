/// Parse a colon-delimited timestamp (`MM:SS` or `HH:MM:SS`) into seconds.
/// Any other arity or a non-numeric component yields None.
pub fn parse(text: &str) -> Option<u64> {
    let parts: Vec<&str> = text.split(':').collect();

    let numbers: Vec<u64> = parts
        .iter()
        .map(|p| p.trim().parse::<u64>())
        .collect::<Result<_, _>>()
        .ok()?;

    match numbers.as_slice() {
        [minutes, seconds] => Some(minutes * 60 + seconds),
        [hours, minutes, seconds] => Some(hours * 3600 + minutes * 60 + seconds),
        _ => None,
    }
}

/// Format seconds as `MM:SS`, or `HH:MM:SS` at an hour and beyond.
/// Fields are always zero-padded to two digits.
pub fn format(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}
