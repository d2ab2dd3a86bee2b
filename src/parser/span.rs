/// Lines strictly between the first line starting with any of `start` and the
/// next line starting with `end`, trimmed, blanks dropped.
///
/// A line starting with `end` stops the scan even before collection has begun,
/// and any further start line inside the span is consumed rather than kept.
/// Without a start line the result is empty.
pub fn extract_between(lines: &[String], start: &[&str], end: Option<&str>) -> Vec<String> {
    let mut collecting = false;
    let mut collected = Vec::new();

    for raw in lines {
        let line = raw.trim();
        if start.iter().any(|m| line.starts_with(m)) {
            collecting = true;
            continue;
        }
        if end.is_some_and(|e| line.starts_with(e)) {
            break;
        }
        if collecting && !line.is_empty() {
            collected.push(line.to_string());
        }
    }

    collected
}

/// Text between the first occurrence of `label` in `line` and the next one
/// (or the end of the line), trimmed.
pub fn value_after<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let i = line.find(label)?;
    let rest = &line[i + label.len()..];
    rest.split(label).next().map(str::trim)
}

/// Value after `label` when the trimmed line starts with it.
pub fn prefixed_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.trim().strip_prefix(label).map(str::trim)
}

/// Index of the first line whose trimmed text starts with `marker`.
pub fn find_marker(lines: &[String], marker: &str) -> Option<usize> {
    lines.iter().position(|l| l.trim().starts_with(marker))
}
