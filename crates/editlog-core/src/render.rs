//! Line-numbered rendering of file content

/// Prefix every line with a right-aligned, 1-based line number
///
/// The gutter is `max(4, digits(line_count) + 1)` characters wide and is
/// separated from the text by `" | "`. The output has exactly as many lines
/// as the input.
pub fn add_line_numbers(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let width = gutter_width(lines.len());

    lines
        .iter()
        .enumerate()
        .map(|(idx, line)| format!("{:>width$} | {}", idx + 1, line, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn gutter_width(line_count: usize) -> usize {
    (line_count.to_string().len() + 1).max(4)
}
