use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Plain-text table: columns sized to their widest cell, two spaces between
/// columns, a dashed rule under the header.
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(String::len)
                .chain([header.len()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    print_row(&widths, headers.iter().map(|h| h.to_string()));
    print_row(&widths, widths.iter().map(|w| "-".repeat(*w)));
    for row in rows {
        print_row(&widths, row);
    }
}

fn print_row(widths: &[usize], cells: impl IntoIterator<Item = String>) {
    let line: Vec<String> = cells
        .into_iter()
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    println!("{}", line.join("  "));
}

/// Shorten long command strings for table cells.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate("brew install git", 60), "brew install git");
    }

    #[test]
    fn truncate_caps_long_text() {
        let long = "x".repeat(100);
        let out = truncate(&long, 20);
        assert_eq!(out.chars().count(), 20);
        assert!(out.ends_with("..."));
    }
}
