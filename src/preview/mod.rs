use crate::parse::ParsedTable;

/// At most this many rows are shown; the validator always sees all of them.
pub const PREVIEW_ROW_CAP: usize = 20;

const MAX_CELL_WIDTH: usize = 24;

/// A bounded, display-ready view over a parsed table.
///
/// Rows keep their original order and are squared off against the header
/// count: short rows gain empty cells, fields beyond the last header are
/// not shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub omitted_rows: usize,
}

impl Preview {
    pub fn of(table: &ParsedTable) -> Self {
        let width = table.headers.len();
        let rows = table
            .rows
            .iter()
            .take(PREVIEW_ROW_CAP)
            .map(|row| {
                (0..width)
                    .map(|i| row.get(i).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();

        Preview {
            headers: table.headers.clone(),
            rows,
            omitted_rows: table.rows.len().saturating_sub(PREVIEW_ROW_CAP),
        }
    }
}

/// Render the preview as a fixed-width text table.
pub fn render(preview: &Preview) -> String {
    if preview.headers.is_empty() {
        return String::new();
    }

    let mut widths: Vec<usize> = preview
        .headers
        .iter()
        .map(|h| cell_width(h))
        .collect();
    for row in &preview.rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell_width(cell));
        }
    }

    let mut out = String::new();
    out.push_str(&render_line(&preview.headers, &widths));
    out.push('\n');
    let rule_len = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');
    for row in &preview.rows {
        out.push_str(&render_line(row, &widths));
        out.push('\n');
    }
    if preview.omitted_rows > 0 {
        out.push_str(&format!("... {} more row(s) not shown\n", preview.omitted_rows));
    }
    out
}

fn cell_width(s: &str) -> usize {
    s.chars().count().min(MAX_CELL_WIDTH)
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{:<width$}", clip(cell), width = w))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn clip(s: &str) -> String {
    if s.chars().count() <= MAX_CELL_WIDTH {
        s.to_string()
    } else {
        let kept: String = s.chars().take(MAX_CELL_WIDTH - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_text;

    #[test]
    fn caps_rows_and_counts_the_rest() {
        let mut text = String::from("NAT_EA_SN,HOUSEHOLD_COUNT\n");
        for i in 0..25 {
            text.push_str(&format!("EA{},1\n", i));
        }
        let preview = Preview::of(&parse_text(&text));
        assert_eq!(preview.rows.len(), PREVIEW_ROW_CAP);
        assert_eq!(preview.omitted_rows, 5);
        assert_eq!(preview.rows[0][0], "EA0");
    }

    #[test]
    fn squares_rows_against_headers() {
        let preview = Preview::of(&parse_text("a,b,c\n1\n1,2,3,4\n"));
        assert_eq!(preview.rows[0], vec!["1", "", ""]);
        assert_eq!(preview.rows[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn renders_header_rule_and_rows() {
        let preview = Preview::of(&parse_text("a,b\n1,2\n"));
        let text = render(&preview);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("a"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].starts_with("1"));
    }

    #[test]
    fn long_cells_are_clipped() {
        let long = "x".repeat(60);
        let preview = Preview::of(&parse_text(&format!("col\n{}\n", long)));
        let text = render(&preview);
        assert!(text.contains("..."));
        assert!(!text.contains(&long));
    }

    #[test]
    fn empty_table_renders_nothing() {
        let preview = Preview::of(&parse_text(""));
        assert_eq!(render(&preview), "");
        assert_eq!(preview.omitted_rows, 0);
    }
}
