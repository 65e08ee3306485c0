//! Plain ASCII table rendering.

/// Renders `rows` under `headers` as a bordered table, one line per row.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = border(&widths);
    let mut out = String::new();
    out.push_str(&border);
    out.push_str(&line(&widths, headers.iter().copied()));
    out.push_str(&border);
    for row in rows {
        out.push_str(&line(&widths, row.iter().map(String::as_str)));
    }
    out.push_str(&border);
    out
}

fn border(widths: &[usize]) -> String {
    let mut out = String::from("+");
    for width in widths {
        out.push_str(&"-".repeat(width + 2));
        out.push('+');
    }
    out.push('\n');
    out
}

fn line<'a>(widths: &[usize], cells: impl Iterator<Item = &'a str>) -> String {
    let mut out = String::from("|");
    for (width, cell) in widths.iter().zip(cells) {
        let padding = width.saturating_sub(cell.chars().count());
        out.push(' ');
        out.push_str(cell);
        out.push_str(&" ".repeat(padding + 1));
        out.push('|');
    }
    out.push('\n');
    out
}
