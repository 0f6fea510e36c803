//! Plain-text rendering of the artworks table.

use std::fmt::Write;

use artworks_lib::controller::TableController;
use artworks_lib::model::Artwork;
use artworks_lib::model::PaginationCursor;
use artworks_lib::model::SelectionSet;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

struct Column {
    header: &'static str,
    width: usize,
    cell: fn(&Artwork) -> String,
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn id_cell(a: &Artwork) -> String {
    a.id.to_string()
}

fn title_cell(a: &Artwork) -> String {
    text(&a.title)
}

fn origin_cell(a: &Artwork) -> String {
    text(&a.place_of_origin)
}

fn artist_cell(a: &Artwork) -> String {
    text(&a.artist_display)
}

fn inscriptions_cell(a: &Artwork) -> String {
    text(&a.inscriptions)
}

fn start_cell(a: &Artwork) -> String {
    text(&a.date_start)
}

fn end_cell(a: &Artwork) -> String {
    text(&a.date_end)
}

const COLUMNS: &[Column] = &[
    Column { header: "ID", width: 7, cell: id_cell },
    Column { header: "Title", width: 32, cell: title_cell },
    Column { header: "Place of Origin", width: 16, cell: origin_cell },
    Column { header: "Artist", width: 26, cell: artist_cell },
    Column { header: "Inscriptions", width: 18, cell: inscriptions_cell },
    Column { header: "Start", width: 6, cell: start_cell },
    Column { header: "End", width: 6, cell: end_cell },
];

/// Fits `s` into exactly `width` display columns.
///
/// Line breaks become spaces; overlong text ends in an ellipsis.
pub fn fit(s: &str, width: usize) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    let mut out = String::new();
    let mut used = 0;
    if flat.width() <= width {
        out.push_str(&flat);
        used = flat.width();
    } else if width > 0 {
        for c in flat.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width - 1 {
                break;
            }
            out.push(c);
            used += w;
        }
        out.push('…');
        used += 1;
    }

    out.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    out
}

/// Renders rows with a checkbox column reflecting `selection`.
pub fn render_rows(records: &[Artwork], selection: &SelectionSet) -> String {
    let mut out = String::from("    ");
    for column in COLUMNS {
        out.push_str(&fit(column.header, column.width));
        out.push(' ');
    }
    out.truncate(out.trim_end().len());
    out.push('\n');

    if records.is_empty() {
        out.push_str("    (no records)\n");
        return out;
    }

    for record in records {
        let mark = if selection.contains(record.id) { "[x] " } else { "[ ] " };
        let mut line = String::from(mark);
        for column in COLUMNS {
            line.push_str(&fit(&(column.cell)(record), column.width));
            line.push(' ');
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Renders the paginator line, e.g. `Page 2 of 3 (rows 13-20 of 20)`.
pub fn render_paginator(cursor: &PaginationCursor, shown: usize) -> String {
    if cursor.total == 0 {
        return "No records".to_string();
    }
    if shown == 0 {
        return format!(
            "Page {} of {} (no rows on this page, {} total)",
            cursor.page,
            cursor.page_count(),
            cursor.total
        );
    }
    let first = cursor.first().saturating_add(1);
    let last = cursor.first().saturating_add(shown);
    format!(
        "Page {} of {} (rows {}-{} of {})",
        cursor.page,
        cursor.page_count(),
        first,
        last,
        cursor.total
    )
}

/// Renders the whole table view for the controller's current state.
pub fn render(controller: &TableController) -> String {
    let mut out = render_rows(controller.records(), controller.selection());
    let _ = writeln!(
        out,
        "{}  |  {} selected",
        render_paginator(&controller.cursor(), controller.records().len()),
        controller.selection().len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("a\nb", 3), "a b");
        assert_eq!(fit("anything", 0), "");
    }

    #[test]
    fn test_fit_counts_wide_characters() {
        // Each CJK character takes two columns.
        let fitted = fit("日本美術", 5);
        assert_eq!(fitted, "日本…");
        assert_eq!(fitted.width(), 5);
    }

    #[test]
    fn test_render_rows_marks_selection() {
        let records = vec![
            Artwork::new(1)
                .with_title("Nighthawks")
                .with_artist("Edward Hopper")
                .with_origin("United States")
                .with_dates("1942", "1942"),
            Artwork::new(2).with_title("American Gothic"),
        ];
        let selection: SelectionSet = [Artwork::new(2)].into_iter().collect();

        let rendered = render_rows(&records, &selection);
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[0].starts_with("    ID"));
        assert!(lines[1].starts_with("[ ] 1"));
        assert!(lines[1].contains("Nighthawks"));
        assert!(lines[1].contains("Edward Hopper"));
        assert!(lines[1].contains("United States"));
        assert!(lines[1].trim_end().ends_with("1942   1942"));
        assert!(lines[2].starts_with("[x] 2"));
    }

    #[test]
    fn test_render_paginator() {
        let cursor = PaginationCursor::new(2, 12, 20);
        assert_eq!(render_paginator(&cursor, 8), "Page 2 of 2 (rows 13-20 of 20)");
        assert_eq!(render_paginator(&PaginationCursor::default(), 0), "No records");
    }

    #[test]
    fn test_render_paginator_past_the_end() {
        let cursor = PaginationCursor::new(5, 12, 20);
        assert_eq!(
            render_paginator(&cursor, 0),
            "Page 5 of 2 (no rows on this page, 20 total)"
        );
        let far = PaginationCursor::new(usize::MAX, 12, 20);
        assert!(render_paginator(&far, 3).contains(&format!("rows {}-", usize::MAX)));
    }
}
