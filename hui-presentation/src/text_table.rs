use std::{borrow::Cow, fmt::Write};

const COLUMN_GAP: &str = " | ";

#[derive(Default)]
pub struct TextTableBuilder<'a, Seq> {
    headers: &'a [Cow<'a, str>],
    rows: Vec<Seq>,
    alignments: Cow<'a, [Alignment]>,
}

#[derive(Clone, Copy, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl<'a, Seq> TextTableBuilder<'a, Seq>
where
    Seq: AsRef<[Cow<'a, str>]> + Default,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignments(mut self, alignments: &'a [Alignment]) -> Self {
        self.alignments = Cow::Borrowed(alignments);
        self
    }

    pub fn headers(mut self, headers: &'a [Cow<'a, str>]) -> Self {
        self.headers = headers;
        if self.alignments.is_empty() {
            self.alignments = Cow::Owned(vec![Alignment::default(); self.headers.len()]);
        }
        self
    }

    pub fn row(mut self, row: Seq) -> Self {
        self.rows.push(row);
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Seq>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Renders a pipe-separated table; cells beyond the header count are dropped.
    pub fn build(self) -> String {
        let col_count = self.headers.len();
        if col_count == 0 {
            return String::new();
        }

        let mut col_widths: Vec<usize> = self.headers.iter().map(|h| text_width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.as_ref().iter().enumerate().take(col_count) {
                col_widths[i] = col_widths[i].max(text_width(cell));
            }
        }

        let mut out = String::with_capacity(64 * (self.rows.len() + 2));
        self.write_line(&mut out, self.headers, &col_widths);

        let rule: Vec<String> = col_widths.iter().map(|width| "-".repeat(*width)).collect();
        let _ = writeln!(&mut out, "{}", rule.join("-+-"));

        for row in &self.rows {
            self.write_line(&mut out, row.as_ref(), &col_widths);
        }
        out
    }

    fn write_line(&self, out: &mut String, cells: &[Cow<'a, str>], col_widths: &[usize]) {
        let mut line = String::new();
        for (i, width) in col_widths.iter().enumerate() {
            if i > 0 {
                line.push_str(COLUMN_GAP);
            }
            let cell = cells.get(i).map(AsRef::as_ref).unwrap_or("");
            let alignment = self.alignments.get(i).copied().unwrap_or_default();
            pad(&mut line, cell, *width, alignment);
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
}

fn text_width(text: &str) -> usize {
    text.chars().count()
}

fn pad(line: &mut String, cell: &str, width: usize, alignment: Alignment) {
    let fill = width.saturating_sub(text_width(cell));
    let (before, after) = match alignment {
        Alignment::Left => (0, fill),
        Alignment::Center => (fill / 2, fill - fill / 2),
        Alignment::Right => (fill, 0),
    };
    line.extend(std::iter::repeat_n(' ', before));
    line.push_str(cell);
    line.extend(std::iter::repeat_n(' ', after));
}

/// Two-column label/value block, values right-aligned.
pub fn key_value_block(pairs: &[(&str, Cow<'_, str>)]) -> String {
    let label_width = pairs.iter().map(|(label, _)| text_width(label)).max().unwrap_or(0);
    let value_width = pairs.iter().map(|(_, value)| text_width(value)).max().unwrap_or(0);

    let mut out = String::new();
    for (label, value) in pairs {
        let mut line = String::new();
        pad(&mut line, label, label_width, Alignment::Left);
        line.push_str("  ");
        pad(&mut line, value, value_width, Alignment::Right);
        let _ = writeln!(&mut out, "{line}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_simple_table() {
        let table = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Right])
            .headers(&[Cow::Borrowed("Name"), Cow::Borrowed("Balance")])
            .row([Cow::Borrowed("Alice"), Cow::Borrowed("+100")])
            .row([Cow::Borrowed("Bob"), Cow::Borrowed("-1,000")])
            .build();

        assert_eq!(
            table,
            "Name  | Balance\n------+--------\nAlice |    +100\nBob   |  -1,000\n"
        );
    }

    #[rstest]
    fn test_multibyte_cells_align_by_char() {
        let table = TextTableBuilder::new()
            .headers(&[Cow::Borrowed("Tên"), Cow::Borrowed("Kỳ")])
            .row([Cow::Borrowed("Bình"), Cow::Borrowed("2")])
            .build();

        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines[0], "Tên  | Kỳ");
        assert_eq!(lines[2], "Bình | 2");
    }

    #[rstest]
    #[case::left(Alignment::Left, "ab  ")]
    #[case::center(Alignment::Center, " ab ")]
    #[case::right(Alignment::Right, "  ab")]
    fn test_pad(#[case] alignment: Alignment, #[case] expected: &str) {
        let mut line = String::new();
        pad(&mut line, "ab", 4, alignment);
        assert_eq!(line, expected);
    }

    #[rstest]
    fn test_empty_headers_render_nothing() {
        let table: String = TextTableBuilder::<[Cow<'_, str>; 0]>::new().build();
        assert!(table.is_empty());
    }

    #[rstest]
    fn test_key_value_block() {
        let block = key_value_block(&[
            ("Total pot", Cow::Borrowed("2,950,000")),
            ("Net", Cow::Borrowed("900")),
        ]);
        assert_eq!(block, "Total pot  2,950,000\nNet              900\n");
    }
}
