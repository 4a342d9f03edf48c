use std::io::Write;

use bibverify_core::{Status, Verdict};
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

const HEADERS: [&str; 5] = ["BibKey", "Status", "Source", "Score", "Title"];

#[derive(Clone, Copy)]
enum Align {
    Left,
    Center,
    Right,
}

const ALIGNS: [Align; 5] = [
    Align::Left,
    Align::Center,
    Align::Center,
    Align::Right,
    Align::Left,
];

/// Titles longer than 60 chars are cut to 57 plus an ellipsis.
pub fn truncate_title(title: &str) -> String {
    let chars: Vec<char> = title.chars().collect();
    if chars.len() <= 60 {
        title.to_string()
    } else {
        let mut short: String = chars[..57].iter().collect();
        short.push('…');
        short
    }
}

fn pad(cell: &str, width: usize, align: Align) -> String {
    let len = cell.chars().count();
    let fill = width.saturating_sub(len);
    match align {
        Align::Left => format!("{}{}", cell, " ".repeat(fill)),
        Align::Right => format!("{}{}", " ".repeat(fill), cell),
        Align::Center => {
            let left = fill / 2;
            format!("{}{}{}", " ".repeat(left), cell, " ".repeat(fill - left))
        }
    }
}

fn separator(width: usize, align: Align) -> String {
    match align {
        Align::Left => format!(":{}", "-".repeat(width + 1)),
        Align::Right => format!("{}:", "-".repeat(width + 1)),
        Align::Center => format!(":{}:", "-".repeat(width)),
    }
}

/// Print the verdict table (github-style) to `w`.
pub fn print_table(
    w: &mut dyn Write,
    verdicts: &[Verdict],
    color: ColorMode,
) -> std::io::Result<()> {
    let rows: Vec<[String; 5]> = verdicts
        .iter()
        .map(|v| {
            [
                v.key.clone(),
                match v.status {
                    Status::Ok => "OK".to_string(),
                    Status::Check => "CHECK".to_string(),
                },
                v.source.clone().unwrap_or_default(),
                format!("{:.2}", v.score),
                truncate_title(&v.title),
            ]
        })
        .collect();

    let mut widths: [usize; 5] = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths)
        .zip(ALIGNS)
        .map(|((h, width), align)| pad(h, width, align))
        .collect();
    writeln!(w, "| {} |", header.join(" | "))?;

    let seps: Vec<String> = widths
        .iter()
        .zip(ALIGNS)
        .map(|(&width, align)| separator(width, align))
        .collect();
    writeln!(w, "|{}|", seps.join("|"))?;

    for (verdict, row) in verdicts.iter().zip(&rows) {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                let padded = pad(cell, widths[col], ALIGNS[col]);
                if col == 1 && color.enabled() {
                    match verdict.status {
                        Status::Ok => padded.green().to_string(),
                        Status::Check => padded.yellow().to_string(),
                    }
                } else {
                    padded
                }
            })
            .collect();
        writeln!(w, "| {} |", cells.join(" | "))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(key: &str, status: Status, source: Option<&str>, score: f64, title: &str) -> Verdict {
        Verdict {
            key: key.to_string(),
            status,
            source: source.map(str::to_string),
            score,
            title: title.to_string(),
        }
    }

    #[test]
    fn test_truncate_short_title_unchanged() {
        assert_eq!(truncate_title("Deep Learning"), "Deep Learning");
        let exactly_60 = "a".repeat(60);
        assert_eq!(truncate_title(&exactly_60), exactly_60);
    }

    #[test]
    fn test_truncate_61_chars() {
        let title = "b".repeat(61);
        let shown = truncate_title(&title);
        assert_eq!(shown.chars().count(), 58);
        assert!(shown.ends_with('…'));
        assert_eq!(&shown[..57], &"b".repeat(57));
    }

    #[test]
    fn test_table_layout() {
        let verdicts = vec![
            verdict("vaswani2017", Status::Ok, Some("Crossref"), 0.97, "Attention Is All You Need"),
            verdict("ghost2024", Status::Check, None, 0.31, "A Paper That Does Not Exist"),
        ];

        let mut buf = Vec::new();
        print_table(&mut buf, &verdicts, ColorMode(false)).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("BibKey"));
        assert!(lines[1].contains(":---"));
        assert!(lines[2].contains("vaswani2017"));
        assert!(lines[2].contains("0.97"));
        assert!(lines[3].contains("CHECK"));
        assert!(lines[3].contains("0.31"));
        // CHECK rows have an empty Source cell, not a placeholder.
        assert!(!lines[3].contains("None"));
    }

    #[test]
    fn test_empty_bibliography_prints_headers_only() {
        let mut buf = Vec::new();
        print_table(&mut buf, &[], ColorMode(false)).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("BibKey"));
        assert!(lines[1].contains(":---"));
    }

    #[test]
    fn test_table_plain_mode_has_no_ansi() {
        let verdicts = vec![verdict("k", Status::Ok, Some("arXiv"), 0.9, "T")];
        let mut buf = Vec::new();
        print_table(&mut buf, &verdicts, ColorMode(false)).unwrap();
        assert!(!String::from_utf8(buf).unwrap().contains('\u{1b}'));
    }
}
