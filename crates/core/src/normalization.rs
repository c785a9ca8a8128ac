use once_cell::sync::Lazy;
use regex::Regex;

static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t\r]*\n").unwrap());

pub fn split_paragraphs(text: &str) -> Vec<&str> {
    PARAGRAPH_BREAK.split(text).collect()
}

pub fn collapse_lines(paragraph: &str) -> String {
    let mut out = String::with_capacity(paragraph.len());
    for line in paragraph.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_blank_lines() {
        let page = "First paragraph\nstill first.\n\nSecond paragraph.\n \t\nThird.";
        let paragraphs = split_paragraphs(page);
        assert_eq!(paragraphs.len(), 3);
        assert!(paragraphs[0].starts_with("First"));
        assert_eq!(paragraphs[2], "Third.");
    }

    #[test]
    fn no_break_means_one_paragraph() {
        let page = "A single block\nspread over\nseveral lines.";
        assert_eq!(split_paragraphs(page).len(), 1);
    }

    #[test]
    fn collapses_line_breaks_to_single_spaces() {
        let para = "  A line  \nanother line\r\n  last line ";
        assert_eq!(collapse_lines(para), "A line another line last line");
    }

    #[test]
    fn collapse_drops_interior_blank_lines() {
        assert_eq!(collapse_lines("a\n\nb"), "a b");
        assert_eq!(collapse_lines("   \n  "), "");
    }
}
