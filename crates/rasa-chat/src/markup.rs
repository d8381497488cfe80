//! The tiny subset of markdown bot replies use.

/// A run of text with uniform styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span<'a> {
    /// The text, markers removed.
    pub text: &'a str,
    /// Whether the text was wrapped in `**`.
    pub bold: bool,
}

/// Splits `text` at `**` markers.
///
/// Bold runs never span markers; an unmatched trailing `**` is kept
/// literally. Empty runs are skipped.
pub fn parse_bold(text: &str) -> Vec<Span<'_>> {
    let mut spans = vec![];
    let mut rest = text;
    loop {
        let Some(start) = rest.find("**") else {
            break;
        };
        let after = &rest[start + 2..];
        let Some(len) = after.find("**") else {
            break;
        };
        push(&mut spans, &rest[..start], false);
        push(&mut spans, &after[..len], true);
        rest = &after[len + 2..];
    }
    push(&mut spans, rest, false);
    spans
}

fn push<'a>(spans: &mut Vec<Span<'a>>, text: &'a str, bold: bool) {
    if !text.is_empty() {
        spans.push(Span { text, bold });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> Span<'_> {
        Span { text, bold: false }
    }

    fn bold(text: &str) -> Span<'_> {
        Span { text, bold: true }
    }

    #[test]
    fn test_plain() {
        assert_eq!(parse_bold("no markup"), [plain("no markup")]);
        assert!(parse_bold("").is_empty());
    }

    #[test]
    fn test_bold() {
        assert_eq!(
            parse_bold("Take **rest** and **fluids**."),
            [
                plain("Take "),
                bold("rest"),
                plain(" and "),
                bold("fluids"),
                plain("."),
            ]
        );
        assert_eq!(parse_bold("**Note**"), [bold("Note")]);
    }

    #[test]
    fn test_unmatched_marker() {
        assert_eq!(
            parse_bold("**a** then **b"),
            [bold("a"), plain(" then **b")]
        );
        assert_eq!(parse_bold("****x"), [plain("x")]);
    }
}
