/// Detects the indentation unit used by a piece of text
pub trait IndentDetector {
    /// Returns the indentation unit, or `None` if the text is not indented
    fn detect(&self, text: &str) -> Option<String>;
}

/// Default detector: tabs win ties, otherwise the smallest run of two or
/// more leading spaces
#[derive(Debug, Default, Clone, Copy)]
pub struct GuessIndent;

impl IndentDetector for GuessIndent {
    fn detect(&self, text: &str) -> Option<String> {
        guess_indent(text)
    }
}

/// Fixed detector for callers that already know their indentation unit
#[derive(Debug, Clone)]
pub struct FixedIndent(pub Option<String>);

impl IndentDetector for FixedIndent {
    fn detect(&self, _text: &str) -> Option<String> {
        self.0.clone()
    }
}

/// Guess the indentation unit of `text`
///
/// Lines starting with a tab are counted against lines starting with at least
/// two spaces. Tabs win ties; otherwise the narrowest space indent is used.
pub fn guess_indent(text: &str) -> Option<String> {
    let mut tabbed = 0usize;
    let mut min_spaces: Option<usize> = None;
    let mut spaced = 0usize;

    for line in text.split('\n') {
        if line.starts_with('\t') {
            tabbed += 1;
            continue;
        }

        let spaces = line.len() - line.trim_start_matches(' ').len();
        if spaces >= 2 {
            spaced += 1;
            min_spaces = Some(min_spaces.map_or(spaces, |min| min.min(spaces)));
        }
    }

    if tabbed == 0 && spaced == 0 {
        return None;
    }

    if tabbed >= spaced {
        return Some("\t".to_string());
    }

    min_spaces.map(|n| " ".repeat(n))
}
