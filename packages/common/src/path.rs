/// Computes the path of one file relative to another
pub trait PathRelativizer {
    /// Path of `to` as seen from the directory containing `from`
    fn relative(&self, from: &str, to: &str) -> String;
}

/// Default relativizer operating on `/` or `\` separated strings
#[derive(Debug, Default, Clone, Copy)]
pub struct SlashRelativizer;

impl PathRelativizer for SlashRelativizer {
    fn relative(&self, from: &str, to: &str) -> String {
        relative_path(from, to)
    }
}

/// Relative path from the directory of `from` to `to`
///
/// Works on the textual form only: no filesystem access, no symlink
/// resolution. The result always uses `/` separators.
pub fn relative_path(from: &str, to: &str) -> String {
    let is_sep = |c: char| c == '/' || c == '\\';

    let mut from_parts: Vec<&str> = from.split(is_sep).collect();
    let to_parts: Vec<&str> = to.split(is_sep).collect();

    // Directory of `from`
    from_parts.pop();

    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = vec![".."; from_parts.len() - common];
    parts.extend_from_slice(&to_parts[common..]);
    parts.join("/")
}
