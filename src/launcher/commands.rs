pub const QUIT_KEY: &str = "q";

/// What one line of input asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Quit,
    /// Zero-based index into the menu's items.
    Item(usize),
    Invalid,
}

/// Decodes a line read from the prompt. Only the line terminator is stripped;
/// `" 1"` or `"Q"` are invalid.
pub fn decode(line: &str, item_count: usize) -> Selection {
    let line = line.trim_end_matches(['\n', '\r']);
    if line == QUIT_KEY {
        return Selection::Quit;
    }

    match line.parse::<usize>() {
        Ok(n) if (1..=item_count).contains(&n) => Selection::Item(n - 1),
        _ => Selection::Invalid,
    }
}
