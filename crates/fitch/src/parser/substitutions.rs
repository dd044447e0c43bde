//! ASCII shorthand for logical symbols
//!
//! Users type `P & Q $ R`; the editor stores `P ∧ Q → R`. Replacement is a
//! blind character-for-character rewrite: a shorthand character inside an
//! identifier is rewritten as well (`is_ok` becomes `is⊆ok`).

/// Shorthand character and the symbol it stands for
pub const SHORTHANDS: [(char, char); 10] = [
    ('~', '¬'),
    ('@', '∀'),
    ('#', '≠'),
    ('$', '→'),
    ('%', '↔'),
    ('^', '⊥'),
    ('&', '∧'),
    ('_', '⊆'),
    ('|', '∨'),
    ('/', '∃'),
];

/// Look up the symbol for a single shorthand character
pub fn shorthand_for(c: char) -> Option<char> {
    SHORTHANDS
        .iter()
        .find(|(short, _)| *short == c)
        .map(|(_, symbol)| *symbol)
}

/// Rewrite every shorthand character in `text`, leaving everything else as is.
pub fn replace_substitutions(text: &str) -> String {
    text.chars().map(|c| shorthand_for(c).unwrap_or(c)).collect()
}
