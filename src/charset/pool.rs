//! Fixed alphabets and the category-flag pool builder.

use serde::{Deserialize, Serialize};

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const NUMBERS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// One of the four character classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// `A`-`Z`.
    Uppercase,
    /// `a`-`z`.
    Lowercase,
    /// `0`-`9`.
    Numbers,
    /// Fixed punctuation set.
    Symbols,
}

impl Category {
    /// All categories in pool order.
    pub const ALL: [Category; 4] = [
        Category::Uppercase,
        Category::Lowercase,
        Category::Numbers,
        Category::Symbols,
    ];

    /// Returns the alphabet for this category.
    pub fn alphabet(self) -> &'static str {
        match self {
            Category::Uppercase => UPPERCASE,
            Category::Lowercase => LOWERCASE,
            Category::Numbers => NUMBERS,
            Category::Symbols => SYMBOLS,
        }
    }

    /// Returns the alphabet as a character vector.
    pub fn chars(self) -> Vec<char> {
        self.alphabet().chars().collect()
    }

    /// Number of characters in the alphabet.
    #[inline]
    pub fn size(self) -> usize {
        self.alphabet().len()
    }

    /// Parses a pattern letter (`u`, `l`, `n`, `s`, case-insensitive).
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_lowercase() {
            'u' => Some(Category::Uppercase),
            'l' => Some(Category::Lowercase),
            'n' => Some(Category::Numbers),
            's' => Some(Category::Symbols),
            _ => None,
        }
    }
}

/// Which categories are selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFlags {
    /// Include `A`-`Z`.
    pub uppercase: bool,
    /// Include `a`-`z`.
    pub lowercase: bool,
    /// Include `0`-`9`.
    pub numbers: bool,
    /// Include punctuation.
    pub symbols: bool,
}

impl CategoryFlags {
    /// Every category selected.
    pub fn all() -> Self {
        Self {
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: true,
        }
    }

    /// Returns true if the category is selected.
    pub fn contains(&self, category: Category) -> bool {
        match category {
            Category::Uppercase => self.uppercase,
            Category::Lowercase => self.lowercase,
            Category::Numbers => self.numbers,
            Category::Symbols => self.symbols,
        }
    }

    /// Selected categories in fixed pool order.
    pub fn selected(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|c| self.contains(*c))
    }

    /// Number of selected categories.
    pub fn count(&self) -> usize {
        self.selected().count()
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Concatenates the alphabets of every selected category.
///
/// Order is uppercase, lowercase, numbers, symbols. Returns an empty
/// string when no category is selected.
pub fn build_pool(flags: &CategoryFlags) -> String {
    flags.selected().map(Category::alphabet).collect()
}

/// Sum of the selected alphabet sizes, floored at 1.
pub fn pool_size(flags: &CategoryFlags) -> usize {
    flags.selected().map(Category::size).sum::<usize>().max(1)
}
