//! Content predicates shared by the analyzer and the validator.

/// Passwords penalized on sight.
pub const COMMON_PASSWORDS: [&str; 20] = [
    "123456",
    "password",
    "123456789",
    "qwerty",
    "abc123",
    "password123",
    "admin",
    "letmein",
    "welcome",
    "monkey",
    "12345678",
    "password1",
    "12345",
    "qwerty123",
    "1q2w3e4r",
    "1234567890",
    "password12",
    "admin123",
    "root",
    "user",
];

const KEYBOARD_WALKS: [&str; 3] = ["qwerty", "asdf", "zxcv"];

/// Which character classes occur in a password.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharClasses {
    /// Contains `a`-`z`.
    pub lowercase: bool,
    /// Contains `A`-`Z`.
    pub uppercase: bool,
    /// Contains `0`-`9`.
    pub digit: bool,
    /// Anything outside `[A-Za-z0-9]`.
    pub symbol: bool,
}

impl CharClasses {
    /// Scans a password once and records every class seen.
    pub fn of(password: &str) -> Self {
        password.chars().fold(Self::default(), |mut classes, c| {
            match c {
                'a'..='z' => classes.lowercase = true,
                'A'..='Z' => classes.uppercase = true,
                '0'..='9' => classes.digit = true,
                _ => classes.symbol = true,
            }
            classes
        })
    }

    /// Number of classes present, 0 to 4.
    pub fn count(&self) -> u8 {
        [self.lowercase, self.uppercase, self.digit, self.symbol]
            .into_iter()
            .filter(|present| *present)
            .count() as u8
    }
}

/// True if the lowercased password equals a common password.
pub fn is_common(password: &str) -> bool {
    let lowered = password.to_lowercase();
    COMMON_PASSWORDS.contains(&lowered.as_str())
}

/// True if the lowercased password contains any common password.
pub fn contains_common(password: &str) -> bool {
    let lowered = password.to_lowercase();
    COMMON_PASSWORDS.iter().any(|common| lowered.contains(common))
}

/// True for three ascending digits, three ascending letters
/// (case-insensitive) or a keyboard walk.
pub fn has_sequence(password: &str) -> bool {
    let lowered: Vec<char> = password.chars().map(|c| c.to_ascii_lowercase()).collect();

    let ascending_run = lowered.windows(3).any(|w| {
        let same_class = w.iter().all(char::is_ascii_digit) || w.iter().all(char::is_ascii_lowercase);
        same_class && (w[1] as u32 == w[0] as u32 + 1) && (w[2] as u32 == w[1] as u32 + 1)
    });
    if ascending_run {
        return true;
    }

    let lowered: String = lowered.into_iter().collect();
    KEYBOARD_WALKS.iter().any(|walk| lowered.contains(walk))
}

/// True if any character repeats three or more times in a row.
pub fn has_repeated_run(password: &str) -> bool {
    let chars: Vec<char> = password.chars().collect();
    chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

/// Sequence or repeated run.
pub fn has_pattern(password: &str) -> bool {
    has_sequence(password) || has_repeated_run(password)
}
