//! Password generation and strength scoring.
//!
//! Both functions are pure with respect to the vault: they never touch
//! disk and can be used by any front end.

use rand::seq::{IndexedRandom, SliceRandom};

use crate::errors::{PassVaultError, Result};

/// Default generated password length.
pub const DEFAULT_LENGTH: usize = 16;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.<>?/";

/// Character classes to draw from.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharsetFlags {
    pub lower: bool,
    pub upper: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for CharsetFlags {
    fn default() -> Self {
        Self {
            lower: true,
            upper: true,
            digits: true,
            symbols: true,
        }
    }
}

impl CharsetFlags {
    fn pools(&self) -> Vec<&'static str> {
        let mut pools = Vec::with_capacity(4);
        if self.lower {
            pools.push(LOWERCASE);
        }
        if self.upper {
            pools.push(UPPERCASE);
        }
        if self.digits {
            pools.push(DIGITS);
        }
        if self.symbols {
            pools.push(SYMBOLS);
        }
        pools
    }
}

/// Generate a random password of `length` characters.
///
/// Every selected class contributes at least one character (as long as
/// `length` allows it); the rest come from the union of all selected
/// classes, and the result is shuffled.
///
/// Fails if `length` is zero or no class is selected.
pub fn generate(length: usize, flags: CharsetFlags) -> Result<String> {
    if length == 0 {
        return Err(PassVaultError::PasswordGeneration(
            "length must be greater than 0".into(),
        ));
    }

    let pools: Vec<Vec<char>> = flags.pools().iter().map(|p| p.chars().collect()).collect();
    if pools.is_empty() {
        return Err(PassVaultError::PasswordGeneration(
            "select at least one character class".into(),
        ));
    }
    let all: Vec<char> = pools.iter().flatten().copied().collect();

    let mut rng = rand::rng();
    let mut chars: Vec<char> = Vec::with_capacity(length);
    for pool in &pools {
        if let Some(c) = pool.choose(&mut rng) {
            chars.push(*c);
        }
    }
    while chars.len() < length {
        if let Some(c) = all.choose(&mut rng) {
            chars.push(*c);
        }
    }
    chars.shuffle(&mut rng);
    chars.truncate(length);

    Ok(chars.into_iter().collect())
}

/// Coarse strength bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthCategory {
    Weak,
    Medium,
    Strong,
}

impl StrengthCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weak => "Weak",
            Self::Medium => "Medium",
            Self::Strong => "Strong",
        }
    }
}

/// Result of `evaluate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrengthReport {
    pub category: StrengthCategory,
    /// 0..=6
    pub score: u8,
    pub suggestions: Vec<String>,
}

/// Score a password.
///
/// One point each for lowercase, uppercase, digits and symbols; one more
/// for 12+ characters or two for 16+.  0–2 is weak, 3–4 medium, 5–6
/// strong.
pub fn evaluate(password: &str) -> StrengthReport {
    let mut score: u8 = 0;
    let mut suggestions = Vec::new();

    let checks: [(bool, &str); 4] = [
        (password.chars().any(char::is_lowercase), "Add lowercase letters"),
        (password.chars().any(char::is_uppercase), "Add uppercase letters"),
        (password.chars().any(|c| c.is_ascii_digit()), "Add digits"),
        (
            password.chars().any(|c| SYMBOLS.contains(c)),
            "Add symbols (e.g. !@#$)",
        ),
    ];
    for (present, hint) in checks {
        if present {
            score += 1;
        } else {
            suggestions.push(hint.to_string());
        }
    }

    let length = password.chars().count();
    if length >= 16 {
        score += 2;
    } else if length >= 12 {
        score += 1;
    } else {
        suggestions.push("Use at least 12 characters".to_string());
    }

    let category = match score {
        0..=2 => StrengthCategory::Weak,
        3..=4 => StrengthCategory::Medium,
        _ => StrengthCategory::Strong,
    };

    StrengthReport {
        category,
        score,
        suggestions,
    }
}
