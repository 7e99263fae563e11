//!
//! Locale data for numbers.
//!
//! Separators and signs come from [format_num_pattern::NumberSymbols].
//! The currency placement is read from the LC_MONETARY data of
//! [pure_rust_locales], NumberSymbols doesn't carry it.
//!
//! Locales that leave the currency undefined (e.g. POSIX) have no symbol
//! and two fraction digits.
//!

use format_num_pattern::core::clean_num;
use pure_rust_locales::{locale_match, Locale};
use std::str::FromStr;

pub use format_num_pattern::{NumberFmtError, NumberFormat, NumberSymbols};

/// Integer part of every pattern. 18 digits with grouping.
const INTEGER_PATTERN: &str = "###,###,###,###,###,##0";

/// Placement of the currency symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monetary {
    /// Currency symbol
    pub currency_sym: String,
    /// Currency symbol comes before the number.
    pub precedes: bool,
    /// Currency symbol is separated from the number by a space.
    pub space: bool,
    /// Fraction digits for monetary values.
    pub frac_digits: u8,
}

impl Default for Monetary {
    fn default() -> Self {
        Self {
            currency_sym: String::new(),
            precedes: true,
            space: false,
            frac_digits: 2,
        }
    }
}

impl Monetary {
    /// Currency data of the locale.
    pub fn new(locale: Locale) -> Self {
        let frac_digits = locale_match!(locale => LC_MONETARY::FRAC_DIGITS);
        Self {
            currency_sym: locale_match!(locale => LC_MONETARY::CURRENCY_SYMBOL).to_string(),
            precedes: locale_match!(locale => LC_MONETARY::P_CS_PRECEDES) != 0,
            space: locale_match!(locale => LC_MONETARY::P_SEP_BY_SPACE) == 1,
            frac_digits: if (0..=15).contains(&frac_digits) {
                frac_digits as u8
            } else {
                2
            },
        }
    }

    /// Adds the currency symbol to the formatted digits.
    pub fn decorate(&self, digits: &str) -> String {
        let mut out = String::new();
        if self.currency_sym.is_empty() {
            out.push_str(digits);
        } else if self.precedes {
            out.push_str(&self.currency_sym);
            if self.space {
                out.push(' ');
            }
            out.push_str(digits);
        } else {
            out.push_str(digits);
            if self.space {
                out.push(' ');
            }
            out.push_str(&self.currency_sym);
        }
        out
    }
}

/// Number pattern for [NumberFormat] with grouping and
/// `frac_digits` fixed fraction digits.
///
/// ```
/// use rat_number_field::number::number_pattern;
///
/// assert_eq!(number_pattern(2), "###,###,###,###,###,##0.00");
/// assert_eq!(number_pattern(0), "###,###,###,###,###,##0");
/// ```
pub fn number_pattern(frac_digits: u8) -> String {
    let mut pattern = INTEGER_PATTERN.to_string();
    if frac_digits > 0 {
        pattern.push('.');
        for _ in 0..frac_digits {
            pattern.push('0');
        }
    }
    pattern
}

/// Removes trailing zeros down to `min_frac` fraction digits.
/// A decimal separator without digits after it is removed too.
pub fn trim_fraction(digits: &str, decimal_sep: char, min_frac: u8) -> &str {
    let Some(pos) = digits.rfind(decimal_sep) else {
        return digits;
    };
    let frac_start = pos + decimal_sep.len_utf8();
    let mut end = digits.len();
    while end > frac_start + min_frac as usize && digits[..end].ends_with('0') {
        end -= 1;
    }
    if end == frac_start {
        &digits[..pos]
    } else {
        &digits[..end]
    }
}

/// Checks the digits of a number without sign and decoration.
///
/// Accepts ASCII digits, one decimal separator and the grouping
/// separator of `sym`. At least one digit is required.
///
/// Strict: a grouping separator must sit between two digits of the
/// integer part.
///
/// Lenient: grouping separators and white-space are ignored in the
/// integer part. If the grouping separator is space-like a plain space
/// is taken as grouping.
pub fn valid_digits(text: &str, sym: &NumberSymbols, lenient: bool) -> bool {
    let grp = sym.decimal_grp;
    let is_grp = |c: char| match grp {
        Some(g) => c == g || (lenient && g.is_whitespace() && c == ' '),
        None => false,
    };

    let mut have_digit = false;
    let mut in_frac = false;
    let mut prev: Option<char> = None;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_ascii_digit() {
            have_digit = true;
        } else if c == sym.decimal_sep && !in_frac {
            in_frac = true;
        } else if !in_frac && is_grp(c) {
            if !lenient {
                let digit_before = prev.is_some_and(|p| p.is_ascii_digit());
                let digit_after = chars.peek().is_some_and(|n| n.is_ascii_digit());
                if !digit_before || !digit_after {
                    return false;
                }
            }
        } else if !(lenient && !in_frac && c.is_whitespace()) {
            return false;
        }
        prev = Some(c);
    }
    have_digit
}

/// Converts digits accepted by [valid_digits] to a number.
///
/// [clean_num] maps the locale separators and drops the grouping.
pub fn clean_digits(text: &str, sym: &NumberSymbols) -> Option<f64> {
    let mut clean = String::new();
    clean_num(text, sym, &mut clean).ok()?;
    match clean.as_str() {
        "" | "." => Some(0.0),
        v => f64::from_str(v).ok(),
    }
}
