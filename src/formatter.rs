//!
//! The formatter used by the number field.
//!
//! [NumberFormatter] is the capability the field consumes: parse a string
//! to a number and render a number as a string. Both can fail, failure is
//! just `None`.
//!
//! [StyleFormatter] implements it for decimal, currency and percent
//! numbers with the locale data of [pure_rust_locales].
//!
//! ```
//! use rat_number_field::formatter::{NumberFormatter, NumberStyle, StyleFormatter};
//! use rat_number_field::Locale;
//!
//! let fmt = StyleFormatter::new(NumberStyle::Currency, Locale::en_US).lenient(true);
//! assert_eq!(fmt.render(1.0).as_deref(), Some("$1.00"));
//! assert_eq!(fmt.parse("1.5"), Some(1.5));
//! ```
//!

use crate::number::{
    clean_digits, number_pattern, trim_fraction, valid_digits, Monetary, NumberFormat,
    NumberSymbols,
};
use pure_rust_locales::Locale;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;
use std::str::FromStr;

/// Converts between numbers and their display string.
pub trait NumberFormatter: Debug {
    /// Parse the text. Text that is empty or doesn't parse gives None.
    fn parse(&self, text: &str) -> Option<f64>;

    /// Render the value. None if the value can't be rendered.
    fn render(&self, value: f64) -> Option<String>;
}

impl<T: NumberFormatter + ?Sized> NumberFormatter for Rc<T> {
    fn parse(&self, text: &str) -> Option<f64> {
        self.as_ref().parse(text)
    }

    fn render(&self, value: f64) -> Option<String> {
        self.as_ref().render(value)
    }
}

impl<T: NumberFormatter + ?Sized> NumberFormatter for &T {
    fn parse(&self, text: &str) -> Option<f64> {
        (**self).parse(text)
    }

    fn render(&self, value: f64) -> Option<String> {
        (**self).render(value)
    }
}

/// Number style.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum NumberStyle {
    /// Grouped number, up to 3 fraction digits.
    #[default]
    Decimal,
    /// Currency symbol and the monetary fraction digits of the locale.
    Currency,
    /// Value times 100 with a `%` suffix.
    Percent,
}

/// Errors when creating a formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The locale name is not known.
    UnknownLocale(String),
    /// Too many fraction digits.
    InvalidFractionDigits(u8),
    /// The number pattern was rejected.
    Pattern(String),
}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::UnknownLocale(name) => write!(f, "unknown locale {:?}", name),
            FormatError::InvalidFractionDigits(n) => {
                write!(f, "invalid number of fraction digits {}", n)
            }
            FormatError::Pattern(msg) => write!(f, "invalid number pattern: {}", msg),
        }
    }
}

impl Error for FormatError {}

/// Maximum fraction digits that survive the trip through f64.
pub const MAX_FRACTION_DIGITS: u8 = 15;

/// Locale formatter for one [NumberStyle].
///
/// Rendering goes through a [NumberFormat] with the locale's
/// [NumberSymbols]. Currency placement and the percent sign are added
/// around the formatted digits.
#[derive(Debug, Clone)]
pub struct StyleFormatter {
    style: NumberStyle,
    locale: Locale,
    lenient: bool,
    max_frac: u8,
    min_frac: u8,
    sym: NumberSymbols,
    monetary: Monetary,
    format: NumberFormat,
}

impl Default for StyleFormatter {
    fn default() -> Self {
        Self::new(NumberStyle::Decimal, Locale::default())
    }
}

impl StyleFormatter {
    /// New formatter. Not lenient.
    pub fn new(style: NumberStyle, locale: Locale) -> Self {
        let sym = match style {
            NumberStyle::Currency => NumberSymbols::monetary(locale),
            NumberStyle::Decimal | NumberStyle::Percent => NumberSymbols::numeric(locale),
        };
        let monetary = Monetary::new(locale);
        let (max_frac, min_frac) = match style {
            NumberStyle::Decimal => (3, 0),
            NumberStyle::Currency => (monetary.frac_digits, monetary.frac_digits),
            NumberStyle::Percent => (0, 0),
        };
        // the generated pattern is always valid.
        let format = NumberFormat::news(number_pattern(max_frac), sym.clone()).unwrap_or_default();
        Self {
            style,
            locale,
            lenient: false,
            max_frac,
            min_frac,
            sym,
            monetary,
            format,
        }
    }

    /// New formatter for a locale name like "en_US" or "de_DE.UTF-8".
    pub fn from_locale_name(style: NumberStyle, name: &str) -> Result<Self, FormatError> {
        let locale = parse_locale_name(name)?;
        Ok(Self::new(style, locale))
    }

    /// Accept loosely formatted input.
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    /// Maximum number of fraction digits.
    ///
    /// For currency this sets the minimum too, currency always
    /// shows all fraction digits.
    pub fn max_fraction_digits(mut self, digits: u8) -> Result<Self, FormatError> {
        if digits > MAX_FRACTION_DIGITS {
            return Err(FormatError::InvalidFractionDigits(digits));
        }
        self.format = NumberFormat::news(number_pattern(digits), self.sym.clone())
            .map_err(|e| FormatError::Pattern(e.to_string()))?;
        self.max_frac = digits;
        self.min_frac = match self.style {
            NumberStyle::Currency => digits,
            _ => self.min_frac.min(digits),
        };
        Ok(self)
    }

    /// Style
    #[inline]
    pub fn style(&self) -> NumberStyle {
        self.style
    }

    /// Locale
    #[inline]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Lenient parsing.
    #[inline]
    pub fn is_lenient(&self) -> bool {
        self.lenient
    }

    /// Symbols in use.
    #[inline]
    pub fn symbols(&self) -> &NumberSymbols {
        &self.sym
    }

    /// Currency placement in use.
    #[inline]
    pub fn monetary(&self) -> &Monetary {
        &self.monetary
    }

    // Removes the sign and returns the rest of the text.
    fn strip_sign<'a>(&self, text: &'a str) -> (bool, &'a str) {
        if let Some(v) = text.strip_prefix(self.sym.negative_sym) {
            (true, v)
        } else if let Some(v) = text.strip_prefix('-') {
            (true, v)
        } else if self.lenient {
            if let Some(v) = text.strip_prefix(self.sym.positive_sym) {
                (false, v)
            } else if let Some(v) = text.strip_prefix('+') {
                (false, v)
            } else {
                (false, text)
            }
        } else {
            (false, text)
        }
    }

    // Removes the currency symbol. The symbol may appear before or after
    // the sign, and before or after the number.
    fn strip_currency<'a>(&self, text: &'a str) -> Option<(bool, &'a str)> {
        let cs = self.monetary.currency_sym.as_str();

        let (mut negative, mut s) = self.strip_sign(text);
        let mut found = false;
        if !cs.is_empty() {
            if let Some(v) = s.strip_prefix(cs) {
                s = v.trim_start();
                found = true;
                if !negative {
                    let (n, v) = self.strip_sign(s);
                    negative = n;
                    s = v;
                }
            } else if let Some(v) = s.strip_suffix(cs) {
                s = v.trim_end();
                found = true;
            }
        }

        if found || self.lenient || cs.is_empty() {
            Some((negative, s))
        } else {
            None
        }
    }

    fn strip_percent<'a>(&self, text: &'a str) -> Option<&'a str> {
        if let Some(v) = text.strip_suffix('%') {
            Some(v.trim_end())
        } else if let Some(v) = text.strip_prefix('%') {
            self.lenient.then(|| v.trim_start())
        } else {
            self.lenient.then_some(text)
        }
    }

    // Sign and digits, with the style decoration removed.
    fn undecorate<'a>(&self, text: &'a str) -> Option<(bool, &'a str)> {
        match self.style {
            NumberStyle::Decimal => Some(self.strip_sign(text)),
            NumberStyle::Currency => {
                let (negative, s) = self.strip_currency(text)?;
                let (n2, s) = self.strip_sign(s);
                if negative && n2 {
                    return None;
                }
                Some((negative || n2, s))
            }
            NumberStyle::Percent => {
                let s = self.strip_percent(text)?;
                Some(self.strip_sign(s))
            }
        }
    }
}

impl NumberFormatter for StyleFormatter {
    fn parse(&self, text: &str) -> Option<f64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let (negative, digits) = self.undecorate(text)?;
        let digits = if self.lenient {
            digits.trim_start()
        } else {
            digits
        };
        if !valid_digits(digits, &self.sym, self.lenient) {
            return None;
        }
        let v = clean_digits(digits, &self.sym)?;
        let v = if negative { -v } else { v };

        Some(match self.style {
            NumberStyle::Percent => v / 100.0,
            _ => v,
        })
    }

    fn render(&self, value: f64) -> Option<String> {
        let value = match self.style {
            NumberStyle::Percent => value * 100.0,
            _ => value,
        };
        if !value.is_finite() {
            return None;
        }

        let formatted = self.format.fmt(value.abs()).ok()?;
        let digits = trim_fraction(formatted.trim(), self.sym.decimal_sep, self.min_frac);
        let negative = value < 0.0 && digits.chars().any(|c| matches!(c, '1'..='9'));

        let mut out = String::new();
        if negative {
            out.push(self.sym.negative_sym);
        }
        match self.style {
            NumberStyle::Decimal => out.push_str(digits),
            NumberStyle::Currency => out.push_str(&self.monetary.decorate(digits)),
            NumberStyle::Percent => {
                out.push_str(digits);
                out.push('%');
            }
        }
        Some(out)
    }
}

/// Parse a locale name. Accepts the form of the LANG environment
/// variable, e.g. "de_AT.UTF-8" or "sr_RS@latin".
pub fn parse_locale_name(name: &str) -> Result<Locale, FormatError> {
    let base = name.split('.').next().unwrap_or_default();
    let base = base.replace('@', "_");
    match base.as_str() {
        "" | "C" | "POSIX" => Ok(Locale::POSIX),
        _ => Locale::from_str(&base).map_err(|_| FormatError::UnknownLocale(name.to_string())),
    }
}
