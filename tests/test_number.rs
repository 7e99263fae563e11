use rat_number_field::number::{
    clean_digits, number_pattern, trim_fraction, valid_digits, Monetary, NumberFormat,
    NumberSymbols,
};
use rat_number_field::Locale;

#[test]
fn test_monetary() {
    let m = Monetary::new(Locale::en_US);
    assert_eq!(m.currency_sym, "$");
    assert_eq!(m.frac_digits, 2);
    assert!(m.precedes);
    assert!(!m.space);
    assert_eq!(m.decorate("1.00"), "$1.00");

    let m = Monetary::new(Locale::de_DE);
    assert!(!m.precedes);
    assert!(m.space);
    assert_eq!(m.decorate("1,00"), "1,00 €");

    let m = Monetary::new(Locale::POSIX);
    assert_eq!(m.currency_sym, "");
    assert_eq!(m.frac_digits, 2);
    assert_eq!(m.decorate("1.00"), "1.00");
}

#[test]
fn test_pattern() {
    let en = NumberSymbols::numeric(Locale::en_US);
    let fmt = NumberFormat::news(number_pattern(3), en).expect("pattern");
    let s = fmt.fmt(1234567.891).expect("fmt");
    assert_eq!(s.trim(), "1,234,567.891");

    let de = NumberSymbols::numeric(Locale::de_DE);
    let fmt = NumberFormat::news(number_pattern(2), de).expect("pattern");
    let s = fmt.fmt(1234.5).expect("fmt");
    assert_eq!(s.trim(), "1.234,50");
}

#[test]
fn test_trim_fraction() {
    assert_eq!(trim_fraction("1.500", '.', 0), "1.5");
    assert_eq!(trim_fraction("2.000", '.', 0), "2");
    assert_eq!(trim_fraction("2.000", '.', 2), "2.00");
    assert_eq!(trim_fraction("1.234,500", ',', 0), "1.234,5");
    assert_eq!(trim_fraction("100", '.', 0), "100");
}

#[test]
fn test_valid_strict() {
    let en = NumberSymbols::numeric(Locale::en_US);
    assert!(valid_digits("1,234.5", &en, false));
    assert!(valid_digits("1234.5", &en, false));
    assert!(valid_digits(".5", &en, false));
    assert!(!valid_digits("1,,234", &en, false));
    assert!(!valid_digits(",123", &en, false));
    assert!(!valid_digits("123,", &en, false));
    assert!(!valid_digits("1.2.3", &en, false));
    assert!(!valid_digits("1 234", &en, false));
    assert!(!valid_digits("1.2,3", &en, false));
    assert!(!valid_digits("abc", &en, false));
    assert!(!valid_digits("", &en, false));
    assert!(!valid_digits(".", &en, false));
}

#[test]
fn test_valid_lenient() {
    let en = NumberSymbols::numeric(Locale::en_US);
    assert!(valid_digits("1 234", &en, true));
    assert!(valid_digits("1,,234", &en, true));
    assert!(valid_digits("123,", &en, true));
    assert!(!valid_digits("1.5x", &en, true));
    assert!(!valid_digits("1.5 0", &en, true));
}

#[test]
fn test_clean() {
    let en = NumberSymbols::numeric(Locale::en_US);
    assert_eq!(clean_digits("1,234.5", &en), Some(1234.5));
    assert_eq!(clean_digits("0", &en), Some(0.0));
    assert_eq!(clean_digits("0.25", &en), Some(0.25));

    let de = NumberSymbols::numeric(Locale::de_DE);
    assert_eq!(clean_digits("1.234,5", &de), Some(1234.5));
}
