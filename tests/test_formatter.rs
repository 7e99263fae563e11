use rat_number_field::formatter::{
    parse_locale_name, FormatError, NumberFormatter, NumberStyle, StyleFormatter,
};
use rat_number_field::Locale;

#[test]
fn test_currency_render() {
    let fmt = StyleFormatter::new(NumberStyle::Currency, Locale::en_US);
    assert_eq!(fmt.render(1.0).as_deref(), Some("$1.00"));
    assert_eq!(fmt.render(-1.0).as_deref(), Some("-$1.00"));
    assert_eq!(fmt.render(1234.5).as_deref(), Some("$1,234.50"));
    assert_eq!(fmt.render(-0.001).as_deref(), Some("$0.00"));
    assert_eq!(fmt.render(f64::NAN), None);

    let fmt = StyleFormatter::new(NumberStyle::Currency, Locale::de_DE);
    assert_eq!(fmt.render(1234.5).as_deref(), Some("1.234,50 €"));
}

#[test]
fn test_currency_parse() {
    let fmt = StyleFormatter::new(NumberStyle::Currency, Locale::en_US);
    assert_eq!(fmt.parse("$1.00"), Some(1.0));
    assert_eq!(fmt.parse("-$1.00"), Some(-1.0));
    assert_eq!(fmt.parse("$-1.00"), Some(-1.0));
    assert_eq!(fmt.parse("$1,234.50"), Some(1234.5));
    assert_eq!(fmt.parse("1.00"), None);
    assert_eq!(fmt.parse("--$1"), None);
    assert_eq!(fmt.parse(""), None);
    assert_eq!(fmt.parse("   "), None);
    assert_eq!(fmt.parse("abc"), None);

    let fmt = fmt.lenient(true);
    assert_eq!(fmt.parse("1.5"), Some(1.5));
    assert_eq!(fmt.parse(" $ 1,234.5 "), Some(1234.5));
    assert_eq!(fmt.parse("+3"), Some(3.0));
    assert_eq!(fmt.parse("$1.00"), Some(1.0));
    assert_eq!(fmt.parse("1.5$"), Some(1.5));
    assert_eq!(fmt.parse("abc"), None);

    let fmt = StyleFormatter::new(NumberStyle::Currency, Locale::de_DE);
    assert_eq!(fmt.parse("1.234,50 €"), Some(1234.5));
}

#[test]
fn test_percent() {
    let fmt = StyleFormatter::new(NumberStyle::Percent, Locale::en_US);
    assert_eq!(fmt.render(0.15).as_deref(), Some("15%"));
    assert_eq!(fmt.render(1.0).as_deref(), Some("100%"));
    assert_eq!(fmt.render(-0.05).as_deref(), Some("-5%"));
    assert_eq!(fmt.parse("15%"), Some(0.15));
    assert_eq!(fmt.parse("12.5%"), Some(0.125));
    assert_eq!(fmt.parse("15"), None);

    let fmt = fmt.lenient(true);
    assert_eq!(fmt.parse("15"), Some(0.15));
    assert_eq!(fmt.parse(" 15 % "), Some(0.15));
    assert_eq!(fmt.parse("%"), None);
}

#[test]
fn test_decimal() {
    let fmt = StyleFormatter::new(NumberStyle::Decimal, Locale::en_US);
    assert_eq!(fmt.render(1234.5678).as_deref(), Some("1,234.568"));
    assert_eq!(fmt.render(2.0).as_deref(), Some("2"));
    assert_eq!(fmt.render(-1.5).as_deref(), Some("-1.5"));
    assert_eq!(fmt.parse("1,234.5"), Some(1234.5));
    assert_eq!(fmt.parse("-1.5"), Some(-1.5));
    assert_eq!(fmt.parse("1.5%"), None);
    assert_eq!(fmt.parse("+5"), None);
    assert_eq!(fmt.parse("-"), None);
    assert_eq!(fmt.parse(" 42 "), Some(42.0));

    let lenient = fmt.clone().lenient(true);
    assert_eq!(lenient.parse("+5"), Some(5.0));
    assert_eq!(lenient.parse("- 7"), Some(-7.0));
    assert_eq!(lenient.parse("1 234"), Some(1234.0));

    let posix = StyleFormatter::new(NumberStyle::Decimal, Locale::POSIX);
    assert_eq!(posix.render(1234.5).as_deref(), Some("1234.5"));

    let fmt = fmt.max_fraction_digits(1).expect("fraction digits");
    assert_eq!(fmt.render(1.24).as_deref(), Some("1.2"));
    assert_eq!(fmt.render(1.26).as_deref(), Some("1.3"));

    let fmt = StyleFormatter::new(NumberStyle::Decimal, Locale::de_DE);
    assert_eq!(fmt.render(1234.5).as_deref(), Some("1.234,5"));
    assert_eq!(fmt.parse("1.234,5"), Some(1234.5));
}

#[test]
fn test_reformat_idempotent() {
    let styles = [
        StyleFormatter::new(NumberStyle::Currency, Locale::en_US),
        StyleFormatter::new(NumberStyle::Currency, Locale::en_US).lenient(true),
        StyleFormatter::new(NumberStyle::Percent, Locale::en_US),
        StyleFormatter::new(NumberStyle::Decimal, Locale::de_DE),
    ];
    for fmt in &styles {
        for x in [0.0, 1.0, -1.0, 0.15, 12.5, 1234.5, 987654.25] {
            let s = fmt.render(x).expect("render");
            let v = fmt.parse(&s).expect("parse");
            assert_eq!(fmt.render(v).as_deref(), Some(s.as_str()), "{:?}", fmt);
        }
    }
}

#[test]
fn test_construction() {
    assert_eq!(
        StyleFormatter::new(NumberStyle::Decimal, Locale::en_US)
            .max_fraction_digits(16)
            .err(),
        Some(FormatError::InvalidFractionDigits(16))
    );

    let fmt = StyleFormatter::from_locale_name(NumberStyle::Currency, "en_US.UTF-8")
        .expect("locale");
    assert_eq!(fmt.locale(), Locale::en_US);
    assert_eq!(fmt.style(), NumberStyle::Currency);
    assert!(!fmt.is_lenient());

    let err = StyleFormatter::from_locale_name(NumberStyle::Currency, "xx_YY").err();
    assert_eq!(err, Some(FormatError::UnknownLocale("xx_YY".to_string())));
    assert_eq!(
        FormatError::UnknownLocale("xx_YY".to_string()).to_string(),
        "unknown locale \"xx_YY\""
    );

    assert_eq!(parse_locale_name("de_DE.UTF-8"), Ok(Locale::de_DE));
    assert_eq!(parse_locale_name("C"), Ok(Locale::POSIX));
    assert_eq!(parse_locale_name("C.UTF-8"), Ok(Locale::POSIX));
    assert_eq!(parse_locale_name(""), Ok(Locale::POSIX));
}
