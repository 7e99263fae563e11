use rat_number_field::tip::{tip_value, total_value, TipCalculator};

#[test]
fn test_tip() {
    assert_eq!(tip_value(Some(10.0), Some(0.15)), Some(1.5));
    assert_eq!(total_value(Some(10.0), Some(1.5)), Some(11.5));

    assert_eq!(tip_value(None, Some(0.15)), None);
    assert_eq!(tip_value(Some(10.0), None), None);
    assert_eq!(total_value(Some(10.0), None), None);
    assert_eq!(total_value(None, Some(1.5)), None);
}

#[test]
fn test_calculator() {
    let calc = TipCalculator::new();
    assert_eq!(calc.amount.get(), Some(1.0));
    assert_eq!(calc.rate.get(), Some(1.0));
    assert_eq!(calc.tip(), Some(1.0));
    assert_eq!(calc.total(), Some(2.0));

    calc.amount.set(Some(10.0));
    calc.rate.set(Some(0.15));
    assert_eq!(calc.tip(), Some(1.5));
    assert_eq!(calc.total(), Some(11.5));

    calc.rate.set(None);
    assert_eq!(calc.tip(), None);
    assert_eq!(calc.total(), None);

    calc.rate.set(Some(0.15));
    calc.amount.set(None);
    assert_eq!(calc.tip(), None);
    assert_eq!(calc.total(), None);
}
