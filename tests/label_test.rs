//! Tests for the presentation adapter

use rstest::rstest;

use alloctree::domain::{DomainError, Presenter};

#[rstest]
#[case("Stocks", 60.0, 1, "Stocks - 60%")]
#[case("Bonds", 33.333, 2, "Bonds - 33.33%")]
#[case("World", 12.5, 3, "World - 12.50%")]
#[case("ETF", 1234567.0, 4, "ETF - ¥1,234,567")]
#[case("Cash", 999.5, 4, "Cash - ¥999.50")]
#[case("Empty", 0.0, 4, "Empty - ¥0")]
fn given_node_when_labelling_then_formats_by_level(
    #[case] name: &str,
    #[case] value: f64,
    #[case] depth: usize,
    #[case] expected: &str,
) {
    let presenter = Presenter::default();
    assert_eq!(presenter.label(name, value, depth), expected);
}

#[test]
fn given_custom_currency_when_labelling_holding_then_uses_prefix() {
    let presenter = Presenter::new("€");
    assert_eq!(presenter.label("ETF", 12000.0, 4), "ETF - €12,000");
    assert_eq!(presenter.money(600.4), "€600");
}

#[test]
fn given_ring_segment_when_labelling_then_percentage() {
    let presenter = Presenter::default();
    assert_eq!(presenter.ring_label("ETF", 16.666666), "ETF 16.67%");
    assert_eq!(presenter.ring_label("Stocks", 60.0), "Stocks 60%");
}

#[rstest]
#[case(12000.0, 4, "¥ 12,000")]
#[case(1234.5, 4, "¥ 1,234.5")]
#[case(25.0, 2, "25%")]
#[case(12.5, 3, "12.5%")]
fn given_value_when_formatting_input_then_matches_form_display(
    #[case] value: f64,
    #[case] depth: usize,
    #[case] expected: &str,
) {
    assert_eq!(Presenter::default().format_input(value, depth), expected);
}

#[rstest]
#[case("¥ 12,000", 4, 12000.0)]
#[case("¥1,234.5", 4, 1234.5)]
#[case("800", 4, 800.0)]
#[case("25%", 2, 25.0)]
#[case(" 12.5 % ", 3, 12.5)]
#[case("40", 1, 40.0)]
fn given_input_when_parsing_then_returns_raw_number(
    #[case] input: &str,
    #[case] depth: usize,
    #[case] expected: f64,
) {
    assert_eq!(Presenter::default().parse_input(input, depth).unwrap(), expected);
}

#[test]
fn given_formatted_input_when_parsing_back_then_same_value() {
    let presenter = Presenter::default();
    for (value, depth) in [(1_000_000.0, 4), (0.25, 4), (33.5, 2)] {
        let text = presenter.format_input(value, depth);
        assert_eq!(presenter.parse_input(&text, depth).unwrap(), value);
    }
}

#[rstest]
#[case("", 4)]
#[case("abc", 2)]
#[case("¥ 1,2x", 4)]
#[case("NaN", 3)]
fn given_garbage_when_parsing_then_invalid_value(#[case] input: &str, #[case] depth: usize) {
    let err = Presenter::default().parse_input(input, depth).unwrap_err();
    assert_eq!(
        err,
        DomainError::InvalidValue {
            input: input.to_string(),
            depth
        }
    );
}

#[test]
fn given_empty_currency_when_parsing_amount_then_separators_still_stripped() {
    let presenter = Presenter::new("");

    assert_eq!(presenter.parse_input("1,000", 4).unwrap(), 1000.0);
    assert_eq!(presenter.parse_input(" 12,345.5 ", 4).unwrap(), 12345.5);
    assert_eq!(presenter.label("ETF", 1000.0, 4), "ETF - 1,000");
}
