//! Property-based tests for canonicalization and whitespace handling

use proptest::prelude::*;
use xmlschema_datatypes::{
    Builtin, Handle, Restriction, SchemaGraph, SchemaGraphBuilder, SimpleTypeValidator,
};

fn canonical(graph: &SchemaGraph, ty: Handle, text: &str) -> Option<String> {
    SimpleTypeValidator::new(graph)
        .validate(ty, text, None)
        .ok()
        .map(|v| v.canonical)
}

fn decimal_text() -> impl Strategy<Value = String> {
    ("[+-]?", "[0-9]{1,12}", proptest::option::of("[0-9]{0,8}")).prop_map(
        |(sign, int, frac)| match frac {
            Some(frac) => format!("{}{}.{}", sign, int, frac),
            None => format!("{}{}", sign, int),
        },
    )
}

fn year_text(year: i64) -> String {
    if year < 0 {
        format!("-{:04}", year.unsigned_abs())
    } else {
        format!("{:04}", year)
    }
}

fn zone_text(hours: Option<i32>) -> String {
    match hours {
        None => String::new(),
        Some(0) => "Z".to_string(),
        Some(h) => format!("{}{:02}:00", if h < 0 { '-' } else { '+' }, h.abs()),
    }
}

fn date_time_with_years(years: impl Strategy<Value = i64>) -> impl Strategy<Value = String> {
    (
        years,
        1u32..=12,
        1u32..=28,
        0u32..24,
        0u32..60,
        0u32..60,
        proptest::option::of(-14i32..=14),
    )
        .prop_map(|(y, mo, d, h, mi, s, tz)| {
            format!(
                "{}-{:02}-{:02}T{:02}:{:02}:{:02}{}",
                year_text(y),
                mo,
                d,
                h,
                mi,
                s,
                zone_text(tz)
            )
        })
}

fn date_time_text() -> impl Strategy<Value = String> {
    date_time_with_years(1000i64..9999)
}

/// Years beyond four digits and before year one
fn wide_year() -> impl Strategy<Value = i64> {
    prop_oneof![10_000i64..=99_999_999, -99_999_999i64..=-1]
}

fn duration_text() -> impl Strategy<Value = String> {
    (
        any::<bool>(),
        0u32..50,
        0u32..50,
        0u32..400,
        0u32..100,
        0u32..100,
        0u32..100,
    )
        .prop_map(|(neg, y, mo, d, h, mi, s)| {
            format!(
                "{}P{}Y{}M{}DT{}H{}M{}S",
                if neg { "-" } else { "" },
                y,
                mo,
                d,
                h,
                mi,
                s
            )
        })
}

proptest! {
    #[test]
    fn test_decimal_canonical_is_idempotent(text in decimal_text()) {
        let graph = SchemaGraphBuilder::new().build();
        let decimal = graph.builtin(Builtin::Decimal);
        let first = canonical(&graph, decimal, &text).expect("generated decimals are valid");
        prop_assert_eq!(canonical(&graph, decimal, &first), Some(first.clone()));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored(
        text in decimal_text(),
        lead in "[ \t\r\n]{0,3}",
        trail in "[ \t\r\n]{0,3}",
    ) {
        let graph = SchemaGraphBuilder::new().build();
        let decimal = graph.builtin(Builtin::Decimal);
        let padded = format!("{}{}{}", lead, text, trail);
        prop_assert_eq!(canonical(&graph, decimal, &padded), canonical(&graph, decimal, &text));
    }

    #[test]
    fn test_trailing_zeros_are_insignificant(
        int in "[1-9][0-9]{0,5}",
        frac in "[0-9]{0,4}[1-9]",
        zeros in 0usize..6,
    ) {
        let mut builder = SchemaGraphBuilder::new();
        let decimal = builder.builtin(Builtin::Decimal);
        let five = builder.restrict(decimal, Restriction::new().fraction_digits(5)).unwrap();
        let graph = builder.build();

        let plain = format!("{}.{}", int, frac);
        let padded = format!("{}{}", plain, "0".repeat(zeros));
        prop_assert_eq!(canonical(&graph, five, &padded), canonical(&graph, five, &plain));
        prop_assert!(canonical(&graph, five, &plain).is_some());
    }

    #[test]
    fn test_date_time_canonical_is_idempotent(text in date_time_text()) {
        let graph = SchemaGraphBuilder::new().build();
        let date_time = graph.builtin(Builtin::DateTime);
        let first = canonical(&graph, date_time, &text).expect("generated dateTimes are valid");
        prop_assert_eq!(canonical(&graph, date_time, &first), Some(first.clone()));
    }

    #[test]
    fn test_wide_year_canonical_is_idempotent(
        text in date_time_with_years(wide_year()),
        midnight in any::<bool>(),
    ) {
        let graph = SchemaGraphBuilder::new().build();
        let date_time = graph.builtin(Builtin::DateTime);
        let text = if midnight {
            let (date, clock) = text.split_once('T').unwrap();
            format!("{}T24:00:00{}", date, &clock[8..])
        } else {
            text
        };
        let first = canonical(&graph, date_time, &text).expect("generated dateTimes are valid");
        prop_assert_eq!(canonical(&graph, date_time, &first), Some(first.clone()));
    }

    #[test]
    fn test_duration_canonical_is_idempotent(text in duration_text()) {
        let graph = SchemaGraphBuilder::new().build();
        let duration = graph.builtin(Builtin::Duration);
        let first = canonical(&graph, duration, &text).expect("generated durations are valid");
        prop_assert_eq!(canonical(&graph, duration, &first), Some(first.clone()));
    }

    #[test]
    fn test_list_item_count(items in proptest::collection::vec("[a-z0-9]{1,6}", 0..8)) {
        let graph = SchemaGraphBuilder::new().build();
        let nmtokens = graph.builtin(Builtin::Nmtokens);
        let text = items.join(" \t ");
        let result = SimpleTypeValidator::new(&graph).validate(nmtokens, &text, None);
        if items.is_empty() {
            prop_assert!(result.is_err());
        } else {
            let validated = result.unwrap();
            prop_assert_eq!(validated.value.as_list().map(|l| l.len()), Some(items.len()));
            prop_assert_eq!(validated.canonical, items.join(" "));
        }
    }
}
