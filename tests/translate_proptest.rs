use apilint_lib::{Position, Range, Severity, translate};
use proptest::prelude::*;

fn single_problem_report(start: (u32, u32), end: (u32, u32)) -> String {
    format!(
        r#"[{{"file_path":"x.proto","problems":[{{"message":"m","rule_id":"r","rule_doc_uri":"u","location":{{"start_position":{{"line_number":{},"column_number":{}}},"end_position":{{"line_number":{},"column_number":{}}}}}}}]}}]"#,
        start.0, start.1, end.0, end.1
    )
}

proptest! {
    #[test]
    fn one_based_positions_round_trip(line in 1..=u32::MAX, column in 1..=u32::MAX) {
        let position = Position::from_one_based(line, column);
        prop_assert_eq!(position, Position::new(line - 1, column - 1));
        prop_assert_eq!(position.one_based(), (line, column));
    }

    #[test]
    fn report_ranges_shift_both_endpoints(
        start_line in 1..100_000u32,
        start_column in 1..1_000u32,
        end_line in 1..100_000u32,
        end_column in 1..1_000u32,
    ) {
        let stdout = single_problem_report((start_line, start_column), (end_line, end_column));
        let diagnostics = translate(0, &stdout, "", "x.proto").unwrap();

        prop_assert_eq!(diagnostics.len(), 1);
        prop_assert_eq!(diagnostics[0].severity, Severity::Warning);
        prop_assert_eq!(
            diagnostics[0].range,
            Range::new(
                Position::new(start_line - 1, start_column - 1),
                Position::new(end_line - 1, end_column - 1)
            )
        );
    }

    #[test]
    fn error_records_keep_description_and_position(
        file in r"[a-z][a-z0-9_/]{0,20}\.proto",
        line in 1..1_000_000u32,
        column in 1..10_000u32,
        description in r"[ -~]{0,60}",
    ) {
        let stderr = format!("Error: lint failed: {file}:{line}:{column}:{description}\n");

        let diagnostics = translate(1, "", &stderr, &file).unwrap();
        prop_assert_eq!(diagnostics.len(), 1);
        prop_assert_eq!(diagnostics[0].severity, Severity::Error);
        prop_assert_eq!(&diagnostics[0].message, &description);
        prop_assert_eq!(diagnostics[0].range, Range::point(Position::new(line - 1, column - 1)));

        let elsewhere = translate(1, "", &stderr, "Other.proto").unwrap();
        prop_assert_eq!(elsewhere.len(), 1);
        prop_assert_eq!(&elsewhere[0].message, &description);
        prop_assert_eq!(elsewhere[0].range, Range::point(Position::origin()));
    }
}
