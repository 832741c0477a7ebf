use crate::engine::engine::{filter_by_window, sum, Engine};
use crate::engine::header::{HeaderLabels, AMOUNT_LABEL, TIME_LABEL};
use crate::engine::window::TimeWindow;
use crate::grid::{Cell, RawGrid};
use crate::transaction::TransactionRecord;
use rust_decimal::Decimal;
use std::str::FromStr;

fn scenario_a_grid() -> RawGrid {
    RawGrid::from_text_rows([
        vec!["ignore"],
        vec![TIME_LABEL, AMOUNT_LABEL],
        vec!["08:00:00", "100"],
        vec!["09:30:00", "200"],
        vec!["bad"],
    ])
}

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn test_scenario_a_extract_filter_sum() {
        let engine = Engine::new();
        let grid = scenario_a_grid();

        assert!(engine.validate_structure(&grid));

        let records = engine.extract(&grid);
        assert_eq!(
            records,
            vec![
                TransactionRecord::new("08:00:00", Decimal::from(100)),
                TransactionRecord::new("09:30:00", Decimal::from(200)),
            ]
        );

        let window = TimeWindow::parse("07:00:00", "09:00:00").unwrap();
        let matched = filter_by_window(&records, &window);
        assert_eq!(
            matched,
            vec![TransactionRecord::new("08:00:00", Decimal::from(100))]
        );
        assert_eq!(sum(&matched), Decimal::from(100));
    }

    #[test]
    fn test_scenario_a_query() {
        let engine = Engine::new();
        let window = TimeWindow::for_query("07:00:00", "09:00:00").unwrap();

        let result = engine.query(&scenario_a_grid(), &window);

        assert_eq!(result.start_time, "07:00:00");
        assert_eq!(result.end_time, "09:00:00");
        assert_eq!(result.matched, 1);
        assert_eq!(result.total_amount, Decimal::from(100));
    }

    #[test]
    fn test_scenario_b_single_instant_window() {
        let engine = Engine::new();
        let grid = RawGrid::from_text_rows([
            vec![TIME_LABEL, AMOUNT_LABEL],
            vec!["09:59:59", "1"],
            vec!["10:00:00", "50"],
            vec!["10:00:01", "2"],
        ]);
        let window = TimeWindow::parse("10:00:00", "10:00:00").unwrap();

        let result = engine.query(&grid, &window);

        assert_eq!(result.matched, 1);
        assert_eq!(result.total_amount, Decimal::from(50));
    }

    #[test]
    fn test_scenario_c_amount_label_missing() {
        let engine = Engine::new();
        let grid = RawGrid::from_text_rows([
            vec!["STT", TIME_LABEL, "Mặt hàng"],
            vec!["1", "08:00:00", "Xăng RON 95"],
            vec!["2", "08:05:00", "Dầu DO"],
        ]);

        assert!(!engine.validate_structure(&grid));
        assert!(engine.resolve_header(&grid).is_none());
        assert!(engine.extract(&grid).is_empty());
    }
}

#[cfg(test)]
mod short_grid_tests {
    use super::*;

    #[test]
    fn test_grids_under_two_rows() {
        let engine = Engine::new();
        let grids = [
            RawGrid::default(),
            RawGrid::from_text_rows([vec![TIME_LABEL, AMOUNT_LABEL]]),
            RawGrid::from_text_rows([vec![TIME_LABEL, AMOUNT_LABEL, "08:00:00", "100"]]),
        ];

        for grid in grids.iter() {
            assert!(!engine.validate_structure(grid));
            assert!(engine.extract(grid).is_empty());
        }
    }
}

#[cfg(test)]
mod row_tolerance_tests {
    use super::*;

    #[test]
    fn test_columns_in_any_position() {
        let engine = Engine::new();
        let grid = RawGrid::from_text_rows([
            vec!["Mã", AMOUNT_LABEL, "Vòi", TIME_LABEL],
            vec!["A1", "120.5", "3", "06:15:00"],
            vec!["A2", "80", "1", "07:45:30"],
        ]);

        let records = engine.extract(&grid);

        assert_eq!(
            records,
            vec![
                TransactionRecord::new("06:15:00", Decimal::from_str("120.5").unwrap()),
                TransactionRecord::new("07:45:30", Decimal::from(80)),
            ]
        );
    }

    #[test]
    fn test_short_rows_dropped_regardless_of_content() {
        let engine = Engine::new();
        let grid = RawGrid::from_text_rows([
            vec!["Mã", TIME_LABEL, AMOUNT_LABEL],
            vec!["A1", "08:00:00"],
            vec!["100", "200"],
            vec!["A3", "08:10:00", "300"],
        ]);

        assert_eq!(
            engine.extract(&grid),
            vec![TransactionRecord::new("08:10:00", Decimal::from(300))]
        );
    }

    #[test]
    fn test_bad_amounts_dropped_without_aborting() {
        let engine = Engine::new();
        let grid = RawGrid::from_text_rows([
            vec![TIME_LABEL, AMOUNT_LABEL],
            vec!["08:00:00", ""],
            vec!["08:01:00", "n/a"],
            vec!["08:02:00", "10"],
            vec!["08:03:00", "NaN"],
            vec!["08:04:00", "20"],
        ]);

        let records = engine.extract(&grid);

        assert_eq!(records.len(), 2);
        assert_eq!(sum(&records), Decimal::from(30));
    }

    #[test]
    fn test_mixed_cell_kinds() {
        let engine = Engine::new();
        let grid = RawGrid::from_rows(vec![
            vec![Cell::from(TIME_LABEL), Cell::from(AMOUNT_LABEL)],
            vec![Cell::from("08:00:00"), Cell::Number(150.0)],
            vec![Cell::from("08:30:00"), Cell::Number(f64::NAN)],
            vec![Cell::from("09:00:00"), Cell::Empty],
            vec![Cell::from("09:30:00"), Cell::from("25")],
        ]);

        let window = TimeWindow::parse("00:00:00", "23:59:59").unwrap();
        let result = engine.query(&grid, &window);

        assert_eq!(result.matched, 2);
        assert_eq!(result.total_amount, Decimal::from(175));
    }

    #[test]
    fn test_unparseable_times_extracted_but_never_matched() {
        let engine = Engine::new();
        let grid = RawGrid::from_text_rows([
            vec![TIME_LABEL, AMOUNT_LABEL],
            vec!["sáng", "100"],
            vec!["08:00:00", "5"],
        ]);

        assert_eq!(engine.extract(&grid).len(), 2);

        let window = TimeWindow::parse("00:00:00", "23:59:59").unwrap();
        assert_eq!(engine.query(&grid, &window).total_amount, Decimal::from(5));
    }
}

#[cfg(test)]
mod custom_label_tests {
    use super::*;

    #[test]
    fn test_engine_with_custom_labels() {
        let engine = Engine::with_labels(HeaderLabels::new("Time", "Amount"));
        let grid = RawGrid::from_text_rows([
            vec![TIME_LABEL, AMOUNT_LABEL],
            vec!["Time", "Amount"],
            vec!["12:00:00", "7"],
        ]);

        let columns = engine.resolve_header(&grid).unwrap();
        assert_eq!(columns.header_row, 1);
        assert_eq!(
            engine.extract(&grid),
            vec![TransactionRecord::new("12:00:00", Decimal::from(7))]
        );
    }
}
