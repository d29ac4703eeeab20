#[cfg(test)]
mod tests {
    use crate::error::CalendarError;
    use crate::extract::{Diagnostic, TableExtractor};
    use crate::models::SlotStatus;
    use buzz_config::VenueConfig;

    fn extractor() -> TableExtractor {
        TableExtractor::new(&VenueConfig::default()).expect("default markers compile")
    }

    fn page(table: &str) -> String {
        format!(
            "<html><head><title>BUZZ</title></head><body><div id=\"calendar\">{}</div></body></html>",
            table
        )
    }

    #[test]
    fn test_two_studios_three_rows() {
        let markup = page(
            r#"<table class="reservation-table">
                <tr><th>時間</th>
                    <th><span class="studio-name">1st</span></th>
                    <th><span class="studio-name">2st</span></th></tr>
                <tr><td>10:00</td>
                    <td></td>
                    <td><a href="/reserve?studio=2&amp;time=1000">予約</a></td></tr>
                <tr><td>10:30</td>
                    <td><span class="closed">×</span></td>
                    <td></td></tr>
                <tr><td>11:00</td>
                    <td></td>
                    <td></td></tr>
            </table>"#,
        );

        let extraction = extractor().extract(&markup);
        let grid = &extraction.grid;

        assert_eq!(grid.studios().len(), 2);
        let slots: Vec<&str> = grid.slots().iter().map(|s| s.as_str()).collect();
        assert_eq!(slots, vec!["10:00", "10:30", "11:00"]);

        assert_eq!(grid.status("1st", "10:00"), Some(SlotStatus::Available));
        assert_eq!(grid.status("1st", "10:30"), Some(SlotStatus::Reserved));
        assert_eq!(grid.status("1st", "11:00"), Some(SlotStatus::Available));
        assert_eq!(grid.status("2st", "10:00"), Some(SlotStatus::Available));
        assert_eq!(grid.status("2st", "10:30"), Some(SlotStatus::Available));
        assert_eq!(grid.status("2st", "11:00"), Some(SlotStatus::Available));
        assert!(extraction.diagnostics.is_empty(), "{:?}", extraction.diagnostics);
    }

    #[test]
    fn test_missing_table_yields_empty_grid_and_diagnostic() {
        let markup = page("<p>Loading calendar…</p>");
        let extraction = extractor().extract(&markup);
        assert!(extraction.grid.is_empty());
        assert!(extraction.grid.slots().is_empty());
        assert_eq!(extraction.diagnostics, vec![Diagnostic::TableNotFound]);
    }

    #[test]
    fn test_table_without_marker_class_is_not_used() {
        let markup = page(
            r#"<table class="news"><tr><th>Date</th><th><span class="studio-name">1st</span></th></tr>
               <tr><td>10:00</td><td></td></tr></table>"#,
        );
        let extraction = extractor().extract(&markup);
        assert!(extraction.grid.is_empty());
        assert!(extraction.diagnostics.contains(&Diagnostic::TableNotFound));
    }

    #[test]
    fn test_unlabelled_header_cell_leaves_no_gap() {
        let markup = page(
            r#"<table class="reservation-table">
                <tr><th>時間</th>
                    <th><span class="studio-name">1st</span></th>
                    <th>maintenance</th>
                    <th><span class="studio-name">3st</span></th></tr>
                <tr><td>10:00</td>
                    <td><span class="closed"></span></td>
                    <td><a href="/r">予約</a></td>
                    <td><span class="closed"></span></td></tr>
            </table>"#,
        );

        let extraction = extractor().extract(&markup);
        let grid = &extraction.grid;

        let studios: Vec<&str> = grid.studios().iter().map(|s| s.as_str()).collect();
        assert_eq!(studios, vec!["1st", "3st"]);
        // cells align with the compacted studio list: the second cell goes to 3st
        assert_eq!(grid.status("1st", "10:00"), Some(SlotStatus::Reserved));
        assert_eq!(grid.status("3st", "10:00"), Some(SlotStatus::Available));
        assert!(extraction
            .diagnostics
            .contains(&Diagnostic::HeaderLabelMissing { column: 2 }));
        assert!(extraction
            .diagnostics
            .contains(&Diagnostic::ExtraCell { row: 1, column: 3 }));
    }

    #[test]
    fn test_table_without_rows_reports_missing_header() {
        let markup = page(r#"<table class="reservation-table"></table>"#);
        let extraction = extractor().extract(&markup);
        assert!(extraction.grid.is_empty());
        assert!(extraction.grid.slots().is_empty());
        assert_eq!(extraction.diagnostics, vec![Diagnostic::HeaderNotFound]);
    }

    #[test]
    fn test_row_without_time_label_is_skipped() {
        let markup = page(
            r#"<table class="reservation-table">
                <tr><th></th><th><span class="studio-name">1st</span></th></tr>
                <tr><td>10:00</td><td></td></tr>
                <tr><td>  </td><td class="closed"></td></tr>
                <tr><td>10:30</td><td></td></tr>
            </table>"#,
        );

        let extraction = extractor().extract(&markup);
        let slots: Vec<&str> = extraction.grid.slots().iter().map(|s| s.as_str()).collect();
        assert_eq!(slots, vec!["10:00", "10:30"]);
        assert_eq!(extraction.grid.status("1st", ""), None);
        assert_eq!(
            extraction.diagnostics,
            vec![Diagnostic::MissingTimeLabel { row: 2 }]
        );
    }

    #[test]
    fn test_empty_row_is_skipped() {
        let markup = page(
            r#"<table class="reservation-table">
                <tr><th></th><th><span class="studio-name">1st</span></th></tr>
                <tr><td>10:00</td><td></td></tr>
                <tr></tr>
                <tr><td>10:30</td><td class="closed"></td></tr>
            </table>"#,
        );

        let extraction = extractor().extract(&markup);
        let slots: Vec<&str> = extraction.grid.slots().iter().map(|s| s.as_str()).collect();
        assert_eq!(slots, vec!["10:00", "10:30"]);
        assert_eq!(extraction.diagnostics, vec![Diagnostic::EmptyRow { row: 2 }]);
    }

    #[test]
    fn test_short_row_defaults_missing_studios_to_available() {
        let markup = page(
            r#"<table class="reservation-table">
                <tr><th></th>
                    <th><span class="studio-name">1st</span></th>
                    <th><span class="studio-name">2st</span></th></tr>
                <tr><td>10:00</td><td><span class="closed"></span></td></tr>
            </table>"#,
        );

        let extraction = extractor().extract(&markup);
        assert_eq!(extraction.grid.status("1st", "10:00"), Some(SlotStatus::Reserved));
        assert_eq!(extraction.grid.status("2st", "10:00"), Some(SlotStatus::Available));
        assert_eq!(
            extraction.diagnostics,
            vec![Diagnostic::ShortRow {
                row: 1,
                cells: 1,
                studios: 2
            }]
        );
    }

    #[test]
    fn test_closed_marker_wins_over_link() {
        let markup = page(
            r#"<table class="reservation-table">
                <tr><th></th><th><span class="studio-name">1st</span></th></tr>
                <tr><td>10:00</td><td><a href="/r" class="is-closed">満</a></td></tr>
                <tr><td>10:30</td><td data-status="closed"></td></tr>
                <tr><td>11:00</td><td><button type="button">予約</button></td></tr>
            </table>"#,
        );

        let grid = extractor().extract_grid(&markup);
        assert_eq!(grid.status("1st", "10:00"), Some(SlotStatus::Reserved));
        assert_eq!(grid.status("1st", "10:30"), Some(SlotStatus::Reserved));
        assert_eq!(grid.status("1st", "11:00"), Some(SlotStatus::Available));
    }

    #[test]
    fn test_labels_are_normalised() {
        let markup = page(
            r#"<table class="reservation-table">
                <tr><th>時間</th><th><span class="studio-name"> 7 </span></th></tr>
                <tr><td> 9:00 </td><td></td></tr>
                <tr><td>9:30</td><td></td></tr>
            </table>"#,
        );

        let grid = extractor().extract_grid(&markup);
        assert_eq!(grid.studios()[0].as_str(), "7st");
        let slots: Vec<&str> = grid.slots().iter().map(|s| s.as_str()).collect();
        assert_eq!(slots, vec!["09:00", "09:30"]);
    }

    #[test]
    fn test_repeated_time_row_overwrites_in_place() {
        let markup = page(
            r#"<table class="reservation-table">
                <tr><th></th><th><span class="studio-name">1st</span></th></tr>
                <tr><td>10:00</td><td class="closed"></td></tr>
                <tr><td>10:30</td><td></td></tr>
                <tr><td>10:00</td><td></td></tr>
            </table>"#,
        );

        let grid = extractor().extract_grid(&markup);
        let slots: Vec<&str> = grid.slots().iter().map(|s| s.as_str()).collect();
        assert_eq!(slots, vec!["10:00", "10:30"]);
        assert_eq!(grid.status("1st", "10:00"), Some(SlotStatus::Available));
    }

    #[test]
    fn test_header_without_labels_reports_no_studios() {
        let markup = page(
            r#"<table class="reservation-table">
                <tr><th>時間</th><th>1st</th><th>2st</th></tr>
                <tr><td>10:00</td><td></td><td></td></tr>
            </table>"#,
        );

        let extraction = extractor().extract(&markup);
        assert!(extraction.grid.is_empty());
        assert!(extraction.diagnostics.contains(&Diagnostic::NoStudioColumns));
    }

    #[test]
    fn test_custom_markers() {
        let mut venue = VenueConfig::default();
        venue.markers.table = "#slots".to_string();
        venue.markers.studio_label = "b".to_string();
        venue.markers.closed = ".full".to_string();
        let extractor = TableExtractor::new(&venue).expect("markers compile");

        let markup = page(
            r#"<table id="slots">
                <thead><tr><th>time</th><th><b>4st</b></th></tr></thead>
                <tbody><tr><th>12:00</th><td><i class="full"></i></td></tr></tbody>
            </table>"#,
        );

        let grid = extractor.extract_grid(&markup);
        assert_eq!(grid.status("4st", "12:00"), Some(SlotStatus::Reserved));
    }

    #[test]
    fn test_invalid_selector_is_rejected_at_construction() {
        let mut venue = VenueConfig::default();
        venue.markers.closed = "td[[".to_string();
        match TableExtractor::new(&venue) {
            Err(CalendarError::InvalidSelector { name, selector, .. }) => {
                assert_eq!(name, "closed");
                assert_eq!(selector, "td[[");
            }
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("selector should not compile"),
        }
    }
}
