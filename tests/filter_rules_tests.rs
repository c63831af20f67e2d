use scoutbase_server::http::players::sort_column;

#[test]
fn allow_listed_sort_fields_resolve_to_columns() {
    assert_eq!(
        sort_column("XGBoost_predicted_values"),
        Some("xgboost_predicted_values")
    );
    assert_eq!(sort_column("age"), Some("age"));
    assert_eq!(
        sort_column("current_club_domestic_competition_id"),
        Some("current_club_domestic_competition_id")
    );
}

#[test]
fn anything_else_is_refused() {
    assert_eq!(sort_column("market_value_in_eur"), None);
    assert_eq!(sort_column("name"), None);
    assert_eq!(sort_column("xgboost_predicted_values"), None); // wire name is case-sensitive
    assert_eq!(sort_column(""), None);
    // No injection path: the column only ever comes from the table above.
    assert_eq!(sort_column("age; DROP TABLE player_full_info"), None);
}
