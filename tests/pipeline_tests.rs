use chrono::Utc;
use scoutbase_server::db::models::Player;
use scoutbase_server::pipeline::{
    filter_by_name, paginate, sort_by_market_value, total_pages, valid_page_params,
    SortDirection,
};
use uuid::Uuid;

fn player(name: &str, market_value: Option<i64>) -> Player {
    Player {
        id: Uuid::new_v4(),
        player_id: 0,
        name: Some(name.into()),
        nationality: None,
        current_club_id: None,
        country_of_birth: None,
        city_of_birth: None,
        country_of_citizenship: None,
        date_of_birth: None,
        sub_position: None,
        foot: None,
        height_in_cm: None,
        contract_expiration_date: None,
        agent_name: None,
        current_club_domestic_competition_id: "GB1".into(),
        current_club_name: None,
        market_value_in_eur: market_value,
        highest_market_value_in_eur: None,
        age: None,
        xgboost_predicted_values: None,
        rft_predicted_values: None,
        image_url: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn names(players: &[Player]) -> Vec<&str> {
    players.iter().filter_map(|p| p.name.as_deref()).collect()
}

#[test]
fn search_is_case_insensitive_substring() {
    let set = vec![
        player("Lionel Messi", Some(50_000_000)),
        player("Cristiano Ronaldo", Some(20_000_000)),
        player("Erling Haaland", Some(180_000_000)),
    ];

    let hits = filter_by_name(set, Some("MESSI"));
    assert_eq!(names(&hits), vec!["Lionel Messi"]);
}

#[test]
fn absent_query_passes_everything_through() {
    let set = vec![player("A", None), player("B", None)];
    assert_eq!(filter_by_name(set, None).len(), 2);

    let set = vec![player("A", None), player("B", None)];
    assert_eq!(filter_by_name(set, Some("")).len(), 2);
}

#[test]
fn unmatched_query_yields_empty_set() {
    let set = vec![player("Lionel Messi", None)];
    assert!(filter_by_name(set, Some("zlatan")).is_empty());
}

#[test]
fn nameless_players_never_match() {
    let mut p = player("x", None);
    p.name = None;
    assert!(filter_by_name(vec![p], Some("x")).is_empty());
}

#[test]
fn default_sort_is_descending_market_value() {
    let mut set = vec![
        player("mid", Some(50)),
        player("high", Some(100)),
        player("low", Some(10)),
    ];
    sort_by_market_value(&mut set, SortDirection::Descending);
    assert_eq!(names(&set), vec!["high", "mid", "low"]);
}

#[test]
fn ascending_sort_when_requested() {
    let mut set = vec![player("b", Some(2)), player("c", Some(3)), player("a", Some(1))];
    sort_by_market_value(&mut set, SortDirection::from_query(Some("asc")));
    assert_eq!(names(&set), vec!["a", "b", "c"]);
}

#[test]
fn missing_market_value_sinks_in_descending_order() {
    let mut set = vec![player("unknown", None), player("known", Some(1))];
    sort_by_market_value(&mut set, SortDirection::Descending);
    assert_eq!(names(&set), vec!["known", "unknown"]);
}

#[test]
fn only_asc_flips_the_direction() {
    assert_eq!(SortDirection::from_query(None), SortDirection::Descending);
    assert_eq!(
        SortDirection::from_query(Some("desc")),
        SortDirection::Descending
    );
    assert_eq!(
        SortDirection::from_query(Some("ascending")),
        SortDirection::Descending
    );
    assert_eq!(
        SortDirection::from_query(Some("asc")),
        SortDirection::Ascending
    );
}

#[test]
fn second_page_of_25_is_items_11_through_20() {
    let set: Vec<Player> = (1..=25).map(|i| player(&format!("p{i:02}"), None)).collect();

    let page = paginate(&set, 2, 10);
    assert_eq!(page.len(), 10);
    assert_eq!(page[0].name.as_deref(), Some("p11"));
    assert_eq!(page[9].name.as_deref(), Some("p20"));

    assert_eq!(total_pages(25, 10), 3);
}

#[test]
fn out_of_range_page_is_empty() {
    let set: Vec<Player> = (1..=5).map(|i| player(&format!("p{i}"), None)).collect();
    assert!(paginate(&set, 3, 10).is_empty());
}

#[test]
fn final_page_may_be_short() {
    let set: Vec<Player> = (1..=25).map(|i| player(&format!("p{i:02}"), None)).collect();
    assert_eq!(paginate(&set, 3, 10).len(), 5);
}

#[test]
fn page_params_must_both_be_positive() {
    assert!(!valid_page_params(0, 10));
    assert!(!valid_page_params(2, 0));
    assert!(!valid_page_params(-1, -1));
    assert!(valid_page_params(1, 1));
    assert!(valid_page_params(2, 10));
}

#[test]
fn page_count_rounds_up() {
    assert_eq!(total_pages(0, 10), 0);
    assert_eq!(total_pages(10, 10), 1);
    assert_eq!(total_pages(11, 10), 2);
}
