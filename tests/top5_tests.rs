use chrono::Utc;
use scoutbase_server::db::models::Player;
use scoutbase_server::pipeline::{top_by_competition, TOP_GROUP_SIZE};
use uuid::Uuid;

fn player(competition: &str, predicted: f64) -> Player {
    Player {
        id: Uuid::new_v4(),
        player_id: 0,
        name: Some(format!("{competition}-{predicted}")),
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
        current_club_domestic_competition_id: competition.into(),
        current_club_name: None,
        market_value_in_eur: None,
        highest_market_value_in_eur: None,
        age: None,
        xgboost_predicted_values: Some(predicted),
        rft_predicted_values: None,
        image_url: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn each_competition_group_is_capped_at_five_descending() {
    let mut set = Vec::new();
    for i in 0..6 {
        set.push(player("ES1", 100.0 + i as f64));
    }
    for i in 0..7 {
        set.push(player("GB1", 200.0 + i as f64));
    }

    let groups = top_by_competition(set);
    assert_eq!(groups.len(), 2);

    for group in &groups {
        assert_eq!(group.top_players.len(), TOP_GROUP_SIZE);
        let values: Vec<f64> = group
            .top_players
            .iter()
            .map(|p| p.xgboost_predicted_values.unwrap())
            .collect();
        for pair in values.windows(2) {
            assert!(pair[0] >= pair[1], "group not sorted descending: {values:?}");
        }
    }

    // Highest-valued players survived the truncation.
    let es1 = groups.iter().find(|g| g.competition_id == "ES1").unwrap();
    let es1_values: Vec<f64> = es1
        .top_players
        .iter()
        .map(|p| p.xgboost_predicted_values.unwrap())
        .collect();
    assert_eq!(es1_values, vec![105.0, 104.0, 103.0, 102.0, 101.0]);
}

#[test]
fn small_groups_keep_everyone() {
    let set = vec![player("FR1", 10.0), player("FR1", 20.0)];
    let groups = top_by_competition(set);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].top_players.len(), 2);
    assert_eq!(groups[0].top_players[0].xgboost_predicted_values, Some(20.0));
}

#[test]
fn players_without_predictions_rank_last() {
    let mut blank = player("IT1", 0.0);
    blank.xgboost_predicted_values = None;
    let set = vec![blank, player("IT1", 1.0)];

    let groups = top_by_competition(set);
    assert_eq!(groups[0].top_players[0].xgboost_predicted_values, Some(1.0));
    assert_eq!(groups[0].top_players[1].xgboost_predicted_values, None);
}

#[test]
fn empty_catalogue_produces_no_groups() {
    assert!(top_by_competition(Vec::new()).is_empty());
}

#[test]
fn groups_come_back_in_competition_order() {
    let set = vec![player("IT1", 1.0), player("ES1", 1.0), player("GB1", 1.0)];
    let ids: Vec<String> = top_by_competition(set)
        .into_iter()
        .map(|g| g.competition_id)
        .collect();
    assert_eq!(ids, vec!["ES1", "GB1", "IT1"]);
}
