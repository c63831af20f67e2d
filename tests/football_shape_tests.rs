//! Reshaping of upstream football-data payloads, exercised on captured
//! fixture fragments.

use scoutbase_server::http::football::{
    shape_competition_matches, shape_scorers, shape_standings, shape_team_profile,
    shape_upcoming_matches, CompetitionMatchesPayload, ScorersPayload, StandingsPayload,
    TeamMatchesPayload, TeamProfilePayload,
};
use serde_json::json;

#[test]
fn scorers_map_names_and_default_missing_assists() {
    let payload: ScorersPayload = serde_json::from_value(json!({
        "scorers": [
            {
                "player": { "name": "Harry Kane" },
                "team": { "name": "FC Bayern München" },
                "goals": 36,
                "playedMatches": 32
            },
            {
                "player": { "name": "Kylian Mbappé" },
                "team": { "name": "Paris Saint-Germain FC" },
                "goals": 27,
                "assists": 7,
                "playedMatches": 29
            }
        ]
    }))
    .unwrap();

    let scorers = shape_scorers(payload);
    assert_eq!(scorers.len(), 2);
    assert_eq!(scorers[0].player.as_deref(), Some("Harry Kane"));
    assert_eq!(scorers[0].assists, 0); // absent upstream
    assert_eq!(scorers[1].assists, 7);

    let wire = serde_json::to_value(&scorers[0]).unwrap();
    assert_eq!(wire["playedMatches"], json!(32));
}

#[test]
fn competition_matches_carry_the_competition_name_and_full_time_score() {
    let payload: CompetitionMatchesPayload = serde_json::from_value(json!({
        "competition": { "name": "Premier League" },
        "matches": [
            {
                "id": 4421,
                "matchday": 12,
                "status": "FINISHED",
                "stage": "REGULAR_SEASON",
                "utcDate": "2026-08-01T14:00:00Z",
                "homeTeam": { "id": 57, "name": "Arsenal FC", "crest": "https://crest/57" },
                "awayTeam": { "id": 61, "name": "Chelsea FC", "crest": "https://crest/61" },
                "score": { "fullTime": { "home": 2, "away": 1 } }
            },
            {
                "id": 4422,
                "status": "SCHEDULED",
                "homeTeam": { "id": 65, "name": "Manchester City FC" },
                "awayTeam": { "id": 64, "name": "Liverpool FC" }
            }
        ]
    }))
    .unwrap();

    let matches = shape_competition_matches(payload);
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].competition.as_deref(), Some("Premier League"));
    assert_eq!(matches[1].competition.as_deref(), Some("Premier League"));
    assert_eq!(matches[0].score, json!({ "home": 2, "away": 1 }));
    // No score upstream: the placeholder object goes out instead.
    assert_eq!(matches[1].score, json!({ "home": null, "away": null }));

    let wire = serde_json::to_value(&matches[0]).unwrap();
    assert_eq!(wire["matchId"], json!(4421));
    assert_eq!(wire["homeTeam"]["name"], json!("Arsenal FC"));
}

#[test]
fn upcoming_matches_take_the_per_match_competition() {
    let payload: TeamMatchesPayload = serde_json::from_value(json!({
        "matches": [
            {
                "id": 9,
                "competition": { "name": "UEFA Champions League" },
                "matchday": 1,
                "status": "SCHEDULED",
                "utcDate": "2026-09-16T19:00:00Z",
                "homeTeam": { "id": 86, "name": "Real Madrid CF" },
                "awayTeam": { "id": 5, "name": "FC Bayern München" }
            }
        ]
    }))
    .unwrap();

    let matches = shape_upcoming_matches(payload);
    assert_eq!(matches.len(), 1);
    assert_eq!(
        matches[0].competition.as_deref(),
        Some("UEFA Champions League")
    );
    let wire = serde_json::to_value(&matches[0]).unwrap();
    assert!(wire.get("score").is_none());
}

#[test]
fn team_profile_defaults_contract_and_shirt_number() {
    let payload: TeamProfilePayload = serde_json::from_value(json!({
        "id": 57,
        "name": "Arsenal FC",
        "shortName": "Arsenal",
        "tla": "ARS",
        "crest": "https://crest/57",
        "area": { "name": "England", "flag": "https://flag/en" },
        "address": "75 Drayton Park London N5 1BU",
        "website": "http://www.arsenal.com",
        "founded": 1886,
        "clubColors": "Red / White",
        "venue": "Emirates Stadium",
        "runningCompetitions": [
            { "id": 2021, "name": "Premier League", "code": "PL", "type": "LEAGUE", "emblem": "https://emblem/PL" }
        ],
        "coach": { "id": 11603, "name": "Mikel Arteta", "nationality": "Spain", "dateOfBirth": "1982-03-26" },
        "squad": [
            { "id": 3141, "name": "David Raya", "position": "Goalkeeper", "nationality": "Spain", "dateOfBirth": "1995-09-15", "shirtNumber": 22 },
            { "id": 7778, "name": "New Signing", "position": "Midfield", "nationality": "France", "dateOfBirth": "2004-01-02" }
        ]
    }))
    .unwrap();

    let info = shape_team_profile(payload);
    assert_eq!(info.country.as_deref(), Some("England"));
    assert_eq!(info.running_competitions.len(), 1);

    let coach = info.coach.as_ref().unwrap();
    // Coach listed without a contract: both bounds fall back to "N/A".
    assert_eq!(coach.contract_start, "N/A");
    assert_eq!(coach.contract_until, "N/A");

    assert_eq!(info.squad[0].shirt_number, json!(22));
    assert_eq!(info.squad[1].shirt_number, json!("N/A"));

    let wire = serde_json::to_value(&info).unwrap();
    assert_eq!(wire["countryFlag"], json!("https://flag/en"));
    assert_eq!(wire["runningCompetitions"][0]["type"], json!("LEAGUE"));
}

#[test]
fn standings_use_the_first_group_only() {
    let payload: StandingsPayload = serde_json::from_value(json!({
        "standings": [
            {
                "table": [
                    {
                        "position": 1,
                        "team": { "id": 65, "name": "Manchester City FC", "shortName": "Man City", "tla": "MCI", "crest": "https://crest/65" },
                        "playedGames": 38, "won": 28, "draw": 7, "lost": 3,
                        "points": 91, "goalsFor": 96, "goalsAgainst": 34, "goalDifference": 62
                    }
                ]
            },
            { "table": [ { "position": 99 } ] }
        ]
    }))
    .unwrap();

    let table = shape_standings(payload).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table[0].position, Some(1));
    assert_eq!(table[0].points, Some(91));

    let wire = serde_json::to_value(&table[0]).unwrap();
    assert_eq!(wire["goalDifference"], json!(62));
    assert_eq!(wire["team"]["shortName"], json!("Man City"));
}

#[test]
fn missing_standings_yield_none() {
    let payload: StandingsPayload = serde_json::from_value(json!({ "standings": [] })).unwrap();
    assert!(shape_standings(payload).is_none());
}
