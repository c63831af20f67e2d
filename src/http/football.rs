//! Stateless gateway onto the football-data.org v4 API.
//!
//! Every route issues exactly one upstream call with the static
//! `X-Auth-Token` header, reshapes the field subset the front end needs,
//! and forwards the upstream status on failure. No retries, no caching.

use actix_web::{get, http::StatusCode, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::env;
use url::Url;

use crate::config::settings;

//////////////////////////////////////////////////
// Upstream payload subsets
//////////////////////////////////////////////////

#[derive(Debug, Default, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScorerEntry {
    pub player: NamedRef,
    pub team: NamedRef,
    pub goals: Option<i64>,
    pub assists: Option<i64>,
    pub played_matches: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScorersPayload {
    pub scorers: Vec<ScorerEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpstreamTeamSide {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub crest: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpstreamScore {
    pub full_time: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpstreamMatch {
    pub id: Option<i64>,
    pub competition: Option<NamedRef>,
    pub matchday: Option<i64>,
    pub status: Option<String>,
    pub stage: Option<String>,
    pub utc_date: Option<String>,
    pub home_team: UpstreamTeamSide,
    pub away_team: UpstreamTeamSide,
    pub score: Option<UpstreamScore>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CompetitionMatchesPayload {
    pub competition: NamedRef,
    pub matches: Vec<UpstreamMatch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TeamMatchesPayload {
    pub matches: Vec<UpstreamMatch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpstreamTeam {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub crest: Option<String>,
    pub short_name: Option<String>,
    pub tla: Option<String>,
    pub founded: Option<i64>,
    pub venue: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TeamsPayload {
    pub teams: Vec<UpstreamTeam>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpstreamArea {
    pub name: Option<String>,
    pub flag: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpstreamCompetition {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub code: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub emblem: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpstreamContract {
    pub start: Option<String>,
    pub until: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpstreamCoach {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<String>,
    pub contract: Option<UpstreamContract>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpstreamSquadMember {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub position: Option<String>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<String>,
    pub shirt_number: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamProfilePayload {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub tla: Option<String>,
    pub crest: Option<String>,
    pub area: UpstreamArea,
    pub address: Option<String>,
    pub website: Option<String>,
    pub founded: Option<i64>,
    pub club_colors: Option<String>,
    pub venue: Option<String>,
    pub running_competitions: Vec<UpstreamCompetition>,
    pub coach: Option<UpstreamCoach>,
    pub squad: Vec<UpstreamSquadMember>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpstreamTableRow {
    pub position: Option<i64>,
    pub team: UpstreamTeam,
    pub played_games: Option<i64>,
    pub won: Option<i64>,
    pub draw: Option<i64>,
    pub lost: Option<i64>,
    pub points: Option<i64>,
    pub goals_for: Option<i64>,
    pub goals_against: Option<i64>,
    pub goal_difference: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StandingGroup {
    pub table: Vec<UpstreamTableRow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StandingsPayload {
    pub standings: Vec<StandingGroup>,
}

//////////////////////////////////////////////////
// Response shapes
//////////////////////////////////////////////////

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopScorer {
    pub player: Option<String>,
    pub team: Option<String>,
    pub goals: i64,
    pub assists: i64,
    pub played_matches: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct TeamSide {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub crest: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub match_id: Option<i64>,
    pub competition: Option<String>,
    pub matchday: Option<i64>,
    pub status: Option<String>,
    pub stage: Option<String>,
    pub utc_date: Option<String>,
    pub home_team: TeamSide,
    pub away_team: TeamSide,
    pub score: serde_json::Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingMatch {
    pub match_id: Option<i64>,
    pub competition: Option<String>,
    pub matchday: Option<i64>,
    pub status: Option<String>,
    pub stage: Option<String>,
    pub utc_date: Option<String>,
    pub home_team: TeamSide,
    pub away_team: TeamSide,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub crest: Option<String>,
    pub short_name: Option<String>,
    pub tla: Option<String>,
    pub founded: Option<i64>,
    pub venue: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionInfo {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub code: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub emblem: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachInfo {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<String>,
    pub contract_start: String,
    pub contract_until: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SquadMember {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub position: Option<String>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<String>,
    /// Number when known, `"N/A"` otherwise.
    pub shirt_number: serde_json::Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInfo {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub tla: Option<String>,
    pub crest: Option<String>,
    pub country: Option<String>,
    pub country_flag: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub founded: Option<i64>,
    pub club_colors: Option<String>,
    pub venue: Option<String>,
    pub running_competitions: Vec<CompetitionInfo>,
    pub coach: Option<CoachInfo>,
    pub squad: Vec<SquadMember>,
}

#[derive(Debug, Serialize)]
pub struct TeamBrief {
    pub id: Option<i64>,
    pub name: Option<String>,
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,
    pub tla: Option<String>,
    pub crest: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingEntry {
    pub position: Option<i64>,
    pub team: TeamBrief,
    pub played_games: Option<i64>,
    pub won: Option<i64>,
    pub draw: Option<i64>,
    pub lost: Option<i64>,
    pub points: Option<i64>,
    pub goals_for: Option<i64>,
    pub goals_against: Option<i64>,
    pub goal_difference: Option<i64>,
}

//////////////////////////////////////////////////
// Reshapes (pure)
//////////////////////////////////////////////////

pub fn shape_scorers(payload: ScorersPayload) -> Vec<TopScorer> {
    payload
        .scorers
        .into_iter()
        .map(|s| TopScorer {
            player: s.player.name,
            team: s.team.name,
            goals: s.goals.unwrap_or(0),
            assists: s.assists.unwrap_or(0),
            played_matches: s.played_matches,
        })
        .collect()
}

fn side(s: UpstreamTeamSide) -> TeamSide {
    TeamSide {
        id: s.id,
        name: s.name,
        crest: s.crest,
    }
}

fn full_time_score(score: Option<UpstreamScore>) -> serde_json::Value {
    score
        .and_then(|s| s.full_time)
        .unwrap_or_else(|| json!({ "home": null, "away": null }))
}

pub fn shape_competition_matches(payload: CompetitionMatchesPayload) -> Vec<MatchSummary> {
    let competition = payload.competition.name;
    payload
        .matches
        .into_iter()
        .map(|m| MatchSummary {
            match_id: m.id,
            competition: competition.clone(),
            matchday: m.matchday,
            status: m.status,
            stage: m.stage,
            utc_date: m.utc_date,
            home_team: side(m.home_team),
            away_team: side(m.away_team),
            score: full_time_score(m.score),
        })
        .collect()
}

pub fn shape_upcoming_matches(payload: TeamMatchesPayload) -> Vec<UpcomingMatch> {
    payload
        .matches
        .into_iter()
        .map(|m| UpcomingMatch {
            match_id: m.id,
            competition: m.competition.and_then(|c| c.name),
            matchday: m.matchday,
            status: m.status,
            stage: m.stage,
            utc_date: m.utc_date,
            home_team: side(m.home_team),
            away_team: side(m.away_team),
        })
        .collect()
}

pub fn shape_teams(payload: TeamsPayload) -> Vec<TeamSummary> {
    payload
        .teams
        .into_iter()
        .map(|t| TeamSummary {
            id: t.id,
            name: t.name,
            crest: t.crest,
            short_name: t.short_name,
            tla: t.tla,
            founded: t.founded,
            venue: t.venue,
        })
        .collect()
}

pub fn shape_team_profile(payload: TeamProfilePayload) -> TeamInfo {
    TeamInfo {
        id: payload.id,
        name: payload.name,
        short_name: payload.short_name,
        tla: payload.tla,
        crest: payload.crest,
        country: payload.area.name,
        country_flag: payload.area.flag,
        address: payload.address,
        website: payload.website,
        founded: payload.founded,
        club_colors: payload.club_colors,
        venue: payload.venue,
        running_competitions: payload
            .running_competitions
            .into_iter()
            .map(|c| CompetitionInfo {
                id: c.id,
                name: c.name,
                code: c.code,
                kind: c.kind,
                emblem: c.emblem,
            })
            .collect(),
        coach: payload.coach.map(|c| {
            let contract = c.contract.unwrap_or_default();
            CoachInfo {
                id: c.id,
                name: c.name,
                nationality: c.nationality,
                date_of_birth: c.date_of_birth,
                contract_start: contract.start.unwrap_or_else(|| "N/A".into()),
                contract_until: contract.until.unwrap_or_else(|| "N/A".into()),
            }
        }),
        squad: payload
            .squad
            .into_iter()
            .map(|p| SquadMember {
                id: p.id,
                name: p.name,
                position: p.position,
                nationality: p.nationality,
                date_of_birth: p.date_of_birth,
                shirt_number: p
                    .shirt_number
                    .map(|n| json!(n))
                    .unwrap_or_else(|| json!("N/A")),
            })
            .collect(),
    }
}

/// The league table lives in the first standings group (TOTAL).
pub fn shape_standings(payload: StandingsPayload) -> Option<Vec<StandingEntry>> {
    let group = payload.standings.into_iter().next()?;
    Some(
        group
            .table
            .into_iter()
            .map(|row| StandingEntry {
                position: row.position,
                team: TeamBrief {
                    id: row.team.id,
                    name: row.team.name,
                    short_name: row.team.short_name,
                    tla: row.team.tla,
                    crest: row.team.crest,
                },
                played_games: row.played_games,
                won: row.won,
                draw: row.draw,
                lost: row.lost,
                points: row.points,
                goals_for: row.goals_for,
                goals_against: row.goals_against,
                goal_difference: row.goal_difference,
            })
            .collect(),
    )
}

//////////////////////////////////////////////////
// Upstream call
//////////////////////////////////////////////////

enum UpstreamResult {
    Payload(serde_json::Value),
    /// Non-success upstream status, forwarded as-is.
    Status(u16),
    /// Transport / parse failure; surfaces as a 500.
    Failed(String),
}

async fn fetch_upstream(
    client: &reqwest::Client,
    path: &str,
    query: &[(&str, &str)],
) -> UpstreamResult {
    let key = match env::var("FOOTBALL_API_KEY") {
        Ok(k) => k,
        Err(_) => return UpstreamResult::Failed("FOOTBALL_API_KEY must be set".into()),
    };

    let url = match Url::parse(&format!("{}{}", settings().football_api_base, path)) {
        Ok(u) => u,
        Err(e) => return UpstreamResult::Failed(e.to_string()),
    };

    let response = match client
        .get(url)
        .header("X-Auth-Token", key)
        .query(query)
        .send()
        .await
    {
        Ok(r) => r,
        Err(e) => return UpstreamResult::Failed(e.to_string()),
    };

    let status = response.status();
    if !status.is_success() {
        return UpstreamResult::Status(status.as_u16());
    }

    match response.json::<serde_json::Value>().await {
        Ok(v) => UpstreamResult::Payload(v),
        Err(e) => UpstreamResult::Failed(e.to_string()),
    }
}

fn forward_failure(status: u16) -> HttpResponse {
    HttpResponse::build(StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY))
        .json(json!({ "success": false, "message": "Failed to fetch data" }))
}

fn upstream_error(message: String) -> HttpResponse {
    log::error!("upstream call failed: {message}");
    HttpResponse::InternalServerError().json(json!({ "success": false, "message": message }))
}

/// Runs one upstream GET and hands the parsed payload to `shape`.
macro_rules! proxy {
    ($client:expr, $path:expr, $query:expr, $payload:ty, $shape:expr) => {{
        match fetch_upstream($client, $path, $query).await {
            UpstreamResult::Payload(raw) => match serde_json::from_value::<$payload>(raw) {
                Ok(payload) => $shape(payload),
                Err(e) => upstream_error(e.to_string()),
            },
            UpstreamResult::Status(status) => forward_failure(status),
            UpstreamResult::Failed(message) => upstream_error(message),
        }
    }};
}

//////////////////////////////////////////////////
// GET /api/football/top-scorers/{leagueCode}
//////////////////////////////////////////////////
#[get("/football/top-scorers/{league_code}")]
pub async fn top_scorers(
    path: web::Path<String>,
    client: web::Data<reqwest::Client>,
) -> impl Responder {
    let league_code = path.into_inner();
    proxy!(
        &client,
        &format!("/competitions/{league_code}/scorers"),
        &[],
        ScorersPayload,
        |payload| HttpResponse::Ok()
            .json(json!({ "success": true, "data": shape_scorers(payload) }))
    )
}

//////////////////////////////////////////////////
// GET /api/football/matches/today
//////////////////////////////////////////////////
#[get("/football/matches/today")]
pub async fn matches_today(client: web::Data<reqwest::Client>) -> impl Responder {
    // Pure passthrough of the fields the front end reads.
    match fetch_upstream(&client, "/matches", &[]).await {
        UpstreamResult::Payload(raw) => HttpResponse::Ok().json(json!({
            "success": true,
            "filters": raw.get("filters"),
            "resultSet": raw.get("resultSet"),
            "matches": raw.get("matches"),
        })),
        UpstreamResult::Status(status) => forward_failure(status),
        UpstreamResult::Failed(message) => upstream_error(message),
    }
}

//////////////////////////////////////////////////
// GET /api/football/matches/{competitionCode}
//////////////////////////////////////////////////
#[get("/football/matches/{competition_code}")]
pub async fn competition_matches(
    path: web::Path<String>,
    client: web::Data<reqwest::Client>,
) -> impl Responder {
    let competition_code = path.into_inner();
    proxy!(
        &client,
        &format!("/competitions/{competition_code}/matches"),
        &[],
        CompetitionMatchesPayload,
        |payload| HttpResponse::Ok()
            .json(json!({ "success": true, "data": shape_competition_matches(payload) }))
    )
}

//////////////////////////////////////////////////
// GET /api/football/teams/{competitionCode}
//////////////////////////////////////////////////
#[get("/football/teams/{competition_code}")]
pub async fn competition_teams(
    path: web::Path<String>,
    client: web::Data<reqwest::Client>,
) -> impl Responder {
    let competition_code = path.into_inner();
    proxy!(
        &client,
        &format!("/competitions/{competition_code}/teams"),
        &[],
        TeamsPayload,
        |payload| HttpResponse::Ok()
            .json(json!({ "success": true, "data": shape_teams(payload) }))
    )
}

//////////////////////////////////////////////////
// GET /api/football/team/{teamId}
//////////////////////////////////////////////////
#[get("/football/team/{team_id}")]
pub async fn team_profile(
    path: web::Path<i64>,
    client: web::Data<reqwest::Client>,
) -> impl Responder {
    let team_id = path.into_inner();
    proxy!(
        &client,
        &format!("/teams/{team_id}"),
        &[],
        TeamProfilePayload,
        |payload| HttpResponse::Ok()
            .json(json!({ "success": true, "data": shape_team_profile(payload) }))
    )
}

//////////////////////////////////////////////////
// GET /api/football/upcoming-matches/{teamId}
//////////////////////////////////////////////////
#[get("/football/upcoming-matches/{team_id}")]
pub async fn upcoming_matches(
    path: web::Path<String>,
    client: web::Data<reqwest::Client>,
) -> impl Responder {
    let team_id = match path.into_inner().parse::<i64>() {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest()
                .json(json!({ "success": false, "message": "Invalid team ID provided" }))
        }
    };

    proxy!(
        &client,
        &format!("/teams/{team_id}/matches"),
        &[("status", "SCHEDULED")],
        TeamMatchesPayload,
        |payload: TeamMatchesPayload| {
            if payload.matches.is_empty() {
                return HttpResponse::Ok().json(json!({
                    "success": false,
                    "message": "No upcoming matches found for this team."
                }));
            }
            HttpResponse::Ok().json(json!({
                "success": true,
                "teamId": team_id,
                "matches": shape_upcoming_matches(payload),
            }))
        }
    )
}

//////////////////////////////////////////////////
// GET /api/table/{leagueCode}
//////////////////////////////////////////////////
#[get("/table/{league_code}")]
pub async fn league_table(
    path: web::Path<String>,
    client: web::Data<reqwest::Client>,
) -> impl Responder {
    let league_code = path.into_inner();
    proxy!(
        &client,
        &format!("/competitions/{league_code}/standings"),
        &[],
        StandingsPayload,
        |payload| match shape_standings(payload) {
            Some(table) =>
                HttpResponse::Ok().json(json!({ "success": true, "data": table })),
            None => upstream_error("standings table missing".into()),
        }
    )
}

//////////////////////////////////////////////////
// Mount
//////////////////////////////////////////////////
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // /matches/today must be registered ahead of /matches/{competitionCode}.
    cfg.service(top_scorers)
        .service(matches_today)
        .service(competition_matches)
        .service(competition_teams)
        .service(team_profile)
        .service(upcoming_matches)
        .service(league_table);
}
