//! In-memory stages behind the search, ranking and pagination endpoints.
//!
//! Each stage is a pure function over an already-fetched player set; the
//! handlers compose them explicitly (search → sort → slice) instead of
//! passing partial results through shared request state.

use serde::Serialize;

use crate::db::models::Player;

/// Players kept per competition group by [`top_by_competition`].
pub const TOP_GROUP_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// `sort=asc` is the only way to get ascending order.
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some("asc") => SortDirection::Ascending,
            _ => SortDirection::Descending,
        }
    }
}

/// Stage 1: case-insensitive substring match on the player name. An absent
/// query passes the full set through.
pub fn filter_by_name(players: Vec<Player>, query: Option<&str>) -> Vec<Player> {
    match query {
        None | Some("") => players,
        Some(q) => {
            let needle = q.to_lowercase();
            players
                .into_iter()
                .filter(|p| {
                    p.name
                        .as_deref()
                        .is_some_and(|n| n.to_lowercase().contains(&needle))
                })
                .collect()
        }
    }
}

/// Stage 2: single-key comparator on market value. Missing values sink to
/// the bottom of a descending sort.
pub fn sort_by_market_value(players: &mut [Player], direction: SortDirection) {
    players.sort_by_key(|p| p.market_value_in_eur.unwrap_or(i64::MIN));
    if direction == SortDirection::Descending {
        players.reverse();
    }
}

/// Stage 3: slice-based pagination over the sorted set. Out-of-range pages
/// yield an empty slice, never an error.
pub fn paginate(players: &[Player], page: i64, limit: i64) -> Vec<Player> {
    let start = ((page - 1) * limit).max(0) as usize;
    let end = (start as i64 + limit.max(0)).max(0) as usize;
    players
        .get(start..end.min(players.len()))
        .unwrap_or(&[])
        .to_vec()
}

/// Page / limit query values must both be at least 1.
pub fn valid_page_params(page: i64, limit: i64) -> bool {
    page >= 1 && limit >= 1
}

/// `ceil(total / limit)`; page arithmetic for list responses.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

/// One competition's ranking group, serialized under the keys the front
/// end consumes.
#[derive(Debug, Serialize)]
pub struct CompetitionGroup {
    #[serde(rename = "_id")]
    pub competition_id: String,
    #[serde(rename = "topPlayers")]
    pub top_players: Vec<Player>,
}

/// Groups the catalogue by domestic competition, ranks each group by the
/// XGBoost predicted value descending, and truncates it to
/// [`TOP_GROUP_SIZE`] entries. Groups come back in competition-id order.
pub fn top_by_competition(mut players: Vec<Player>) -> Vec<CompetitionGroup> {
    players.sort_by(|a, b| {
        let av = a.xgboost_predicted_values.unwrap_or(f64::NEG_INFINITY);
        let bv = b.xgboost_predicted_values.unwrap_or(f64::NEG_INFINITY);
        bv.total_cmp(&av)
    });

    let mut groups: Vec<CompetitionGroup> = Vec::new();
    for player in players {
        let key = player.current_club_domestic_competition_id.clone();
        match groups.iter_mut().find(|g| g.competition_id == key) {
            Some(group) => {
                if group.top_players.len() < TOP_GROUP_SIZE {
                    group.top_players.push(player);
                }
            }
            None => groups.push(CompetitionGroup {
                competition_id: key,
                top_players: vec![player],
            }),
        }
    }

    groups.sort_by(|a, b| a.competition_id.cmp(&b.competition_id));
    groups
}
