pub mod admin_players;
pub mod articles;
pub mod auth;
pub mod football;
pub mod health;
pub mod players;
pub mod routes;
pub mod search;
pub mod squads;
