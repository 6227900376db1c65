//! Paths of the Plan web API resources consumed by the dashboard.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use urlencoding::encode;

/// Graph data kinds served by `/v1/graph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GraphKind {
    Performance,
    OptimizedPerformance,
    PlayersOnline,
    UniqueAndNew,
    HourlyUniqueAndNew,
    ServerCalendar,
    WorldPie,
    Activity,
    Geolocation,
    AggregatedPing,
    PunchCard,
    ServerPie,
    JoinAddressPie,
}

impl GraphKind {
    pub const ALL: [GraphKind; 13] = [
        GraphKind::Performance,
        GraphKind::OptimizedPerformance,
        GraphKind::PlayersOnline,
        GraphKind::UniqueAndNew,
        GraphKind::HourlyUniqueAndNew,
        GraphKind::ServerCalendar,
        GraphKind::WorldPie,
        GraphKind::Activity,
        GraphKind::Geolocation,
        GraphKind::AggregatedPing,
        GraphKind::PunchCard,
        GraphKind::ServerPie,
        GraphKind::JoinAddressPie,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GraphKind::Performance => "performance",
            GraphKind::OptimizedPerformance => "optimizedPerformance",
            GraphKind::PlayersOnline => "playersOnline",
            GraphKind::UniqueAndNew => "uniqueAndNew",
            GraphKind::HourlyUniqueAndNew => "hourlyUniqueAndNew",
            GraphKind::ServerCalendar => "serverCalendar",
            GraphKind::WorldPie => "worldPie",
            GraphKind::Activity => "activity",
            GraphKind::Geolocation => "geolocation",
            GraphKind::AggregatedPing => "aggregatedPing",
            GraphKind::PunchCard => "punchCard",
            GraphKind::ServerPie => "serverPie",
            GraphKind::JoinAddressPie => "joinAddressPie",
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GraphKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GraphKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown graph type '{s}'"))
    }
}

/// A backend resource, rendered to a path relative to the base address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Metadata,
    ServerOverview { server: String },
    NetworkOverview,
    Player { player: String },
    Players { server: Option<String> },
    ExtensionData { server: String },
    Graph { kind: GraphKind, server: Option<String> },
    QueryResult { timestamp: i64 },
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Metadata => "/v1/metadata".to_string(),
            Endpoint::ServerOverview { server } => {
                format!("/v1/serverOverview?server={}", encode(server))
            }
            Endpoint::NetworkOverview => "/v1/network/overview".to_string(),
            Endpoint::Player { player } => format!("/v1/player?player={}", encode(player)),
            Endpoint::Players { server: None } => "/v1/players".to_string(),
            Endpoint::Players {
                server: Some(server),
            } => format!("/v1/players?server={}", encode(server)),
            Endpoint::ExtensionData { server } => {
                format!("/v1/extensionData?server={}", encode(server))
            }
            Endpoint::Graph { kind, server: None } => format!("/v1/graph?type={kind}"),
            Endpoint::Graph {
                kind,
                server: Some(server),
            } => format!("/v1/graph?type={kind}&server={}", encode(server)),
            Endpoint::QueryResult { timestamp } => {
                format!("/v1/query?timestamp={timestamp}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_paths_carry_type_and_server() {
        let endpoint = Endpoint::Graph {
            kind: GraphKind::OptimizedPerformance,
            server: Some("Lobby 1".into()),
        };
        assert_eq!(
            endpoint.path(),
            "/v1/graph?type=optimizedPerformance&server=Lobby%201"
        );
    }

    #[test]
    fn graph_kind_parses_case_insensitively() {
        assert_eq!("punchcard".parse::<GraphKind>(), Ok(GraphKind::PunchCard));
        assert!("heatmap".parse::<GraphKind>().is_err());
    }

    #[test]
    fn player_names_are_encoded() {
        let endpoint = Endpoint::Player {
            player: "a&b".into(),
        };
        assert_eq!(endpoint.path(), "/v1/player?player=a%26b");
    }
}
