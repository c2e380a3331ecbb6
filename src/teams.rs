//! Full team names for the team abbreviations found in the statistics file.
//!
//! Only used to label entries of the team list; filtering always compares the
//! raw identifier from the data.

use phf::phf_map;

/// Lookup table indexed by upper case abbreviation. Some data sources use
/// their own short forms, those are listed as aliases.
static TEAM_NAMES: phf::Map<&'static str, &'static str> = phf_map! {
    "ATL" => "Atlanta Hawks",
    "BOS" => "Boston Celtics",
    "BKN" => "Brooklyn Nets",
    "BRK" => "Brooklyn Nets",
    "BRO" => "Brooklyn Nets",
    "CHA" => "Charlotte Hornets",
    "CHO" => "Charlotte Hornets",
    "CHI" => "Chicago Bulls",
    "CLE" => "Cleveland Cavaliers",
    "DAL" => "Dallas Mavericks",
    "DEN" => "Denver Nuggets",
    "DET" => "Detroit Pistons",
    "GSW" => "Golden State Warriors",
    "GS" => "Golden State Warriors",
    "GOL" => "Golden State Warriors",
    "HOU" => "Houston Rockets",
    "IND" => "Indiana Pacers",
    "LAC" => "Los Angeles Clippers",
    "LAL" => "Los Angeles Lakers",
    "MEM" => "Memphis Grizzlies",
    "MIA" => "Miami Heat",
    "MIL" => "Milwaukee Bucks",
    "MIN" => "Minnesota Timberwolves",
    "NOP" => "New Orleans Pelicans",
    "NO" => "New Orleans Pelicans",
    "NOR" => "New Orleans Pelicans",
    "NYK" => "New York Knicks",
    "NY" => "New York Knicks",
    "OKC" => "Oklahoma City Thunder",
    "ORL" => "Orlando Magic",
    "PHI" => "Philadelphia 76ers",
    "PHX" => "Phoenix Suns",
    "PHO" => "Phoenix Suns",
    "POR" => "Portland Trail Blazers",
    "SAC" => "Sacramento Kings",
    "SAS" => "San Antonio Spurs",
    "SA" => "San Antonio Spurs",
    "SAN" => "San Antonio Spurs",
    "TOR" => "Toronto Raptors",
    "UTA" => "Utah Jazz",
    "UTAH" => "Utah Jazz",
    "WAS" => "Washington Wizards",
};

/// Full team name for an abbreviation, ignoring case.
pub fn display_name(abbreviation: &str) -> Option<&'static str> {
    TEAM_NAMES
        .get(abbreviation.trim().to_ascii_uppercase().as_str())
        .copied()
}

/// Label for the team list: the raw identifier followed by the full name when known.
pub fn team_label(abbreviation: &str) -> String {
    match display_name(abbreviation) {
        Some(name) => format!("{abbreviation:<5}{name}"),
        None if abbreviation.is_empty() => "(no team)".to_string(),
        None => abbreviation.to_string(),
    }
}
