//! Static directory of CPL clubs. Sheet-sourced club meta overrides these
//! fields on the detail view when present.

#[derive(Debug, Clone)]
pub struct ClubInfo {
    pub slug: &'static str,
    pub name: &'static str,
    pub nav_label: &'static str,
    pub location: &'static str,
    pub stadium: &'static str,
    pub capacity: u32,
    pub joined: u16,
    pub head_coach: &'static str,
    // Brand colours, hex without '#'.
    pub color_primary: &'static str,
    pub color_secondary: &'static str,
}

/// West to east, the order the club list renders in.
pub const CLUBS: &[ClubInfo] = &[
    ClubInfo {
        slug: "pacific",
        name: "Pacific FC",
        nav_label: "Pacific",
        location: "Langford, British Columbia",
        stadium: "Starlight Stadium",
        capacity: 6000,
        joined: 2019,
        head_coach: "James Merriman",
        color_primary: "582B83",
        color_secondary: "00B7BD",
    },
    ClubInfo {
        slug: "vancouver",
        name: "Vancouver FC",
        nav_label: "Vancouver",
        location: "Langley, British Columbia",
        stadium: "Willoughby Community Park Stadium",
        capacity: 6560,
        joined: 2023,
        head_coach: "Martin Nash",
        color_primary: "FA2B2B",
        color_secondary: "1E1E1E",
    },
    ClubInfo {
        slug: "cavalry",
        name: "Cavalry FC",
        nav_label: "Cavalry",
        location: "Foothills County, Alberta",
        stadium: "ATCO Field",
        capacity: 6000,
        joined: 2019,
        head_coach: "Tommy Wheeldon Jr.",
        color_primary: "335526",
        color_secondary: "DA291C",
    },
    ClubInfo {
        slug: "forge",
        name: "Forge FC",
        nav_label: "Forge",
        location: "Hamilton, Ontario",
        stadium: "Hamilton Stadium",
        capacity: 23218,
        joined: 2019,
        head_coach: "Bobby Smyrniotis",
        color_primary: "DC4505",
        color_secondary: "53565A",
    },
    ClubInfo {
        slug: "inter-toronto",
        name: "Inter Toronto FC",
        nav_label: "Inter Toronto",
        location: "Toronto, Ontario",
        stadium: "York Lions Stadium",
        capacity: 4000,
        joined: 2019,
        head_coach: "Mauro Eustáquio",
        color_primary: "FCBF0D",
        color_secondary: "0E3353",
    },
    ClubInfo {
        slug: "atletico-ottawa",
        name: "Atlético Ottawa",
        nav_label: "Atlético Ottawa",
        location: "Ottawa, Ontario",
        stadium: "TD Place Stadium",
        capacity: 6419,
        joined: 2020,
        head_coach: "Diego Mejía",
        color_primary: "E41C2E",
        color_secondary: "102F51",
    },
    ClubInfo {
        slug: "supra",
        name: "FC Supra du Québec",
        nav_label: "Supra du Quebec",
        location: "Laval, Quebec",
        stadium: "Stade Boréale",
        capacity: 5581,
        joined: 2026,
        head_coach: "Nicholas Razzaghi",
        color_primary: "E53431",
        color_secondary: "041747",
    },
    ClubInfo {
        slug: "hfx-wanderers",
        name: "HFX Wanderers FC",
        nav_label: "Wanderers",
        location: "Halifax, Nova Scotia",
        stadium: "Wanderers Grounds",
        capacity: 7500,
        joined: 2019,
        head_coach: "Vanni Sartini",
        color_primary: "00E2FE",
        color_secondary: "05204A",
    },
];

pub fn club_by_slug(slug: &str) -> Option<&'static ClubInfo> {
    CLUBS.iter().find(|c| c.slug == slug)
}

/// Short tag for list rendering (e.g. "HFX", "FOR"). Unknown club names
/// fall back to their first word.
pub fn short_club_tag(club: &str) -> String {
    match club {
        "HFX Wanderers FC" => "HFX".to_string(),
        "Atlético Ottawa" => "ATO".to_string(),
        "Cavalry FC" => "CAV".to_string(),
        "Forge FC" => "FOR".to_string(),
        "Pacific FC" => "PAC".to_string(),
        "Vancouver FC" => "VFC".to_string(),
        "Inter Toronto FC" => "ITO".to_string(),
        "FC Supra du Québec" => "SUP".to_string(),
        "Valour FC" => "VAL".to_string(),
        "York United FC" => "YRK".to_string(),
        other => other.split_whitespace().next().unwrap_or(other).to_string(),
    }
}
