//! Contract-status taxonomy and the CPL age rules layered on top of it.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Canonical contract-status values the sheet dropdown is supposed to emit.
/// `Other` carries anything non-blank the normalizer does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractStatus {
    Domestic,
    International,
    ClubOption,
    OptionPending,
    InDiscussion,
    Eyt,
    USports,
    Development,
    NotApplicable,
    Other,
}

impl ContractStatus {
    pub fn label(self) -> &'static str {
        match self {
            ContractStatus::Domestic => "Domestic",
            ContractStatus::International => "International",
            ContractStatus::ClubOption => "Club Option",
            ContractStatus::OptionPending => "Option (pending)",
            ContractStatus::InDiscussion => "In Discussion",
            ContractStatus::Eyt => "EYT",
            ContractStatus::USports => "U SPORTS",
            ContractStatus::Development => "Development",
            ContractStatus::NotApplicable => "N/A",
            ContractStatus::Other => "Other",
        }
    }
}

/// Normalize a raw season cell: trim, collapse internal whitespace, fold the
/// variants and typos the sheet has historically contained. `None` for blank.
pub fn contract_status(raw: &str) -> Option<ContractStatus> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }
    let lower = collapsed.to_lowercase();

    let status = match lower.as_str() {
        "domestic" => ContractStatus::Domestic,
        "international" => ContractStatus::International,
        "club option" | "club-option" | "cluboption" => ContractStatus::ClubOption,
        "option pending" | "option (pending)" | "pending option" => ContractStatus::OptionPending,
        "in discussion" | "discussion" => ContractStatus::InDiscussion,
        "eyt" => ContractStatus::Eyt,
        "u sports" | "u-sports" | "usports" => ContractStatus::USports,
        "development" => ContractStatus::Development,
        "n/a" | "na" | "n.a." => ContractStatus::NotApplicable,
        _ => ContractStatus::Other,
    };
    Some(status)
}

/// Whether the cell represents a live contract. Blank and explicit N/A are
/// not under contract; unrecognized non-blank values are.
pub fn is_under_contract(raw: &str) -> bool {
    !matches!(
        contract_status(raw),
        None | Some(ContractStatus::NotApplicable)
    )
}

/// Primary roster, the part that counts toward the CPL 20-23 size rule.
pub fn is_primary_contract(raw: &str) -> bool {
    matches!(
        contract_status(raw),
        Some(ContractStatus::Domestic)
            | Some(ContractStatus::International)
            | Some(ContractStatus::ClubOption)
    )
}

/// Developmental roster, tracked separately from the 20-23 count.
pub fn is_development_contract(raw: &str) -> bool {
    matches!(
        contract_status(raw),
        Some(ContractStatus::Eyt)
            | Some(ContractStatus::USports)
            | Some(ContractStatus::Development)
    )
}

/// Ignored for compliance math entirely.
pub fn is_ignored_contract(raw: &str) -> bool {
    matches!(
        contract_status(raw),
        None | Some(ContractStatus::NotApplicable)
            | Some(ContractStatus::OptionPending)
            | Some(ContractStatus::InDiscussion)
    )
}

/// Internationals only, for the max-7 cap.
pub fn is_international_primary(raw: &str) -> bool {
    contract_status(raw) == Some(ContractStatus::International)
}

/// CPL rule: age is taken on Jan 1 of the season year. A Jan 1 birthday
/// counts as already celebrated; any later date subtracts a year.
pub fn age_on_jan1(birth_date: NaiveDate, season_year: i32) -> i32 {
    let mut age = season_year - birth_date.year();
    if !(birth_date.month() == 1 && birth_date.day() == 1) {
        age -= 1;
    }
    age
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBucket {
    U18,
    U21,
}

impl AgeBucket {
    pub fn label(self) -> &'static str {
        match self {
            AgeBucket::U18 => "U-18",
            AgeBucket::U21 => "U-21",
        }
    }
}

/// U-18 is strictly under 18, U-21 strictly under 21; 21+ gets no badge.
pub fn age_bucket(age: i32) -> Option<AgeBucket> {
    if age < 18 {
        Some(AgeBucket::U18)
    } else if age < 21 {
        Some(AgeBucket::U21)
    } else {
        None
    }
}

/// Strict YYYY-MM-DD, anything else is treated as absent.
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
