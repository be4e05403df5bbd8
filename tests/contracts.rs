use chrono::NaiveDate;

use canpl_terminal::contracts::{
    age_bucket, age_on_jan1, contract_status, is_development_contract, is_ignored_contract,
    is_international_primary, is_primary_contract, is_under_contract, parse_birth_date, AgeBucket,
    ContractStatus,
};

#[test]
fn canonical_values_normalize() {
    assert_eq!(contract_status("Domestic"), Some(ContractStatus::Domestic));
    assert_eq!(
        contract_status("International"),
        Some(ContractStatus::International)
    );
    assert_eq!(contract_status("EYT"), Some(ContractStatus::Eyt));
    assert_eq!(contract_status("Development"), Some(ContractStatus::Development));
    assert_eq!(contract_status(""), None);
    assert_eq!(contract_status("   "), None);
}

#[test]
fn historic_variants_fold_together() {
    for raw in ["Club Option", "club-option", "ClubOption", "  club   option "] {
        assert_eq!(contract_status(raw), Some(ContractStatus::ClubOption), "{raw}");
    }
    for raw in ["Option Pending", "Option (pending)", "pending option"] {
        assert_eq!(contract_status(raw), Some(ContractStatus::OptionPending), "{raw}");
    }
    for raw in ["U SPORTS", "U-Sports", "usports"] {
        assert_eq!(contract_status(raw), Some(ContractStatus::USports), "{raw}");
    }
    for raw in ["N/A", "na", "n.a."] {
        assert_eq!(contract_status(raw), Some(ContractStatus::NotApplicable), "{raw}");
    }
    assert_eq!(contract_status("In Discussion"), Some(ContractStatus::InDiscussion));
    assert_eq!(contract_status("discussion"), Some(ContractStatus::InDiscussion));
}

#[test]
fn unknown_non_blank_is_other() {
    assert_eq!(contract_status("Loan??"), Some(ContractStatus::Other));
    assert!(is_under_contract("Loan??"));
}

#[test]
fn contract_predicates_partition_the_taxonomy() {
    assert!(is_primary_contract("Domestic"));
    assert!(is_primary_contract("International"));
    assert!(is_primary_contract("Club Option"));
    assert!(!is_primary_contract("EYT"));

    assert!(is_development_contract("EYT"));
    assert!(is_development_contract("U SPORTS"));
    assert!(is_development_contract("Development"));
    assert!(!is_development_contract("Domestic"));

    assert!(is_ignored_contract(""));
    assert!(is_ignored_contract("N/A"));
    assert!(is_ignored_contract("Option Pending"));
    assert!(is_ignored_contract("In Discussion"));
    assert!(!is_ignored_contract("Domestic"));

    assert!(is_international_primary("International"));
    assert!(!is_international_primary("Domestic"));

    assert!(!is_under_contract(""));
    assert!(!is_under_contract("N/A"));
    assert!(is_under_contract("Option Pending"));
}

#[test]
fn age_is_taken_on_jan_first() {
    let birth = NaiveDate::from_ymd_opt(2005, 6, 15).expect("date");
    // Turns 20 during 2025, but is 19 on Jan 1.
    assert_eq!(age_on_jan1(birth, 2025), 19);
}

#[test]
fn jan_first_birthday_counts_as_celebrated() {
    let birth = NaiveDate::from_ymd_opt(2005, 1, 1).expect("date");
    assert_eq!(age_on_jan1(birth, 2025), 20);

    let next_day = NaiveDate::from_ymd_opt(2005, 1, 2).expect("date");
    assert_eq!(age_on_jan1(next_day, 2025), 19);
}

#[test]
fn age_buckets_use_strict_bounds() {
    assert_eq!(age_bucket(17), Some(AgeBucket::U18));
    assert_eq!(age_bucket(18), Some(AgeBucket::U21));
    assert_eq!(age_bucket(20), Some(AgeBucket::U21));
    assert_eq!(age_bucket(21), None);
}

#[test]
fn birth_dates_must_be_iso() {
    assert_eq!(
        parse_birth_date("2003-05-14"),
        NaiveDate::from_ymd_opt(2003, 5, 14)
    );
    assert_eq!(parse_birth_date(" 2003-05-14 "), NaiveDate::from_ymd_opt(2003, 5, 14));
    assert_eq!(parse_birth_date("14/05/2003"), None);
    assert_eq!(parse_birth_date("2003-5-14"), None);
    assert_eq!(parse_birth_date(""), None);
}
