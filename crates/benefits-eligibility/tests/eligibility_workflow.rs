use std::path::PathBuf;
use std::sync::Arc;

use benefits_eligibility::config::EligibilityConfig;
use benefits_eligibility::workflows::catalog::ProgramCatalog;
use benefits_eligibility::workflows::eligibility::{
    AgeGroup, ApplicantSubmission, CitizenshipStatus, CriteriaPredicate, EligibilityService,
    FplGuidelines, MatchReason, SummaryExport,
};
use chrono::NaiveDate;

const SAMPLE_CATALOG: &[u8] = include_bytes!("../../../data/programs.csv");

fn service(primary_overrides: bool) -> EligibilityService {
    let catalog = ProgramCatalog::from_reader(SAMPLE_CATALOG).expect("sample catalog loads");
    let config = EligibilityConfig {
        catalog_path: PathBuf::from("data/programs.csv"),
        fpl: FplGuidelines::FY2024,
        primary_overrides,
    };
    EligibilityService::new(Arc::new(catalog), &config)
}

fn family_of_four() -> ApplicantSubmission {
    ApplicantSubmission {
        age_group: Some(AgeGroup::Youth),
        citizenship: Some(CitizenshipStatus::Citizen),
        household_income: 30_000.0,
        household_size: 4,
        ..ApplicantSubmission::default()
    }
}

#[test]
fn sample_catalog_keeps_sheet_order() {
    let catalog = ProgramCatalog::from_reader(SAMPLE_CATALOG).expect("sample catalog loads");
    assert_eq!(catalog.len(), 15);
    assert_eq!(catalog.programs()[0].name, "Medi-Cal");
    assert_eq!(
        catalog.programs()[14].eligibility_criteria,
        "CalFresh or Medi-Cal recipients"
    );
    assert!(catalog
        .programs()
        .iter()
        .all(|program| program.application_url().is_some()
            && program.last_updated_on().is_some()));
}

#[test]
fn family_of_four_lands_in_the_priority_programs() {
    let service = service(true);
    let summary = service.evaluate(family_of_four()).expect("valid submission");

    let priority: Vec<&str> = summary
        .matches
        .priority
        .iter()
        .map(|matched| matched.program.name.as_str())
        .collect();
    assert_eq!(
        priority,
        vec![
            "Medi-Cal",
            "In-Home Supportive Services (IHSS)",
            "Supplemental Security Income (SSI)"
        ]
    );
    assert_eq!(
        summary.other_program_names(),
        vec![
            "Institutional Deeming Waiver (HCBA)",
            "CalFresh",
            "CalWORKs",
            "LIHEAP Energy Bill Help"
        ]
    );
    assert!(summary
        .primary_programs
        .iter()
        .all(|program| program.eligible));
}

#[test]
fn regional_center_infant_matches_on_criteria() {
    let service = service(true);
    let summary = service
        .evaluate(ApplicantSubmission {
            age_group: None,
            age: Some(1),
            household_income: 60_000.0,
            household_size: 3,
            disabled_children: 1,
            regional_center_client: true,
            ..family_of_four()
        })
        .expect("valid submission");

    assert!(summary.primary_programs.iter().all(|view| !view.eligible));
    assert!(summary.other_signals.is_empty());
    assert_eq!(summary.matches.priority.len(), 3);

    let reason_for = |name: &str| {
        summary
            .matches
            .other
            .iter()
            .find(|matched| matched.program.name == name)
            .map(|matched| matched.reason)
    };
    assert_eq!(
        reason_for("Institutional Deeming Waiver (HCBA)"),
        Some(MatchReason::Criteria {
            predicate: CriteriaPredicate::RegionalCenter
        })
    );
    assert_eq!(
        reason_for("Early Start"),
        Some(MatchReason::Criteria {
            predicate: CriteriaPredicate::AgeBracket
        })
    );
    assert_eq!(
        reason_for("ABLE Account (CalABLE)"),
        Some(MatchReason::Criteria {
            predicate: CriteriaPredicate::Disability
        })
    );
    assert_eq!(reason_for("Veterans Service Office"), None);
}

#[test]
fn disabling_primary_overrides_changes_reasons_not_catalog() {
    let with_overrides = service(true);
    let baseline = service(false);

    let overridden = with_overrides
        .evaluate(family_of_four())
        .expect("valid submission");
    let plain = baseline.evaluate(family_of_four()).expect("valid submission");

    assert!(matches!(
        overridden.matches.priority[0].reason,
        MatchReason::Primary { .. }
    ));
    assert_eq!(
        plain.matches.priority[0].reason,
        MatchReason::Criteria {
            predicate: CriteriaPredicate::Income
        }
    );
    assert!(plain
        .matches
        .priority
        .iter()
        .all(|matched| matched.program.name != "In-Home Supportive Services (IHSS)"));
}

#[test]
fn export_renders_the_summary_as_text() {
    let service = service(true);
    let summary = service.evaluate(family_of_four()).expect("valid submission");
    let text = SummaryExport::new(&summary)
        .render(NaiveDate::from_ymd_opt(2024, 8, 15).expect("valid date"));

    assert!(text.contains("Generated: 2024-08-15"));
    assert!(text.contains("Citizenship: U.S. citizen"));
    assert!(text.contains("- IHSS (In-Home Supportive Services): likely eligible"));
    assert!(text.contains("- LIHEAP Energy Bill Help\n"));
}
