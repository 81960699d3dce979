use crate::infra::{eligibility_service, load_catalog};
use benefits_eligibility::config::AppConfig;
use benefits_eligibility::error::AppError;
use benefits_eligibility::telemetry;
use benefits_eligibility::workflows::catalog::{Program, ProgramCatalog};
use benefits_eligibility::workflows::eligibility::report::format_dollars;
use benefits_eligibility::workflows::eligibility::{
    AgeGroup, ApplicantSubmission, CitizenshipStatus, EligibilitySummary, EmploymentStatus,
    ProgramMatch, SummaryExport,
};
use chrono::Local;
use clap::Args;
use std::path::PathBuf;

const NO_MATCH_NOTICE: &str = "No matching programs were found for these answers. Contact your local Social Services Agency or Regional Center for a full assessment.";

#[derive(Args, Debug, Default)]
pub(crate) struct CheckArgs {
    /// Age group: 0-2, 3-21 or 22+
    #[arg(long)]
    pub(crate) age_group: Option<AgeGroup>,
    /// Exact age in years; takes precedence over --age-group
    #[arg(long)]
    pub(crate) age: Option<u8>,
    /// U.S. citizen? (yes/no)
    #[arg(long)]
    pub(crate) citizenship: Option<CitizenshipStatus>,
    /// employed, unemployed, student, disabled or not_applicable
    #[arg(long)]
    pub(crate) employment: Option<EmploymentStatus>,
    /// Annual household income in dollars
    #[arg(long, default_value_t = 0.0)]
    pub(crate) household_income: f64,
    #[arg(long, default_value_t = 1)]
    pub(crate) household_size: u32,
    /// Applicant's own annual income in dollars
    #[arg(long)]
    pub(crate) individual_income: Option<f64>,
    /// Number of children in the household with disabilities
    #[arg(long, default_value_t = 0)]
    pub(crate) disabled_children: u32,
    #[arg(long)]
    pub(crate) pregnant: bool,
    #[arg(long)]
    pub(crate) veteran: bool,
    /// Applicant is a Regional Center client
    #[arg(long)]
    pub(crate) regional_center: bool,
    /// A benefit already received (repeatable), e.g. --benefit SSI --benefit CalFresh
    #[arg(long = "benefit")]
    pub(crate) benefits: Vec<String>,
    /// Match on criteria text only, skipping the Medi-Cal/IHSS/SSI formulas
    #[arg(long)]
    pub(crate) baseline: bool,
    /// Print the summary as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
    /// Write a plain-text summary to this path
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
    /// Override the configured program catalog (CSV)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

impl CheckArgs {
    fn submission(&self) -> ApplicantSubmission {
        ApplicantSubmission {
            age_group: self.age_group,
            age: self.age,
            citizenship: self.citizenship,
            employment: self.employment.unwrap_or_default(),
            household_income: self.household_income,
            household_size: self.household_size,
            individual_income: self.individual_income,
            disabled_children: self.disabled_children,
            pregnant: self.pregnant,
            veteran: self.veteran,
            regional_center_client: self.regional_center,
            current_benefits: self.benefits.clone(),
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct ProgramsArgs {
    /// Override the configured program catalog (CSV)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) fn run_check(mut args: CheckArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let catalog = load_catalog(&config.eligibility, args.catalog.take())?;
    let service = eligibility_service(
        &config.eligibility,
        catalog,
        config.eligibility.primary_overrides && !args.baseline,
    );
    let summary = service.evaluate(args.submission())?;

    if args.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Summary payload unavailable: {err}"),
        }
    } else {
        print!("{}", render_summary(&summary));
    }

    if let Some(path) = args.export.take() {
        let export = SummaryExport::new(&summary);
        std::fs::write(&path, export.render(Local::now().date_naive()))?;
        println!("\nSummary written to {}", path.display());
    }

    Ok(())
}

pub(crate) fn run_programs(args: ProgramsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let catalog = load_catalog(&config.eligibility, args.catalog)?;
    print!("{}", render_catalog(&catalog));
    Ok(())
}

pub(crate) fn render_summary(summary: &EligibilitySummary<'_>) -> String {
    let facts = &summary.facts;
    let mut lines = vec![
        format!(
            "Estimated FPL: {:.1}% (poverty line {} for a household of {})",
            summary.fpl_percentage,
            format_dollars(summary.fpl_threshold),
            facts.household_size
        ),
        String::new(),
        "Primary programs".to_string(),
    ];

    for view in &summary.primary_programs {
        let status = match &view.basis {
            Some(basis) => format!("likely eligible ({})", basis.describe()),
            None => "not indicated by your answers".to_string(),
        };
        lines.push(format!("- {}: {}. {}", view.label, status, view.guidance));
    }

    if summary.has_matches() {
        push_matches(&mut lines, "Priority matches", &summary.matches.priority);
        push_matches(&mut lines, "Other matches", &summary.matches.other);
    } else {
        lines.push(String::new());
        lines.push(NO_MATCH_NOTICE.to_string());
    }

    if !summary.other_signals.is_empty() {
        lines.push(String::new());
        lines.push("Also worth a look".to_string());
        for signal in &summary.other_signals {
            lines.push(format!("- {}: {}", signal.name, signal.note));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn push_matches(lines: &mut Vec<String>, heading: &str, matches: &[ProgramMatch<'_>]) {
    if matches.is_empty() {
        return;
    }

    lines.push(String::new());
    lines.push(format!("{heading} ({})", matches.len()));
    for (index, matched) in matches.iter().enumerate() {
        push_program(lines, index + 1, matched.program);
        lines.push(format!("   Matched on: {}", matched.reason.describe()));
    }
}

fn push_program(lines: &mut Vec<String>, number: usize, program: &Program) {
    if program.agency.is_empty() {
        lines.push(format!("{number}. {}", program.name));
    } else {
        lines.push(format!("{number}. {} ({})", program.name, program.agency));
    }
    if !program.description.is_empty() {
        lines.push(format!("   {}", program.description));
    }
    if let Some(url) = program.application_url() {
        lines.push(format!("   Apply: <{url}>"));
    }
    if !program.last_updated.is_empty() {
        lines.push(format!("   Last updated: {}", program.last_updated));
    }
}

pub(crate) fn render_catalog(catalog: &ProgramCatalog) -> String {
    let mut lines = vec![format!("{} programs", catalog.len())];
    for (index, program) in catalog.programs().iter().enumerate() {
        push_program(&mut lines, index + 1, program);
        if !program.eligibility_criteria.is_empty() {
            lines.push(format!("   Eligibility: {}", program.eligibility_criteria));
        }
        if !program.tags.is_empty() {
            let tags: Vec<String> = program.tags.iter().map(|tag| tag.to_string()).collect();
            lines.push(format!("   Tags: {}", tags.join(", ")));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
