use super::summary::EligibilitySummary;
use chrono::NaiveDate;

const TITLE: &str = "Orange County Disability Benefits Eligibility Summary";
const DISCLAIMER: &str = "This summary is based on general eligibility guidelines. For a full assessment, contact your local Social Services Agency or Regional Center.";

/// Downloadable plain-text version of a summary. Free text, not meant to be parsed.
pub struct SummaryExport<'s, 'a> {
    summary: &'s EligibilitySummary<'a>,
}

impl<'s, 'a> SummaryExport<'s, 'a> {
    pub fn new(summary: &'s EligibilitySummary<'a>) -> Self {
        Self { summary }
    }

    pub fn file_name(&self) -> &'static str {
        "eligibility_summary.txt"
    }

    pub fn render(&self, generated_on: NaiveDate) -> String {
        let facts = &self.summary.facts;

        let current_benefits = if facts.current_benefits.is_empty() {
            "None".to_string()
        } else {
            facts
                .current_benefits
                .iter()
                .map(|benefit| benefit.label())
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut lines = vec![
            TITLE.to_string(),
            format!("Generated: {}", generated_on.format("%Y-%m-%d")),
            String::new(),
            format!("Age Group: {}", facts.age_group),
        ];
        if let Some(age) = facts.age {
            lines.push(format!("Age: {age}"));
        }
        lines.extend([
            format!("Citizenship: {}", facts.citizenship.label()),
            format!("Current Benefits: {current_benefits}"),
            format!("Employment: {}", facts.employment.label()),
            format!(
                "Individual Income: {}",
                format_dollars(facts.individual_income.unwrap_or(0.0))
            ),
            format!("Household Income: {}", format_dollars(facts.household_income)),
            format!("Household Size: {}", facts.household_size),
            format!("Estimated FPL: {:.1}%", self.summary.fpl_percentage),
            String::new(),
            "Primary Programs:".to_string(),
        ]);

        for view in &self.summary.primary_programs {
            let status = match &view.basis {
                Some(basis) => format!("likely eligible ({})", basis.describe()),
                None => "not indicated by your answers".to_string(),
            };
            lines.push(format!("- {}: {}", view.label, status));
        }

        lines.push(String::new());
        lines.push("Additional Programs:".to_string());
        let mut additional = self.summary.other_program_names();
        for signal in &self.summary.other_signals {
            if !additional.contains(&signal.name) {
                additional.push(signal.name);
            }
        }
        if additional.is_empty() {
            lines.push("- None".to_string());
        } else {
            lines.extend(additional.into_iter().map(|name| format!("- {name}")));
        }

        lines.push(String::new());
        lines.push(DISCLAIMER.to_string());

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

/// Whole dollars with thousands separators, e.g. `$30,000`.
pub fn format_dollars(amount: f64) -> String {
    let whole = amount.max(0.0).round() as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dollars_are_grouped_by_thousands() {
        assert_eq!(format_dollars(0.0), "$0");
        assert_eq!(format_dollars(999.0), "$999");
        assert_eq!(format_dollars(30_000.0), "$30,000");
        assert_eq!(format_dollars(1_234_567.4), "$1,234,567");
    }
}
