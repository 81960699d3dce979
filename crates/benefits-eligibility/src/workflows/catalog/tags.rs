use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::normalizer::tokenize;
use crate::workflows::eligibility::domain::{AgeGroup, CitizenshipStatus, EmploymentStatus};

/// Structured condition extracted from a program's eligibility criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CriteriaTag {
    RegionalCenter,
    Ssi,
    Snap,
    MediCal,
    Pregnancy,
    Veteran,
    Disability,
    Employment(EmploymentStatus),
    Citizenship(CitizenshipStatus),
    Income,
    AgeBracket(AgeGroup),
}

impl fmt::Display for CriteriaTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegionalCenter => f.write_str("regional_center"),
            Self::Ssi => f.write_str("ssi"),
            Self::Snap => f.write_str("snap"),
            Self::MediCal => f.write_str("medi_cal"),
            Self::Pregnancy => f.write_str("pregnancy"),
            Self::Veteran => f.write_str("veteran"),
            Self::Disability => f.write_str("disability"),
            Self::Employment(status) => write!(f, "employment:{}", status.key()),
            Self::Citizenship(status) => write!(f, "citizenship:{}", status.key()),
            Self::Income => f.write_str("income"),
            Self::AgeBracket(group) => write!(f, "age:{}", group.label()),
        }
    }
}

impl FromStr for CriteriaTag {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        let tag = match normalized.split_once(':') {
            Some(("employment", status)) => Self::Employment(status.parse()?),
            Some(("citizenship", status)) => Self::Citizenship(status.parse()?),
            Some(("age", group)) => Self::AgeBracket(group.parse()?),
            Some(_) => return Err(format!("unknown criteria tag '{raw}'")),
            None => match normalized.as_str() {
                "regional_center" => Self::RegionalCenter,
                "ssi" => Self::Ssi,
                "snap" | "calfresh" => Self::Snap,
                "medi_cal" | "medi-cal" => Self::MediCal,
                "pregnancy" => Self::Pregnancy,
                "veteran" => Self::Veteran,
                "disability" => Self::Disability,
                "income" | "fpl" => Self::Income,
                _ => return Err(format!("unknown criteria tag '{raw}'")),
            },
        };
        Ok(tag)
    }
}

impl Serialize for CriteriaTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ordered tag set attached to every catalog program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CriteriaTags(BTreeSet<CriteriaTag>);

impl CriteriaTags {
    /// Scans normalized criteria text word by word.
    pub fn derive(normalized: &str) -> Self {
        let tokens = tokenize(normalized);
        let mut tags = BTreeSet::new();

        if contains_phrase(&tokens, &["regional", "center"])
            || contains_phrase(&tokens, &["regional", "centers"])
            || has_token(&tokens, |t| t == "rcoc")
        {
            tags.insert(CriteriaTag::RegionalCenter);
        }
        if has_token(&tokens, |t| t == "ssi")
            || contains_phrase(&tokens, &["supplemental", "security", "income"])
        {
            tags.insert(CriteriaTag::Ssi);
        }
        if has_token(&tokens, |t| t == "snap" || t == "calfresh")
            || contains_phrase(&tokens, &["food", "stamps"])
        {
            tags.insert(CriteriaTag::Snap);
        }
        if has_token(&tokens, |t| t == "medi-cal" || t == "medicaid")
            || contains_phrase(&tokens, &["medi", "cal"])
        {
            tags.insert(CriteriaTag::MediCal);
        }
        if has_token(&tokens, |t| t.starts_with("pregnan")) {
            tags.insert(CriteriaTag::Pregnancy);
        }
        if has_token(&tokens, |t| t.starts_with("veteran")) {
            tags.insert(CriteriaTag::Veteran);
        }
        if has_token(&tokens, |t| matches!(t, "disabilities" | "disabled")) {
            tags.insert(CriteriaTag::Disability);
        }
        if has_token(&tokens, |t| t == "unemployed") {
            tags.insert(CriteriaTag::Employment(EmploymentStatus::Unemployed));
        }
        if has_token(&tokens, |t| t == "student" || t == "students") {
            tags.insert(CriteriaTag::Employment(EmploymentStatus::Student));
        }
        if has_token(&tokens, |t| t == "disabled") {
            tags.insert(CriteriaTag::Employment(EmploymentStatus::Disabled));
        }
        tags.extend(citizenship_tags(&tokens));
        if has_token(&tokens, |t| {
            t.split('-').any(|part| matches!(part, "income" | "fpl" | "poverty"))
        }) {
            tags.insert(CriteriaTag::Income);
        }
        for group in AgeGroup::ordered() {
            if has_token(&tokens, |t| t == group.label()) {
                tags.insert(CriteriaTag::AgeBracket(group));
            }
        }

        Self(tags)
    }

    /// Parses an explicit `;`/`,` separated tag list. Unknown names are dropped.
    pub fn parse_list(raw: &str) -> Self {
        let tags = raw
            .split([';', ','])
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .filter_map(|name| match name.parse::<CriteriaTag>() {
                Ok(tag) => Some(tag),
                Err(reason) => {
                    tracing::debug!(%reason, "ignoring criteria tag");
                    None
                }
            })
            .collect();
        Self(tags)
    }

    pub fn contains(&self, tag: CriteriaTag) -> bool {
        self.0.contains(&tag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = CriteriaTag> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<CriteriaTag> for CriteriaTags {
    fn from_iter<I: IntoIterator<Item = CriteriaTag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn has_token(tokens: &[&str], predicate: impl Fn(&str) -> bool) -> bool {
    tokens.iter().any(|&token| predicate(token))
}

fn contains_phrase(tokens: &[&str], phrase: &[&str]) -> bool {
    tokens.windows(phrase.len()).any(|window| window == phrase)
}

// "non-citizen", "noncitizen" and "non citizen" must not also read as a citizen mention.
fn citizenship_tags(tokens: &[&str]) -> Vec<CriteriaTag> {
    let mut found = Vec::new();
    let mut previous: Option<&str> = None;

    for &token in tokens {
        let citizen_word = matches!(token, "citizen" | "citizens" | "citizenship");
        let non_citizen = matches!(
            token,
            "non-citizen" | "non-citizens" | "noncitizen" | "noncitizens"
        ) || token.starts_with("immigra")
            || token == "undocumented"
            || (citizen_word && previous == Some("non"));

        if non_citizen {
            found.push(CriteriaTag::Citizenship(CitizenshipStatus::NonCitizen));
        } else if citizen_word {
            found.push(CriteriaTag::Citizenship(CitizenshipStatus::Citizen));
        }
        previous = Some(token);
    }

    found
}
