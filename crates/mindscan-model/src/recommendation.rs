// SPDX-License-Identifier: Apache-2.0

use crate::{DecodedResult, Domain};
use serde::Serialize;

pub const NO_RECOMMENDATION: &str = "No recommendation available.";

const DEPRESSION: [(&str, &str); 5] = [
    (
        "normal",
        "You're doing well. Maintain a healthy routine and continue your self-care practices.",
    ),
    (
        "mild",
        "Consider incorporating regular physical activity and mindfulness exercises into your routine.",
    ),
    (
        "moderate",
        "You may benefit from speaking with a counselor or therapist. Journaling and support groups can also help.",
    ),
    (
        "severe",
        "Seek professional help. Therapy and possibly clinical intervention may be beneficial.",
    ),
    (
        "extremely severe",
        "Immediate support is recommended. Please consult a mental health professional as soon as possible.",
    ),
];

const SATISFACTION: [(&str, &str); 5] = [
    (
        "dissatisfied",
        "Reflect on areas that cause dissatisfaction. Consider setting small, achievable goals to regain positivity.",
    ),
    (
        "below average",
        "Explore hobbies or connect with others to increase fulfillment in daily life.",
    ),
    (
        "average",
        "You\u{2019}re in a stable zone. Keep nurturing areas that bring you satisfaction.",
    ),
    (
        "above average",
        "Great job! Continue engaging in meaningful and fulfilling activities.",
    ),
    (
        "high",
        "You\u{2019}re thriving. Consider mentoring or helping others to share positivity.",
    ),
];

const PERSONALITY: [(&str, &str); 3] = [
    (
        "low",
        "Explore personality development resources. Engage in group discussions and reflective practices.",
    ),
    (
        "moderate",
        "You have a balanced personality. Try new experiences to further develop your traits.",
    ),
    (
        "high",
        "Strong personality traits can be influential. Channel them into leadership or creative pursuits.",
    ),
];

fn recommendation_table(domain: Domain) -> &'static [(&'static str, &'static str)] {
    match domain {
        Domain::Depression => &DEPRESSION,
        Domain::Satisfaction => &SATISFACTION,
        Domain::Personality => &PERSONALITY,
    }
}

/// Advice text for a decoded label; labels without an entry (including
/// `Unknown`) map to [`NO_RECOMMENDATION`].
#[must_use]
pub fn recommend(domain: Domain, label: &str) -> &'static str {
    recommendation_table(domain)
        .iter()
        .find(|(known, _)| *known == label)
        .map_or(NO_RECOMMENDATION, |&(_, advice)| advice)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub depression: &'static str,
    pub satisfaction: &'static str,
    pub personality: &'static str,
}

impl Recommendation {
    #[must_use]
    pub fn for_decoded(decoded: &DecodedResult) -> Self {
        Self {
            depression: recommend(Domain::Depression, decoded.depression),
            satisfaction: recommend(Domain::Satisfaction, decoded.satisfaction),
            personality: recommend(Domain::Personality, decoded.personality),
        }
    }

    #[must_use]
    pub const fn advice(&self, domain: Domain) -> &'static str {
        match domain {
            Domain::Depression => self.depression,
            Domain::Satisfaction => self.satisfaction,
            Domain::Personality => self.personality,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UNKNOWN_LABEL;

    #[test]
    fn every_domain_label_has_advice() {
        for (domain, ids) in [
            (Domain::Depression, 0..5),
            (Domain::Satisfaction, 0..5),
            (Domain::Personality, 0..3),
        ] {
            for id in ids {
                let label = crate::decode_label(domain, id);
                assert_ne!(recommend(domain, label), NO_RECOMMENDATION, "{domain}/{label}");
            }
        }
    }

    #[test]
    fn unknown_and_foreign_labels_fall_back() {
        assert_eq!(recommend(Domain::Depression, UNKNOWN_LABEL), NO_RECOMMENDATION);
        assert_eq!(recommend(Domain::Personality, "severe"), NO_RECOMMENDATION);
        assert_eq!(recommend(Domain::Satisfaction, ""), NO_RECOMMENDATION);
    }

    #[test]
    fn same_label_in_two_domains_yields_domain_specific_advice() {
        assert_ne!(
            recommend(Domain::Depression, "moderate"),
            recommend(Domain::Personality, "moderate")
        );
        assert_eq!(
            recommend(Domain::Satisfaction, "average"),
            "You\u{2019}re in a stable zone. Keep nurturing areas that bring you satisfaction."
        );
    }
}
