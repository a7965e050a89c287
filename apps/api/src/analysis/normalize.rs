use std::collections::HashSet;

use serde::Serialize;

use crate::analysis::payload::{
    AnalysisPayload, CategoryScore, NamedCategoryScore, FIXED_CATEGORIES,
};

/// A category ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedCategory {
    pub key: String,
    pub title: String,
    pub score: CategoryScore,
}

/// One axis of the radar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadarPoint {
    pub label: String,
    pub ai_score: u8,
    pub potential_score: u8,
}

/// Flattens a payload into display order: fixed categories first, then the
/// `other_minorities` groups as listed.
///
/// Keys are unique. When a dynamic group repeats an earlier key, the earlier
/// one wins. Categories without usable scores are left out.
pub fn normalize(payload: &AnalysisPayload) -> Vec<NormalizedCategory> {
    let dynamic = payload.other_minorities();
    let mut seen: HashSet<&str> = FIXED_CATEGORIES.into_iter().collect();
    let mut out = Vec::with_capacity(FIXED_CATEGORIES.len() + dynamic.len());

    for key in FIXED_CATEGORIES {
        // A fixed key missing at top level may still have been reported as a group.
        let score = payload
            .category(key)
            .or_else(|| find_group(&dynamic, key).cloned());
        if let Some(score) = score {
            out.push(NormalizedCategory {
                key: key.to_string(),
                title: display_title(key),
                score,
            });
        }
    }

    for named in &dynamic {
        if !seen.insert(named.group.as_str()) {
            continue;
        }
        out.push(NormalizedCategory {
            key: named.group.clone(),
            title: named.group.clone(),
            score: named.score.clone(),
        });
    }

    out
}

/// The fixed axes in canonical order; absent categories plot as zero.
pub fn radar_series(payload: &AnalysisPayload) -> [RadarPoint; 5] {
    FIXED_CATEGORIES.map(|key| {
        let (ai_score, potential_score) = payload
            .category(key)
            .map(|s| (s.ai_score, s.potential_score))
            .unwrap_or((0, 0));
        RadarPoint {
            label: display_title(key),
            ai_score,
            potential_score,
        }
    })
}

/// `religious_blasphemy` -> `Religious Blasphemy`
pub fn display_title(key: &str) -> String {
    key.replace('_', " ")
        .split_whitespace()
        .map(|w| {
            let mut c = w.chars();
            match c.next() {
                None => String::new(),
                Some(f) => f.to_uppercase().to_string() + c.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn find_group<'a>(dynamic: &'a [NamedCategoryScore], key: &str) -> Option<&'a CategoryScore> {
    dynamic.iter().find(|m| m.group == key).map(|m| &m.score)
}
