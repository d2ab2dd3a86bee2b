use std::sync::LazyLock;

use regex::Regex;

use crate::parser::span::extract_between;
use crate::record::{Field, ResultMetrics, ResultsTab};

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}\.\d{1,2}\.\d{4}|\d+").unwrap());

const TAB_HEADER: &str = "Вкладка \"Результаты\"";
const NEXT_TAB: &str = "Вкладка \"Календарный план\"";
const SOCIAL_EFFECT_LABEL: &str = "Социальный эффект:";

/// Every date-shaped or integer token, left to right, top to bottom.
pub fn scrape_tokens(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| TOKEN_RE.find_iter(line).map(|m| m.as_str().to_string()))
        .collect()
}

/// Metrics are assigned by token position; the document emits them in a fixed order.
pub fn extract(lines: &[String]) -> ResultsTab {
    let span = extract_between(lines, &[TAB_HEADER], Some(NEXT_TAB));
    let mut metrics = ResultMetrics::default();

    for (slot, token) in metrics.slots_mut().into_iter().zip(scrape_tokens(&span)) {
        *slot = token;
    }

    let social = extract_between(&span, &[SOCIAL_EFFECT_LABEL], Some(NEXT_TAB));
    if !social.is_empty() {
        metrics.social_effect = Field::from(social);
    }

    ResultsTab { metrics }
}
