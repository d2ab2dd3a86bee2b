use std::sync::LazyLock;

use regex::Regex;

use super::tab_text;
use crate::record::{CofinancingTab, OwnFunds, Partner};

static OWN_FUNDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)Блок "Собственные средства".*?Перечень расходов:(.*?)Сумма, руб.:\s*(\d+)"#).unwrap()
});

static PARTNER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)Название партнера:\s*(.+?)\nТип поддержки:\s*(.+?)\nПеречень расходов:\s*(.+?)\nСумма, руб\.: (\d+)",
    )
    .unwrap()
});

const TAB_HEADER: &str = "Вкладка \"Софинансирование\"";
const NEXT_TAB: &str = "Вкладка \"Доп. Файлы\"";

pub fn extract(lines: &[String]) -> CofinancingTab {
    let text = tab_text(lines, TAB_HEADER, Some(NEXT_TAB));
    CofinancingTab {
        own_funds: own_funds(&text),
        partners: partners(&text),
    }
}

fn own_funds(text: &str) -> OwnFunds {
    let mut funds = OwnFunds::default();
    if let Some(caps) = OWN_FUNDS_RE.captures(text) {
        funds.expenses = caps[1]
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        funds.total.push(format!("Сумма: {}", caps[2].trim()));
    }
    funds
}

fn partners(text: &str) -> Vec<Partner> {
    PARTNER_RE
        .captures_iter(text)
        .map(|caps| Partner {
            name: caps[1].trim().to_string(),
            support_type: caps[2].trim().to_string(),
            expenses: caps[3].trim().replace('\n', " "),
            amount: caps[4].trim().to_string(),
        })
        .collect()
}
