use std::sync::LazyLock;

use regex::Regex;

use crate::parser::span::{find_marker, prefixed_value};
use crate::record::{ExpenseCategory, ExpenseRecord, ExpensesTab};

static CATEGORY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^Категория "(.*)""#).unwrap());
static TYPE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^Тип "(.*)""#).unwrap());
static RECORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Запись № \d+").unwrap());

const TAB_HEADER: &str = "Вкладка \"Расходы\"";
const TOTAL_LABEL: &str = "Общая сумма расходов:";

/// How many lines after a record header may carry its attributes.
const RECORD_WINDOW: usize = 5;

type RecordSlot = fn(&mut ExpenseRecord) -> &mut String;

const RECORD_ATTRIBUTES: &[(&str, RecordSlot)] = &[
    ("Название:", |r| &mut r.title),
    ("Описание:", |r| &mut r.description),
    ("Количество:", |r| &mut r.quantity),
    ("Цена:", |r| &mut r.price),
    ("Сумма:", |r| &mut r.total),
];

/// One classified line of the expenses tab, in priority order.
enum Line<'a> {
    Total,
    Category(&'a str),
    Type(&'a str),
    Record(&'a str),
    Other,
}

fn classify(line: &str) -> Line<'_> {
    if line.starts_with(TOTAL_LABEL) {
        Line::Total
    } else if let Some(caps) = CATEGORY_RE.captures(line) {
        Line::Category(caps.get(1).map_or("", |m| m.as_str()))
    } else if let Some(caps) = TYPE_RE.captures(line) {
        Line::Type(caps.get(1).map_or("", |m| m.as_str()))
    } else if let Some(m) = RECORD_RE.find(line) {
        Line::Record(m.as_str())
    } else {
        Line::Other
    }
}

pub fn extract(lines: &[String]) -> ExpensesTab {
    let mut tab = ExpensesTab::default();
    let Some(header) = find_marker(lines, TAB_HEADER) else {
        return tab;
    };

    let mut open: Option<ExpenseCategory> = None;

    for i in header + 1..lines.len() {
        let line = lines[i].trim();
        match classify(line) {
            Line::Total => {
                if let Some(next) = lines.get(i + 1) {
                    tab.total = next.trim().to_string();
                }
            }
            Line::Category(name) => {
                tab.categories.extend(open.take());
                open = Some(ExpenseCategory {
                    name: name.to_string(),
                    ..Default::default()
                });
            }
            Line::Type(kind) => {
                if let Some(category) = open.as_mut() {
                    category.kind = kind.to_string();
                }
            }
            Line::Record(id) => {
                let end = (i + 1 + RECORD_WINDOW).min(lines.len());
                let record = read_record(id, &lines[i + 1..end]);
                // A record before the first category has nowhere to go.
                if let Some(category) = open.as_mut() {
                    category.records.push(record);
                }
            }
            Line::Other => {}
        }
    }

    tab.categories.extend(open);
    tab
}

/// Fill a record from its attribute window. Attributes may come in any
/// order; the first line that is not an attribute ends the record.
fn read_record(id: &str, window: &[String]) -> ExpenseRecord {
    let mut record = ExpenseRecord {
        id: id.to_string(),
        ..Default::default()
    };

    for line in window {
        let Some((value, slot)) = RECORD_ATTRIBUTES
            .iter()
            .find_map(|(label, slot)| prefixed_value(line, label).map(|v| (v, slot)))
        else {
            break;
        };
        *slot(&mut record) = value.to_string();
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn categories_types_and_records() {
        let tab = extract(&lines(&[
            "Вкладка \"Расходы\"",
            "Общая сумма расходов:",
            "150 000",
            "Категория \"Оборудование\"",
            "Тип \"Основные средства\"",
            "Запись № 1",
            "Название: Ноутбук",
            "Описание: Для монтажа",
            "Количество: 2",
            "Цена: 50 000",
            "Сумма: 100 000",
            "Запись № 2",
            "Сумма: 50 000",
            "Название: Камера",
        ]));
        assert_eq!(tab.total, "150 000");
        assert_eq!(tab.categories.len(), 1);
        let c = &tab.categories[0];
        assert_eq!(c.name, "Оборудование");
        assert_eq!(c.kind, "Основные средства");
        assert_eq!(c.records.len(), 2);
        assert_eq!(c.records[0].id, "Запись № 1");
        assert_eq!(c.records[0].title, "Ноутбук");
        assert_eq!(c.records[0].description, "Для монтажа");
        assert_eq!(c.records[0].quantity, "2");
        assert_eq!(c.records[0].price, "50 000");
        assert_eq!(c.records[0].total, "100 000");
        assert_eq!(c.records[1].title, "Камера");
        assert_eq!(c.records[1].total, "50 000");
    }

    #[test]
    fn empty_category_is_kept() {
        let tab = extract(&lines(&[
            "Вкладка \"Расходы\"",
            "Категория \"A\"",
            "Категория \"B\"",
            "Запись № 1",
            "Название: X",
        ]));
        assert_eq!(tab.categories.len(), 2);
        assert_eq!(tab.categories[0].name, "A");
        assert!(tab.categories[0].records.is_empty());
        assert_eq!(tab.categories[1].records.len(), 1);
    }

    #[test]
    fn nothing_before_the_tab_header_counts() {
        let tab = extract(&lines(&["Категория \"Ранняя\"", "Запись № 1"]));
        assert!(tab.categories.is_empty());
        assert_eq!(tab.total, "");
    }

    #[test]
    fn non_attribute_line_ends_record_early() {
        let tab = extract(&lines(&[
            "Вкладка \"Расходы\"",
            "Категория \"A\"",
            "Запись № 7",
            "Название: Аренда",
            "Примечание к записи",
            "Цена: 10",
        ]));
        let r = &tab.categories[0].records[0];
        assert_eq!(r.title, "Аренда");
        assert_eq!(r.price, "");
    }

    #[test]
    fn window_is_five_lines() {
        let tab = extract(&lines(&[
            "Вкладка \"Расходы\"",
            "Категория \"A\"",
            "Запись № 1",
            "Название: a",
            "Описание: b",
            "Количество: c",
            "Цена: d",
            "Название: e",
            "Сумма: f",
        ]));
        let r = &tab.categories[0].records[0];
        assert_eq!(r.title, "e");
        assert_eq!(r.total, "");
    }

    #[test]
    fn record_without_category_is_dropped() {
        let tab = extract(&lines(&[
            "Вкладка \"Расходы\"",
            "Запись № 1",
            "Название: a",
            "Категория \"A\"",
        ]));
        assert_eq!(tab.categories.len(), 1);
        assert!(tab.categories[0].records.is_empty());
    }

    #[test]
    fn type_without_category_is_ignored() {
        let tab = extract(&lines(&[
            "Вкладка \"Расходы\"",
            "Тип \"Услуги\"",
            "Категория \"A\"",
        ]));
        assert_eq!(tab.categories.len(), 1);
        assert_eq!(tab.categories[0].name, "A");
        assert_eq!(tab.categories[0].kind, "");
    }

    #[test]
    fn record_window_truncated_at_end_of_input() {
        let tab = extract(&lines(&[
            "Вкладка \"Расходы\"",
            "Категория \"A\"",
            "Запись № 1",
            "Цена: 5",
        ]));
        assert_eq!(tab.categories[0].records[0].price, "5");
    }
}
