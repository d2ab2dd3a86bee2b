use tracing::debug;

use super::span::{extract_between, value_after};
use crate::record::{Field, GeographyEntry, ProjectRecord};

const TASK_LABEL: &str = "Поставленная задача:";
const GEOGRAPHY_LABEL: &str = "Выберите регион или федеральный округ:";
const ADDRESS_LABEL: &str = "Адрес:";

/// A multi-line field: the span after `label` up to the line starting with `end`.
struct SpanRule {
    label: &'static str,
    end: &'static str,
    slot: fn(&mut ProjectRecord) -> &mut Field,
}

// Within one group the first matching label wins for a given line.
const GENERAL_INFO: &[SpanRule] = &[
    SpanRule {
        label: "Масштаб реализации проекта:",
        end: "Дата начала и окончания проекта:",
        slot: |r| &mut r.general.info.scale,
    },
    SpanRule {
        label: "Дата начала и окончания проекта:",
        end: "Блок \"Дополнительная информация об авторе проекта\"",
        slot: |r| &mut r.general.info.dates,
    },
];

const AUTHOR_INFO: &[SpanRule] = &[
    SpanRule {
        label: "Опыт автора проекта:",
        end: "Описание функционала автора проекта:",
        slot: |r| &mut r.general.author.experience,
    },
    SpanRule {
        label: "Описание функционала автора проекта:",
        end: "Адрес регистрации автора проекта:",
        slot: |r| &mut r.general.author.duties,
    },
    SpanRule {
        label: "Адрес регистрации автора проекта:",
        end: "Добавить резюме:",
        slot: |r| &mut r.general.author.address,
    },
    SpanRule {
        label: "Видео-визитка (ссылка на ролик на любом видеохостинге):",
        end: "Вкладка \"О проекте\"",
        slot: |r| &mut r.general.author.video,
    },
];

const PROJECT_INFO: &[SpanRule] = &[
    SpanRule {
        label: "Краткая информация о проекте:",
        end: "Описание проблемы, решению/снижению которой посвящен проект:",
        slot: |r| &mut r.about.info.summary,
    },
    SpanRule {
        label: "Описание проблемы, решению/снижению которой посвящен проект:",
        end: "Основные целевые группы, на которые направлен проект:",
        slot: |r| &mut r.about.info.problem,
    },
    SpanRule {
        label: "Основные целевые группы, на которые направлен проект:",
        end: "Основная цель проекта:",
        slot: |r| &mut r.about.info.target_groups,
    },
    SpanRule {
        label: "Основная цель проекта:",
        end: "Опыт успешной реализации проекта:",
        slot: |r| &mut r.about.info.goal,
    },
    SpanRule {
        label: "Опыт успешной реализации проекта:",
        end: "Перспектива развития и потенциал проекта:",
        slot: |r| &mut r.about.info.track_record,
    },
    SpanRule {
        label: "Перспектива развития и потенциал проекта:",
        end: "Блок \"Задачи\"",
        slot: |r| &mut r.about.info.outlook,
    },
];

/// Single top-to-bottom pass: identity fields, span-backed fields, the flat
/// task list and the project geography.
pub fn scan(lines: &[String], record: &mut ProjectRecord) {
    for (i, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        scan_identity(line, record);

        for group in [GENERAL_INFO, AUTHOR_INFO, PROJECT_INFO] {
            if let Some(rule) = group.iter().find(|r| line.contains(r.label)) {
                *(rule.slot)(record) =
                    Field::from(extract_between(&lines[i..], &[rule.label], Some(rule.end)));
            }
        }

        if let Some(task) = value_after(line, TASK_LABEL) {
            if !record.about.tasks.iter().any(|t| t == task) {
                record.about.tasks.push(task.to_string());
            }
        }

        if let Some(region) = value_after(line, GEOGRAPHY_LABEL) {
            let address = lines
                .get(i + 1)
                .and_then(|next| value_after(next.trim(), ADDRESS_LABEL))
                .unwrap_or_default();
            record.about.geography.push(GeographyEntry {
                region: region.to_string(),
                address: address.to_string(),
            });
        }
    }

    debug!(
        tasks = record.about.tasks.len(),
        regions = record.about.geography.len(),
        "scalar pass done"
    );
}

fn scan_identity(line: &str, record: &mut ProjectRecord) {
    if let Some(v) = value_after(line, "ФИО:") {
        record.full_name = v.to_string();
    } else if let Some(v) = value_after(line, "Название проекта:") {
        record.title = v.to_string();
    } else if let Some(v) = value_after(line, "Регион проекта:") {
        record.region = v.to_string();
    } else if let Some(v) = value_after(line, "Логотип проекта:") {
        record.logo = v.to_string();
    } else if let Some(v) = value_after(line, "Контакты:") {
        let mut parts = v.split(", ");
        if let Some(phone) = parts.next() {
            record.contacts.phone = Some(phone.to_string());
        }
        if let Some(email) = parts.next() {
            record.contacts.email = Some(email.to_string());
        }
    }
}
