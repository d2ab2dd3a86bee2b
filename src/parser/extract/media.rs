use itertools::Itertools;

use crate::parser::span::{extract_between, prefixed_value};
use crate::record::{MediaResource, MediaTab};

const RESOURCES_START: &str = "Вкладка \"Календарный план\"";
const PLAN_FILE_LABEL: &str = "Файл с подробным медиа-планом:";
const NEXT_TAB: &str = "Вкладка \"Расходы\"";

const KIND_LABEL: &str = "Вид ресурса:";
const MONTH_LABEL: &str = "Месяц публикации:";
const VIEWS_LABEL: &str = "Планируемое количество просмотров:";
const LINKS_LABEL: &str = "Ссылки на ресурсы:";
const RATIONALE_LABEL: &str = "Почему выбран такой формат медиа:";

/// Which multi-line attribute continuation lines belong to.
#[derive(Clone, Copy)]
enum Collecting {
    Nothing,
    Links,
    Rationale,
}

/// A resource under construction; multi-line attributes are kept as parts.
struct Draft {
    resource: MediaResource,
    links: Vec<String>,
    rationale: Vec<String>,
}

impl Draft {
    fn new(kind: &str) -> Self {
        Draft {
            resource: MediaResource {
                kind: kind.to_string(),
                ..Default::default()
            },
            links: Vec::new(),
            rationale: Vec::new(),
        }
    }

    fn finish(self) -> MediaResource {
        MediaResource {
            links: join_parts(&self.links),
            rationale: join_parts(&self.rationale),
            ..self.resource
        }
    }
}

fn join_parts(parts: &[String]) -> String {
    parts.iter().filter(|p| !p.is_empty()).join(" ")
}

pub fn extract(lines: &[String]) -> MediaTab {
    let span = extract_between(lines, &[RESOURCES_START], Some(PLAN_FILE_LABEL));
    MediaTab {
        resources: resources(&span),
        plan_file: extract_between(lines, &[PLAN_FILE_LABEL], Some(NEXT_TAB)),
    }
}

fn resources(span: &[String]) -> Vec<MediaResource> {
    let mut out = Vec::new();
    let mut current: Option<Draft> = None;
    let mut collecting = Collecting::Nothing;

    for line in span {
        if let Some(kind) = prefixed_value(line, KIND_LABEL) {
            out.extend(current.take().map(Draft::finish));
            current = Some(Draft::new(kind));
            collecting = Collecting::Nothing;
            continue;
        }
        let Some(draft) = current.as_mut() else {
            continue;
        };

        if let Some(v) = prefixed_value(line, MONTH_LABEL) {
            draft.resource.month = v.to_string();
        } else if let Some(v) = prefixed_value(line, VIEWS_LABEL) {
            draft.resource.planned_views = v.to_string();
        } else if let Some(v) = prefixed_value(line, LINKS_LABEL) {
            draft.links.push(v.to_string());
            collecting = Collecting::Links;
        } else if let Some(v) = prefixed_value(line, RATIONALE_LABEL) {
            draft.rationale.push(v.to_string());
            collecting = Collecting::Rationale;
        } else {
            match collecting {
                Collecting::Links => draft.links.push(line.clone()),
                Collecting::Rationale => draft.rationale.push(line.clone()),
                Collecting::Nothing => {}
            }
        }
    }

    out.extend(current.map(Draft::finish));
    out
}
