use crate::parser::span::value_after;
use crate::record::{CalendarEvent, CalendarTab, CalendarTask};

const TAB_HEADER: &str = "Вкладка \"Календарный план\"";
const ADD_EVENT: &str = "Добавить мероприятие:";
const TASK_LABEL: &str = "Поставленная задача:";
const EVENT_LABEL: &str = "Название мероприятия:";

type EventSlot = fn(&mut CalendarEvent) -> &mut String;

const EVENT_ATTRIBUTES: &[(&str, EventSlot)] = &[
    ("Крайняя дата выполнения:", |e| &mut e.deadline),
    ("Описание мероприятия:", |e| &mut e.description),
    ("Количество уникальных участников:", |e| &mut e.unique_participants),
    ("Количество повторяющихся участников:", |e| &mut e.repeat_participants),
    ("Количество публикаций:", |e| &mut e.publications),
    ("Количество просмотров:", |e| &mut e.views),
    ("Дополнительная информация:", |e| &mut e.notes),
];

enum State {
    Idle,
    InTask(CalendarTask),
}

pub fn extract(lines: &[String]) -> CalendarTab {
    let mut tab = CalendarTab::default();
    let mut state = State::Idle;

    for raw in lines {
        let line = raw.trim();
        if line.starts_with(TAB_HEADER) || line.starts_with(ADD_EVENT) {
            continue;
        }

        if let Some(description) = value_after(line, TASK_LABEL) {
            if let State::InTask(task) = state {
                close_task(&mut tab, task);
            }
            state = State::InTask(CalendarTask {
                description: description.to_string(),
                events: Vec::new(),
            });
            continue;
        }

        let State::InTask(task) = &mut state else {
            continue;
        };

        if let Some(name) = value_after(line, EVENT_LABEL) {
            task.events.push(CalendarEvent {
                name: name.to_string(),
                ..Default::default()
            });
            continue;
        }

        if let Some((value, slot)) = EVENT_ATTRIBUTES
            .iter()
            .find_map(|(label, slot)| value_after(line, label).map(|v| (v, slot)))
        {
            // Attributes before the first event of a task are dropped.
            if let Some(event) = task.events.last_mut() {
                *slot(event) = value.to_string();
            }
        }
    }

    if let State::InTask(task) = state {
        close_task(&mut tab, task);
    }
    tab
}

/// Tasks are only kept when they carry at least one event.
fn close_task(tab: &mut CalendarTab, task: CalendarTask) {
    if !task.events.is_empty() {
        tab.tasks.push(task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn task_with_events_in_order() {
        let tab = extract(&lines(&[
            "Вкладка \"Календарный план\"",
            "Поставленная задача: Провести форум",
            "Добавить мероприятие:",
            "Название мероприятия: Открытие",
            "Крайняя дата выполнения: 01.04.2025",
            "Описание мероприятия: Торжественное открытие",
            "Количество уникальных участников: 100",
            "Количество повторяющихся участников: 20",
            "Количество публикаций: 3",
            "Количество просмотров: 1500",
            "Дополнительная информация: нет",
            "Название мероприятия: Закрытие",
        ]));
        assert_eq!(tab.tasks.len(), 1);
        let task = &tab.tasks[0];
        assert_eq!(task.description, "Провести форум");
        assert_eq!(task.events.len(), 2);
        let first = &task.events[0];
        assert_eq!(first.name, "Открытие");
        assert_eq!(first.deadline, "01.04.2025");
        assert_eq!(first.description, "Торжественное открытие");
        assert_eq!(first.unique_participants, "100");
        assert_eq!(first.repeat_participants, "20");
        assert_eq!(first.publications, "3");
        assert_eq!(first.views, "1500");
        assert_eq!(first.notes, "нет");
        assert_eq!(task.events[1].name, "Закрытие");
        assert_eq!(task.events[1].deadline, "");
    }

    #[test]
    fn task_without_events_is_dropped() {
        let tab = extract(&lines(&[
            "Поставленная задача: Пустая",
            "Поставленная задача: Полная",
            "Название мероприятия: Встреча",
            "Поставленная задача: Тоже пустая",
        ]));
        assert_eq!(tab.tasks.len(), 1);
        assert_eq!(tab.tasks[0].description, "Полная");
    }

    #[test]
    fn attribute_before_any_event_is_dropped() {
        let tab = extract(&lines(&[
            "Поставленная задача: Форум",
            "Крайняя дата выполнения: 01.01.2025",
            "Название мероприятия: Встреча",
        ]));
        assert_eq!(tab.tasks[0].events[0].deadline, "");
    }

    #[test]
    fn events_outside_a_task_are_ignored() {
        let tab = extract(&lines(&[
            "Название мероприятия: Сирота",
            "Крайняя дата выполнения: 01.01.2025",
        ]));
        assert!(tab.tasks.is_empty());
    }

    #[test]
    fn repeated_task_descriptions_stay_separate_here() {
        let tab = extract(&lines(&[
            "Поставленная задача: Форум",
            "Название мероприятия: A",
            "Поставленная задача: Форум",
            "Название мероприятия: B",
        ]));
        assert_eq!(tab.tasks.len(), 2);
    }
}
