//! Output record: the fixed nested schema filled by one extraction run.
//!
//! Key names and nesting are the wire contract shared with the storage layer
//! and the review front end, so every struct renames its fields to the exact
//! labels used there. Serialized key order follows declaration order.

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};

/// Placeholder for result metrics that were not found in the document.
pub const NO_DATA: &str = "Нет данных";

/// Leaf filled by span extraction: `""` until a span is found, then the span lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field {
    Text(String),
    Lines(Vec<String>),
}

impl Field {
    fn placeholder() -> Self {
        Field::Text(NO_DATA.to_string())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Field::Text(t) => t.is_empty(),
            Field::Lines(l) => l.is_empty(),
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Field::Text(String::new())
    }
}

impl From<Vec<String>> for Field {
    fn from(lines: Vec<String>) -> Self {
        Field::Lines(lines)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(rename = "ФИО")]
    pub full_name: String,
    #[serde(rename = "Название проекта")]
    pub title: String,
    #[serde(rename = "Регион проекта")]
    pub region: String,
    #[serde(rename = "Логотип проекта")]
    pub logo: String,
    #[serde(rename = "Контакты")]
    pub contacts: Contacts,
    #[serde(rename = "Вкладка Общее")]
    pub general: GeneralTab,
    #[serde(rename = "Вкладка О проекте")]
    pub about: AboutTab,
    #[serde(rename = "Вкладка Команда")]
    pub team: TeamTab,
    #[serde(rename = "Вкладка Результаты")]
    pub results: ResultsTab,
    #[serde(rename = "Вкладка Календарный план")]
    pub calendar: CalendarTab,
    #[serde(rename = "Вкладка Расходы")]
    pub expenses: ExpensesTab,
    #[serde(rename = "Вкладка Медиа")]
    pub media: MediaTab,
    #[serde(rename = "Вкладка Софинансирование")]
    pub cofinancing: CofinancingTab,
    #[serde(rename = "Вкладка Доп. Файлы")]
    pub files: FilesTab,
}

/// Sub-keys are absent, not empty, when the contact line lacks them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contacts {
    #[serde(rename = "Телефон", skip_serializing_if = "Option::is_none", default)]
    pub phone: Option<String>,
    #[serde(rename = "Email", skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralTab {
    #[serde(rename = "Блок Общая информация")]
    pub info: GeneralInfo,
    #[serde(rename = "Блок Дополнительная информация об авторе проекта")]
    pub author: AuthorInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralInfo {
    #[serde(rename = "Масштаб реализации проекта")]
    pub scale: Field,
    #[serde(rename = "Дата начала и окончания проекта")]
    pub dates: Field,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorInfo {
    #[serde(rename = "Опыт автора проекта")]
    pub experience: Field,
    #[serde(rename = "Описание функционала автора проекта")]
    pub duties: Field,
    #[serde(rename = "Адрес регистрации автора проекта")]
    pub address: Field,
    #[serde(rename = "Добавить резюме")]
    pub resume: Field,
    #[serde(rename = "Видео-визитка")]
    pub video: Field,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutTab {
    #[serde(rename = "Блок Информация о проекте")]
    pub info: ProjectInfo,
    #[serde(rename = "Блок Задачи")]
    pub tasks: Vec<String>,
    #[serde(rename = "Блок География проекта")]
    pub geography: Vec<GeographyEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    #[serde(rename = "Краткая информация о проекте")]
    pub summary: Field,
    #[serde(rename = "Описание проблемы")]
    pub problem: Field,
    #[serde(rename = "Основные целевые группы")]
    pub target_groups: Field,
    #[serde(rename = "Основная цель проекта")]
    pub goal: Field,
    #[serde(rename = "Опыт успешной реализации проекта")]
    pub track_record: Field,
    #[serde(rename = "Перспектива развития и потенциал проекта")]
    pub outlook: Field,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeographyEntry {
    #[serde(rename = "Регион")]
    pub region: String,
    #[serde(rename = "Адрес")]
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTab {
    #[serde(rename = "Блок Команда")]
    pub block: TeamBlock,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamBlock {
    #[serde(rename = "Наставники")]
    pub mentors: Vec<Mentor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mentor {
    #[serde(rename = "ФИО")]
    pub name: String,
    #[serde(rename = "E-mail")]
    pub email: String,
    #[serde(rename = "Роль в проекте")]
    pub role: String,
    #[serde(rename = "Добавить резюме")]
    pub resume: String,
    #[serde(rename = "Компетенции")]
    pub competencies: Vec<String>,
}

/// The review front end reads metrics one level down, under a key repeating the tab name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsTab {
    #[serde(rename = "Вкладка Результаты")]
    pub metrics: ResultMetrics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultMetrics {
    #[serde(rename = "Дата плановых значений результатов")]
    pub planned_values_date: String,
    #[serde(rename = "Плановое количество мероприятий")]
    pub events: String,
    #[serde(rename = "Крайняя дата проведения мероприятий")]
    pub events_deadline: String,
    #[serde(rename = "Плановое количество участников мероприятий")]
    pub participants: String,
    #[serde(rename = "Плановое количество публикаций")]
    pub publications: String,
    #[serde(rename = "Плановое количество просмотров публикаций")]
    pub views: String,
    #[serde(rename = "Социальный эффект")]
    pub social_effect: Field,
}

impl ResultMetrics {
    /// Positional slots filled by the numeric scraper, in source order.
    pub fn slots_mut(&mut self) -> [&mut String; 6] {
        [
            &mut self.planned_values_date,
            &mut self.events,
            &mut self.events_deadline,
            &mut self.participants,
            &mut self.publications,
            &mut self.views,
        ]
    }
}

impl Default for ResultMetrics {
    fn default() -> Self {
        ResultMetrics {
            planned_values_date: NO_DATA.to_string(),
            events: NO_DATA.to_string(),
            events_deadline: NO_DATA.to_string(),
            participants: NO_DATA.to_string(),
            publications: NO_DATA.to_string(),
            views: NO_DATA.to_string(),
            social_effect: Field::placeholder(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarTab {
    #[serde(rename = "Блок Задачи")]
    pub tasks: Vec<CalendarTask>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarTask {
    #[serde(rename = "Поставленная задача")]
    pub description: String,
    #[serde(rename = "Мероприятия")]
    pub events: Vec<CalendarEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(rename = "Название")]
    pub name: String,
    #[serde(rename = "Крайняя дата")]
    pub deadline: String,
    #[serde(rename = "Описание")]
    pub description: String,
    #[serde(rename = "Количество уникальных участников")]
    pub unique_participants: String,
    #[serde(rename = "Количество повторяющихся участников")]
    pub repeat_participants: String,
    #[serde(rename = "Количество публикаций")]
    pub publications: String,
    #[serde(rename = "Количество просмотров")]
    pub views: String,
    #[serde(rename = "Дополнительная информация")]
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpensesTab {
    #[serde(rename = "Общая сумма расходов:")]
    pub total: String,
    #[serde(rename = "Категории")]
    pub categories: Vec<ExpenseCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    #[serde(rename = "Название")]
    pub name: String,
    #[serde(rename = "Тип")]
    pub kind: String,
    #[serde(rename = "Записи")]
    pub records: Vec<ExpenseRecord>,
}

/// All values are copied verbatim; nothing is parsed as a number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    #[serde(rename = "Идентификатор")]
    pub id: String,
    #[serde(rename = "Заголовок")]
    pub title: String,
    #[serde(rename = "Описание")]
    pub description: String,
    #[serde(rename = "Количество")]
    pub quantity: String,
    #[serde(rename = "Цена")]
    pub price: String,
    #[serde(rename = "Сумма")]
    pub total: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaTab {
    #[serde(rename = "Ресурсы")]
    pub resources: Vec<MediaResource>,
    #[serde(rename = "Файл с подробным медиа-планом")]
    pub plan_file: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaResource {
    #[serde(rename = "Вид ресурса")]
    pub kind: String,
    #[serde(rename = "Месяц публикации")]
    pub month: String,
    #[serde(rename = "Планируемое количество просмотров")]
    pub planned_views: String,
    #[serde(rename = "Ссылки на ресурсы")]
    pub links: String,
    #[serde(rename = "Почему выбран такой формат медиа")]
    pub rationale: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CofinancingTab {
    #[serde(rename = "Блок Собственные средства")]
    pub own_funds: OwnFunds,
    #[serde(rename = "Блок Партнер")]
    pub partners: Vec<Partner>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnFunds {
    #[serde(rename = "Перечень расходов")]
    pub expenses: Vec<String>,
    #[serde(rename = "Сумма расходов")]
    pub total: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    #[serde(rename = "Название партнера")]
    pub name: String,
    #[serde(rename = "Тип поддержки")]
    pub support_type: String,
    #[serde(rename = "Перечень расходов")]
    pub expenses: String,
    #[serde(rename = "Сумма, руб.")]
    pub amount: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesTab {
    #[serde(rename = "Файлы")]
    pub files: Vec<AdditionalFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalFile {
    #[serde(rename = "Описание файла")]
    pub description: String,
    #[serde(rename = "ID файла")]
    pub id: String,
    /// Empty after extraction; set later through [`ProjectRecord::attach_file_links`].
    #[serde(rename = "Ссылка на файл:")]
    pub link: String,
}

impl ProjectRecord {
    /// Fresh, fully-shaped record with every leaf at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the link of each additional file named in `ids`, pairwise with `links`.
    ///
    /// Every id is checked before anything is written, so a failed call leaves
    /// the record untouched.
    pub fn attach_file_links(&mut self, ids: &[String], links: &[String]) -> Result<()> {
        if ids.len() != links.len() {
            return Err(ExtractError::LinkCountMismatch {
                ids: ids.len(),
                links: links.len(),
            });
        }
        if let Some(missing) = ids
            .iter()
            .find(|id| !self.files.files.iter().any(|f| &f.id == *id))
        {
            return Err(ExtractError::UnknownFileId(missing.clone()));
        }

        for (id, link) in ids.iter().zip(links) {
            if let Some(file) = self.files.files.iter_mut().find(|f| &f.id == id) {
                file.link = link.clone();
            }
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn with_files(ids: &[&str]) -> ProjectRecord {
        let mut record = ProjectRecord::new();
        record.files.files = ids
            .iter()
            .map(|id| AdditionalFile {
                description: format!("файл {}", id),
                id: id.to_string(),
                link: String::new(),
            })
            .collect();
        record
    }

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn fresh_records_are_independent() {
        let mut a = ProjectRecord::new();
        a.about.tasks.push("Задача".into());
        let b = ProjectRecord::new();
        assert!(b.about.tasks.is_empty());
    }

    #[test]
    fn top_level_keys_in_wire_order() {
        let json = serde_json::to_string(&ProjectRecord::new()).unwrap();
        let keys = [
            "\"ФИО\"",
            "\"Название проекта\"",
            "\"Регион проекта\"",
            "\"Логотип проекта\"",
            "\"Контакты\"",
            "\"Вкладка Общее\"",
            "\"Вкладка О проекте\"",
            "\"Вкладка Команда\"",
            "\"Вкладка Результаты\"",
            "\"Вкладка Календарный план\"",
            "\"Вкладка Расходы\"",
            "\"Вкладка Медиа\"",
            "\"Вкладка Софинансирование\"",
            "\"Вкладка Доп. Файлы\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn default_leaves() {
        let v: Value = serde_json::to_value(ProjectRecord::new()).unwrap();
        assert_eq!(v["Контакты"], serde_json::json!({}));
        assert_eq!(
            v["Вкладка Общее"]["Блок Общая информация"]["Масштаб реализации проекта"],
            ""
        );
        let metrics = &v["Вкладка Результаты"]["Вкладка Результаты"];
        assert_eq!(metrics["Плановое количество мероприятий"], NO_DATA);
        assert_eq!(metrics["Социальный эффект"], NO_DATA);
        assert_eq!(v["Вкладка Доп. Файлы"]["Файлы"], serde_json::json!([]));
        assert_eq!(v["Вкладка Расходы"]["Общая сумма расходов:"], "");
    }

    #[test]
    fn field_serializes_as_string_or_list() {
        assert_eq!(serde_json::to_string(&Field::default()).unwrap(), "\"\"");
        let lines = Field::from(strings(&["a", "b"]));
        assert_eq!(serde_json::to_string(&lines).unwrap(), "[\"a\",\"b\"]");
    }

    #[test]
    fn json_survives_a_reload() {
        let mut record = with_files(&["42"]);
        record.general.info.scale = Field::from(strings(&["Региональный"]));
        record.contacts.phone = Some("+7 900".into());
        let reloaded = ProjectRecord::from_json(&record.to_json_pretty().unwrap()).unwrap();
        assert_eq!(reloaded, record);
    }

    #[test]
    fn attach_links_by_id() {
        let mut record = with_files(&["a1", "b2"]);
        record
            .attach_file_links(&strings(&["b2"]), &strings(&["https://disk/b2"]))
            .unwrap();
        assert_eq!(record.files.files[0].link, "");
        assert_eq!(record.files.files[1].link, "https://disk/b2");
    }

    #[test]
    fn attach_links_length_mismatch() {
        let mut record = with_files(&["a1"]);
        let err = record
            .attach_file_links(&strings(&["a1"]), &[])
            .unwrap_err();
        assert!(matches!(err, ExtractError::LinkCountMismatch { ids: 1, links: 0 }));
    }

    #[test]
    fn attach_links_unknown_id_leaves_record_untouched() {
        let mut record = with_files(&["a1"]);
        let err = record
            .attach_file_links(&strings(&["a1", "zz"]), &strings(&["x", "y"]))
            .unwrap_err();
        assert!(matches!(err, ExtractError::UnknownFileId(id) if id == "zz"));
        assert_eq!(record.files.files[0].link, "");
    }
}
