use std::sync::LazyLock;

use regex::Regex;

use super::tab_text;
use crate::record::{AdditionalFile, FilesTab};

static FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)Описание файла:\s*(.+?)\nВыберете файл:\s*(\S+)").unwrap());

const TAB_HEADER: &str = "Вкладка \"Доп. Файлы\"";

/// Each (description, id) pair becomes a file with an empty link.
pub fn extract(lines: &[String]) -> FilesTab {
    let text = tab_text(lines, TAB_HEADER, None);
    let files = FILE_RE
        .captures_iter(&text)
        .map(|caps| AdditionalFile {
            description: caps[1].trim().to_string(),
            id: caps[2].trim().to_string(),
            link: String::new(),
        })
        .collect();
    FilesTab { files }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn description_and_id_pairs() {
        let tab = extract(&lines(&[
            "Вкладка \"Доп. Файлы\"",
            "Описание файла: Письмо поддержки",
            "Выберете файл: 1a2b3c",
            "Описание файла: Смета",
            "подробная",
            "Выберете файл: 4d5e6f.pdf",
        ]));
        assert_eq!(tab.files.len(), 2);
        assert_eq!(tab.files[0].description, "Письмо поддержки");
        assert_eq!(tab.files[0].id, "1a2b3c");
        assert_eq!(tab.files[0].link, "");
        assert_eq!(tab.files[1].description, "Смета\nподробная");
        assert_eq!(tab.files[1].id, "4d5e6f.pdf");
    }

    #[test]
    fn description_without_id_yields_nothing() {
        let tab = extract(&lines(&["Описание файла: Письмо"]));
        assert!(tab.files.is_empty());
    }
}
