use crate::parser::span::value_after;
use crate::record::{Mentor, TeamTab};

const MENTOR_LABEL: &str = "ФИО наставника:";
const EMAIL_LABEL: &str = "E-mail наставника:";
const ROLE_LABEL: &str = "Роль в проекте:";
const RESUME_LABEL: &str = "Добавить резюме:";
const COMPETENCY_LABEL: &str =
    "Компетенции, опыт, подтверждающие возможность участника выполнять роль в команде:";

/// Outcome of reading one line after a mentor header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// Single-line attribute taken; keep reading.
    Attributes,
    /// Competency label; the paragraph below it is collected.
    Competencies,
    /// Blank or unrecognized line.
    Done,
}

pub fn extract(lines: &[String]) -> TeamTab {
    let mut tab = TeamTab::default();

    for (i, raw) in lines.iter().enumerate() {
        if let Some(name) = value_after(raw.trim(), MENTOR_LABEL) {
            let mut mentor = Mentor {
                name: name.to_string(),
                ..Default::default()
            };
            scan_attributes(&lines[i + 1..], &mut mentor);
            tab.block.mentors.push(mentor);
        }
    }

    tab
}

/// Fill `mentor` from the lines following its header.
///
/// After a competency label the paragraph up to the next blank line is
/// collected, then attribute reading resumes on the line right after the
/// label. Attribute lines inside that paragraph therefore count both as
/// competencies and as attributes, and the first paragraph line that is not
/// an attribute ends the scan. An e-mail or role placed after the blank line
/// that closes the paragraph is not picked up. Known quirk of the
/// application format; kept until the form owners decide otherwise.
fn scan_attributes(lines: &[String], mentor: &mut Mentor) {
    for (j, raw) in lines.iter().enumerate() {
        match attribute_step(raw.trim(), mentor) {
            Scan::Attributes => {}
            Scan::Competencies => collect_competencies(&lines[j + 1..], mentor),
            Scan::Done => break,
        }
    }
}

fn collect_competencies(lines: &[String], mentor: &mut Mentor) {
    let paragraph = lines
        .iter()
        .map(|l| l.trim())
        .take_while(|l| !l.is_empty())
        .map(str::to_string);
    mentor.competencies.extend(paragraph);
}

fn attribute_step(line: &str, mentor: &mut Mentor) -> Scan {
    if let Some(v) = value_after(line, EMAIL_LABEL) {
        mentor.email = v.to_string();
    } else if let Some(v) = value_after(line, ROLE_LABEL) {
        mentor.role = v.to_string();
    } else if let Some(v) = value_after(line, RESUME_LABEL) {
        mentor.resume = v.to_string();
    } else if let Some(v) = value_after(line, COMPETENCY_LABEL) {
        if !v.is_empty() {
            mentor.competencies.push(v.to_string());
        }
        return Scan::Competencies;
    } else {
        return Scan::Done;
    }
    Scan::Attributes
}
