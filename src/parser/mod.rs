pub mod extract;
pub mod scalars;
pub mod span;

use tracing::debug;

use crate::error::Result;
use crate::record::ProjectRecord;
use crate::source::LineSource;
use extract::guarded;

/// Scalar pass, then every group parser over its own sub-span, merged by key.
///
/// Never fails: absent markers and malformed groups leave defaults behind.
pub fn extract_record(lines: &[String]) -> ProjectRecord {
    let mut record = ProjectRecord::new();
    scalars::scan(lines, &mut record);

    record.results = guarded("results", || extract::results::extract(lines));
    record.calendar = guarded("calendar", || extract::calendar::extract(lines));
    record.media = guarded("media", || extract::media::extract(lines));
    record.expenses = guarded("expenses", || extract::expenses::extract(lines));
    record.cofinancing = guarded("cofinancing", || extract::cofinancing::extract(lines));
    record.files = guarded("files", || extract::files::extract(lines));
    record.team = guarded("team", || extract::team::extract(lines));

    debug!(
        lines = lines.len(),
        mentors = record.team.block.mentors.len(),
        categories = record.expenses.categories.len(),
        tasks = record.calendar.tasks.len(),
        files = record.files.files.len(),
        "record assembled"
    );
    record
}

/// Read the source and extract. Only reading the source can fail.
pub fn extract_from<S: LineSource + ?Sized>(source: &S) -> Result<ProjectRecord> {
    let lines = source.read_lines()?;
    Ok(extract_record(&lines))
}
