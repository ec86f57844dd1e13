use crate::contract::ExerciseRecord;

/// Names of the records whose lower-cased `target` appears verbatim in `muscle_groups`.
///
/// Only the catalog side is lower-cased; callers are expected to supply
/// normalized muscle group names.
pub fn select_exercise_names(records: &[ExerciseRecord], muscle_groups: &[String]) -> Vec<String> {
    records
        .iter()
        .filter(|record| {
            let target = record.target.to_lowercase();
            muscle_groups.iter().any(|group| *group == target)
        })
        .map(|record| record.name.clone())
        .collect()
}

/// Fetch each body area in order and accumulate the selected exercise names.
///
/// Duplicates are kept. The first fetch error aborts the walk.
pub fn collect_exercise_names<E>(
    body_areas: &[String],
    muscle_groups: &[String],
    mut fetch_body_part: impl FnMut(&str) -> Result<Vec<ExerciseRecord>, E>,
) -> Result<Vec<String>, E> {
    let mut names = Vec::new();
    for area in body_areas {
        let records = fetch_body_part(area)?;
        names.extend(select_exercise_names(&records, muscle_groups));
    }
    Ok(names)
}
