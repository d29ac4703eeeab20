use tracing::{debug, warn};

use crate::models::{AvailabilityGrid, QueryResult, ResultStatus, StudioId, StudioResult, TimeSlot};

/// Looks up every requested (studio, slot) pair in `grid`.
///
/// Studios the grid does not have are left out of the result and listed in
/// [`QueryResult::missing_studios`]. Slots a studio does not have are
/// answered with [`ResultStatus::NotFound`]. `slots` is used as given: pass
/// `grid.slots()` to ask for every slot on the page.
pub fn query_availability(
    grid: &AvailabilityGrid,
    studios: &[StudioId],
    slots: &[TimeSlot],
) -> QueryResult {
    let mut result = QueryResult::default();

    for studio in studios {
        if result.contains_studio(studio.as_str()) || result.missing_studios.contains(studio) {
            continue;
        }
        let Some(column) = grid.studio(studio.as_str()) else {
            warn!("Studio {} is not on the calendar page", studio);
            result.missing_studios.push(studio.clone());
            continue;
        };

        let mut answers: Vec<(TimeSlot, ResultStatus)> = Vec::with_capacity(slots.len());
        for slot in slots {
            if answers.iter().any(|(seen, _)| seen == slot) {
                continue;
            }
            let status = column
                .get(slot.as_str())
                .map_or(ResultStatus::NotFound, |status| ResultStatus::from(*status));
            answers.push((slot.clone(), status));
        }
        result.studios.push(StudioResult {
            studio: studio.clone(),
            slots: answers,
        });
    }

    debug!(
        "Answered {} studios ({} missing) for {} slots",
        result.studios.len(),
        result.missing_studios.len(),
        slots.len()
    );
    result
}
