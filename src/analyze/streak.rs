use crate::analyze::{HighestCommitDay, Streaks};
use crate::model::{ContributionDay, Week};
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn all_days(weeks: &[Week]) -> impl DoubleEndedIterator<Item = &ContributionDay> {
    weeks.iter().flat_map(|week| week.contribution_days.iter())
}

/// Current and longest runs of consecutive days with contributions.
///
/// The current streak is counted backwards from `today`. Days after `today` are
/// ignored, and zero days are skipped until the first active day is found.
pub fn calculate_streaks(weeks: &[Week], today: NaiveDate) -> Streaks {
    let mut current = 0;
    for day in all_days(weeks).rev() {
        if day.date > today {
            continue;
        }
        if day.contribution_count > 0 {
            current += 1;
        } else if current > 0 {
            break;
        }
    }

    let (longest, _) = all_days(weeks).fold((0, 0), |(longest, run), day| {
        if day.contribution_count > 0 {
            (longest.max(run + 1), run + 1)
        } else {
            (longest, 0)
        }
    });

    Streaks { current, longest }
}

/// The busiest single day; the first one wins a tie. Without any days, today with no contributions.
pub fn calculate_highest_commit_day(weeks: &[Week], today: NaiveDate) -> HighestCommitDay {
    let highest = all_days(weeks).fold(None::<&ContributionDay>, |best, day| match best {
        Some(best) if best.contribution_count >= day.contribution_count => Some(best),
        _ => Some(day),
    });

    match highest {
        Some(day) => HighestCommitDay {
            date: day.date.format(DATE_FORMAT).to_string(),
            count: day.contribution_count,
        },
        None => HighestCommitDay {
            date: today.format(DATE_FORMAT).to_string(),
            count: 0,
        },
    }
}
