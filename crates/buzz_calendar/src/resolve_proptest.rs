#[cfg(test)]
mod tests {
    use crate::resolve::QueryResolver;
    use buzz_config::VenueConfig;
    use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
    use proptest::prelude::*;

    const WEEKDAY_TOKENS: &[(&str, Weekday)] = &[
        ("monday", Weekday::Mon),
        ("tue", Weekday::Tue),
        ("水曜日", Weekday::Wed),
        ("thursday", Weekday::Thu),
        ("金", Weekday::Fri),
        ("sat", Weekday::Sat),
        ("日曜", Weekday::Sun),
    ];

    fn resolver() -> QueryResolver {
        QueryResolver::new(&VenueConfig::default())
    }

    // Any moment between 2000-01-01 and roughly 2060
    fn arb_now() -> impl Strategy<Value = NaiveDateTime> {
        (0i64..22_000, 0u32..86_400).prop_map(|(days, secs)| {
            let base = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(days);
            base.and_time(NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap())
        })
    }

    proptest! {
        #[test]
        fn test_weekday_is_strictly_after_today_and_within_a_week(
            now in arb_now(),
            index in 0usize..7,
        ) {
            let (token, weekday) = WEEKDAY_TOKENS[index];
            let resolved = resolver().resolve_date(token, now).unwrap();
            let today = now.date();

            prop_assert!(resolved > today, "{} resolved to {} from {}", token, resolved, now);
            prop_assert!(resolved <= today + Duration::days(7));
            prop_assert_eq!(resolved.weekday(), weekday);
            if today.weekday() == weekday {
                prop_assert_eq!(resolved, today + Duration::days(7));
            }
        }

        #[test]
        fn test_today_is_now_truncated(now in arb_now()) {
            prop_assert_eq!(resolver().resolve_date("today", now).unwrap(), now.date());
        }

        #[test]
        fn test_studio_range_length(start in 1u32..50, len in 0u32..50) {
            let end = start + len;
            let studios = resolver().resolve_studios(&format!("{}-{}", start, end));
            prop_assert_eq!(studios.len() as u32, len + 1);
            prop_assert_eq!(studios[0].to_string(), format!("{}st", start));
        }

        #[test]
        fn test_descending_studio_range_is_empty(end in 0u32..50, gap in 1u32..50) {
            let studios = resolver().resolve_studios(&format!("{}-{}", end + gap, end));
            prop_assert!(studios.is_empty());
        }

        #[test]
        fn test_oversized_studio_range_is_empty(start in 0u32..1000, extra in 1000u32..u32::MAX / 2) {
            let end = start + extra;
            let studios = resolver().resolve_studios(&format!("{}-{}", start, end));
            prop_assert!(studios.is_empty());
        }

        #[test]
        fn test_half_hour_range_length(start_half in 0u32..48, len in 0u32..48) {
            let end_half = (start_half + len).min(47);
            let fmt = |half: u32| format!("{}:{:02}", half / 2, (half % 2) * 30);
            let slots = resolver().resolve_time_slots(&format!("{}-{}", fmt(start_half), fmt(end_half)));

            prop_assert_eq!(slots.len() as u32, end_half - start_half + 1);
            for pair in slots.windows(2) {
                let a = pair[0].as_time().unwrap();
                let b = pair[1].as_time().unwrap();
                prop_assert_eq!(b - a, Duration::minutes(30));
            }
        }
    }
}
