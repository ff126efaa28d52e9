use chrono::NaiveDate;

/// Overrides "today" for the current thread while `f` runs.
///
/// The empty-timeline fallback window and the "current period" highlight both depend on the
/// local date, which makes snapshots drift from day to day. Inside the closure, `today()`
/// returns the fixed date instead. `None` uses the system local date.
pub fn with_fixed_today<R>(today: Option<NaiveDate>, f: impl FnOnce() -> R) -> R {
    crate::runtime::with_fixed_today(today, f)
}

/// The local calendar date, honoring [`with_fixed_today`].
pub fn today() -> NaiveDate {
    crate::runtime::today_naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_today_is_scoped_to_the_closure() {
        let fixed = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let inside = with_fixed_today(Some(fixed), today);
        assert_eq!(inside, fixed);

        let nested = with_fixed_today(Some(fixed), || {
            with_fixed_today(Some(fixed.succ_opt().unwrap()), today)
        });
        assert_eq!(nested, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        assert_ne!(today(), NaiveDate::MIN);
    }
}
