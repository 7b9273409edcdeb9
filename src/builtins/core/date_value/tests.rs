use super::*;
use crate::error::ErrorKind;
use crate::YearWeek;
use alloc::{string::ToString, vec::Vec};
use writeable::assert_writeable_eq;

fn date(year: i32, month: u8, day: u8) -> DateValue {
    let partial = PartialDateTime::new()
        .with_year(Some(year))
        .with_month(Some(month))
        .with_day(Some(day));
    DateValue::from_fields(partial, DateOptions::default()).unwrap()
}

fn date_strings(range: DateRange) -> Vec<String> {
    range.map(|value| value.to_date_string()).collect()
}

#[test]
fn fields_round_trip() {
    let partial = PartialDateTime::new()
        .with_year(Some(2018))
        .with_month(Some(3))
        .with_day(Some(18))
        .with_hour(Some(7))
        .with_minute(Some(8))
        .with_second(Some(9))
        .with_sub_second(Some(123_456))
        .with_offset_minutes(Some(60));
    let value = DateValue::from_fields(partial, DateOptions::default()).unwrap();

    assert_eq!(value.year(), 2018);
    assert_eq!(value.month(), 3);
    assert_eq!(value.day(), 18);
    assert_eq!(value.hour(), 7);
    assert_eq!(value.minute(), 8);
    assert_eq!(value.second(), 9);
    assert_eq!(value.sub_second(), 123_456);
    assert_eq!(value.offset_minutes(), 60);
    assert_eq!(value.to_string(), "2018-03-18 07:08:09.123456+01:00");
}

#[test]
fn omitted_fields_default_to_noon_utc() {
    let value = date(2018, 3, 18);
    assert_eq!(value.to_string(), "2018-03-18 12:00:00.000000+00:00");
    // 2018-03-18T12:00:00Z
    assert_eq!(value.epoch_milliseconds().unwrap(), 1_521_374_400_000);
}

#[test]
fn field_validation() {
    let partial = PartialDateTime::new()
        .with_year(Some(2018))
        .with_month(Some(13))
        .with_day(Some(1));
    let err = DateValue::from_fields(partial, DateOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    let violation = err.violation().unwrap();
    assert_eq!(violation.field, Field::Month);
    assert_eq!(violation.value, Some(13));
    assert_eq!((violation.min, violation.max), (1, 12));

    let partial = PartialDateTime::new()
        .with_year(Some(2101))
        .with_month(Some(1))
        .with_day(Some(1));
    let err = DateValue::from_fields(partial, DateOptions::default()).unwrap_err();
    assert_eq!(err.violation().unwrap().field, Field::Year);

    let partial = PartialDateTime::new()
        .with_year(Some(2018))
        .with_month(Some(2))
        .with_day(Some(29));
    let err = DateValue::from_fields(partial, DateOptions::default()).unwrap_err();
    let violation = err.violation().unwrap();
    assert_eq!(violation.field, Field::Day);
    assert_eq!(violation.max, 28);

    let partial = PartialDateTime::new()
        .with_year(Some(2018))
        .with_month(Some(2))
        .with_day(Some(1))
        .with_hour(Some(24));
    let err = DateValue::from_fields(partial, DateOptions::default()).unwrap_err();
    assert_eq!(err.violation().unwrap().field, Field::Hour);

    let partial = PartialDateTime::new()
        .with_year(Some(2018))
        .with_month(Some(2))
        .with_day(Some(1))
        .with_sub_second(Some(1_000_000));
    let err = DateValue::from_fields(partial, DateOptions::default()).unwrap_err();
    let violation = err.violation().unwrap();
    assert_eq!(violation.field, Field::SubSecond);
    assert_eq!(violation.max, 999_999);

    let partial = PartialDateTime::new()
        .with_year(Some(2018))
        .with_month(Some(2))
        .with_day(Some(1))
        .with_offset_minutes(Some(90));
    let err = DateValue::from_fields(partial, DateOptions::default()).unwrap_err();
    assert_eq!(err.violation().unwrap().field, Field::OffsetMinutes);
}

#[test]
fn missing_required_field() {
    let partial = PartialDateTime::new()
        .with_year(Some(2018))
        .with_month(Some(3));
    let err = DateValue::from_fields(partial, DateOptions::default()).unwrap_err();
    let violation = err.violation().unwrap();
    assert_eq!(violation.field, Field::Day);
    assert_eq!(violation.value, None);
    assert!(PartialDateTime::new().is_empty());
}

#[test]
fn invalid_precision_is_rejected() {
    let options = DateOptions::default().with_sub_second_precision(10);
    let partial = PartialDateTime::new()
        .with_year(Some(2018))
        .with_month(Some(3))
        .with_day(Some(18));
    let err = DateValue::from_fields(partial, options).unwrap_err();
    assert_eq!(err.violation().unwrap().field, Field::SubSecondPrecision);
    assert!(DateValue::from_epoch_milliseconds(0, options).is_err());
}

#[test]
fn month_clamp() {
    let value = date(2018, 3, 31).advance("-1 month").unwrap();
    assert_eq!((value.year(), value.month(), value.day()), (2018, 2, 28));
    assert_eq!(value.to_time_string(), "12:00:00");
    assert_eq!(value.to_date_string(), value.render("%Y-%m-%d").unwrap());
    assert_eq!(value.to_time_string(), value.render("%H:%i:%s").unwrap());
}

#[test]
fn leap_clamp() {
    let value = date(2018, 3, 31)
        .advance("-2 years")
        .unwrap()
        .advance("-1 month")
        .unwrap();
    assert_eq!(value.to_date_string(), "2016-02-29");
}

#[test]
fn month_arithmetic_rolls_years() {
    let value = date(2018, 1, 31);
    assert_eq!(value.advance("13 months").unwrap().to_date_string(), "2019-02-28");
    assert_eq!(value.advance("-13 months").unwrap().to_date_string(), "2016-12-31");
    assert_eq!(value.advance("+12 months").unwrap().to_date_string(), "2019-01-31");
    assert_eq!(value.advance("0 months").unwrap(), value);
}

#[test]
fn non_linear_keeps_time_and_offset() {
    let partial = PartialDateTime::new()
        .with_year(Some(2018))
        .with_month(Some(1))
        .with_day(Some(31))
        .with_hour(Some(23))
        .with_minute(Some(45))
        .with_sub_second(Some(5))
        .with_offset_minutes(Some(-300));
    let value = DateValue::from_fields(partial, DateOptions::default()).unwrap();
    let next = value.advance("1 month").unwrap();
    assert_eq!(next.to_string(), "2018-02-28 23:45:00.000005-05:00");
}

#[test]
fn linear_arithmetic() {
    let value = date(2018, 3, 18);
    assert_eq!(value.advance("3 weeks").unwrap().to_date_string(), "2018-04-08");
    assert_eq!(value.advance("-18 days").unwrap().to_date_string(), "2018-02-28");
    assert_eq!(
        value.advance("13 hours").unwrap().to_string(),
        "2018-03-19 01:00:00.000000+00:00"
    );
    assert_eq!(value.advance("-30 mins").unwrap().to_time_string(), "11:30:00");
    assert_eq!(value.advance("90 seconds").unwrap().to_time_string(), "12:01:30");
    assert_eq!(value.advance("1 sec").unwrap().to_time_string(), "12:00:01");

    let week = value.advance_by(1, Unit::Week).unwrap();
    assert_eq!(
        week.epoch_milliseconds().unwrap() - value.epoch_milliseconds().unwrap(),
        crate::MS_PER_WEEK
    );
}

#[test]
fn advance_errors() {
    let value = date(2018, 3, 18);
    for command in ["3", "three days", "3 fortnights", "1 day extra", ""] {
        let err = value.advance(command).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax, "{command}");
    }

    let err = value.advance_by(i64::MAX, Unit::Week).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
    let err = value.advance_by(i64::MAX, Unit::Year).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);

    let err = date(2100, 12, 1).advance("1 month").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.violation().unwrap().field, Field::Year);
}

#[test]
fn advance_command_parsing() {
    let command = "  -2   weeks ".parse::<AdvanceCommand>().unwrap();
    assert_eq!(command, AdvanceCommand::new(-2, Unit::Week));
    assert_eq!(command.to_string(), "-2 week");
    assert_eq!(
        "+4 min".parse::<AdvanceCommand>().unwrap(),
        AdvanceCommand::new(4, Unit::Minute)
    );
}

#[test]
fn week_boundaries() {
    let value = date(2018, 3, 18);
    assert_eq!(value.week_first_date().unwrap().to_date_string(), "2018-03-18");
    assert_eq!(value.week_last_date().unwrap().to_date_string(), "2018-03-24");

    let wednesday = date(2018, 6, 20);
    assert_eq!(wednesday.weekday(), Weekday::Wednesday);
    assert_eq!(wednesday.week_first_date().unwrap().to_date_string(), "2018-06-17");
    assert_eq!(wednesday.week_last_date().unwrap().to_date_string(), "2018-06-23");

    let monday_start = value.with_week_start(Weekday::Monday);
    assert_eq!(
        monday_start.week_first_date().unwrap().to_date_string(),
        "2018-03-12"
    );
    assert_eq!(
        monday_start.week_last_date().unwrap().to_date_string(),
        "2018-03-18"
    );
}

#[test]
fn week_spans_year_boundary() {
    let value = date(2018, 1, 2);
    assert_eq!(value.week_first_date().unwrap().to_date_string(), "2017-12-31");
    assert_eq!(value.week_last_date().unwrap().to_date_string(), "2018-01-06");
}

#[test]
fn month_boundaries() {
    let partial = PartialDateTime::new()
        .with_year(Some(2018))
        .with_month(Some(2))
        .with_day(Some(14))
        .with_hour(Some(10))
        .with_minute(Some(30));
    let value = DateValue::from_fields(partial, DateOptions::default()).unwrap();
    let first = value.month_first_date().unwrap();
    let last = value.month_last_date().unwrap();
    assert_eq!(first.to_string(), "2018-02-01 12:00:00.000000+00:00");
    assert_eq!(last.to_string(), "2018-02-28 12:00:00.000000+00:00");

    // The receiver's time and offset are not carried over.
    let partial = PartialDateTime::new()
        .with_year(Some(2018))
        .with_month(Some(2))
        .with_day(Some(14))
        .with_hour(Some(23))
        .with_offset_minutes(Some(-300));
    let value = DateValue::from_fields(partial, DateOptions::default()).unwrap();
    assert_eq!(value.month_first_date().unwrap(), date(2018, 2, 1));
    assert_eq!(value.month_last_date().unwrap(), date(2018, 2, 28));

    let options = DateOptions::default().with_week_start(Weekday::Monday);
    let value = date(2018, 2, 14).with_options(options).unwrap();
    assert_eq!(value.month_first_date().unwrap().options(), options);

    assert_eq!(date(2016, 2, 3).month_last_date().unwrap().day(), 29);
    assert_eq!(date(2018, 12, 3).month_last_date().unwrap().day(), 31);
}

#[test]
fn week_numbers() {
    let value = date(2018, 3, 18);
    assert_eq!(value.week_number(), 11);
    assert_eq!(value.with_week_start(Weekday::Monday).week_number(), 12);
    assert_eq!(date(2018, 6, 20).week_number(), 25);
    assert_eq!(date(2018, 1, 1).week_number(), 1);
}

#[test]
fn sunday_january_first_with_sunday_start() {
    // 2017-01-01 is a Sunday.
    let value = date(2017, 1, 1);
    assert_eq!(value.weekday(), Weekday::Sunday);
    assert_eq!(value.week_number(), 0);
    assert_eq!(value.with_week_start(Weekday::Monday).week_number(), 1);
    assert_eq!(date(2017, 1, 8).week_number(), 1);
}

#[test]
fn leap_years() {
    assert!(is_leap_year(2016));
    assert!(!is_leap_year(2018));
    // Known deviation: the century rule is not applied.
    assert!(is_leap_year(1900));
    assert!(is_leap_year(2100));

    assert!(date(2016, 5, 1).in_leap_year());
    assert!(!date(2018, 5, 1).in_leap_year());
}

#[test]
fn month_lengths() {
    assert_eq!(month_length(2018, 2).unwrap(), 28);
    assert_eq!(month_length(2016, 2).unwrap(), 29);
    assert_eq!(month_length(1900, 2).unwrap(), 29);
    assert_eq!(month_length(2018, 4).unwrap(), 30);
    assert_eq!(month_length(2018, 12).unwrap(), 31);
    assert_eq!(date(2018, 9, 1).days_in_month(), 30);

    let err = month_length(2018, 13).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn century_leap_day_is_rejected() {
    for year in [1900, 2100] {
        let partial = PartialDateTime::new()
            .with_year(Some(year))
            .with_month(Some(2))
            .with_day(Some(29));
        let err = DateValue::from_fields(partial, DateOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        let violation = err.violation().unwrap();
        assert_eq!(violation.field, Field::Day);
        assert_eq!(violation.max, 28);
    }
    assert_eq!(date(2000, 2, 29).to_date_string(), "2000-02-29");
}

#[test]
fn century_february_boundaries() {
    let value = date(1900, 3, 31).advance("-1 month").unwrap();
    assert_eq!(value.to_date_string(), "1900-02-28");

    assert_eq!(
        date(1900, 2, 10).month_last_date().unwrap().to_date_string(),
        "1900-02-28"
    );
    assert_eq!(
        date(2100, 1, 31).advance("1 month").unwrap().to_date_string(),
        "2100-02-28"
    );
    assert_eq!(
        date(2099, 2, 28).advance("1 year").unwrap().to_date_string(),
        "2100-02-28"
    );
}

#[test]
fn dates_between_inclusive() {
    let start = date(2018, 3, 18);
    let end = date(2018, 6, 20);
    let dates = date_strings(DateValue::dates_between(&start, &end, Unit::Day, true).unwrap());
    assert_eq!(dates.len(), 95);
    assert_eq!(dates.first().unwrap(), "2018-03-18");
    assert!(dates.iter().any(|d| d == "2018-03-19"));
    assert!(dates.iter().any(|d| d == "2018-06-19"));
    assert_eq!(dates.last().unwrap(), "2018-06-20");

    assert_eq!(date_strings(start.dates_until(&end).unwrap()), dates);
}

#[test]
fn dates_between_exclusive() {
    let start = date(2018, 3, 18);
    let end = date(2018, 6, 20);
    let dates = date_strings(DateValue::dates_between(&start, &end, Unit::Day, false).unwrap());
    assert_eq!(dates.len(), 94);
    assert!(dates.iter().any(|d| d == "2018-06-19"));
    assert!(dates.iter().all(|d| d.as_str() < "2018-06-20"));
}

#[test]
fn dates_between_is_restartable() {
    let start = date(2018, 3, 18);
    let end = date(2018, 4, 18);
    let range = DateValue::dates_between(&start, &end, Unit::Week, true).unwrap();
    let first: Vec<_> = range.clone().collect();
    let second: Vec<_> = range.collect();
    assert_eq!(first, second);
    // One step past the end is still inside the range.
    assert_eq!(first.len(), 6);
    assert_eq!(first.last().unwrap().to_date_string(), "2018-04-22");
    assert!(first.iter().all(|value| value.weekday() == Weekday::Sunday));
}

#[test]
fn dates_between_ordering() {
    let start = date(2018, 6, 20);
    let end = date(2018, 3, 18);
    let err = DateValue::dates_between(&start, &end, Unit::Day, true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RangeOrder);

    let same = DateValue::dates_between(&start, &start, Unit::Day, false).unwrap();
    assert_eq!(same.count(), 0);
    let same = DateValue::dates_between(&start, &start, Unit::Day, true).unwrap();
    assert_eq!(same.count(), 1);

    let err = DateValue::dates_between(&end, &start, Unit::Month, true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
}

#[test]
fn dates_in_first_week() {
    let range = DateValue::dates_in_week(1, 2018, Unit::Day, true, DateOptions::default()).unwrap();
    assert_eq!(
        date_strings(range),
        [
            "2017-12-31",
            "2018-01-01",
            "2018-01-02",
            "2018-01-03",
            "2018-01-04",
            "2018-01-05",
            "2018-01-06",
        ]
    );

    let range =
        DateValue::dates_in_week(1, 2018, Unit::Day, false, DateOptions::default()).unwrap();
    assert_eq!(range.count(), 6);

    let err = DateValue::dates_in_week(0, 2018, Unit::Day, true, DateOptions::default())
        .unwrap_err();
    assert_eq!(err.violation().unwrap().field, Field::WeekNumber);
}

#[test]
fn dates_in_week_with_monday_start() {
    let options = DateOptions::default().with_week_start(Weekday::Monday);
    let range = DateValue::dates_in_week(12, 2018, Unit::Day, true, options).unwrap();
    let dates = date_strings(range);
    assert_eq!(dates.first().unwrap(), "2018-03-19");
    assert_eq!(dates.last().unwrap(), "2018-03-25");
}

#[test]
fn weeks_from_value() {
    let weeks: Vec<_> = date(2018, 3, 18).weeks_from(3).collect();
    assert_eq!(
        weeks,
        [
            YearWeek { year: 2018, week: 11 },
            YearWeek { year: 2018, week: 12 },
            YearWeek { year: 2018, week: 13 },
        ]
    );
}

#[test]
fn rendering_is_idempotent() {
    let value = date(2018, 3, 18);
    let first = value.render("%d/%m/%Y %H:%i").unwrap();
    let second = value.render("%d/%m/%Y %H:%i").unwrap();
    assert_eq!(first, "18/03/2018 12:00");
    assert_eq!(first, second);
    assert_eq!(value.to_string(), value.to_string());
}

#[test]
fn rendering_templates() {
    let value = date(2018, 3, 8);
    let template = Template::parse("%Y-%m").unwrap();
    assert_writeable_eq!(value.format(&template), "2018-03");
    let template = Template::parse("%t %%u").unwrap();
    assert_writeable_eq!(value.format(&template), "+00:00 %u");
    assert_eq!(value.to_date_string(), "2018-03-08");
    assert_eq!(value.to_time_string(), "12:00:00");

    let err = value.render("%Y-%x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn sub_second_precision() {
    let options = DateOptions::default().with_sub_second_precision(3);
    let partial = PartialDateTime::new()
        .with_year(Some(2018))
        .with_month(Some(3))
        .with_day(Some(8))
        .with_sub_second(Some(7));
    let value = DateValue::from_fields(partial, options).unwrap();
    assert_eq!(value.render("%s.%u").unwrap(), "00.007");
    assert_eq!(value.to_string(), "2018-03-08 12:00:00.007+00:00");

    let six = value.with_options(DateOptions::default()).unwrap();
    assert_eq!(six.sub_second(), 7_000);
}

#[test]
fn from_instant_inputs() {
    let input = InstantInput::EpochMilliseconds(1_521_374_400_000);
    let value = DateValue::from_instant(input, DateOptions::default()).unwrap();
    assert_eq!(value, date(2018, 3, 18));
    assert_eq!(value.offset_minutes(), 0);

    let value =
        DateValue::from_instant("2018-03-18T12:00:00+01:00", DateOptions::default()).unwrap();
    assert_eq!(value.hour(), 12);
    assert_eq!(value.offset_minutes(), 60);
    assert_eq!(value.epoch_milliseconds().unwrap(), 1_521_370_800_000);

    let value = "2018-03-18T12:00:00.250Z".parse::<DateValue>().unwrap();
    assert_eq!(value.sub_second(), 250_000);
    assert_eq!(value.to_string(), "2018-03-18 12:00:00.250000+00:00");

    let err = "2018-03-18T".parse::<DateValue>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
}

#[test]
fn from_instant_skips_field_validation() {
    let value = DateValue::from_iso8601("1850-06-01T00:00:00Z", DateOptions::default()).unwrap();
    assert_eq!(value.year(), 1850);

    let value = DateValue::from_epoch_milliseconds(-1, DateOptions::default()).unwrap();
    assert_eq!(value.to_string(), "1969-12-31 23:59:59.999000+00:00");
}

#[test]
fn offsets_keep_the_instant() {
    let value = date(2018, 3, 18);
    let tokyo = value.with_offset(540).unwrap();
    assert_eq!(tokyo, value);
    assert_eq!(tokyo.to_string(), "2018-03-18 21:00:00.000000+09:00");

    let west = value.with_offset(-720).unwrap();
    assert_eq!(west.to_string(), "2018-03-18 00:00:00.000000-12:00");

    assert!(value.with_offset(30).is_err());
    assert!(value.with_offset(900).is_err());
}

#[test]
fn ordering() {
    let earlier = date(2018, 3, 18);
    let later = date(2018, 3, 19);
    assert!(earlier < later);
    assert!(earlier.is_before_or_same(&later));
    assert!(earlier.is_before_or_same(&earlier));
    assert!(!later.is_before_or_same(&earlier));
    assert_eq!(earlier.max(later), later);
}

#[test]
fn transformations_leave_the_receiver_untouched() {
    let value = date(2018, 3, 31);
    let rendered = value.to_string();
    let _ = value.advance("-1 month").unwrap();
    let _ = value.advance("3 days").unwrap();
    let _ = value.week_first_date().unwrap();
    let _ = value.month_last_date().unwrap();
    let _ = value.with_offset(60).unwrap();
    assert_eq!(value.to_string(), rendered);
}

#[cfg(feature = "sys-local")]
#[test]
fn now_uses_the_host_offset() {
    use crate::host::HostHooks;
    use crate::sys::LocalHostSystem;

    let offset = LocalHostSystem.get_system_offset_minutes().unwrap();
    let value = DateValue::now(DateOptions::default()).unwrap();
    assert_eq!(value.offset_minutes() % 60, 0);
    // Allow for a transition between the two reads.
    let again = LocalHostSystem.get_system_offset_minutes().unwrap();
    assert!(value.offset_minutes() == offset || value.offset_minutes() == again);
}
