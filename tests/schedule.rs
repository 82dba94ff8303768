mod tests {
    use embassy_time::Instant;
    use lighthaus_composer::color::Rgb;
    use lighthaus_composer::schedule::{MAX_ANCHORS, TimeSlot};
    use lighthaus_composer::{
        GradientAtTime, RowError, ScheduleFormatError, ScheduleInterpolator, ScheduleRow,
        ScheduleTable, SunTimes,
    };

    const HOUR: u32 = 3600;

    fn sun() -> SunTimes {
        SunTimes::new(6 * HOUR + 30 * 60, 19 * HOUR).unwrap()
    }

    fn table(text: &str) -> ScheduleTable {
        ScheduleTable::parse(text, sun()).unwrap()
    }

    const DAY_NIGHT: &str = "\
timeslot,red_1,green_1,blue_1,red_2,green_2,blue_2,brightness,scroll_speed
# morning
06:00,0,0,0,0,0,0,0,0

18:00,200,100,0,0,100,200,100,0.5
";

    #[test]
    fn test_parse_skips_header_comments_and_blank_lines() {
        let table = table(DAY_NIGHT);
        let anchors = table.anchors();
        assert_eq!(anchors.len(), 2);
        assert_eq!(anchors[0].second_of_day, 6 * HOUR);
        assert_eq!(anchors[1].second_of_day, 18 * HOUR);
        assert_eq!(anchors[1].gradient.brightness(), 1.0);
        assert_eq!(anchors[1].gradient.color_2(), Rgb::new(0, 100, 200));
    }

    #[test]
    fn test_anchor_values_are_exact() {
        let table = table(DAY_NIGHT);
        let now = Instant::from_secs(42);

        let morning = table.interpolate_at((6 * HOUR) as f32, now);
        assert!(morning.same_look(&table.anchors()[0].gradient));
        assert_eq!(morning.timestamp(), now);

        let evening = table.interpolate_at((18 * HOUR) as f32, now);
        assert!(evening.same_look(&table.anchors()[1].gradient));
    }

    #[test]
    fn test_interpolates_between_anchors() {
        let table = table(DAY_NIGHT);
        let noon = table.interpolate_at((12 * HOUR) as f32, Instant::from_secs(0));
        assert_eq!(noon.color_1(), Rgb::new(100, 50, 0));
        assert_eq!(noon.brightness(), 0.5);
        assert!((noon.scroll_speed() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_wraps_around_midnight() {
        let table = table(DAY_NIGHT);
        let now = Instant::from_secs(0);

        // 18:00 -> 06:00 is a twelve hour gap, midnight is its middle
        let midnight = table.interpolate_at(0.0, now);
        assert_eq!(midnight.color_1(), Rgb::new(100, 50, 0));
        assert_eq!(midnight.brightness(), 0.5);

        let late = table.interpolate_at((21 * HOUR) as f32, now);
        assert_eq!(late.brightness(), 0.75);

        let early = table.interpolate_at((3 * HOUR) as f32, now);
        assert_eq!(early.brightness(), 0.25);
    }

    #[test]
    fn test_continuous_across_the_day() {
        let table = table(DAY_NIGHT);
        let now = Instant::from_secs(0);
        let mut previous = table.interpolate_at(0.0, now);
        let mut second = 60;
        while second < 86_400 {
            let gradient = table.interpolate_at(second as f32, now);
            let jump = (i32::from(gradient.color_1().r) - i32::from(previous.color_1().r)).abs();
            assert!(jump <= 1, "jump of {jump} at second {second}");
            previous = gradient;
            second += 60;
        }
    }

    #[test]
    fn test_single_anchor_is_constant() {
        let table = table("12:00,1,2,3,4,5,6,50,0.1");
        for hour in [0, 6, 12, 18, 23] {
            let gradient = table.interpolate_at((hour * HOUR) as f32, Instant::from_secs(0));
            assert_eq!(gradient.color_1(), Rgb::new(1, 2, 3));
            assert_eq!(gradient.color_2(), Rgb::new(4, 5, 6));
            assert!((gradient.brightness() - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_duplicate_timeslots_keep_input_order() {
        let table = table(
            "06:00,0,0,0,0,0,0,100,0\n\
             12:00,10,10,10,10,10,10,100,0\n\
             12:00,20,20,20,20,20,20,100,0\n\
             18:00,30,30,30,30,30,30,100,0",
        );
        let anchors = table.anchors();
        assert_eq!(anchors[1].gradient.color_1(), Rgb::new(10, 10, 10));
        assert_eq!(anchors[2].gradient.color_1(), Rgb::new(20, 20, 20));

        let now = Instant::from_secs(0);
        let before = table.interpolate_at((9 * HOUR) as f32, now);
        assert_eq!(before.color_1(), Rgb::new(5, 5, 5));
        let at = table.interpolate_at((12 * HOUR) as f32, now);
        assert_eq!(at.color_1(), Rgb::new(20, 20, 20));
        let after = table.interpolate_at((15 * HOUR) as f32, now);
        assert_eq!(after.color_1(), Rgb::new(25, 25, 25));
    }

    #[test]
    fn test_duplicate_first_timeslot_yields_last_of_run() {
        let table = table(
            "06:00,10,10,10,10,10,10,100,0\n\
             06:00,20,20,20,20,20,20,100,0\n\
             18:00,30,30,30,30,30,30,100,0",
        );
        let now = Instant::from_secs(0);
        let at = table.interpolate_at((6 * HOUR) as f32, now);
        assert_eq!(at.color_1(), Rgb::new(20, 20, 20));
        let after = table.interpolate_at((12 * HOUR) as f32, now);
        assert_eq!(after.color_1(), Rgb::new(25, 25, 25));
    }

    #[test]
    fn test_rows_are_sorted() {
        let table = table("18:00,0,0,0,0,0,0,0,0\n06:00,0,0,0,0,0,0,0,0\n12:00,0,0,0,0,0,0,0,0");
        let seconds: Vec<u32> = table.anchors().iter().map(|a| a.second_of_day).collect();
        assert_eq!(seconds, [6 * HOUR, 12 * HOUR, 18 * HOUR]);
    }

    #[test]
    fn test_sun_timeslots_resolve() {
        let table = table("SR,0,0,0,0,0,0,0,0\nsunset,0,0,0,0,0,0,0,0");
        assert_eq!(table.anchors()[0].second_of_day, 6 * HOUR + 30 * 60);
        assert_eq!(table.anchors()[1].second_of_day, 19 * HOUR);

        assert_eq!(TimeSlot::parse("ss"), Ok(TimeSlot::Sunset));
        assert_eq!(TimeSlot::parse("07:15"), Ok(TimeSlot::At(7 * HOUR + 15 * 60)));
        assert_eq!(TimeSlot::parse("24:00"), Err(RowError::InvalidTimeslot));
        assert_eq!(TimeSlot::parse("noon"), Err(RowError::InvalidTimeslot));
    }

    #[test]
    fn test_row_errors_carry_line_numbers() {
        let error = ScheduleTable::parse("timeslot,a,b\n06:00,1,2,3\n", sun()).unwrap_err();
        assert_eq!(
            error,
            ScheduleFormatError::Row {
                line: 2,
                source: RowError::FieldCount {
                    expected: 9,
                    found: 4
                },
            }
        );

        let error = ScheduleTable::parse("06:00,0,256,0,0,0,0,0,0", sun()).unwrap_err();
        assert_eq!(
            error,
            ScheduleFormatError::Row {
                line: 1,
                source: RowError::OutOfRange("green_1"),
            }
        );

        assert_eq!(
            ScheduleRow::parse("06:00,0,0,0,0,0,0,150,0"),
            Err(RowError::OutOfRange("brightness"))
        );
        assert_eq!(
            ScheduleRow::parse("06:00,0,0,x,0,0,0,50,0"),
            Err(RowError::InvalidNumber("blue_1"))
        );
    }

    #[test]
    fn test_empty_and_oversized_schedules() {
        assert_eq!(
            ScheduleTable::parse("# nothing\n\n", sun()).unwrap_err(),
            ScheduleFormatError::Empty
        );

        let mut text = String::new();
        for minute in 0..=MAX_ANCHORS {
            text.push_str(&format!("00:{minute:02},0,0,0,0,0,0,0,0\n"));
        }
        assert_eq!(
            ScheduleTable::parse(&text, sun()).unwrap_err(),
            ScheduleFormatError::TooManyAnchors(MAX_ANCHORS)
        );
    }

    #[test]
    fn test_from_rows() {
        let rows = [
            ScheduleRow::parse("SS,0,0,0,0,0,0,100,0").unwrap(),
            ScheduleRow::parse("SR,0,0,0,0,0,0,0,0").unwrap(),
        ];
        let table = ScheduleTable::from_rows(rows, sun()).unwrap();
        assert_eq!(table.anchors()[0].second_of_day, 6 * HOUR + 30 * 60);
        assert_eq!(
            ScheduleTable::from_rows([], sun()).unwrap_err(),
            ScheduleFormatError::Empty
        );
    }

    #[test]
    fn test_interpolator_tracks_second_of_day() {
        let interpolator =
            ScheduleInterpolator::new(table(DAY_NIGHT), Instant::from_secs(100), 86_000.0);
        assert_eq!(interpolator.second_of_day(Instant::from_secs(100)), 86_000.0);
        assert_eq!(interpolator.second_of_day(Instant::from_secs(600)), 100.0);
        assert_eq!(interpolator.second_of_day(Instant::from_secs(50)), 85_950.0);
    }

    #[test]
    fn test_interpolator_evaluates_schedule() {
        let interpolator =
            ScheduleInterpolator::new(table(DAY_NIGHT), Instant::from_secs(0), f64::from(6 * HOUR));
        let six_hours_later = Instant::from_secs(u64::from(6 * HOUR));
        let noon = interpolator.gradient_at(six_hours_later);
        assert_eq!(noon.brightness(), 0.5);
        assert_eq!(noon.timestamp(), six_hours_later);
    }

    #[test]
    fn test_sun_times_must_be_inside_a_day() {
        assert!(SunTimes::new(0, 86_399).is_ok());
        assert!(SunTimes::new(86_400, 0).is_err());
    }
}
