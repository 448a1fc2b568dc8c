extern crate msid_limits;

use msid_limits::comm::{CommError, CommEventSource, CommPass, CommWindow};
use msid_limits::prelude::ConfigRepr;
use msid_limits::time::Epoch;
use rstest::*;

fn utc(year: i32, month: u8, day: u8, hour: u8, minute: u8) -> Epoch {
    Epoch::from_gregorian_utc_hms(year, month, day, hour, minute, 0)
}

#[fixture]
fn daytime_pass() -> CommPass {
    CommPass {
        start: utc(2024, 1, 1, 10, 0),
        stop: utc(2024, 1, 1, 12, 0),
        bot: "1015".to_string(),
        eot: "1145".to_string(),
        station: Some("DSS-24".to_string()),
    }
}

#[fixture]
fn midnight_pass() -> CommPass {
    CommPass {
        start: utc(2024, 1, 1, 23, 50),
        stop: utc(2024, 1, 2, 0, 40),
        bot: "2355".to_string(),
        eot: "0010".to_string(),
        station: None,
    }
}

#[rstest]
fn track_window_inside_a_daytime_pass(daytime_pass: CommPass) {
    if pretty_env_logger::try_init().is_err() {
        println!("could not init env_logger");
    }

    let reference = utc(2024, 1, 1, 10, 30);
    let window = CommWindow::compute(&daytime_pass, reference).unwrap();

    assert_eq!(window.support_start, daytime_pass.start);
    assert_eq!(window.support_stop, daytime_pass.stop);
    assert_eq!(window.track_start, utc(2024, 1, 1, 10, 15));
    assert_eq!(window.track_stop, utc(2024, 1, 1, 11, 45));
    assert!(window.in_support);
    assert!(window.in_track);
}

#[rstest]
fn reference_outside_the_pass_is_in_neither_window(daytime_pass: CommPass) {
    let window = CommWindow::compute(&daytime_pass, utc(2024, 1, 1, 9, 0)).unwrap();
    assert!(!window.in_support);
    assert!(!window.in_track);

    // During support but before track.
    let window = CommWindow::compute(&daytime_pass, utc(2024, 1, 1, 10, 5)).unwrap();
    assert!(window.in_support);
    assert!(!window.in_track);
}

#[rstest]
fn membership_is_strict_at_the_boundaries(daytime_pass: CommPass) {
    // Both intervals are open: the boundary instants themselves are out.
    let window = CommWindow::compute(&daytime_pass, daytime_pass.start).unwrap();
    assert!(!window.in_support);

    let window = CommWindow::compute(&daytime_pass, utc(2024, 1, 1, 10, 15)).unwrap();
    assert!(window.in_support);
    assert!(!window.in_track);

    let window = CommWindow::compute(&daytime_pass, utc(2024, 1, 1, 11, 45)).unwrap();
    assert!(window.in_support);
    assert!(!window.in_track);

    let window = CommWindow::compute(&daytime_pass, daytime_pass.stop).unwrap();
    assert!(!window.in_support);
    assert!(!window.in_track);
}

#[rstest]
fn pass_straddling_midnight_needs_no_shift_when_clocks_agree(midnight_pass: CommPass) {
    // bot falls on the start date, eot on the (next-day) stop date; both
    // candidates already land inside the pass.
    let window = CommWindow::compute(&midnight_pass, utc(2024, 1, 2, 0, 0)).unwrap();

    assert_eq!(window.track_start, utc(2024, 1, 1, 23, 55));
    assert_eq!(window.track_stop, utc(2024, 1, 2, 0, 10));
    assert!(window.in_support);
    assert!(window.in_track);
    assert!(window.track_start >= window.support_start);
    assert!(window.track_stop <= window.support_stop);
}

#[rstest]
fn track_start_after_midnight_shifts_forward_a_day(midnight_pass: CommPass) {
    // Track begins at 00:05, after local midnight relative to the start date.
    let mut pass = midnight_pass;
    pass.bot = "0005".to_string();

    let window = CommWindow::compute(&pass, utc(2024, 1, 2, 0, 7)).unwrap();
    assert_eq!(window.track_start, utc(2024, 1, 2, 0, 5));
    assert!(window.in_track);
}

#[rstest]
fn track_stop_before_midnight_shifts_back_a_day(midnight_pass: CommPass) {
    // Track ends at 23:58, before local midnight relative to the stop date.
    let mut pass = midnight_pass;
    pass.eot = "2358".to_string();

    let window = CommWindow::compute(&pass, utc(2024, 1, 1, 23, 57)).unwrap();
    assert_eq!(window.track_stop, utc(2024, 1, 1, 23, 58));
    assert!(window.in_track);
}

#[rstest]
#[case("115")]
#[case("24x5")]
#[case("2460")]
#[case("2515")]
fn malformed_clocks_are_rejected(daytime_pass: CommPass, #[case] clock: &str) {
    let mut pass = daytime_pass;
    pass.bot = clock.to_string();

    let err = CommWindow::compute(&pass, utc(2024, 1, 1, 10, 30)).unwrap_err();
    assert!(matches!(err, CommError::InvalidClock { .. }), "{err}");
}

#[rstest]
fn inverted_passes_are_rejected(daytime_pass: CommPass) {
    let mut pass = daytime_pass;
    std::mem::swap(&mut pass.start, &mut pass.stop);

    let err = CommWindow::compute(&pass, utc(2024, 1, 1, 10, 30)).unwrap_err();
    assert!(matches!(err, CommError::InvertedPass { .. }));
}

#[test]
fn pass_record_loads_from_yaml() {
    let yaml = r#"
start: "2024-01-01T10:00:00 UTC"
stop: "2024-01-01T12:00:00 UTC"
bot: "1015"
eot: "1145"
station: DSS-34
"#;
    let pass = CommPass::loads(yaml).unwrap();
    assert_eq!(pass.start, utc(2024, 1, 1, 10, 0));
    assert_eq!(pass.stop, utc(2024, 1, 1, 12, 0));
    assert_eq!(pass.bot, "1015");
    assert_eq!(pass.station.as_deref(), Some("DSS-34"));
}

/// A schedule-backed event source, as an adapter over the external event
/// service would behave.
struct Schedule {
    passes: Vec<CommPass>,
}

impl CommEventSource for Schedule {
    fn current_pass(&self, at: Epoch) -> Result<Option<CommPass>, CommError> {
        Ok(self
            .passes
            .iter()
            .find(|pass| pass.start <= at && at <= pass.stop)
            .cloned())
    }
}

#[rstest]
fn event_source_reports_no_pass_as_a_normal_outcome(
    daytime_pass: CommPass,
    midnight_pass: CommPass,
) {
    let schedule = Schedule {
        passes: vec![daytime_pass, midnight_pass],
    };

    let hit = schedule.current_pass(utc(2024, 1, 1, 11, 0)).unwrap();
    let window = CommWindow::compute(&hit.unwrap(), utc(2024, 1, 1, 11, 0)).unwrap();
    assert!(window.in_support && window.in_track);

    // Between passes: not in comm, not an error.
    assert!(schedule.current_pass(utc(2024, 1, 1, 15, 0)).unwrap().is_none());
}
