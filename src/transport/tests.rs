use std::time::Duration;

use super::types::progress_fraction;

#[test]
fn progress_fraction_scales_against_stored_duration() {
    assert_eq!(progress_fraction(Duration::from_secs(50), 200), 0.25);
    assert_eq!(progress_fraction(Duration::ZERO, 200), 0.0);
}

#[test]
fn progress_fraction_clamps_when_media_outruns_the_stored_duration() {
    // Stored duration is authoritative but the file may be longer.
    assert_eq!(progress_fraction(Duration::from_secs(300), 200), 1.0);
}

#[test]
fn progress_fraction_tolerates_zero_duration() {
    assert_eq!(progress_fraction(Duration::from_secs(10), 0), 0.0);
}
