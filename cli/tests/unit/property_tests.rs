//! Property-based tests for the probe-output parser and serial extraction.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used, clippy::float_cmp)]

use proptest::prelude::*;

use hotspot_agent::domain::diagnostics::{WHOLE_UNIT_THRESHOLD, decode_reading};
use hotspot_agent::domain::{MalformedLinePolicy, Reading, extract_serial, parse_probe_output};

proptest! {
    /// Values above the threshold always become their truncation.
    #[test]
    fn prop_large_values_truncate(value in 10.000_001f64..1.0e9) {
        let reading = decode_reading("download_speed", &format!("{value} Mbit/s"))
            .expect("valid number");
        #[allow(clippy::cast_possible_truncation)]
        let expected = value.trunc() as i64;
        prop_assert_eq!(reading, Some(Reading::Integer(expected)));
    }

    /// Non-zero values at or below the threshold keep their float value.
    #[test]
    fn prop_small_values_stay_float(value in -1.0e6f64..=WHOLE_UNIT_THRESHOLD) {
        prop_assume!(value != 0.0);
        let reading = decode_reading("latency", &value.to_string()).expect("valid number");
        prop_assert_eq!(reading, Some(Reading::Float(value)));
    }

    /// Text that has no colon never contributes a field.
    #[test]
    fn prop_lines_without_colon_are_ignored(lines in prop::collection::vec("[^:\n]{0,40}", 0..8)) {
        let output = lines.join("\n");
        let result = parse_probe_output(&output, MalformedLinePolicy::Abort).expect("nothing to decode");
        prop_assert_eq!(result.download_speed, None);
        prop_assert_eq!(result.latency, None);
        prop_assert_eq!(result.public_ip, None);
        prop_assert!(result.extra.is_empty());
    }

    /// The skip policy never fails, whatever the probe printed.
    #[test]
    fn prop_skip_policy_never_fails(output in "(([a-z ]{1,12}): ?([a-z0-9. ]{0,12})\n){0,10}") {
        prop_assert!(parse_probe_output(&output, MalformedLinePolicy::Skip).is_ok());
    }

    /// Key normalisation is insensitive to case and padding.
    #[test]
    fn prop_key_case_and_padding_do_not_matter(pad in " {0,4}", upper in any::<bool>()) {
        let key = if upper { "PUBLIC IP" } else { "public ip" };
        let output = format!("{pad}{key}{pad}: 198.51.100.4");
        let result = parse_probe_output(&output, MalformedLinePolicy::Abort).expect("decodes");
        prop_assert_eq!(result.public_ip.as_deref(), Some("198.51.100.4"));
    }

    /// The serial is always eight characters long.
    #[test]
    fn prop_serial_always_eight_chars(descriptor in "[ -~\n]{0,200}") {
        prop_assert_eq!(extract_serial(&descriptor, "Serial").chars().count(), 8);
    }

    /// A serial line yields its last eight characters.
    #[test]
    fn prop_serial_takes_line_suffix(serial in "[0-9a-f]{16}") {
        let descriptor = format!("Hardware\t: BCM2835\nSerial\t\t: {serial}\n");
        prop_assert_eq!(extract_serial(&descriptor, "Serial"), serial[8..].to_string());
    }
}
