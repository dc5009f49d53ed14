//! Duration tokens.
//!
//! InfluxQL writes durations as `<integer><unit>` with no separator:
//! `10m`, `4h`, `1500ms`. Formatting always picks the largest unit that
//! divides the duration exactly, so `5400s` is written `90m` and one hour is
//! always `1h`.
//!
//! ```text
//! 0          -> 0s
//! 3_600s     -> 1h
//! 5_400s     -> 90m
//! 1.5s       -> 1500ms
//! ```

use std::time::Duration;

use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag,
    character::complete::digit1,
    combinator::{all_consuming, map_opt, map_res, value},
    multi::fold_many1,
    sequence::pair,
};

use crate::error::{QueryError, QueryResult};

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;
const NANOS_PER_DAY: u128 = 24 * NANOS_PER_HOUR;
const NANOS_PER_WEEK: u128 = 7 * NANOS_PER_DAY;

/// Units tried when formatting, largest first.
const FORMAT_UNITS: [(u128, &str); 6] = [
    (NANOS_PER_HOUR, "h"),
    (NANOS_PER_MINUTE, "m"),
    (NANOS_PER_SECOND, "s"),
    (NANOS_PER_MILLI, "ms"),
    (NANOS_PER_MICRO, "u"),
    (1, "ns"),
];

/// Format a duration as a compact InfluxQL duration token.
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }

    for (size, suffix) in FORMAT_UNITS {
        if nanos % size == 0 {
            return format!("{}{}", nanos / size, suffix);
        }
    }

    // The nanosecond unit divides everything.
    format!("{}ns", nanos)
}

/// Parse an InfluxQL duration token such as `10m`, `1h30m` or `250ms`.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use influxql::duration::parse_duration;
///
/// assert_eq!(parse_duration("90m").unwrap(), Duration::from_secs(5400));
/// ```
pub fn parse_duration(input: &str) -> QueryResult<Duration> {
    let trimmed = input.trim();

    let nanos = match all_consuming(parse_groups)(trimmed) {
        Ok((_, nanos)) => nanos,
        Err(_) => return Err(QueryError::InvalidDuration(input.to_string())),
    };

    let secs = u64::try_from(nanos / NANOS_PER_SECOND)
        .map_err(|_| QueryError::InvalidDuration(input.to_string()))?;
    let subsec = (nanos % NANOS_PER_SECOND) as u32;

    Ok(Duration::new(secs, subsec))
}

/// Parse one or more `<integer><unit>` groups and sum them in nanoseconds.
fn parse_groups(input: &str) -> IResult<&str, u128> {
    fold_many1(parse_group, || 0u128, |acc, n| acc.saturating_add(n))(input)
}

/// Parse a single `<integer><unit>` group.
fn parse_group(input: &str) -> IResult<&str, u128> {
    map_opt(
        pair(map_res(digit1, str::parse::<u128>), parse_unit),
        |(n, unit)| n.checked_mul(unit),
    )(input)
}

/// Parse a unit suffix into its size in nanoseconds.
fn parse_unit(input: &str) -> IResult<&str, u128> {
    // `ms` and `ns` must be tried before `m` and `s`.
    alt((
        value(1, tag("ns")),
        value(NANOS_PER_MILLI, tag("ms")),
        value(NANOS_PER_MICRO, tag("u")),
        value(NANOS_PER_MICRO, tag("µ")),
        value(NANOS_PER_SECOND, tag("s")),
        value(NANOS_PER_MINUTE, tag("m")),
        value(NANOS_PER_HOUR, tag("h")),
        value(NANOS_PER_DAY, tag("d")),
        value(NANOS_PER_WEEK, tag("w")),
    ))(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_zero() {
        assert_eq!(format_duration(Duration::ZERO), "0s");
    }

    #[test]
    fn test_format_largest_exact_unit() {
        assert_eq!(format_duration(Duration::from_secs(3600)), "1h");
        assert_eq!(format_duration(Duration::from_secs(4 * 3600)), "4h");
        assert_eq!(format_duration(Duration::from_secs(600)), "10m");
        assert_eq!(format_duration(Duration::from_secs(5400)), "90m");
        assert_eq!(format_duration(Duration::from_secs(61)), "61s");
        assert_eq!(format_duration(Duration::from_secs(48 * 3600)), "48h");
    }

    #[test]
    fn test_format_sub_second() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1500ms");
        assert_eq!(format_duration(Duration::from_micros(10)), "10u");
        assert_eq!(format_duration(Duration::from_nanos(1_000_001)), "1000001ns");
    }

    #[test]
    fn test_parse_single_units() {
        assert_eq!(parse_duration("10m").unwrap(), Duration::from_secs(600));
        assert_eq!(parse_duration("4h").unwrap(), Duration::from_secs(14_400));
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration("7u").unwrap(), Duration::from_micros(7));
        assert_eq!(parse_duration("7µ").unwrap(), Duration::from_micros(7));
        assert_eq!(parse_duration("3ns").unwrap(), Duration::from_nanos(3));
        assert_eq!(parse_duration("2d").unwrap(), Duration::from_secs(172_800));
        assert_eq!(parse_duration("1w").unwrap(), Duration::from_secs(604_800));
    }

    #[test]
    fn test_parse_compound() {
        assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_duration(" 1m1s ").unwrap(), Duration::from_secs(61));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("10").is_err());
        assert!(parse_duration("m").is_err());
        assert!(parse_duration("10 m").is_err());
        assert!(parse_duration("10x").is_err());
        assert!(parse_duration("-1h").is_err());
    }

    #[test]
    fn test_format_parses_back() {
        let samples = [
            Duration::ZERO,
            Duration::from_nanos(17),
            Duration::from_micros(42),
            Duration::from_millis(1500),
            Duration::from_secs(59),
            Duration::from_secs(5400),
            Duration::from_secs(7 * 24 * 3600),
            Duration::new(3, 1),
        ];
        for d in samples {
            assert_eq!(parse_duration(&format_duration(d)).unwrap(), d);
        }
    }

    #[test]
    fn test_format_is_stable() {
        for token in ["1h", "90m", "0s", "1500ms", "61s"] {
            let d = parse_duration(token).unwrap();
            assert_eq!(format_duration(d), token);
        }
    }
}
