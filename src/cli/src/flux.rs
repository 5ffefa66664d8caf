//! Flux query text used by the demo commands

/// Units accepted in a Flux duration literal, longest first so `ms` wins over `m`
const DURATION_UNITS: &[&str] = &["mo", "ms", "us", "µs", "ns", "y", "w", "d", "h", "m", "s"];

/// Quote `s` as a Flux string literal
fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Read everything in `bucket` since `start`
pub fn read_range(bucket: &str, start: &str) -> String {
    format!("from(bucket:{}) |> range(start:{})", quote(bucket), start)
}

/// Copy the last point of each series in `bucket_in` since `start` into `bucket_out`
pub fn downsample(bucket_in: &str, start: &str, bucket_out: &str, org: &str) -> String {
    format!(
        "from(bucket:{}) |> range(start:{}) |> last() |> to(bucket:{}, org:{}) |> yield()",
        quote(bucket_in),
        start,
        quote(bucket_out),
        quote(org)
    )
}

/// Task script running [`downsample`] every `every`
pub fn downsample_task(name: &str, every: &str, bucket_in: &str, bucket_out: &str, org: &str) -> String {
    format!(
        "option task = {{ name: {}, every: {} }} {}",
        quote(name),
        every,
        downsample(bucket_in, &format!("-{}", every), bucket_out, org)
    )
}

/// Parse a (possibly negative) Flux duration literal such as `-5s` or `1h30m`
pub fn parse_duration(s: &str) -> Result<String, String> {
    let body = s.strip_prefix('-').unwrap_or(s);
    if body.is_empty() {
        return Err(format!("{:?} is not a duration", s));
    }

    let mut rest = body;
    while !rest.is_empty() {
        let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits == 0 {
            return Err(format!("{:?} is not a duration: expected digits at {:?}", s, rest));
        }
        rest = &rest[digits..];

        let unit = DURATION_UNITS
            .iter()
            .find(|u| rest.starts_with(**u))
            .ok_or_else(|| format!("{:?} is not a duration: unknown unit at {:?}", s, rest))?;
        rest = &rest[unit.len()..];
    }

    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_range() {
        assert_eq!(
            read_range("demo-bucket-in-x", "-5s"),
            r#"from(bucket:"demo-bucket-in-x") |> range(start:-5s)"#
        );
    }

    #[test]
    fn test_downsample() {
        assert_eq!(
            downsample("in", "-5s", "out", "org"),
            r#"from(bucket:"in") |> range(start:-5s) |> last() |> to(bucket:"out", org:"org") |> yield()"#
        );
    }

    #[test]
    fn test_downsample_task() {
        assert_eq!(
            downsample_task("demo-1", "5s", "in", "out", "org"),
            r#"option task = { name: "demo-1", every: 5s } from(bucket:"in") |> range(start:-5s) |> last() |> to(bucket:"out", org:"org") |> yield()"#
        );
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote(r#"a"b\c"#), r#""a\"b\\c""#);
    }

    #[test]
    fn test_parse_duration() {
        for ok in ["-5s", "15s", "-1h30m", "100ms", "2mo", "-3w"] {
            assert_eq!(parse_duration(ok).unwrap(), ok);
        }
        for bad in ["", "-", "5", "s", "-5x", "5s;drop", "1h 2m"] {
            assert!(parse_duration(bad).is_err(), "{:?} should be rejected", bad);
        }
    }
}
