use crate::error::PortSpecError;

/// Parse a comma-separated port specification into the literal list of ports.
///
/// Supported tokens:
/// - single port number: `80`
/// - inclusive range: `8000-8010`
///
/// Duplicates are kept and order follows the specification. A range whose
/// start is greater than its end expands to nothing. Whitespace is not
/// allowed inside tokens. No bounds check is done here, so `70000` is
/// returned as-is and left to the prober.
pub fn parse_ports(spec: &str) -> Result<Vec<u64>, PortSpecError> {
    let mut out = Vec::new();

    for token in spec.split(',') {
        if token.contains('-') {
            let parts: Vec<&str> = token.split('-').collect();
            let [a, b] = parts.as_slice() else {
                return Err(PortSpecError::InvalidRangeFormat(token.to_string()));
            };
            let start = parse_port(a)?;
            let end = parse_port(b)?;
            // start > end yields an empty range
            out.extend(start..=end);
            continue;
        }

        out.push(parse_port(token)?);
    }

    Ok(out)
}

fn parse_port(s: &str) -> Result<u64, PortSpecError> {
    s.parse::<u64>()
        .map_err(|_| PortSpecError::InvalidPortNumber(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_ports() {
        assert_eq!(parse_ports("80,22,443").unwrap(), vec![80, 22, 443]);
    }

    #[test]
    fn parse_ranges_keep_duplicates() {
        let ports = parse_ports("8000-8002,80,8001").unwrap();
        assert_eq!(ports, vec![8000, 8001, 8002, 80, 8001]);
    }

    #[test]
    fn reversed_range_is_empty() {
        assert_eq!(parse_ports("10-5").unwrap(), Vec::<u64>::new());
        assert_eq!(parse_ports("10-5,7").unwrap(), vec![7]);
    }

    #[test]
    fn whitespace_in_tokens_is_rejected() {
        assert_eq!(
            parse_ports("80, 22"),
            Err(PortSpecError::InvalidPortNumber(" 22".into()))
        );
        assert_eq!(
            parse_ports("80 -81"),
            Err(PortSpecError::InvalidPortNumber("80 ".into()))
        );
    }

    #[test]
    fn range_with_extra_dash_is_rejected() {
        assert_eq!(
            parse_ports("1-2-3"),
            Err(PortSpecError::InvalidRangeFormat("1-2-3".into()))
        );
    }

    #[test]
    fn non_numeric_is_rejected() {
        assert!(matches!(
            parse_ports("80,http"),
            Err(PortSpecError::InvalidPortNumber(_))
        ));
        assert!(matches!(
            parse_ports("80-x"),
            Err(PortSpecError::InvalidPortNumber(_))
        ));
        assert!(matches!(parse_ports(""), Err(PortSpecError::InvalidPortNumber(_))));
        assert!(matches!(parse_ports("-5"), Err(PortSpecError::InvalidPortNumber(_))));
    }

    #[test]
    fn out_of_range_passes_through() {
        assert_eq!(parse_ports("70000").unwrap(), vec![70000]);
        assert_eq!(parse_ports("4294967296").unwrap(), vec![4_294_967_296]);
    }
}
