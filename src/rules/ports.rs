//! Port expression expansion.
//!
//! A port expression is a comma separated list of single ports and
//! inclusive ranges, e.g. `"3,5-7"` expands to `["3", "5", "6", "7"]`.

use crate::utils::config::{MAX_PORT, MIN_PORT};
use crate::utils::error::PortError;

/// Expand a port expression into the ports it denotes
///
/// **Public** - used by the aggregator for every raw rule
///
/// # Arguments
/// * `expression` - Port expression, whitespace around tokens is ignored
///
/// # Returns
/// Ports in the order they were listed; ranges ascend. Single ports keep
/// their trimmed original text. No deduplication happens here.
///
/// # Errors
/// * `PortError::InvalidPort` - a single port fails to parse or is out of bounds
/// * `PortError::InvalidRange` - a range bound is invalid, or the range is
///   degenerate, inverted or has more than one hyphen
pub fn expand_ports(expression: &str) -> Result<Vec<String>, PortError> {
    let mut ports = Vec::new();

    for token in expression.split(',').map(str::trim) {
        if token.contains('-') {
            let (start, end) = parse_range(token)?;
            ports.extend((start..=end).map(|p| p.to_string()));
        } else {
            parse_port(token).ok_or_else(|| PortError::InvalidPort {
                port: token.to_string(),
            })?;
            ports.push(token.to_string());
        }
    }

    Ok(ports)
}

/// Parse a `start-end` token
///
/// **Private** - bounds are checked before shape, start before end
fn parse_range(token: &str) -> Result<(u32, u32), PortError> {
    let parts: Vec<&str> = token.split('-').map(str::trim).collect();

    let bound = |raw: &str| {
        parse_port(raw).ok_or_else(|| PortError::InvalidRange {
            range: token.to_string(),
            bound: Some(raw.to_string()),
        })
    };

    let start = bound(parts[0])?;
    let end = bound(parts[1])?;

    if parts.len() != 2 || start >= end {
        return Err(PortError::InvalidRange {
            range: token.to_string(),
            bound: None,
        });
    }

    Ok((start, end))
}

fn parse_port(raw: &str) -> Option<u32> {
    raw.parse::<u32>()
        .ok()
        .filter(|port| (MIN_PORT..=MAX_PORT).contains(port))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_expand_valid_expressions() {
        assert_eq!(expand_ports("3,5-7").unwrap(), vec!["3", "5", "6", "7"]);
        assert_eq!(expand_ports("1,2,3").unwrap(), vec!["1", "2", "3"]);
        assert_eq!(expand_ports("1, 2, 3").unwrap(), vec!["1", "2", "3"]);
        assert_eq!(expand_ports("3-4").unwrap(), vec!["3", "4"]);
        assert_eq!(expand_ports("3 - 4").unwrap(), vec!["3", "4"]);
    }

    #[test]
    fn test_expand_keeps_listing_order() {
        assert_eq!(expand_ports("9,1-2,1").unwrap(), vec!["9", "1", "2", "1"]);
    }

    #[test]
    fn test_expand_port_bounds() {
        assert_eq!(expand_ports("1").unwrap(), vec!["1"]);
        assert_eq!(expand_ports("65535").unwrap(), vec!["65535"]);
        assert_eq!(expand_ports("65534-65535").unwrap(), vec!["65534", "65535"]);
    }

    #[test]
    fn test_degenerate_and_inverted_ranges() {
        for (expression, range) in [("3,6-6", "6-6"), ("3,9-6", "9-6"), ("3,3-6-8", "3-6-8")] {
            let err = expand_ports(expression).unwrap_err();
            assert_eq!(
                err,
                PortError::InvalidRange { range: range.to_string(), bound: None }
            );
            assert_eq!(err.to_string(), format!("Port range {} was invalid", range));
        }
    }

    #[test]
    fn test_range_with_missing_bound() {
        assert_eq!(
            expand_ports("-4").unwrap_err().to_string(),
            "Port  was invalid as part of range -4"
        );
        assert_eq!(
            expand_ports("4-").unwrap_err().to_string(),
            "Port  was invalid as part of range 4-"
        );
        assert_eq!(
            expand_ports("-").unwrap_err().to_string(),
            "Port  was invalid as part of range -"
        );
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(expand_ports("3,5-6,*").unwrap_err().to_string(), "Port * was invalid");
        assert_eq!(
            expand_ports("#-7").unwrap_err().to_string(),
            "Port # was invalid as part of range #-7"
        );
        assert_eq!(
            expand_ports("7-d").unwrap_err().to_string(),
            "Port d was invalid as part of range 7-d"
        );
    }

    #[test]
    fn test_out_of_bounds_ports() {
        for port in ["0", "65536", "3456789"] {
            assert_eq!(
                expand_ports(port).unwrap_err(),
                PortError::InvalidPort { port: port.to_string() }
            );
        }
        assert_eq!(
            expand_ports("3,4-8,678800").unwrap_err().to_string(),
            "Port 678800 was invalid"
        );
        assert_eq!(
            expand_ports("3,4-8,12-99999999").unwrap_err().to_string(),
            "Port 99999999 was invalid as part of range 12-99999999"
        );
        assert_eq!(
            expand_ports("3,4-8,1256789-98").unwrap_err().to_string(),
            "Port 1256789 was invalid as part of range 1256789-98"
        );
    }

    #[test]
    fn test_empty_expression_is_invalid() {
        assert_eq!(
            expand_ports("").unwrap_err(),
            PortError::InvalidPort { port: String::new() }
        );
    }
}
