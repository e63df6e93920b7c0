// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sync-expression parsing.
//!
//! A sync expression is one of `start`, `finish`, `default`, or an anchor
//! followed by a signed offset such as `start+3` or `finish-1.5`. The split
//! is first-match: `+` is tried before `-`, and only the first occurrence of
//! the chosen separator splits the string. Anything left unparsable maps to
//! [`ResolveError::UnknownSyncBase`].

use crate::command::{SyncAnchor, SyncSpec};
use crate::error::ResolveError;

/// Parse an optional sync expression into an anchor and signed offset.
///
/// An absent expression means default chaining with offset zero. A bare
/// anchor (`start`, `finish`) means offset zero relative to that anchor.
pub fn parse_sync(expr: Option<&str>) -> Result<SyncSpec, ResolveError> {
    let Some(expr) = expr else {
        return Ok(SyncSpec::default());
    };

    let (base, offset) = if let Some((base, rest)) = expr.split_once('+') {
        (base, parse_offset(expr, rest)?)
    } else if let Some((base, rest)) = expr.split_once('-') {
        (base, -parse_offset(expr, rest)?)
    } else {
        (expr, 0.0)
    };

    let anchor = match base {
        "default" => SyncAnchor::Default,
        "start" => SyncAnchor::Start,
        "finish" => SyncAnchor::Finish,
        _ => return Err(ResolveError::UnknownSyncBase(base.to_string())),
    };

    Ok(SyncSpec::new(anchor, offset))
}

fn parse_offset(expr: &str, rest: &str) -> Result<f64, ResolveError> {
    rest.parse::<f64>()
        .map_err(|_| ResolveError::UnknownSyncBase(expr.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_expression_is_default() {
        assert_eq!(parse_sync(None).unwrap(), SyncSpec::default());
    }

    #[test]
    fn test_bare_anchors() {
        assert_eq!(
            parse_sync(Some("start")).unwrap(),
            SyncSpec::new(SyncAnchor::Start, 0.0)
        );
        assert_eq!(
            parse_sync(Some("finish")).unwrap(),
            SyncSpec::new(SyncAnchor::Finish, 0.0)
        );
        assert_eq!(
            parse_sync(Some("default")).unwrap(),
            SyncSpec::new(SyncAnchor::Default, 0.0)
        );
    }

    #[test]
    fn test_positive_offsets() {
        assert_eq!(
            parse_sync(Some("start+3")).unwrap(),
            SyncSpec::new(SyncAnchor::Start, 3.0)
        );
        assert_eq!(
            parse_sync(Some("finish+0.25")).unwrap(),
            SyncSpec::new(SyncAnchor::Finish, 0.25)
        );
    }

    #[test]
    fn test_negative_offsets() {
        assert_eq!(
            parse_sync(Some("start-2")).unwrap(),
            SyncSpec::new(SyncAnchor::Start, -2.0)
        );
        assert_eq!(
            parse_sync(Some("finish-1.5")).unwrap(),
            SyncSpec::new(SyncAnchor::Finish, -1.5)
        );
    }

    #[test]
    fn test_unknown_base() {
        assert!(matches!(
            parse_sync(Some("middle+3")),
            Err(ResolveError::UnknownSyncBase(b)) if b == "middle"
        ));
        assert!(matches!(
            parse_sync(Some("bogus")),
            Err(ResolveError::UnknownSyncBase(b)) if b == "bogus"
        ));
    }

    #[test]
    fn test_plus_splits_before_minus() {
        // "start+-3" splits on the '+', leaving "-3" as a valid offset
        assert_eq!(
            parse_sync(Some("start+-3")).unwrap(),
            SyncSpec::new(SyncAnchor::Start, -3.0)
        );
        // "start-+3" splits on the '+' first, so the base is "start-"
        assert!(matches!(
            parse_sync(Some("start-+3")),
            Err(ResolveError::UnknownSyncBase(b)) if b == "start-"
        ));
    }

    #[test]
    fn test_unparsable_offset() {
        assert!(matches!(
            parse_sync(Some("start+abc")),
            Err(ResolveError::UnknownSyncBase(e)) if e == "start+abc"
        ));
        // second separator ends up inside the offset token
        assert!(matches!(
            parse_sync(Some("start+3+4")),
            Err(ResolveError::UnknownSyncBase(e)) if e == "start+3+4"
        ));
    }
}
