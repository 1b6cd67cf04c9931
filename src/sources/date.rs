use chrono::NaiveDate;

use crate::config::{LINK_MARKER, LINK_SUFFIX};
use crate::error::ScrapeError;

/// Extract the meeting date from a projection-table URL such as
/// `.../fomcprojtabl20120125.htm` (the last 8 characters before `.htm`, as `YYYYMMDD`).
pub fn parse_date(url: &str) -> Result<NaiveDate, ScrapeError> {
    let mut parts = url.split(LINK_MARKER);
    parts.next();
    let tail = parts
        .next()
        .ok_or_else(|| ScrapeError::malformed(url, format!("missing `{}` marker", LINK_MARKER)))?;

    // anything from `.htm` onwards (`.html`, query, fragment) is not part of the date
    let stem = match tail.find(LINK_SUFFIX) {
        Some(i) => &tail[..i],
        None => tail,
    };

    let digits = stem
        .len()
        .checked_sub(8)
        .and_then(|start| stem.get(start..))
        .ok_or_else(|| ScrapeError::malformed(url, "fewer than 8 characters before `.htm`"))?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ScrapeError::malformed(
            url,
            format!("`{}` is not a YYYYMMDD date", digits),
        ));
    }

    let year: i32 = digits[0..4].parse().map_err(|_| ScrapeError::malformed(url, "bad year"))?;
    let month: u32 = digits[4..6].parse().map_err(|_| ScrapeError::malformed(url, "bad month"))?;
    let day: u32 = digits[6..8].parse().map_err(|_| ScrapeError::malformed(url, "bad day"))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ScrapeError::malformed(url, format!("`{}` is not a calendar date", digits)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_plain_projection_url() {
        let url = "https://www.federalreserve.gov/monetarypolicy/fomcprojtabl20120125.htm";
        assert_eq!(parse_date(url).unwrap(), ymd(2012, 1, 25));
    }

    #[test]
    fn ignores_infix_before_date() {
        let url = "https://www.federalreserve.gov/monetarypolicy/fomcprojtabl_accessible20231213.htm";
        assert_eq!(parse_date(url).unwrap(), ymd(2023, 12, 13));
    }

    #[test]
    fn ignores_anything_after_suffix() {
        assert_eq!(
            parse_date("/monetarypolicy/fomcprojtabl20200610.html").unwrap(),
            ymd(2020, 6, 10)
        );
        assert_eq!(
            parse_date("/monetarypolicy/fomcprojtabl20200610.htm?page=1#dots").unwrap(),
            ymd(2020, 6, 10)
        );
    }

    #[test]
    fn missing_marker_is_malformed() {
        let err = parse_date("https://www.federalreserve.gov/monetarypolicy/fomcminutes20120125.htm")
            .unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedUrl { .. }));
    }

    #[test]
    fn impossible_or_short_dates_are_malformed() {
        for url in [
            "/fomcprojtabl20121345.htm",
            "/fomcprojtabl20120230.htm",
            "/fomcprojtabl2012012.htm",
            "/fomcprojtablabcdefgh.htm",
            "/fomcprojtabl.htm",
        ] {
            assert!(
                matches!(parse_date(url), Err(ScrapeError::MalformedUrl { .. })),
                "{url} should be malformed"
            );
        }
    }

    #[test]
    fn non_ascii_tail_does_not_panic() {
        assert!(parse_date("/fomcprojtabl2012012é.htm").is_err());
    }
}
