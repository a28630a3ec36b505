//! Parser for the Nagios plugin performance data emitted by the checks.
//!
//! Format: `label=value[UOM];[warn];[crit];[min];[max]`, tokens separated by
//! whitespace. Labels containing spaces or `=` are single quoted, a literal
//! quote inside a quoted label is written as `''`.
//!
//! Thresholds follow the plugin range syntax:
//! - `10` a single value
//! - `10:20` a min/max pair
//! - `10:` a lower bound only, `~:20` an upper bound only
//! - a leading `@` (inside range) is accepted and ignored

use super::{MetricSample, StorageRef, Threshold};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PerfdataError {
    #[error("empty label in '{0}'")]
    EmptyLabel(String),
    #[error("missing '=' in '{0}'")]
    MissingValue(String),
    #[error("unterminated quote in '{0}'")]
    UnterminatedQuote(String),
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error("invalid threshold: {0}")]
    InvalidThreshold(String),
}

#[derive(Debug, Default, PartialEq)]
struct Range {
    single: Option<Threshold>,
    min: Option<Threshold>,
    max: Option<Threshold>,
}

/// Parse a perfdata string into samples backed by `rrd_file`. Data sources
/// are numbered from 1 in input order.
pub fn parse(text: &str, rrd_file: &str) -> Result<Vec<MetricSample>, PerfdataError> {
    let mut samples = Vec::new();

    for (idx, token) in tokenize(text)?.into_iter().enumerate() {
        let ds = idx as u32 + 1;
        samples.push(parse_token(&token, StorageRef::new(rrd_file, ds))?);
    }

    Ok(samples)
}

/// Split on whitespace outside of single quotes.
fn tokenize(text: &str) -> Result<Vec<String>, PerfdataError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in text.chars() {
        match c {
            '\'' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }

    if in_quotes {
        return Err(PerfdataError::UnterminatedQuote(current));
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    Ok(tokens)
}

fn parse_token(token: &str, storage: StorageRef) -> Result<MetricSample, PerfdataError> {
    let (label, data) = split_label(token)?;

    if label.is_empty() {
        return Err(PerfdataError::EmptyLabel(token.to_string()));
    }

    let mut fields = data.split(';');

    let (value, unit) = split_unit(fields.next().unwrap_or(""));
    if value != "U" && value.parse::<f64>().is_err() {
        return Err(PerfdataError::InvalidValue(token.to_string()));
    }

    let warn = parse_range(fields.next().unwrap_or(""))?;
    let crit = parse_range(fields.next().unwrap_or(""))?;
    let min = parse_threshold(fields.next().unwrap_or(""))?;
    let max = parse_threshold(fields.next().unwrap_or(""))?;

    // the round-robin store does not allow ':' in data source names
    let name = label.replace(':', "_");

    // the graphing side expects a literal percent sign to be escaped
    let unit = if unit == "%" { "%%".to_string() } else { unit.to_string() };

    Ok(MetricSample {
        label: Some(label),
        name,
        unit,
        storage,
        warn: warn.single,
        warn_min: warn.min,
        warn_max: warn.max,
        crit: crit.single,
        crit_min: crit.min,
        crit_max: crit.max,
        min,
        max,
    })
}

fn split_label(token: &str) -> Result<(String, &str), PerfdataError> {
    if let Some(quoted) = token.strip_prefix('\'') {
        // find the closing quote, skipping '' escapes
        let mut label = String::new();
        let mut chars = quoted.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if c != '\'' {
                label.push(c);
                continue;
            }

            if let Some((_, '\'')) = chars.peek() {
                label.push('\'');
                chars.next();
                continue;
            }

            let rest = &quoted[i + 1..];
            return match rest.strip_prefix('=') {
                Some(data) => Ok((label, data)),
                None => Err(PerfdataError::MissingValue(token.to_string())),
            };
        }

        return Err(PerfdataError::UnterminatedQuote(token.to_string()));
    }

    match token.split_once('=') {
        Some((label, data)) => Ok((label.to_string(), data)),
        None => Err(PerfdataError::MissingValue(token.to_string())),
    }
}

fn split_unit(s: &str) -> (&str, &str) {
    // a bare 'U' marks an unknown value
    if s.starts_with('U') {
        return (&s[..1], &s[1..]);
    }

    let bytes = s.as_bytes();
    let digit_at = |i: usize| bytes.get(i).is_some_and(|b| b.is_ascii_digit());

    let mut end = 0;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' | b'.' => end += 1,
            b'-' | b'+' if end == 0 => end += 1,
            // only an exponent if digits follow, so units like 'events' survive
            b'e' | b'E' if digit_at(end + 1) => end += 2,
            b'e' | b'E' if matches!(bytes.get(end + 1), Some(b'-' | b'+')) && digit_at(end + 2) => {
                end += 3
            }
            _ => break,
        }
    }

    (&s[..end], &s[end..])
}

fn parse_threshold(s: &str) -> Result<Option<Threshold>, PerfdataError> {
    let s = s.trim();

    if s.is_empty() {
        return Ok(None);
    }

    s.parse::<Threshold>()
        .map(Some)
        .map_err(|_| PerfdataError::InvalidThreshold(s.to_string()))
}

fn parse_range(s: &str) -> Result<Range, PerfdataError> {
    let s = s.trim();
    let s = s.strip_prefix('@').unwrap_or(s);

    match s.split_once(':') {
        None => Ok(Range {
            single: parse_threshold(s)?,
            ..Default::default()
        }),
        Some((min, max)) => {
            let min = if min == "~" { None } else { parse_threshold(min)? };

            Ok(Range {
                single: None,
                min,
                max: parse_threshold(max)?,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{Class, Limit};

    #[test]
    fn parses_simple_values() {
        let samples = parse("memtotal=8061204 slab=201040;;;0;8061204", "/tmp/mem.rrd").unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].name, "memtotal");
        assert_eq!(samples[0].storage, StorageRef::new("/tmp/mem.rrd", 1));
        assert_eq!(samples[1].storage.ds, 2);
        assert_eq!(samples[1].min.as_ref().unwrap().value(), 0.0);
        assert_eq!(samples[1].max.as_ref().unwrap().as_str(), "8061204");
    }

    #[test]
    fn parses_units_and_thresholds() {
        let samples = parse("'12V'=12.1500volts;11.5;11.0 hum1=45%;20:60;10:70;0;100", "x.rrd").unwrap();

        let volts = &samples[0];
        assert_eq!(volts.name, "12V");
        assert_eq!(volts.unit, "volts");
        assert!(matches!(volts.limit(Class::Warning), Limit::Single(t) if t.as_str() == "11.5"));
        assert!(matches!(volts.limit(Class::Critical), Limit::Single(t) if t.as_str() == "11.0"));

        let hum = &samples[1];
        assert_eq!(hum.unit, "%%");
        assert!(hum.warn.is_none());
        assert_eq!(hum.warn_min.as_ref().unwrap().value(), 20.0);
        assert_eq!(hum.warn_max.as_ref().unwrap().value(), 60.0);
        assert!(matches!(hum.limit(Class::Critical), Limit::Range { .. }));
    }

    #[test]
    fn quoted_labels() {
        let samples = parse("'CPU Temp'=40C 'it''s'=1", "x.rrd").unwrap();
        assert_eq!(samples[0].label(), "CPU Temp");
        assert_eq!(samples[0].unit, "C");
        assert_eq!(samples[1].label(), "it's");
    }

    #[test]
    fn colon_in_label_is_replaced() {
        let samples = parse("tcp:v3=0.001234s;1.000000", "nfs.rrd").unwrap();
        assert_eq!(samples[0].name, "tcp_v3");
        assert_eq!(samples[0].label(), "tcp:v3");
        assert_eq!(samples[0].unit, "s");
    }

    #[test]
    fn one_sided_ranges_do_not_form_a_pair() {
        let samples = parse("a=1;10:;~:20", "x.rrd").unwrap();
        assert_eq!(samples[0].warn_min.as_ref().unwrap().value(), 10.0);
        assert!(samples[0].warn_max.is_none());
        assert_eq!(samples[0].limit(Class::Warning), Limit::None);
        assert!(samples[0].crit_min.is_none());
        assert_eq!(samples[0].crit_max.as_ref().unwrap().value(), 20.0);
    }

    #[test]
    fn units_starting_with_an_exponent_letter() {
        let samples = parse("queue=5events;10;20 rate=1.5e3 tiny=2E-2s", "x.rrd").unwrap();

        assert_eq!(samples[0].unit, "events");
        assert_eq!(samples[0].warn.as_ref().unwrap().value(), 10.0);
        assert_eq!(samples[1].unit, "");
        assert_eq!(samples[2].unit, "s");

        let samples = parse("x=7Eb", "x.rrd").unwrap();
        assert_eq!(samples[0].unit, "Eb");
    }

    #[test]
    fn unknown_value() {
        let samples = parse("a=U;1;2", "x.rrd").unwrap();
        assert_eq!(samples[0].unit, "");
    }

    #[test]
    fn errors() {
        assert_eq!(
            parse("novalue", "x.rrd"),
            Err(PerfdataError::MissingValue("novalue".to_string()))
        );
        assert!(matches!(parse("=1", "x.rrd"), Err(PerfdataError::EmptyLabel(_))));
        assert!(matches!(parse("'open=1", "x.rrd"), Err(PerfdataError::UnterminatedQuote(_))));
        assert!(matches!(parse("a=abc", "x.rrd"), Err(PerfdataError::InvalidValue(_))));
        assert!(matches!(parse("a=1;x", "x.rrd"), Err(PerfdataError::InvalidThreshold(_))));
    }

    #[test]
    fn empty_input() {
        assert!(parse("   ", "x.rrd").unwrap().is_empty());
    }
}
