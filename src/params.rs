use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;

/// A template parameter: either an integer, or a verbatim C++ expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
    Int(i64),
    Text(String),
}

impl ParamValue {
    /// Parses `0x`-prefixed hex or decimal integers, anything else is kept as text.
    pub fn parse(s: &str) -> ParamValue {
        let s = s.trim();
        let (digits, neg) = match s.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        let parsed = match digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
        {
            Some(hex) => i64::from_str_radix(hex, 16).ok(),
            None => digits.parse::<i64>().ok(),
        };
        match parsed {
            Some(v) if neg => ParamValue::Int(-v),
            Some(v) => ParamValue::Int(v),
            None => ParamValue::Text(s.to_owned()),
        }
    }
    /// Renders integers as lowercase hex literals, eg. `0x3120` or `0x0`.
    pub fn to_hex(&self) -> String {
        match self {
            ParamValue::Int(v) if *v < 0 => format!("-{:#x}", -v),
            ParamValue::Int(v) => format!("{:#x}", v),
            ParamValue::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl<'a> From<&'a str> for ParamValue {
    fn from(s: &'a str) -> Self {
        ParamValue::Text(s.to_owned())
    }
}

/// A named set of template parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    pub fn new() -> Params {
        Params::default()
    }
    /// Builder-style insert of an integer.
    pub fn int(mut self, key: &str, value: i64) -> Params {
        self.insert(key, ParamValue::Int(value));
        self
    }
    /// Builder-style insert of a verbatim expression.
    pub fn text(mut self, key: &str, value: &str) -> Params {
        self.insert(key, ParamValue::from(value));
        self
    }
    pub fn insert(&mut self, key: &str, value: ParamValue) {
        self.0.insert(key.to_owned(), value);
    }
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Returns a copy of `self` with every entry of `overrides` replacing or adding to it.
    pub fn merged(&self, overrides: &Params) -> Params {
        let mut merged = self.clone();
        for (k, v) in overrides.0.iter() {
            merged.0.insert(k.clone(), v.clone());
        }
        merged
    }

    fn require(&self, key: &str) -> Result<&ParamValue> {
        self.get(key)
            .ok_or_else(|| Error::MissingParam(key.to_owned()))
    }
    /// The parameter as a hex literal (integers) or verbatim text.
    pub fn hex(&self, key: &str) -> Result<String> {
        self.require(key).map(ParamValue::to_hex)
    }
    pub fn hex_or(&self, key: &str, default: i64) -> String {
        self.get(key)
            .map(ParamValue::to_hex)
            .unwrap_or_else(|| ParamValue::Int(default).to_hex())
    }
    /// The parameter in decimal (integers) or verbatim text.
    pub fn plain(&self, key: &str) -> Result<String> {
        self.require(key).map(ToString::to_string)
    }
    pub fn plain_or(&self, key: &str, default: &str) -> String {
        self.get(key)
            .map(ToString::to_string)
            .unwrap_or_else(|| default.to_owned())
    }
    /// The parameter as a positive count, eg. a lane width.
    pub fn count(&self, key: &str) -> Result<usize> {
        match self.require(key)? {
            ParamValue::Int(v) if *v > 0 => Ok(*v as usize),
            _ => Err(Error::InvalidParam {
                key: key.to_owned(),
                expected: "a positive integer",
            }),
        }
    }
}

/// Parses a `key=value` override.
pub fn parse_override(s: &str) -> std::result::Result<(String, ParamValue), String> {
    let mut split = s.splitn(2, '=');
    match (split.next(), split.next()) {
        (Some(k), Some(v)) if !k.trim().is_empty() => {
            Ok((k.trim().to_owned(), ParamValue::parse(v)))
        }
        _ => Err(format!("expected key=value, got \"{}\"", s)),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn values_parse_as_hex_decimal_or_text() {
        assert_eq!(ParamValue::parse("0x3120"), ParamValue::Int(0x3120));
        assert_eq!(ParamValue::parse("32"), ParamValue::Int(32));
        assert_eq!(ParamValue::parse("-4"), ParamValue::Int(-4));
        assert_eq!(ParamValue::parse("DX*4"), ParamValue::Text("DX*4".to_owned()));
    }

    #[test]
    fn hex_is_lowercase_and_unpadded() {
        assert_eq!(ParamValue::Int(0).to_hex(), "0x0");
        assert_eq!(ParamValue::Int(0xFFFFFF00).to_hex(), "0xffffff00");
        assert_eq!(ParamValue::from("DX*4").to_hex(), "DX*4");
    }

    #[test]
    fn overrides_win_on_collision() {
        let defaults = Params::new().int("xstep", 16).int("xsquare", 0x3120);
        let overrides = Params::new().int("xstep", 32).int("zstep", 2);
        let merged = defaults.merged(&overrides);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.plain("xstep").unwrap(), "32");
        assert_eq!(merged.hex("xsquare").unwrap(), "0x3120");
        assert_eq!(merged.plain("zstep").unwrap(), "2");
        // Defaults are left untouched
        assert_eq!(defaults.plain("xstep").unwrap(), "16");
    }

    #[test]
    fn missing_and_invalid_params_are_reported() {
        let params = Params::new().text("V", "eight");
        match params.count("V") {
            Err(Error::InvalidParam { key, .. }) => assert_eq!(key, "V"),
            other => panic!("unexpected {:?}", other),
        }
        match params.hex("xoffsets") {
            Err(Error::MissingParam(key)) => assert_eq!(key, "xoffsets"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(params.hex_or("zoffsets", 0), "0x0");
        assert_eq!(params.plain_or("Q_symbol", "Q"), "Q");
    }

    #[test]
    fn overrides_parse_from_key_value() {
        assert_eq!(
            parse_override("xstep=0x20").unwrap(),
            ("xstep".to_owned(), ParamValue::Int(32))
        );
        assert!(parse_override("xstep").is_err());
        assert!(parse_override("=3").is_err());
    }
}
