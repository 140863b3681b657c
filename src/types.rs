//! The type descriptors of the default schema.
//!
//! Implicit, tried in this order:
//!
//! | tag | claims | styles |
//! |---|---|---|
//! | `null` | `Value::Null` | `canonical`, `lowercase` (default), `uppercase`, `camelcase` |
//! | `bool` | `Value::Bool` | `lowercase` (default), `uppercase`, `camelcase` |
//! | `int` | `Number::Integer` | `binary`, `octal`, `decimal` (default), `hexadecimal` |
//! | `int` | `BigInt` payloads | as above |
//! | `float` | `Number::Float` | `lowercase` (default), `uppercase`, `camelcase` |
//! | `timestamp` | `DateTime<Utc>` payloads | |
//! | `merge` | nothing | |
//!
//! Explicit: `binary` for `Vec<u8>` payloads (base64) and `set` for
//! `BTreeSet<String>` payloads.
//!
//! Every implicit type also carries a lexical recognizer, so that a string
//! such as `"null"`, `"0x1F"` or `"2001-12-14"` is quoted when dumped.

use crate::schema::YamlType;
use crate::{Error, Mapping, Number, Result, Value};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, SecondsFormat, Utc};
use num_bigint::{BigInt, Sign};
use std::collections::BTreeSet;
use std::fmt::{Binary, Display, Octal, UpperHex};

pub const NULL_TAG: &str = "tag:yaml.org,2002:null";
pub const BOOL_TAG: &str = "tag:yaml.org,2002:bool";
pub const INT_TAG: &str = "tag:yaml.org,2002:int";
pub const FLOAT_TAG: &str = "tag:yaml.org,2002:float";
pub const TIMESTAMP_TAG: &str = "tag:yaml.org,2002:timestamp";
pub const MERGE_TAG: &str = "tag:yaml.org,2002:merge";
pub const BINARY_TAG: &str = "tag:yaml.org,2002:binary";
pub const SET_TAG: &str = "tag:yaml.org,2002:set";

pub(crate) fn implicit_types() -> Vec<YamlType> {
    vec![
        null_type(),
        bool_type(),
        int_type(),
        bigint_type(),
        float_type(),
        timestamp_type(),
        merge_type(),
    ]
}

pub(crate) fn explicit_types() -> Vec<YamlType> {
    vec![binary_type(), set_type()]
}

fn mismatch(value: &Value) -> Error {
    Error::unresolved_type(&value.kind_name())
}

fn null_type() -> YamlType {
    YamlType::new(NULL_TAG)
        .predicate(Value::is_null)
        .resolve(is_null)
        .represent_style("canonical", |_, _| Ok(Value::from("~")))
        .represent_style("lowercase", |_, _| Ok(Value::from("null")))
        .represent_style("uppercase", |_, _| Ok(Value::from("NULL")))
        .represent_style("camelcase", |_, _| Ok(Value::from("Null")))
        .default_style("lowercase")
}

fn bool_type() -> YamlType {
    fn spell(value: &Value, style: &str) -> Result<Value> {
        let b = value.as_bool().ok_or_else(|| mismatch(value))?;
        let text = match (style, b) {
            ("uppercase", true) => "TRUE",
            ("uppercase", false) => "FALSE",
            ("camelcase", true) => "True",
            ("camelcase", false) => "False",
            (_, true) => "true",
            (_, false) => "false",
        };
        Ok(Value::from(text))
    }

    YamlType::new(BOOL_TAG)
        .predicate(Value::is_bool)
        .resolve(is_bool)
        .represent_style("lowercase", spell)
        .represent_style("uppercase", spell)
        .represent_style("camelcase", spell)
        .default_style("lowercase")
}

fn format_int<T>(negative: bool, magnitude: T, style: &str) -> String
where
    T: Binary + Octal + UpperHex + Display,
{
    let sign = if negative { "-" } else { "" };
    match style {
        "binary" => format!("{}0b{:b}", sign, magnitude),
        "octal" => format!("{}0o{:o}", sign, magnitude),
        "hexadecimal" => format!("{}0x{:X}", sign, magnitude),
        _ => format!("{}{}", sign, magnitude),
    }
}

fn with_int_styles(ty: YamlType, represent: fn(&Value, &str) -> Result<Value>) -> YamlType {
    ty.resolve(is_int)
        .represent_style("binary", represent)
        .represent_style("octal", represent)
        .represent_style("decimal", represent)
        .represent_style("hexadecimal", represent)
        .default_style("decimal")
        .style_alias("2", "binary")
        .style_alias("bin", "binary")
        .style_alias("8", "octal")
        .style_alias("oct", "octal")
        .style_alias("10", "decimal")
        .style_alias("dec", "decimal")
        .style_alias("16", "hexadecimal")
        .style_alias("hex", "hexadecimal")
}

fn int_type() -> YamlType {
    fn represent(value: &Value, style: &str) -> Result<Value> {
        match value {
            Value::Number(Number::Integer(n)) => {
                Ok(Value::from(format_int(*n < 0, n.unsigned_abs(), style)))
            }
            other => Err(mismatch(other)),
        }
    }

    let ty = YamlType::new(INT_TAG)
        .predicate(|v| matches!(v, Value::Number(Number::Integer(_))));
    with_int_styles(ty, represent)
}

fn bigint_type() -> YamlType {
    fn represent(value: &Value, style: &str) -> Result<Value> {
        let n = value
            .as_tagged()
            .and_then(|t| t.downcast_ref::<BigInt>())
            .ok_or_else(|| mismatch(value))?;
        Ok(Value::from(format_int(
            n.sign() == Sign::Minus,
            n.magnitude(),
            style,
        )))
    }

    with_int_styles(YamlType::new(INT_TAG).instance_of::<BigInt>(), represent)
}

fn float_type() -> YamlType {
    YamlType::new(FLOAT_TAG)
        .predicate(|v| matches!(v, Value::Number(Number::Float(_))))
        .resolve(is_float)
        .represent(|value, style| match value {
            Value::Number(Number::Float(f)) => Ok(Value::from(format_float(*f, style))),
            other => Err(mismatch(other)),
        })
        .default_style("lowercase")
}

fn format_float(f: f64, style: &str) -> String {
    let special = |lower: &'static str, upper: &'static str, camel: &'static str| match style {
        "uppercase" => upper,
        "camelcase" => camel,
        _ => lower,
    };
    if f.is_nan() {
        return special(".nan", ".NAN", ".NaN").to_string();
    }
    if f.is_infinite() {
        let text = if f > 0.0 {
            special(".inf", ".INF", ".Inf")
        } else {
            special("-.inf", "-.INF", "-.Inf")
        };
        return text.to_string();
    }
    if f == 0.0 && f.is_sign_negative() {
        return "-0.0".to_string();
    }
    // Debug output always carries a `.` or an exponent; give exponent
    // forms a fraction so they read back as floats.
    let text = format!("{:?}", f);
    match text.split_once('e') {
        Some((mantissa, exp)) if !mantissa.contains('.') => format!("{}.0e{}", mantissa, exp),
        _ => text,
    }
}

fn timestamp_type() -> YamlType {
    YamlType::new(TIMESTAMP_TAG)
        .instance_of::<DateTime<Utc>>()
        .resolve(is_timestamp)
        .represent(|value, _| {
            let at = value
                .as_tagged()
                .and_then(|t| t.downcast_ref::<DateTime<Utc>>())
                .ok_or_else(|| mismatch(value))?;
            Ok(Value::from(at.to_rfc3339_opts(SecondsFormat::Millis, true)))
        })
}

fn merge_type() -> YamlType {
    YamlType::new(MERGE_TAG).resolve(|s| s == "<<")
}

fn binary_type() -> YamlType {
    YamlType::new(BINARY_TAG)
        .instance_of::<Vec<u8>>()
        .represent(|value, _| {
            let bytes = value
                .as_tagged()
                .and_then(|t| t.downcast_ref::<Vec<u8>>())
                .ok_or_else(|| mismatch(value))?;
            Ok(Value::from(STANDARD.encode(bytes)))
        })
}

fn set_type() -> YamlType {
    YamlType::new(SET_TAG)
        .instance_of::<BTreeSet<String>>()
        .represent(|value, _| {
            let members = value
                .as_tagged()
                .and_then(|t| t.downcast_ref::<BTreeSet<String>>())
                .ok_or_else(|| mismatch(value))?;
            Ok(Value::Mapping(
                members
                    .iter()
                    .map(|m| (Value::from(m.as_str()), Value::Null))
                    .collect::<Mapping>(),
            ))
        })
}

/// Byte cursor for the lexical recognizers below. All of them only accept
/// ASCII, so working on bytes is safe.
#[derive(Clone, Copy)]
struct Cursor<'a> {
    rest: &'a [u8],
}

impl<'a> Cursor<'a> {
    fn new(s: &'a str) -> Self {
        Cursor { rest: s.as_bytes() }
    }

    fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    fn peek(&self) -> Option<u8> {
        self.rest.first().copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        self.eat_if(|b| b == byte)
    }

    fn eat_if(&mut self, f: impl Fn(u8) -> bool) -> bool {
        match self.rest.split_first() {
            Some((&b, rest)) if f(b) => {
                self.rest = rest;
                true
            }
            _ => false,
        }
    }

    fn eat_while(&mut self, f: impl Fn(u8) -> bool) -> usize {
        let n = self.rest.iter().take_while(|&&b| f(b)).count();
        self.rest = &self.rest[n..];
        n
    }

    fn eat_sign(&mut self) {
        self.eat_if(|b| b == b'+' || b == b'-');
    }

    /// Consumes between `min` and `max` ASCII digits.
    fn digits(&mut self, min: usize, max: usize) -> bool {
        let n = self
            .rest
            .iter()
            .take(max)
            .take_while(|b| b.is_ascii_digit())
            .count();
        self.rest = &self.rest[n..];
        n >= min
    }

    fn rest_is(&self, options: &[&str]) -> bool {
        options.iter().any(|o| o.as_bytes() == self.rest)
    }
}

fn is_digit_or_underscore(b: u8) -> bool {
    b.is_ascii_digit() || b == b'_'
}

/// `~`, `null`, `Null`, `NULL` and the empty string.
pub fn is_null(s: &str) -> bool {
    matches!(s, "" | "~" | "null" | "Null" | "NULL")
}

pub fn is_bool(s: &str) -> bool {
    matches!(s, "true" | "True" | "TRUE" | "false" | "False" | "FALSE")
}

/// Decimal, `0b`, `0o`, `0x`, leading-zero octal and base-60 integers, with
/// an optional sign and `_` separators.
///
/// # Examples
///
/// ```rust
/// use yaml_dump::types::is_int;
///
/// assert!(is_int("-1_000"));
/// assert!(is_int("0x1F"));
/// assert!(is_int("1:30"));
/// assert!(!is_int("1_"));
/// assert!(!is_int("0b"));
/// ```
pub fn is_int(s: &str) -> bool {
    if s.ends_with('_') {
        return false;
    }
    let mut c = Cursor::new(s);
    c.eat_sign();

    if c.eat(b'0') {
        if c.is_empty() {
            return true;
        }
        let digit: fn(u8) -> bool = if c.eat(b'b') {
            |b| b == b'0' || b == b'1'
        } else if c.eat(b'x') {
            |b| b.is_ascii_hexdigit()
        } else {
            c.eat(b'o');
            |b| (b'0'..=b'7').contains(&b)
        };
        let mut has_digits = false;
        for &b in c.rest {
            if b == b'_' {
                continue;
            }
            if !digit(b) {
                return false;
            }
            has_digits = true;
        }
        return has_digits;
    }

    if c.peek() == Some(b'_') {
        return false;
    }
    let mut has_digits = false;
    while let Some(b) = c.peek() {
        if b == b':' {
            break;
        }
        if !is_digit_or_underscore(b) {
            return false;
        }
        has_digits |= b != b'_';
        c.eat(b);
    }
    if !has_digits {
        return false;
    }
    if c.is_empty() {
        return true;
    }
    sexagesimal_tail(&mut c) && c.is_empty()
}

/// One or more `:` groups of one or two digits below 60.
fn sexagesimal_tail(c: &mut Cursor<'_>) -> bool {
    let mut groups = 0;
    while c.eat(b':') {
        let two = c.rest.len() >= 2
            && (b'0'..=b'5').contains(&c.rest[0])
            && c.rest[1].is_ascii_digit();
        if two {
            c.rest = &c.rest[2..];
        } else if !c.eat_if(|b| b.is_ascii_digit()) {
            return false;
        }
        groups += 1;
    }
    groups > 0
}

/// Floats in the YAML 1.1 grammar: `1.5`, `-2e3`, `.5`, `1:30.0`, `.inf`,
/// `.NaN` and friends. Plain integers are accepted as well.
///
/// # Examples
///
/// ```rust
/// use yaml_dump::types::is_float;
///
/// assert!(is_float("3.14"));
/// assert!(is_float("-.Inf"));
/// assert!(is_float("1e10"));
/// assert!(!is_float("1.2.3"));
/// ```
pub fn is_float(s: &str) -> bool {
    if s.ends_with('_') {
        return false;
    }
    let start = Cursor::new(s);
    decimal_float(start) || dotted_float(start) || sexagesimal_float(start) || special_float(start)
}

fn exponent_or_end(mut c: Cursor<'_>) -> bool {
    if c.is_empty() {
        return true;
    }
    if !c.eat_if(|b| b == b'e' || b == b'E') {
        return false;
    }
    c.eat_sign();
    c.eat_while(|b| b.is_ascii_digit()) > 0 && c.is_empty()
}

fn decimal_float(mut c: Cursor<'_>) -> bool {
    c.eat_sign();
    if !c.eat(b'0') {
        if !c.eat_if(|b| (b'1'..=b'9').contains(&b)) {
            return false;
        }
        c.eat_while(is_digit_or_underscore);
    }
    if c.eat(b'.') {
        c.eat_while(is_digit_or_underscore);
    }
    exponent_or_end(c)
}

fn dotted_float(mut c: Cursor<'_>) -> bool {
    c.eat(b'.') && c.eat_while(is_digit_or_underscore) > 0 && exponent_or_end(c)
}

fn sexagesimal_float(mut c: Cursor<'_>) -> bool {
    c.eat_sign();
    if !c.eat_if(|b| b.is_ascii_digit()) {
        return false;
    }
    c.eat_while(is_digit_or_underscore);
    if !sexagesimal_tail(&mut c) || !c.eat(b'.') {
        return false;
    }
    c.eat_while(is_digit_or_underscore);
    c.is_empty()
}

fn special_float(mut c: Cursor<'_>) -> bool {
    if c.rest_is(&[".nan", ".NaN", ".NAN"]) {
        return true;
    }
    c.eat_sign();
    c.rest_is(&[".inf", ".Inf", ".INF"])
}

/// `YYYY-MM-DD`, or a full timestamp with a `T`/space separator, optional
/// fraction and optional `Z` or numeric offset.
///
/// # Examples
///
/// ```rust
/// use yaml_dump::types::is_timestamp;
///
/// assert!(is_timestamp("2001-12-14"));
/// assert!(is_timestamp("2001-12-14t21:59:43.10-05:00"));
/// assert!(is_timestamp("2001-12-14 21:59:43.10 Z"));
/// assert!(!is_timestamp("2001-12"));
/// ```
pub fn is_timestamp(s: &str) -> bool {
    let mut c = Cursor::new(s);
    if !(c.digits(4, 4) && c.eat(b'-')) {
        return false;
    }

    let mut date_only = c;
    if date_only.digits(2, 2)
        && date_only.eat(b'-')
        && date_only.digits(2, 2)
        && date_only.is_empty()
    {
        return true;
    }

    if !(c.digits(1, 2) && c.eat(b'-') && c.digits(1, 2)) {
        return false;
    }
    let is_blank = |b: u8| b == b' ' || b == b'\t';
    if !c.eat_if(|b| b == b'T' || b == b't') && c.eat_while(is_blank) == 0 {
        return false;
    }
    if !(c.digits(1, 2) && c.eat(b':') && c.digits(2, 2) && c.eat(b':') && c.digits(2, 2)) {
        return false;
    }
    if c.eat(b'.') {
        c.eat_while(|b| b.is_ascii_digit());
    }
    if c.is_empty() {
        return true;
    }

    c.eat_while(is_blank);
    if c.eat(b'Z') {
        return c.is_empty();
    }
    if !c.eat_if(|b| b == b'+' || b == b'-') || !c.digits(1, 2) {
        return false;
    }
    if c.eat(b':') && !c.digits(2, 2) {
        return false;
    }
    c.is_empty()
}
