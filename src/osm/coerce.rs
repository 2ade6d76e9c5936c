//! Attribute value coercion.
//!
//! Every attribute value is classified as an integer, a float or a string
//! before it is written into the record text:
//!
//! - `"5"`, `"-12"`, `"+007"` → integer, written without a fractional part
//! - `"1.0"`, `"1e3"` → integral float, written as the integer it equals
//! - `"12.5"` → float, written in shortest round-trip form
//! - anything else (including `nan` and `inf`) → string, with `"` escaped
//!
//! Only double quotes are escaped in strings. Backslashes and control
//! characters pass through untouched, so such values produce invalid JSON.

use log::warn;

/// Typed form of a raw attribute value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttrValue<'a> {
    /// Integer literal, kept exact
    Integer(i128),
    /// Float whose value has no fractional part
    IntegralFloat(f64),
    /// Float with a fractional part
    Float(f64),
    /// Non-numeric text
    Text(&'a str),
}

/// Classify a raw attribute value.
pub fn coerce(raw: &str) -> AttrValue<'_> {
    let trimmed = raw.trim();

    if let Ok(n) = trimmed.parse::<i128>() {
        return AttrValue::Integer(n);
    }

    match trimmed.parse::<f64>() {
        Ok(f) if !f.is_finite() => {
            warn!("Non-finite numeric value {:?} written as string", raw);
            AttrValue::Text(raw)
        }
        Ok(f) if f == f.trunc() => AttrValue::IntegralFloat(f),
        Ok(f) => AttrValue::Float(f),
        Err(_) => AttrValue::Text(raw),
    }
}

impl AttrValue<'_> {
    /// Append the JSON-like text form of this value to `out`.
    pub fn write_json(&self, out: &mut String) {
        match *self {
            AttrValue::Integer(n) => out.push_str(&n.to_string()),
            // -0.0 == 0.0, and the integer it equals is 0
            AttrValue::IntegralFloat(f) if f == 0.0 => out.push('0'),
            AttrValue::IntegralFloat(f) => out.push_str(&format!("{:.0}", f)),
            AttrValue::Float(f) => out.push_str(&f.to_string()),
            AttrValue::Text(s) => {
                out.push('"');
                push_quote_escaped(out, s);
                out.push('"');
            }
        }
    }
}

fn push_quote_escaped(out: &mut String, s: &str) {
    let mut rest = s;
    while let Some(pos) = rest.find('"') {
        out.push_str(&rest[..pos]);
        out.push_str("\\\"");
        rest = &rest[pos + 1..];
    }
    out.push_str(rest);
}

/// Append `"key" : value` pairs, comma separated, for every attribute in order.
///
/// Returns the number of attributes written.
pub fn write_attributes<I, K, V>(out: &mut String, attrs: I) -> usize
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut count = 0;
    for (key, value) in attrs {
        if count > 0 {
            out.push_str(", ");
        }
        out.push('"');
        out.push_str(key.as_ref());
        out.push_str("\" : ");
        coerce(value.as_ref()).write_json(out);
        count += 1;
    }
    count
}
