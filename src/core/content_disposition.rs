use std::collections::HashMap;

use crate::error::HeaderParseError;

/// Extracts the suggested filename from a `Content-Disposition` value.
///
/// The value is parsed as a disposition type followed by `; name=value`
/// parameters, where values are tokens or quoted strings. `filename*`
/// (RFC 5987) wins over `filename` when both decode. A well-formed header
/// without either parameter yields `Ok(None)`.
pub fn parse_filename(header_value: &str) -> Result<Option<String>, HeaderParseError> {
    let params = parse_params(header_value)?;

    if let Some(extended) = params.get("filename*").and_then(|v| decode_ext_value(v)) {
        if !extended.is_empty() {
            return Ok(Some(extended));
        }
    }

    Ok(params.get("filename").filter(|v| !v.is_empty()).cloned())
}

fn parse_params(header_value: &str) -> Result<HashMap<String, String>, HeaderParseError> {
    let fail = |reason| HeaderParseError {
        header: header_value.to_string(),
        reason,
    };

    let value = header_value.trim();
    let (disposition, mut rest) = take_token(value);
    if disposition.is_empty() {
        return Err(fail("missing disposition type"));
    }

    let mut params = HashMap::new();
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        rest = rest
            .strip_prefix(';')
            .ok_or_else(|| fail("expected `;` between parameters"))?
            .trim_start();
        if rest.is_empty() {
            break;
        }

        let (name, after) = take_token(rest);
        if name.is_empty() {
            return Err(fail("missing parameter name"));
        }
        rest = after
            .trim_start()
            .strip_prefix('=')
            .ok_or_else(|| fail("missing `=` after parameter name"))?
            .trim_start();

        let (param, after) = if rest.starts_with('"') {
            take_quoted(rest).ok_or_else(|| fail("unterminated quoted string"))?
        } else {
            let (token, after) = take_token(rest);
            if token.is_empty() {
                return Err(fail("missing parameter value"));
            }
            (token.to_string(), after)
        };
        rest = after;

        if params.insert(name.to_ascii_lowercase(), param).is_some() {
            return Err(fail("duplicate parameter"));
        }
    }

    Ok(params)
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_graphic() && !"()<>@,;:\\\"/[]?=".contains(c)
}

fn take_token(input: &str) -> (&str, &str) {
    let end = input
        .find(|c: char| !is_token_char(c))
        .unwrap_or(input.len());
    input.split_at(end)
}

/// Reads a quoted string starting at the opening quote, returning the
/// unescaped content and the remainder after the closing quote.
fn take_quoted(input: &str) -> Option<(String, &str)> {
    let mut out = String::new();
    let mut chars = input.char_indices().skip(1);
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                let (_, escaped) = chars.next()?;
                out.push(escaped);
            }
            '"' => return Some((out, &input[i + 1..])),
            _ => out.push(c),
        }
    }
    None
}

/// Decodes `charset'language'percent-encoded` values.
fn decode_ext_value(value: &str) -> Option<String> {
    let mut parts = value.splitn(3, '\'');
    let charset = parts.next()?.to_ascii_lowercase();
    let _language = parts.next()?;
    let encoded = parts.next()?;

    let bytes = urlencoding::decode_binary(encoded.as_bytes());
    match charset.as_str() {
        "utf-8" | "us-ascii" => String::from_utf8(bytes.into_owned()).ok(),
        "iso-8859-1" => Some(bytes.iter().map(|&b| b as char).collect()),
        _ => None,
    }
}
