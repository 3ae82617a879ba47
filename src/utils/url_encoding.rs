/// Parse an `application/x-www-form-urlencoded` body into ordered pairs.
///
/// Order is kept because the form controller relies on the position of the
/// submit button relative to the row inputs. `+` decodes to a space.
pub fn parse_form_pairs(body: &[u8]) -> Vec<(String, String)> {
    let raw = String::from_utf8_lossy(body);
    let mut pairs = Vec::new();
    for pair in raw.split('&') {
        if pair.is_empty() { continue; }
        let mut parts = pair.splitn(2, '=');
        let key = decode_component(parts.next().unwrap_or(""));
        let val = decode_component(parts.next().unwrap_or(""));
        pairs.push((key, val));
    }
    pairs
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_pairs_in_order() {
        let pairs = parse_form_pairs(b"name_a=level&value_a=error+code&action=search");
        assert_eq!(
            pairs,
            vec![
                ("name_a".to_string(), "level".to_string()),
                ("value_a".to_string(), "error code".to_string()),
                ("action".to_string(), "search".to_string()),
            ]
        );
    }

    #[test]
    fn handles_percent_escapes_and_missing_values() {
        let pairs = parse_form_pairs(b"k%3D1=a%26b&empty=&bare");
        assert_eq!(pairs[0], ("k=1".to_string(), "a&b".to_string()));
        assert_eq!(pairs[1], ("empty".to_string(), String::new()));
        assert_eq!(pairs[2], ("bare".to_string(), String::new()));
    }
}
