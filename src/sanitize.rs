// Normalise raw CSV header labels into identifier-safe field names.
//
// The source tables use `%`, `/` and parentheses inside header labels, and a
// hyphen to mark a measurement subtype (e.g. vitamin B-12). Specials become
// underscores, runs of underscores collapse to one, and hyphens become the
// terminal marker `$`.

/// Sanitise one raw header into a field name. Accepts any input; empty
/// yields empty. Applying it twice returns the same string.
pub fn sanitize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        let c = match c {
            '%' | '/' | '(' | ')' => '_',
            '-' => '$',
            other => other,
        };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out.trim_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specials_become_single_underscore() {
        assert_eq!(sanitize_key("利用可能炭水化物(単糖当量)"), "利用可能炭水化物_単糖当量");
        assert_eq!(sanitize_key("a%b/c"), "a_b_c");
    }

    #[test]
    fn underscore_runs_collapse_and_trim() {
        assert_eq!(sanitize_key("(a)(b)"), "a_b");
        assert_eq!(sanitize_key("__x__"), "x");
        assert_eq!(sanitize_key("(%)"), "");
    }

    #[test]
    fn hyphens_become_terminal_marker() {
        assert_eq!(sanitize_key("ビタミンB-12"), "ビタミンB$12");
        assert_eq!(sanitize_key("tocopherol-"), "tocopherol$");
    }

    #[test]
    fn no_special_characters_survive() {
        let out = sanitize_key("en%er/gy(kcal)-x");
        for bad in ['%', '/', '(', ')', '-'] {
            assert!(!out.contains(bad), "{bad} survived in {out}");
        }
    }

    #[test]
    fn idempotent() {
        for raw in ["エネルギー(kcal)", "a-b", "%x%", "", "plain"] {
            let once = sanitize_key(raw);
            assert_eq!(sanitize_key(&once), once);
        }
    }

    #[test]
    fn empty_yields_empty() {
        assert_eq!(sanitize_key(""), "");
    }
}
