//! YAML front-matter extraction.
//!
//! A document may open with a `---` line, followed by a YAML mapping and a
//! closing `---` line. Everything after the closing line is the body.
//!
//! ```markdown
//! ---
//! title: Patience in Hardship
//! language: en
//! tags:
//!   - faith
//! ---
//!
//! Body text.
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_yaml::{Mapping, Value};

use super::ContentError;

const DELIMITER: &str = "---";

/// Parsed front-matter and the remaining document body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub meta: Mapping,
    pub body: String,
}

impl FrontMatter {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.meta.get(key)
    }

    /// Returns a scalar field rendered as a string. Empty strings count as absent.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(scalar_to_string)
            .filter(|s| !s.is_empty())
    }

    /// Returns the first present field among `keys`.
    pub fn get_str_any(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.get_str(key))
    }

    /// Returns a list field. A lone scalar is treated as a one-element list,
    /// an empty one as an empty list.
    pub fn get_list(&self, key: &str) -> Option<Vec<String>> {
        match self.get(key)? {
            Value::Sequence(seq) => Some(seq.iter().filter_map(scalar_to_string).collect()),
            Value::Null => None,
            other => scalar_to_string(other)
                .map(|s| if s.is_empty() { vec![] } else { vec![s] }),
        }
    }

    /// Returns a date field. A present value that is not a date is an error.
    pub fn get_date(&self, key: &str) -> Result<Option<NaiveDate>, ContentError> {
        self.get_str(key).map(|raw| parse_date(&raw)).transpose()
    }
}

/// Splits `document` into front-matter and body.
///
/// A document that does not open with `---` has no metadata. An unterminated
/// header or a header that is not a YAML mapping is an error.
pub fn parse(document: &str) -> Result<FrontMatter, ContentError> {
    let document = document.strip_prefix('\u{feff}').unwrap_or(document);

    let rest = match strip_opening(document) {
        Some(rest) => rest,
        None => {
            return Ok(FrontMatter {
                meta: Mapping::new(),
                body: document.to_string(),
            })
        }
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return Ok(FrontMatter {
                meta: parse_yaml(&rest[..offset])?,
                body: rest[offset + line.len()..].to_string(),
            });
        }
        offset += line.len();
    }

    Err(ContentError::FrontMatter(
        "missing closing delimiter".to_string(),
    ))
}

fn strip_opening(document: &str) -> Option<&str> {
    let (first, rest) = match document.find('\n') {
        Some(pos) => (&document[..pos], &document[pos + 1..]),
        None => (document, ""),
    };
    if first.trim_end() == DELIMITER {
        Some(rest)
    } else {
        None
    }
}

fn parse_yaml(yaml: &str) -> Result<Mapping, ContentError> {
    if yaml.trim().is_empty() {
        return Ok(Mapping::new());
    }

    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Mapping(meta)) => Ok(meta),
        Ok(Value::Null) => Ok(Mapping::new()),
        Ok(_) => Err(ContentError::FrontMatter(
            "front-matter is not a mapping".to_string(),
        )),
        Err(err) => Err(ContentError::FrontMatter(err.to_string())),
    }
}

/// Parses a calendar date or a timestamp, which is reduced to its UTC date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ContentError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc).date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(ts.date());
        }
    }
    Err(ContentError::InvalidDate(raw.to_string()))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_works() {
        let doc = "---\ntitle: Patience\nlanguage: en\n---\n\n# Heading\n\nBody.";
        let fm = parse(doc).unwrap();
        assert_eq!(fm.get_str("title").as_deref(), Some("Patience"));
        assert_eq!(fm.get_str("language").as_deref(), Some("en"));
        assert_eq!(fm.body, "\n# Heading\n\nBody.");
    }

    #[test]
    fn parse_without_frontmatter() {
        let doc = "# Just Markdown\n\nNo header here.";
        let fm = parse(doc).unwrap();
        assert!(fm.meta.is_empty());
        assert_eq!(fm.body, doc);

        let fm = parse("").unwrap();
        assert!(fm.meta.is_empty());
        assert_eq!(fm.body, "");
    }

    #[test]
    fn parse_empty_header() {
        let fm = parse("---\n---\nBody").unwrap();
        assert!(fm.meta.is_empty());
        assert_eq!(fm.body, "Body");
    }

    #[test]
    fn parse_crlf_and_bom() {
        let fm = parse("\u{feff}---\r\ntitle: Windows\r\n---\r\nBody\r\n").unwrap();
        assert_eq!(fm.get_str("title").as_deref(), Some("Windows"));
        assert_eq!(fm.body, "Body\r\n");
    }

    #[test]
    fn parse_keeps_dashes_in_body() {
        let fm = parse("---\ntitle: T\n---\nsome --- dashes\n---\n").unwrap();
        assert_eq!(fm.body, "some --- dashes\n---\n");
    }

    #[test]
    fn parse_rejects_unterminated_header() {
        let err = parse("---\ntitle: Broken\n\nNo closing line").unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter(_)));

        assert!(parse("---").is_err());
    }

    #[test]
    fn parse_rejects_invalid_yaml() {
        let err = parse("---\ntitle: [unclosed\n---\nBody").unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter(_)));

        let err = parse("---\n- just\n- a list\n---\nBody").unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter(_)));
    }

    #[test]
    fn get_str_renders_scalars() {
        let fm = parse("---\nisbn: 9781234567897\ndraft: true\nempty: ''\nnested:\n  a: 1\n---\n")
            .unwrap();
        assert_eq!(fm.get_str("isbn").as_deref(), Some("9781234567897"));
        assert_eq!(fm.get_str("draft").as_deref(), Some("true"));
        assert_eq!(fm.get_str("empty"), None);
        assert_eq!(fm.get_str("nested"), None);
        assert_eq!(fm.get_str("missing"), None);
    }

    #[test]
    fn get_str_any_uses_first_present_key() {
        let fm = parse("---\ntte: Typo Title\n---\n").unwrap();
        assert_eq!(
            fm.get_str_any(&["title", "tte"]).as_deref(),
            Some("Typo Title")
        );

        let fm = parse("---\ntitle: Real\ntte: Typo\n---\n").unwrap();
        assert_eq!(fm.get_str_any(&["title", "tte"]).as_deref(), Some("Real"));
    }

    #[test]
    fn get_list_works() {
        let fm = parse(
            "---\ntags:\n  - faith\n  - hope\nformats: [Physical]\nsingle: ebook\nnone:\nempty: []\n---\n",
        )
        .unwrap();
        assert_eq!(fm.get_list("tags"), Some(vec!["faith".to_string(), "hope".to_string()]));
        assert_eq!(fm.get_list("formats"), Some(vec!["Physical".to_string()]));
        assert_eq!(fm.get_list("single"), Some(vec!["ebook".to_string()]));
        assert_eq!(fm.get_list("none"), None);
        assert_eq!(fm.get_list("empty"), Some(vec![]));
        assert_eq!(fm.get_list("missing"), None);

        let fm = parse("---\ntags: \"\"\n---\n").unwrap();
        assert_eq!(fm.get_list("tags"), Some(vec![]));
    }

    #[test]
    fn parse_date_works() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(parse_date("2024-03-09").unwrap(), d);
        assert_eq!(parse_date(" 2024-03-09 ").unwrap(), d);
        assert_eq!(parse_date("2024-03-09T10:30:00.000Z").unwrap(), d);
        assert_eq!(parse_date("2024-03-09T23:30:00-02:00").unwrap(), d.succ_opt().unwrap());
        assert_eq!(parse_date("2024-03-09T10:30:00").unwrap(), d);
        assert_eq!(parse_date("2024-03-09 10:30:00").unwrap(), d);
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("March 9").is_err());
    }

    #[test]
    fn get_date_works() {
        let fm = parse("---\ndate: 2024-03-09\nstamp: 2024-03-09T10:30:00Z\nbad: soon\nblank: \"\"\n---\n")
            .unwrap();
        let d = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(fm.get_date("date").unwrap(), Some(d));
        assert_eq!(fm.get_date("stamp").unwrap(), Some(d));
        assert_eq!(fm.get_date("blank").unwrap(), None);
        assert_eq!(fm.get_date("missing").unwrap(), None);
        assert!(matches!(
            fm.get_date("bad").unwrap_err(),
            ContentError::InvalidDate(raw) if raw == "soon"
        ));
    }

    #[test]
    fn parse_arabic_metadata() {
        let fm = parse("---\ntitle: الصبر\nlanguage: ar\n---\nنص المقال").unwrap();
        assert_eq!(fm.get_str("title").as_deref(), Some("الصبر"));
        assert_eq!(fm.body, "نص المقال");
    }
}
