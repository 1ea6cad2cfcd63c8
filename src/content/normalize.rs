//! Maps parsed front-matter onto the canonical [`ContentRecord`] shape.
//!
//! Every field is resolved from an explicit key list with an explicit
//! default, enumerated per content type in [`TypeDefaults`].

use chrono::Utc;
use pulldown_cmark::{html, Options, Parser};
use serde::{Deserialize, Serialize};

use super::frontmatter::FrontMatter;
use super::id::id_from_filename;
use super::record::{
    Bilingual, BookFields, ContentRecord, ContentType, Language, PostFields, TypeFields,
};
use super::ContentError;

pub const DEFAULT_IMAGE: &str = "/api/placeholder/600/400";
pub const UPLOADS_PREFIX: &str = "/images/uploads/";

const TITLE_KEYS: &[&str] = &["title", "tte"];

/// A fixed pair of strings, one per language slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    pub en: &'static str,
    pub ar: &'static str,
}

impl Placeholder {
    fn to_bilingual(self) -> Bilingual {
        Bilingual {
            en: self.en.to_string(),
            ar: self.ar.to_string(),
        }
    }
}

pub const CONTENT_PLACEHOLDER: Placeholder = Placeholder {
    en: "Content available in Arabic only",
    ar: "المحتوى متوفر باللغة الإنجليزية فقط",
};

pub const EXCERPT_PLACEHOLDER: Placeholder = Placeholder {
    en: "Excerpt available in Arabic only",
    ar: "المقتطف متوفر باللغة الإنجليزية فقط",
};

pub const DESCRIPTION_PLACEHOLDER: Placeholder = Placeholder {
    en: "Description available in Arabic only",
    ar: "الوصف متوفر باللغة الإنجليزية فقط",
};

/// Prefix of the title used when the authored title is missing.
pub const UNTITLED: Placeholder = Placeholder {
    en: "Untitled",
    ar: "بدون عنوان",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultFields {
    Post {
        category: &'static str,
    },
    Book {
        genre: &'static str,
        audience: &'static str,
        formats: &'static [&'static str],
        isbn: &'static str,
    },
}

/// Defaults applied when a field is missing from the front-matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDefaults {
    pub author: &'static str,
    /// Label of the placeholder title in the non-authored slot, e.g. `Article 42`.
    pub title_label: Placeholder,
    pub fields: DefaultFields,
}

const ARTICLE_DEFAULTS: TypeDefaults = TypeDefaults {
    author: "ChatAT Team",
    title_label: Placeholder {
        en: "Article",
        ar: "مقال",
    },
    fields: DefaultFields::Post { category: "Faith" },
};

const BLOG_DEFAULTS: TypeDefaults = TypeDefaults {
    author: "ChatAT Team",
    title_label: Placeholder {
        en: "Blog Post",
        ar: "مقال مدونة",
    },
    fields: DefaultFields::Post {
        category: "Stories",
    },
};

const BOOK_DEFAULTS: TypeDefaults = TypeDefaults {
    author: "ChatAT Team",
    title_label: Placeholder {
        en: "Book",
        ar: "كتاب",
    },
    fields: DefaultFields::Book {
        genre: "Spiritual",
        audience: "General",
        formats: &["Physical", "Digital"],
        isbn: "",
    },
};

impl TypeDefaults {
    pub fn of(content_type: ContentType) -> &'static TypeDefaults {
        match content_type {
            ContentType::Articles => &ARTICLE_DEFAULTS,
            ContentType::Blog => &BLOG_DEFAULTS,
            ContentType::Books => &BOOK_DEFAULTS,
        }
    }
}

/// How the document body is placed into `content`.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BodyFormat {
    /// The Markdown body as written.
    #[default]
    Markdown,
    /// The body rendered to HTML.
    Html,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Normalizer {
    body_format: BodyFormat,
}

impl Normalizer {
    pub fn new(body_format: BodyFormat) -> Self {
        Self { body_format }
    }

    pub fn normalize(
        &self,
        filename: &str,
        content_type: ContentType,
        fm: &FrontMatter,
    ) -> Result<ContentRecord, ContentError> {
        let id = id_from_filename(filename);
        let defaults = TypeDefaults::of(content_type);
        let language = resolve_language(fm, filename);

        let title = fm
            .get_str_any(TITLE_KEYS)
            .unwrap_or_else(|| labeled(UNTITLED, language, id));
        let title_placeholder = Bilingual {
            en: labeled(defaults.title_label, Language::En, id),
            ar: labeled(defaults.title_label, Language::Ar, id),
        };

        let date = fm
            .get_date("date")?
            .unwrap_or_else(|| Utc::now().date_naive());

        let details = match defaults.fields {
            DefaultFields::Post { category } => TypeFields::Post(PostFields {
                category: fm
                    .get_str("category")
                    .unwrap_or_else(|| category.to_string()),
            }),
            DefaultFields::Book {
                genre,
                audience,
                formats,
                isbn,
            } => TypeFields::Book(BookFields {
                description: Bilingual::localized(
                    language,
                    fm.get_str("description").unwrap_or_default(),
                    DESCRIPTION_PLACEHOLDER.to_bilingual(),
                ),
                genre: fm.get_str("genre").unwrap_or_else(|| genre.to_string()),
                audience: fm
                    .get_str("audience")
                    .unwrap_or_else(|| audience.to_string()),
                formats: fm
                    .get_list("formats")
                    .unwrap_or_else(|| formats.iter().map(|f| f.to_string()).collect()),
                isbn: fm.get_str("isbn").unwrap_or_else(|| isbn.to_string()),
            }),
        };

        Ok(ContentRecord {
            id,
            title: Bilingual::localized(language, title, title_placeholder),
            content: Bilingual::localized(
                language,
                self.render_body(&fm.body),
                CONTENT_PLACEHOLDER.to_bilingual(),
            ),
            excerpt: Bilingual::localized(
                language,
                fm.get_str("excerpt").unwrap_or_default(),
                EXCERPT_PLACEHOLDER.to_bilingual(),
            ),
            author: fm
                .get_str("author")
                .unwrap_or_else(|| defaults.author.to_string()),
            date,
            image: normalize_image(fm.get_str("image")),
            language,
            tags: fm.get_list("tags").unwrap_or_default(),
            featured: false,
            details,
        })
    }

    fn render_body(&self, body: &str) -> String {
        match self.body_format {
            BodyFormat::Markdown => body.to_string(),
            BodyFormat::Html => render_html(body),
        }
    }
}

fn labeled(label: Placeholder, language: Language, id: u32) -> String {
    match language {
        Language::En => format!("{} {}", label.en, id),
        Language::Ar => format!("{} {}", label.ar, id),
    }
}

fn resolve_language(fm: &FrontMatter, filename: &str) -> Language {
    match fm.get_str("language") {
        None => Language::default(),
        Some(code) => Language::from_code(code.trim()).unwrap_or_else(|| {
            log::warn!(target: "content",
                file = filename,
                language = code.as_str();
                "unsupported language, using en",
            );
            Language::default()
        }),
    }
}

/// Keeps rooted paths, otherwise places the image under the uploads folder.
pub fn normalize_image(raw: Option<String>) -> String {
    match raw {
        None => DEFAULT_IMAGE.to_string(),
        Some(path) if path.starts_with('/') => path,
        Some(path) => format!("{}{}", UPLOADS_PREFIX, path),
    }
}

pub fn render_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
