use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::ContentError;

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::En),
            "ar" => Some(Language::Ar),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }
}

/// A field with parallel English and Arabic values.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Bilingual {
    pub en: String,
    pub ar: String,
}

impl Bilingual {
    /// Puts `value` in the `language` slot and the matching placeholder in the other.
    pub fn localized(language: Language, value: String, placeholder: Bilingual) -> Self {
        match language {
            Language::En => Self {
                en: value,
                ar: placeholder.ar,
            },
            Language::Ar => Self {
                en: placeholder.en,
                ar: value,
            },
        }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::En => &self.en,
            Language::Ar => &self.ar,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Articles,
    Blog,
    Books,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [ContentType::Articles, ContentType::Blog, ContentType::Books];

    /// Also the name of the type's subdirectory.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Articles => "articles",
            ContentType::Blog => "blog",
            ContentType::Books => "books",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .into_iter()
            .find(|ct| ct.as_str() == s)
            .ok_or_else(|| ContentError::InvalidType(s.to_string()))
    }
}

/// The normalized form of one article, blog post or book.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ContentRecord {
    pub id: u32,
    pub title: Bilingual,
    pub content: Bilingual,
    pub excerpt: Bilingual,
    pub author: String,
    pub date: NaiveDate,
    pub image: String,
    pub language: Language,
    pub tags: Vec<String>,
    pub featured: bool,
    #[serde(flatten)]
    pub details: TypeFields,
}

/// Fields that only exist for some content types.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum TypeFields {
    Book(BookFields),
    Post(PostFields),
}

/// Articles and blog posts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub category: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    pub description: Bilingual,
    pub genre: String,
    pub audience: String,
    pub formats: Vec<String>,
    pub isbn: String,
}
