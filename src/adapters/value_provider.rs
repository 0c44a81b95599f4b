//! Type-directed synthetic value generation.
//!
//! The provider dispatches on a [`FieldType`] and produces realistic values
//! with the `fake` crate, driven by an owned seedable RNG so that a fixed
//! seed reproduces the same output byte for byte. String generation first
//! consults an ordered keyword-category table against the field name, then
//! the constraint facets (enum, pattern, length bounds), then falls back to a
//! generic word.
//!
//! Values for most string categories are cached by (category, field name),
//! so two fields with the same name receive the same value within one
//! session. Identifiers and constraint-driven draws are always fresh.

use crate::domain::{ConstraintSet, FieldType};
use chrono::{Duration, Utc};
use fake::faker::address::en::{
    BuildingNumber, CityName, CountryName, PostCode, StreetName, StreetSuffix,
};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::{DomainSuffix, SafeEmail};
use fake::faker::lorem::en::{Paragraph, Sentence, Word, Words};
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

/// Semantic categories recognized from field names. The category is half of
/// the cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum StringCategory {
    Email,
    Phone,
    LastName,
    FirstName,
    Address,
    City,
    PostalCode,
    Country,
    Company,
    Url,
    Date,
    DateTime,
    Identifier,
    Description,
    Title,
    Word,
}

/// Keyword table matched against field names by case-insensitive substring,
/// first row wins. Row order is contract: "firstname" contains "name" and
/// lands on the last-name row, and "timestamp" is the only route to the
/// datetime row because "datetime" contains "date".
const CATEGORY_KEYWORDS: &[(StringCategory, &[&str])] = &[
    (StringCategory::Email, &["email", "mail", "e-mail"]),
    (StringCategory::Phone, &["phone", "telephone", "tel"]),
    (StringCategory::LastName, &["name", "surname", "lastname"]),
    (StringCategory::FirstName, &["firstname", "given"]),
    (StringCategory::Address, &["address", "addr"]),
    (StringCategory::City, &["city"]),
    (StringCategory::PostalCode, &["postal", "zip"]),
    (StringCategory::Country, &["country"]),
    (StringCategory::Company, &["company"]),
    (StringCategory::Url, &["url", "website"]),
    (StringCategory::Date, &["date", "created", "updated"]),
    (StringCategory::DateTime, &["datetime", "timestamp"]),
    (StringCategory::Identifier, &["id", "uuid"]),
    (StringCategory::Description, &["description", "comment", "note"]),
    (StringCategory::Title, &["title", "subject"]),
];

fn classify(field_name: &str) -> Option<StringCategory> {
    let lower = field_name.to_lowercase();
    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|keyword| lower.contains(keyword)) {
            return Some(*category);
        }
    }
    None
}

/// Stateful synthetic value generator: one instance per generation session.
///
/// The RNG and cache are mutated in place, so an instance must not be shared
/// across concurrent sessions.
pub struct ValueProvider {
    rng: StdRng,
    cache: HashMap<(StringCategory, String), String>,
    locale: String,
}

impl ValueProvider {
    pub fn new() -> Self {
        Self::with_locale("en")
    }

    /// Create a provider for the given locale tag. Only the `en` dictionaries
    /// ship; other tags log a warning and fall back.
    pub fn with_locale(locale: &str) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            cache: HashMap::new(),
            locale: normalize_locale(locale),
        }
    }

    /// Reseed the RNG for reproducible generation. Cached values survive
    /// reseeding; callers wanting full reproducibility must also call
    /// [`clear_cache`](Self::clear_cache).
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Generate a value of the requested type. Constraint facets narrow the
    /// draw where they apply; an empty set yields the type's defaults.
    pub fn generate(
        &mut self,
        kind: FieldType,
        field_name: &str,
        constraints: &ConstraintSet,
    ) -> Value {
        match kind {
            FieldType::String => self.generate_string(field_name, constraints),
            FieldType::Integer => self.generate_integer(constraints),
            FieldType::Number => self.generate_number(constraints),
            FieldType::Boolean => Value::Bool(self.rng.gen_bool(0.5)),
            FieldType::Array => self.generate_array(field_name, constraints),
            FieldType::Object => self.generate_object(constraints),
        }
    }

    fn generate_string(&mut self, field_name: &str, constraints: &ConstraintSet) -> Value {
        if let Some(category) = classify(field_name) {
            if category == StringCategory::Identifier {
                // identifiers are always fresh
                return Value::String(self.fresh_identifier());
            }
            return Value::String(self.cached_value(category, field_name));
        }

        if let Some(values) = constraints.enum_values.as_ref().filter(|v| !v.is_empty()) {
            let pick = self.rng.gen_range(0..values.len());
            return values[pick].clone();
        }

        if let Some(pattern) = &constraints.pattern {
            return Value::String(self.from_pattern(pattern));
        }

        if constraints.min_length.is_some() || constraints.max_length.is_some() {
            let min = constraints.min_length.unwrap_or(5);
            let max = constraints.max_length.unwrap_or(20).max(min);
            return Value::String(self.bounded_text(min, max));
        }

        Value::String(self.cached_value(StringCategory::Word, field_name))
    }

    fn generate_integer(&mut self, constraints: &ConstraintSet) -> Value {
        let min = constraints.minimum.map(|m| m as i64).unwrap_or(0);
        let mut max = constraints.maximum.map(|m| m as i64).unwrap_or(1000);
        if max < min {
            // conflicting bounds pin the draw to the lower one
            max = min;
        }

        if let Some(step) = constraints.multiple_of.filter(|s| *s > 0) {
            let low = min.div_euclid(step);
            let mut high = max.div_euclid(step);
            if high < low {
                high = low;
            }
            return json!(self.rng.gen_range(low..=high) * step);
        }

        json!(self.rng.gen_range(min..=max))
    }

    fn generate_number(&mut self, constraints: &ConstraintSet) -> Value {
        let min = constraints.minimum.unwrap_or(0.0);
        let mut max = constraints.maximum.unwrap_or(1000.0);
        if max < min {
            max = min;
        }
        let value: f64 = self.rng.gen_range(min..=max);
        json!((value * 100.0).round() / 100.0)
    }

    fn generate_array(&mut self, field_name: &str, constraints: &ConstraintSet) -> Value {
        let min_items = constraints.min_items.unwrap_or(1);
        let max_items = constraints.max_items.unwrap_or(5).max(min_items);
        let count = self.rng.gen_range(min_items..=max_items);

        let elements = match &constraints.items {
            Some(item_constraints) => {
                let kind = item_constraints.resolved_type();
                let item_field = format!("{}_item", field_name);
                (0..count)
                    .map(|_| self.generate(kind, &item_field, item_constraints))
                    .collect()
            }
            None => (0..count)
                .map(|_| Value::String(Word().fake_with_rng::<String, _>(&mut self.rng)))
                .collect(),
        };

        Value::Array(elements)
    }

    fn generate_object(&mut self, constraints: &ConstraintSet) -> Value {
        let mut object = Map::new();
        for (name, prop) in &constraints.properties {
            object.insert(name.clone(), self.generate(prop.resolved_type(), name, prop));
        }
        Value::Object(object)
    }

    fn cached_value(&mut self, category: StringCategory, field_name: &str) -> String {
        let key = (category, field_name.to_string());
        if let Some(value) = self.cache.get(&key) {
            return value.clone();
        }
        let value = self.category_value(category);
        self.cache.insert(key, value.clone());
        value
    }

    fn category_value(&mut self, category: StringCategory) -> String {
        match category {
            StringCategory::Email => SafeEmail().fake_with_rng::<String, _>(&mut self.rng),
            StringCategory::Phone => PhoneNumber().fake_with_rng::<String, _>(&mut self.rng),
            StringCategory::LastName => LastName().fake_with_rng::<String, _>(&mut self.rng),
            StringCategory::FirstName => FirstName().fake_with_rng::<String, _>(&mut self.rng),
            StringCategory::Address => {
                let number: String = BuildingNumber().fake_with_rng(&mut self.rng);
                let street: String = StreetName().fake_with_rng(&mut self.rng);
                let suffix: String = StreetSuffix().fake_with_rng(&mut self.rng);
                format!("{} {} {}", number, street, suffix)
            }
            StringCategory::City => CityName().fake_with_rng::<String, _>(&mut self.rng),
            StringCategory::PostalCode => PostCode().fake_with_rng::<String, _>(&mut self.rng),
            StringCategory::Country => CountryName().fake_with_rng::<String, _>(&mut self.rng),
            StringCategory::Company => CompanyName().fake_with_rng::<String, _>(&mut self.rng),
            StringCategory::Url => {
                let word: String = Word().fake_with_rng(&mut self.rng);
                let suffix: String = DomainSuffix().fake_with_rng(&mut self.rng);
                format!("https://www.{}.{}", word.to_lowercase(), suffix)
            }
            StringCategory::Date => self.past_date(),
            StringCategory::DateTime => self.past_datetime(),
            StringCategory::Identifier => self.fresh_identifier(),
            StringCategory::Description => {
                Paragraph(3..4).fake_with_rng::<String, _>(&mut self.rng)
            }
            StringCategory::Title => {
                let sentence: String = Sentence(3..6).fake_with_rng(&mut self.rng);
                sentence.trim_end_matches('.').to_string()
            }
            StringCategory::Word => Word().fake_with_rng::<String, _>(&mut self.rng),
        }
    }

    /// A v4-shaped identifier built from RNG bytes, so seeded sessions stay
    /// deterministic.
    fn fresh_identifier(&mut self) -> String {
        let bytes: [u8; 16] = self.rng.gen();
        uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string()
    }

    /// ISO date within the past two years.
    fn past_date(&mut self) -> String {
        let days = self.rng.gen_range(0..730);
        (Utc::now() - Duration::days(days)).date_naive().to_string()
    }

    /// ISO datetime within the past two years.
    fn past_datetime(&mut self) -> String {
        let seconds = self.rng.gen_range(0..63_072_000i64);
        (Utc::now() - Duration::seconds(seconds))
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string()
    }

    /// Expand one of the recognized canonical patterns. Anything outside the
    /// closed set falls back to a generic word.
    fn from_pattern(&mut self, pattern: &str) -> String {
        match pattern {
            r"^\d{4}-\d{2}-\d{2}$" => self.past_date(),
            r"^\d{3}-\d{3}-\d{4}$" => format!(
                "{}-{}-{}",
                self.rng.gen_range(100..=999),
                self.rng.gen_range(100..=999),
                self.rng.gen_range(1000..=9999)
            ),
            r"^[A-Z]{2}\d{4}$" => {
                let first = self.rng.gen_range(b'A'..=b'Z') as char;
                let second = self.rng.gen_range(b'A'..=b'Z') as char;
                format!("{}{}{}", first, second, self.rng.gen_range(1000..=9999))
            }
            _ => Word().fake_with_rng::<String, _>(&mut self.rng),
        }
    }

    /// Lorem text with a length inside [min, max].
    fn bounded_text(&mut self, min: usize, max: usize) -> String {
        let words: Vec<String> = Words(3..8).fake_with_rng(&mut self.rng);
        let mut text = words.join(" ");
        while text.len() < min {
            let word: String = Word().fake_with_rng(&mut self.rng);
            text.push(' ');
            text.push_str(&word);
        }
        if text.len() > max {
            text.truncate(max);
        }
        text
    }
}

impl Default for ValueProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_locale(tag: &str) -> String {
    let lower = tag.to_lowercase();
    if lower.is_empty() || lower.starts_with("en") {
        "en".to_string()
    } else {
        tracing::warn!("unsupported locale '{}', falling back to en", tag);
        "en".to_string()
    }
}
