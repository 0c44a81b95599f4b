//! Keyword-substitution anonymization over existing data.
//!
//! Unlike the generation engine, the anonymizer never consults a schema: it
//! walks a populated document and swaps string leaves whose key looks
//! sensitive for picks from pre-built pools of fake data, keeping the
//! structure and all non-string leaves intact.

use fake::faker::address::en::{
    BuildingNumber, CityName, CountryName, PostCode, StreetName, StreetSuffix,
};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::{DomainSuffix, SafeEmail};
use fake::faker::lorem::en::{Paragraph, Sentence, Word};
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value};

const POOL_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SensitiveKind {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    Street,
    City,
    Postcode,
    Country,
    Company,
    Url,
    Description,
    Date,
    DateTime,
}

/// Keyword lists identifying sensitive fields, matched by case-insensitive
/// substring in order. The lists are bilingual because the tool is routinely
/// pointed at French payloads.
const SENSITIVE_KEYWORDS: &[(SensitiveKind, &[&str])] = &[
    (
        SensitiveKind::FirstName,
        &["prenom", "firstname", "fname", "given_name", "first_name"],
    ),
    (
        SensitiveKind::LastName,
        &["nom", "lastname", "lname", "surname", "last_name", "family_name"],
    ),
    (
        SensitiveKind::Email,
        &["email", "mail", "e_mail", "e-mail", "adresse_email"],
    ),
    (
        SensitiveKind::Phone,
        &["telephone", "phone", "tel", "mobile", "cellphone", "numero"],
    ),
    (SensitiveKind::Address, &["adresse", "address", "addr"]),
    (
        SensitiveKind::Street,
        &["rue", "street", "street_address", "voie"],
    ),
    (SensitiveKind::City, &["ville", "city", "localite"]),
    (
        SensitiveKind::Postcode,
        &["code_postal", "postal_code", "zip", "zip_code", "postcode", "postalcode"],
    ),
    (SensitiveKind::Country, &["pays", "country", "nation"]),
    (
        SensitiveKind::Company,
        &["entreprise", "company", "societe", "organization"],
    ),
    (SensitiveKind::Url, &["url", "website", "site", "lien"]),
    (
        SensitiveKind::Description,
        &["description", "commentaire", "comment", "note"],
    ),
    (
        SensitiveKind::Date,
        &["date", "created_at", "updated_at", "created", "updated"],
    ),
    (SensitiveKind::DateTime, &["datetime", "timestamp", "time"]),
];

fn classify_sensitive(field_name: &str) -> Option<SensitiveKind> {
    let lower = field_name.to_lowercase();
    for (kind, keywords) in SENSITIVE_KEYWORDS {
        if keywords.iter().any(|keyword| lower.contains(keyword)) {
            return Some(*kind);
        }
    }
    None
}

struct Pools {
    first_names: Vec<String>,
    last_names: Vec<String>,
    emails: Vec<String>,
    phones: Vec<String>,
    addresses: Vec<String>,
    streets: Vec<String>,
    cities: Vec<String>,
    postcodes: Vec<String>,
    countries: Vec<String>,
    companies: Vec<String>,
    urls: Vec<String>,
    sentences: Vec<String>,
    paragraphs: Vec<String>,
    dates: Vec<String>,
    datetimes: Vec<String>,
}

fn pool<F>(rng: &mut StdRng, mut entry: F) -> Vec<String>
where
    F: FnMut(&mut StdRng) -> String,
{
    (0..POOL_SIZE).map(|_| entry(rng)).collect()
}

impl Pools {
    fn generate(rng: &mut StdRng) -> Self {
        Self {
            first_names: pool(rng, |r| FirstName().fake_with_rng(r)),
            last_names: pool(rng, |r| LastName().fake_with_rng(r)),
            emails: pool(rng, |r| SafeEmail().fake_with_rng(r)),
            phones: pool(rng, |r| PhoneNumber().fake_with_rng(r)),
            addresses: pool(rng, |r| {
                let number: String = BuildingNumber().fake_with_rng(r);
                let street: String = StreetName().fake_with_rng(r);
                let suffix: String = StreetSuffix().fake_with_rng(r);
                let city: String = CityName().fake_with_rng(r);
                format!("{} {} {}, {}", number, street, suffix, city)
            }),
            streets: pool(rng, |r| {
                let number: String = BuildingNumber().fake_with_rng(r);
                let street: String = StreetName().fake_with_rng(r);
                format!("{} {}", number, street)
            }),
            cities: pool(rng, |r| CityName().fake_with_rng(r)),
            postcodes: pool(rng, |r| PostCode().fake_with_rng(r)),
            countries: pool(rng, |r| CountryName().fake_with_rng(r)),
            companies: pool(rng, |r| CompanyName().fake_with_rng(r)),
            urls: pool(rng, |r| {
                let word: String = Word().fake_with_rng(r);
                let suffix: String = DomainSuffix().fake_with_rng(r);
                format!("https://www.{}.{}", word.to_lowercase(), suffix)
            }),
            sentences: pool(rng, |r| Sentence(3..8).fake_with_rng(r)),
            paragraphs: pool(rng, |r| Paragraph(2..4).fake_with_rng(r)),
            dates: pool(rng, |r| {
                let days = r.gen_range(0..10_950);
                (Utc::now() - Duration::days(days)).date_naive().to_string()
            }),
            datetimes: pool(rng, |r| {
                let seconds = r.gen_range(0..946_080_000i64);
                (Utc::now() - Duration::seconds(seconds))
                    .format("%Y-%m-%dT%H:%M:%S")
                    .to_string()
            }),
        }
    }
}

/// Pool-based anonymizer. Pools are drawn once at construction so repeated
/// occurrences of sensitive data map into a bounded set of replacements.
pub struct DataAnonymizer {
    rng: StdRng,
    pools: Pools,
}

impl DataAnonymizer {
    pub fn new() -> Self {
        let mut rng = StdRng::from_entropy();
        let pools = Pools::generate(&mut rng);
        Self { rng, pools }
    }

    /// Anonymize a document, preserving its structure. Only non-blank string
    /// leaves are replaced; numbers, booleans and nulls pass through.
    pub fn anonymize(&mut self, data: &Value) -> Value {
        match data {
            Value::Object(map) => {
                let mut anonymized = Map::new();
                for (key, value) in map {
                    let replacement = match value.as_str() {
                        Some(text) if !text.trim().is_empty() => {
                            Value::String(self.anonymize_field(key, text))
                        }
                        _ => self.anonymize(value),
                    };
                    anonymized.insert(key.clone(), replacement);
                }
                Value::Object(anonymized)
            }
            Value::Array(items) => {
                Value::Array(items.iter().map(|item| self.anonymize(item)).collect())
            }
            other => other.clone(),
        }
    }

    fn anonymize_field(&mut self, field_name: &str, value: &str) -> String {
        match classify_sensitive(field_name) {
            Some(SensitiveKind::FirstName) => pick(&mut self.rng, &self.pools.first_names),
            Some(SensitiveKind::LastName) => pick(&mut self.rng, &self.pools.last_names),
            Some(SensitiveKind::Email) => pick(&mut self.rng, &self.pools.emails),
            Some(SensitiveKind::Phone) => pick(&mut self.rng, &self.pools.phones),
            Some(SensitiveKind::Address) => pick(&mut self.rng, &self.pools.addresses),
            Some(SensitiveKind::Street) => pick(&mut self.rng, &self.pools.streets),
            Some(SensitiveKind::City) => pick(&mut self.rng, &self.pools.cities),
            Some(SensitiveKind::Postcode) => pick(&mut self.rng, &self.pools.postcodes),
            Some(SensitiveKind::Country) => pick(&mut self.rng, &self.pools.countries),
            Some(SensitiveKind::Company) => pick(&mut self.rng, &self.pools.companies),
            Some(SensitiveKind::Url) => pick(&mut self.rng, &self.pools.urls),
            Some(SensitiveKind::Description) => {
                if value.len() > 100 {
                    pick(&mut self.rng, &self.pools.paragraphs)
                } else {
                    pick(&mut self.rng, &self.pools.sentences)
                }
            }
            Some(SensitiveKind::Date) => {
                // preserve the rough shape: timestamps stay timestamps
                if value.contains('T') || value.contains(':') {
                    pick(&mut self.rng, &self.pools.datetimes)
                } else {
                    pick(&mut self.rng, &self.pools.dates)
                }
            }
            Some(SensitiveKind::DateTime) => pick(&mut self.rng, &self.pools.datetimes),
            None => self.generic_replacement(value),
        }
    }

    /// Replace an unclassified string with filler of comparable size.
    fn generic_replacement(&mut self, value: &str) -> String {
        if value.len() <= 10 {
            Word().fake_with_rng(&mut self.rng)
        } else if value.len() <= 50 {
            Sentence(3..4).fake_with_rng(&mut self.rng)
        } else {
            Paragraph(2..3).fake_with_rng(&mut self.rng)
        }
    }

    /// Report the paths of fields that would be anonymized.
    pub fn sensitive_fields(&self, data: &Value) -> Vec<String> {
        let mut fields = Vec::new();
        find_sensitive_fields(data, "", &mut fields);
        fields
    }
}

impl Default for DataAnonymizer {
    fn default() -> Self {
        Self::new()
    }
}

fn pick(rng: &mut StdRng, pool: &[String]) -> String {
    pool[rng.gen_range(0..pool.len())].clone()
}

fn find_sensitive_fields(data: &Value, prefix: &str, fields: &mut Vec<String>) {
    match data {
        Value::Object(map) => {
            for (key, value) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };

                if let Some(text) = value.as_str() {
                    if !text.trim().is_empty() && classify_sensitive(key).is_some() {
                        fields.push(path.clone());
                    }
                }

                find_sensitive_fields(value, &path, fields);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let path = if prefix.is_empty() {
                    format!("[{}]", index)
                } else {
                    format!("{}[{}]", prefix, index)
                };
                find_sensitive_fields(item, &path, fields);
            }
        }
        _ => {}
    }
}
