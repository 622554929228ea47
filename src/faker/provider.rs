//! Randomness provider: one seeded RNG plus a library of realistic-value
//! generators addressed by semantic category.
//!
//! Every generator, including the localized `fake` fakers, draws through the
//! single `StdRng` held here, so a whole generation run is one deterministic
//! stream per seed. The provider is passed explicitly through all recursive
//! synthesis calls; it is never global state.

use crate::error::{Result, TycheError};
use chrono::{DateTime, Duration, SecondsFormat, Timelike, Utc};
use fake::faker::address::raw as f_address;
use fake::faker::boolean::raw as f_boolean;
use fake::faker::company::raw as f_company;
use fake::faker::creditcard::raw as f_creditcard;
use fake::faker::currency::raw as f_currency;
use fake::faker::filesystem::raw as f_filesystem;
use fake::faker::internet::raw as f_internet;
use fake::faker::job::raw as f_job;
use fake::faker::lorem::raw as f_lorem;
use fake::faker::name::raw as f_name;
use fake::faker::phone_number::raw as f_phone;
use fake::locales::{AR_SA, EN, FR_FR, JA_JP, PT_BR, ZH_CN, ZH_TW};
use fake::Fake;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

const TEN_YEARS_SECS: i64 = 10 * 365 * 24 * 60 * 60;
const TEN_YEARS_DAYS: i64 = 10 * 365;

const COLOR_NAMES: &[&str] = &[
    "red", "orange", "yellow", "green", "cyan", "blue", "navy", "purple", "magenta", "pink",
    "brown", "maroon", "olive", "teal", "silver", "gray", "black", "white", "gold", "indigo",
];

const LOCALE_STRINGS: &[&str] = &[
    "en_US", "en_GB", "fr_FR", "de_DE", "es_ES", "it_IT", "pt_BR", "ja_JP", "zh_CN", "zh_TW",
    "ru_RU", "ar_SA", "ko_KR", "nl_NL", "sv_SE",
];

const TIMEZONES: &[&str] = &[
    "UTC",
    "Europe/London",
    "Europe/Paris",
    "Europe/Berlin",
    "America/New_York",
    "America/Chicago",
    "America/Los_Angeles",
    "America/Sao_Paulo",
    "Asia/Tokyo",
    "Asia/Shanghai",
    "Asia/Dubai",
    "Australia/Sydney",
];

/// Locales supported by the category generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    En,
    FrFr,
    JaJp,
    PtBr,
    ZhCn,
    ZhTw,
    ArSa,
}

impl Locale {
    /// Parses a locale identifier. Case-insensitive, `-`/`_` tolerant,
    /// country suffixes of `en` collapse to `en`. Unknown identifiers are a
    /// configuration error surfaced before any generation begins.
    pub fn parse(identifier: &str) -> Result<Self> {
        let normalized = identifier.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "en" | "en_us" | "en_gb" => Ok(Locale::En),
            "fr" | "fr_fr" => Ok(Locale::FrFr),
            "ja" | "ja_jp" => Ok(Locale::JaJp),
            "pt" | "pt_br" => Ok(Locale::PtBr),
            "zh" | "zh_cn" => Ok(Locale::ZhCn),
            "zh_tw" => Ok(Locale::ZhTw),
            "ar" | "ar_sa" => Ok(Locale::ArSa),
            _ => Err(TycheError::UnknownLocale(identifier.to_string())),
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::En
    }
}

/// Dispatches a localized `fake` constructor against the provider's locale,
/// drawing from the shared RNG.
macro_rules! localized {
    ($provider:ident, $cons:path $(, $arg:expr)*) => {
        match $provider.locale {
            Locale::En => $cons(EN $(, $arg)*).fake_with_rng(&mut $provider.rng),
            Locale::FrFr => $cons(FR_FR $(, $arg)*).fake_with_rng(&mut $provider.rng),
            Locale::JaJp => $cons(JA_JP $(, $arg)*).fake_with_rng(&mut $provider.rng),
            Locale::PtBr => $cons(PT_BR $(, $arg)*).fake_with_rng(&mut $provider.rng),
            Locale::ZhCn => $cons(ZH_CN $(, $arg)*).fake_with_rng(&mut $provider.rng),
            Locale::ZhTw => $cons(ZH_TW $(, $arg)*).fake_with_rng(&mut $provider.rng),
            Locale::ArSa => $cons(AR_SA $(, $arg)*).fake_with_rng(&mut $provider.rng),
        }
    };
}

/// Semantic value categories addressable by field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticCategory {
    FullName,
    FirstName,
    LastName,
    NameWithTitle,
    Username,
    Password,
    Email,
    FreeEmail,
    Url,
    Uri,
    Domain,
    PhoneNumber,
    CellNumber,
    Address,
    StreetAddress,
    City,
    Country,
    CountryCode,
    State,
    ZipCode,
    Company,
    Profession,
    Industry,
    JobTitle,
    Word,
    Sentence,
    Paragraph,
    Text,
    Ipv4,
    Ipv6,
    MacAddress,
    UserAgent,
    Date,
    Time,
    DateTime,
    ColorName,
    HexColor,
    RgbColor,
    FileName,
    FileExtension,
    MimeType,
    FilePath,
    Boolean,
    Uuid,
    Md5,
    Sha256,
    CurrencyCode,
    CurrencyName,
    CurrencySymbol,
    CreditCardNumber,
    Latitude,
    Longitude,
    LocaleString,
    TimeZone,
}

impl SemanticCategory {
    /// The static field-name table: exact lower-cased field names that map
    /// to a semantic category, overriding generic type-based synthesis.
    pub fn from_field_name(name: &str) -> Option<Self> {
        use SemanticCategory::*;
        let category = match name {
            "name" | "full_name" => FullName,
            "first_name" => FirstName,
            "last_name" => LastName,
            "username" | "user_name" => Username,
            "password" => Password,
            "email" | "email_address" => Email,
            "free_email" => FreeEmail,
            "url" | "website" | "homepage" => Url,
            "uri" => Uri,
            "domain" | "domain_name" => Domain,
            "phone" | "phone_number" => PhoneNumber,
            "cell_phone" | "mobile" => CellNumber,
            "address" => Address,
            "street_address" | "street" => StreetAddress,
            "city" => City,
            "country" => Country,
            "country_code" => CountryCode,
            "state" => State,
            "zip_code" | "zipcode" | "zip" | "postal_code" | "postcode" => ZipCode,
            "company" | "company_name" => Company,
            "profession" => Profession,
            "industry" => Industry,
            "job" | "job_title" => JobTitle,
            "word" => Word,
            "sentence" => Sentence,
            "paragraph" => Paragraph,
            "text" => Text,
            "ipv4" | "ip_address" | "ip" => Ipv4,
            "ipv6" => Ipv6,
            "mac_address" | "mac" => MacAddress,
            "user_agent" => UserAgent,
            "color" | "color_name" => ColorName,
            "hex_color" => HexColor,
            "rgb_color" => RgbColor,
            "file_name" | "filename" => FileName,
            "file_extension" => FileExtension,
            "mime_type" => MimeType,
            "file_path" => FilePath,
            "uuid" | "guid" => Uuid,
            "md5" => Md5,
            "sha256" | "hash" | "checksum" => Sha256,
            "currency" | "currency_code" => CurrencyCode,
            "currency_name" => CurrencyName,
            "currency_symbol" => CurrencySymbol,
            "credit_card" | "credit_card_number" | "card_number" => CreditCardNumber,
            "latitude" => Latitude,
            "longitude" => Longitude,
            "locale" => LocaleString,
            "timezone" | "time_zone" => TimeZone,
            _ => return None,
        };
        Some(category)
    }
}

/// Seedable source of realistic fake values.
///
/// Holds the single `StdRng` all synthesis draws from. The temporal anchor
/// for date/datetime windows is captured at construction (whole-second
/// precision) so one provider re-seeded mid-run reproduces its output.
pub struct FakeProvider {
    locale: Locale,
    rng: StdRng,
    anchor: DateTime<Utc>,
}

impl FakeProvider {
    /// Creates a provider. An unknown locale fails fast, before any
    /// generation; an absent seed draws entropy from the OS.
    pub fn new(locale: Option<&str>, seed: Option<u64>) -> Result<Self> {
        let locale = match locale {
            Some(identifier) => Locale::parse(identifier)?,
            None => Locale::default(),
        };
        let rng = match seed {
            Some(n) => StdRng::seed_from_u64(n),
            None => StdRng::from_entropy(),
        };
        let now = Utc::now();
        Ok(Self {
            locale,
            rng,
            anchor: now.with_nanosecond(0).unwrap_or(now),
        })
    }

    /// Deterministically re-seeds the stream.
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Direct access to the shared stream, for numeric and structural draws.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Generates one value for a semantic category.
    pub fn by_category(&mut self, category: SemanticCategory) -> Value {
        use SemanticCategory::*;
        match category {
            FullName => json!(self.full_name()),
            FirstName => {
                let s: String = localized!(self, f_name::FirstName);
                json!(s)
            }
            LastName => {
                let s: String = localized!(self, f_name::LastName);
                json!(s)
            }
            NameWithTitle => {
                let s: String = localized!(self, f_name::NameWithTitle);
                json!(s)
            }
            Username => json!(self.username()),
            Password => {
                let s: String = localized!(self, f_internet::Password, 8..17);
                json!(s)
            }
            Email => json!(self.email()),
            FreeEmail => {
                let s: String = localized!(self, f_internet::FreeEmail);
                json!(s)
            }
            Url => json!(format!("https://{}/", self.domain())),
            Uri => {
                let path = self.word().to_lowercase();
                json!(format!("https://{}/{}", self.domain(), path))
            }
            Domain => json!(self.domain()),
            PhoneNumber => {
                let s: String = localized!(self, f_phone::PhoneNumber);
                json!(s)
            }
            CellNumber => {
                let s: String = localized!(self, f_phone::CellNumber);
                json!(s)
            }
            Address => json!(self.postal_address()),
            StreetAddress => {
                let number: String = localized!(self, f_address::BuildingNumber);
                let street: String = localized!(self, f_address::StreetName);
                json!(format!("{number} {street}"))
            }
            City => {
                let s: String = localized!(self, f_address::CityName);
                json!(s)
            }
            Country => {
                let s: String = localized!(self, f_address::CountryName);
                json!(s)
            }
            CountryCode => {
                let s: String = localized!(self, f_address::CountryCode);
                json!(s)
            }
            State => {
                let s: String = localized!(self, f_address::StateName);
                json!(s)
            }
            ZipCode => {
                let s: String = localized!(self, f_address::ZipCode);
                json!(s)
            }
            Company => {
                let s: String = localized!(self, f_company::CompanyName);
                json!(s)
            }
            Profession => {
                let s: String = localized!(self, f_company::Profession);
                json!(s)
            }
            Industry => {
                let s: String = localized!(self, f_company::Industry);
                json!(s)
            }
            JobTitle => {
                let s: String = localized!(self, f_job::Title);
                json!(s)
            }
            Word => json!(self.word()),
            Sentence => json!(self.sentence(4, 9)),
            Paragraph => {
                let s: String = localized!(self, f_lorem::Paragraph, 2..4);
                json!(s)
            }
            Text => json!(self.sentence(8, 20)),
            Ipv4 => {
                let s: String = localized!(self, f_internet::IPv4);
                json!(s)
            }
            Ipv6 => {
                let s: String = localized!(self, f_internet::IPv6);
                json!(s)
            }
            MacAddress => {
                let s: String = localized!(self, f_internet::MACAddress);
                json!(s)
            }
            UserAgent => {
                let s: String = localized!(self, f_internet::UserAgent);
                json!(s)
            }
            Date => json!(self.date()),
            Time => json!(self.time_of_day()),
            DateTime => json!(self.datetime()),
            ColorName => {
                let name = COLOR_NAMES.choose(&mut self.rng).copied().unwrap_or("red");
                json!(name)
            }
            HexColor => json!(format!("#{:06x}", self.rng.gen_range(0..0x100_0000))),
            RgbColor => {
                let (r, g, b) = (
                    self.rng.gen_range(0..256),
                    self.rng.gen_range(0..256),
                    self.rng.gen_range(0..256),
                );
                json!(format!("rgb({r},{g},{b})"))
            }
            FileName => {
                let s: String = localized!(self, f_filesystem::FileName);
                json!(s)
            }
            FileExtension => {
                let s: String = localized!(self, f_filesystem::FileExtension);
                json!(s)
            }
            MimeType => {
                let s: String = localized!(self, f_filesystem::MimeType);
                json!(s)
            }
            FilePath => {
                let s: String = localized!(self, f_filesystem::FilePath);
                json!(s)
            }
            Boolean => {
                let b: bool = localized!(self, f_boolean::Boolean, 50);
                json!(b)
            }
            Uuid => json!(self.uuid_v4()),
            Md5 => json!(self.hex_string(32)),
            Sha256 => json!(self.hex_string(64)),
            CurrencyCode => {
                let s: String = localized!(self, f_currency::CurrencyCode);
                json!(s)
            }
            CurrencyName => {
                let s: String = localized!(self, f_currency::CurrencyName);
                json!(s)
            }
            CurrencySymbol => {
                let s: String = localized!(self, f_currency::CurrencySymbol);
                json!(s)
            }
            CreditCardNumber => {
                let s: String = localized!(self, f_creditcard::CreditCardNumber);
                json!(s)
            }
            Latitude => json!(round2(self.rng.gen_range(-90.0..=90.0))),
            Longitude => json!(round2(self.rng.gen_range(-180.0..=180.0))),
            LocaleString => {
                let s = LOCALE_STRINGS.choose(&mut self.rng).copied().unwrap_or("en_US");
                json!(s)
            }
            TimeZone => {
                let s = TIMEZONES.choose(&mut self.rng).copied().unwrap_or("UTC");
                json!(s)
            }
        }
    }

    pub fn full_name(&mut self) -> String {
        localized!(self, f_name::Name)
    }

    pub fn username(&mut self) -> String {
        localized!(self, f_internet::Username)
    }

    pub fn email(&mut self) -> String {
        localized!(self, f_internet::SafeEmail)
    }

    pub fn word(&mut self) -> String {
        localized!(self, f_lorem::Word)
    }

    /// A sentence of exactly `min..max` words (uniform word count).
    pub fn sentence(&mut self, min_words: usize, max_words: usize) -> String {
        localized!(self, f_lorem::Sentence, min_words..max_words.max(min_words + 1))
    }

    pub fn domain(&mut self) -> String {
        let word = self.word().to_lowercase();
        let suffix: String = localized!(self, f_internet::DomainSuffix);
        format!("{word}.{suffix}")
    }

    /// A single-line postal address composed from localized components.
    pub fn postal_address(&mut self) -> String {
        let number: String = localized!(self, f_address::BuildingNumber);
        let street: String = localized!(self, f_address::StreetName);
        let city: String = localized!(self, f_address::CityName);
        let state: String = localized!(self, f_address::StateAbbr);
        let zip: String = localized!(self, f_address::ZipCode);
        format!("{number} {street}, {city}, {state} {zip}")
    }

    /// A version-4 UUID built from RNG bytes, so it is seed-reproducible.
    pub fn uuid_v4(&mut self) -> String {
        uuid::Builder::from_random_bytes(self.rng.gen())
            .into_uuid()
            .to_string()
    }

    /// RFC 3339 UTC datetime within the last ten years.
    pub fn datetime(&mut self) -> String {
        let offset = self.rng.gen_range(0..=TEN_YEARS_SECS);
        (self.anchor - Duration::seconds(offset)).to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// ISO-8601 date within the last ten years.
    pub fn date(&mut self) -> String {
        let offset = self.rng.gen_range(0..=TEN_YEARS_DAYS);
        (self.anchor.date_naive() - Duration::days(offset))
            .format("%Y-%m-%d")
            .to_string()
    }

    /// An arbitrary `HH:MM:SS` time of day.
    pub fn time_of_day(&mut self) -> String {
        let hour = self.rng.gen_range(0..24);
        let minute = self.rng.gen_range(0..60);
        let second = self.rng.gen_range(0..60);
        format!("{hour:02}:{minute:02}:{second:02}")
    }

    /// A random lowercase ASCII letter (used for length padding).
    pub fn letter(&mut self) -> char {
        self.rng.gen_range(b'a'..=b'z') as char
    }

    /// An exact-length printable string.
    pub fn exact_string(&mut self, len: usize) -> String {
        (0..len).map(|_| self.letter()).collect()
    }

    fn hex_string(&mut self, len: usize) -> String {
        const HEX: &[u8] = b"0123456789abcdef";
        (0..len)
            .map(|_| HEX[self.rng.gen_range(0..HEX.len())] as char)
            .collect()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_locale_is_an_error() {
        assert!(matches!(
            FakeProvider::new(Some("xx_XX"), None),
            Err(TycheError::UnknownLocale(_))
        ));
    }

    #[test]
    fn test_locale_aliases() {
        assert_eq!(Locale::parse("EN-us").unwrap(), Locale::En);
        assert_eq!(Locale::parse("fr_FR").unwrap(), Locale::FrFr);
        assert_eq!(Locale::parse("ja").unwrap(), Locale::JaJp);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = FakeProvider::new(None, Some(42)).unwrap();
        let mut b = FakeProvider::new(None, Some(42)).unwrap();
        for _ in 0..10 {
            assert_eq!(a.full_name(), b.full_name());
            assert_eq!(a.email(), b.email());
            assert_eq!(a.uuid_v4(), b.uuid_v4());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = FakeProvider::new(None, Some(1)).unwrap();
        let mut b = FakeProvider::new(None, Some(2)).unwrap();
        let names_a: Vec<String> = (0..5).map(|_| a.full_name()).collect();
        let names_b: Vec<String> = (0..5).map(|_| b.full_name()).collect();
        assert_ne!(names_a, names_b);
    }

    #[test]
    fn test_reseed_replays_stream() {
        let mut provider = FakeProvider::new(None, Some(7)).unwrap();
        let first: Vec<String> = (0..5).map(|_| provider.email()).collect();
        provider.seed(7);
        let second: Vec<String> = (0..5).map(|_| provider.email()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_field_name_table() {
        assert_eq!(
            SemanticCategory::from_field_name("email"),
            Some(SemanticCategory::Email)
        );
        assert_eq!(
            SemanticCategory::from_field_name("first_name"),
            Some(SemanticCategory::FirstName)
        );
        assert_eq!(
            SemanticCategory::from_field_name("zip_code"),
            Some(SemanticCategory::ZipCode)
        );
        assert_eq!(
            SemanticCategory::from_field_name("hex_color"),
            Some(SemanticCategory::HexColor)
        );
        assert_eq!(SemanticCategory::from_field_name("quantity"), None);
    }

    #[test]
    fn test_uuid_shape() {
        let mut provider = FakeProvider::new(None, Some(3)).unwrap();
        let id = provider.uuid_v4();
        let parsed = uuid::Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_datetime_is_rfc3339_utc() {
        let mut provider = FakeProvider::new(None, Some(3)).unwrap();
        let stamp = provider.datetime();
        let parsed = chrono::DateTime::parse_from_rfc3339(&stamp).unwrap();
        assert!(parsed.timestamp() <= Utc::now().timestamp());
    }

    #[test]
    fn test_date_and_time_shapes() {
        let mut provider = FakeProvider::new(None, Some(3)).unwrap();
        let date = provider.date();
        assert!(chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_ok());
        let time = provider.time_of_day();
        assert!(chrono::NaiveTime::parse_from_str(&time, "%H:%M:%S").is_ok());
    }

    #[test]
    fn test_exact_string_length() {
        let mut provider = FakeProvider::new(None, Some(3)).unwrap();
        assert_eq!(provider.exact_string(12).chars().count(), 12);
    }

    #[test]
    fn test_hex_color_shape() {
        let mut provider = FakeProvider::new(None, Some(9)).unwrap();
        let value = provider.by_category(SemanticCategory::HexColor);
        let color = value.as_str().unwrap();
        assert!(color.starts_with('#'));
        assert_eq!(color.len(), 7);
    }

    #[test]
    fn test_localized_generation_is_deterministic() {
        let mut a = FakeProvider::new(Some("ja_JP"), Some(11)).unwrap();
        let mut b = FakeProvider::new(Some("ja_JP"), Some(11)).unwrap();
        assert_eq!(a.full_name(), b.full_name());
        assert_eq!(a.postal_address(), b.postal_address());
    }
}
