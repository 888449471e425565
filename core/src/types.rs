//! Domain types for the profile draft.
//!
//! # Design
//! `ProfileDraft` is a plain value: every update goes through
//! [`ProfileDraft::with`], which returns a new draft with exactly one field
//! replaced. The wire representation is derived straight from these types
//! (camelCase keys, unset enumerations and dates as `""`), so serializing a
//! snapshot needs no intermediate DTO.
//!
//! The only write-time checks are the shape restrictions an input widget
//! would impose (a date picker yields a date, a color picker yields
//! `#RRGGBB`). Range and required-field rules live in `validate`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{Display, EnumIter, EnumString};

use crate::error::FormError;
use crate::seasons::SeasonSet;

pub const DEFAULT_FAVORITE_COLOR: &str = "#0EA5E9";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    #[serde(rename = "")]
    #[strum(to_string = "", serialize = "unset")]
    Unset,
}

/// The fixed catalogue offered by the favorite-animal picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Animal {
    Dog,
    Cat,
    Bird,
    Fish,
    Rabbit,
    Hamster,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

/// A `#RRGGBB` color as produced by a color picker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self(DEFAULT_FAVORITE_COLOR.to_string())
    }
}

impl FromStr for HexColor {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| FormError::invalid_field("favoriteColor", "expected a leading '#'"))?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(FormError::invalid_field(
                "favoriteColor",
                format!("expected #RRGGBB, got {s:?}"),
            ));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for HexColor {
    type Error = FormError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Secret text. Redacted in `Debug` output, but serialized in plaintext
/// because the acceptor expects it in the payload.
#[derive(Debug)]
pub struct Password(SecretString);

impl Password {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(SecretString::from(secret.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }
}

impl Default for Password {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl Clone for Password {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for Password {}

impl Serialize for Password {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.expose())
    }
}

impl<'de> Deserialize<'de> for Password {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// Identity values pre-filled into every fresh draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSeed {
    pub first_name: String,
    pub last_name: String,
}

impl Default for DraftSeed {
    fn default() -> Self {
        Self {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
        }
    }
}

/// The user's unsaved form answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub age: String,
    pub gender: Gender,
    #[serde(with = "blank_as_none")]
    pub birth_date: Option<NaiveDate>,
    pub favorite_color: HexColor,
    pub seasons: SeasonSet,
    #[serde(with = "blank_as_none")]
    pub favorite_animal: Option<Animal>,
    pub password: Password,
    pub about_me: String,
}

impl ProfileDraft {
    /// The canonical default draft for `seed`.
    pub fn seeded(seed: &DraftSeed) -> Self {
        Self {
            first_name: seed.first_name.clone(),
            last_name: seed.last_name.clone(),
            middle_name: String::new(),
            age: String::new(),
            gender: Gender::Unset,
            birth_date: None,
            favorite_color: HexColor::default(),
            seasons: SeasonSet::default(),
            favorite_animal: None,
            password: Password::default(),
            about_me: String::new(),
        }
    }

    /// Return a copy of `self` with the single field named by `value` replaced.
    pub fn with(&self, value: FieldValue) -> Self {
        let mut next = self.clone();
        match value {
            FieldValue::FirstName(v) => next.first_name = v,
            FieldValue::LastName(v) => next.last_name = v,
            FieldValue::MiddleName(v) => next.middle_name = v,
            FieldValue::Age(v) => next.age = v,
            FieldValue::Gender(v) => next.gender = v,
            FieldValue::BirthDate(v) => next.birth_date = v,
            FieldValue::FavoriteColor(v) => next.favorite_color = v,
            FieldValue::Seasons(v) => next.seasons = v,
            FieldValue::FavoriteAnimal(v) => next.favorite_animal = v,
            FieldValue::Password(v) => next.password = v,
            FieldValue::AboutMe(v) => next.about_me = v,
        }
        next
    }

    /// Read one field back as a `FieldValue`.
    pub fn get(&self, field: FieldName) -> FieldValue {
        match field {
            FieldName::FirstName => FieldValue::FirstName(self.first_name.clone()),
            FieldName::LastName => FieldValue::LastName(self.last_name.clone()),
            FieldName::MiddleName => FieldValue::MiddleName(self.middle_name.clone()),
            FieldName::Age => FieldValue::Age(self.age.clone()),
            FieldName::Gender => FieldValue::Gender(self.gender),
            FieldName::BirthDate => FieldValue::BirthDate(self.birth_date),
            FieldName::FavoriteColor => FieldValue::FavoriteColor(self.favorite_color.clone()),
            FieldName::Seasons => FieldValue::Seasons(self.seasons.clone()),
            FieldName::FavoriteAnimal => FieldValue::FavoriteAnimal(self.favorite_animal),
            FieldName::Password => FieldValue::Password(self.password.clone()),
            FieldName::AboutMe => FieldValue::AboutMe(self.about_me.clone()),
        }
    }
}

/// Wire names of the draft fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum FieldName {
    FirstName,
    LastName,
    MiddleName,
    Age,
    Gender,
    BirthDate,
    FavoriteColor,
    Seasons,
    FavoriteAnimal,
    Password,
    AboutMe,
}

/// A new value for exactly one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    FirstName(String),
    LastName(String),
    MiddleName(String),
    Age(String),
    Gender(Gender),
    BirthDate(Option<NaiveDate>),
    FavoriteColor(HexColor),
    Seasons(SeasonSet),
    FavoriteAnimal(Option<Animal>),
    Password(Password),
    AboutMe(String),
}

impl FieldValue {
    pub fn field(&self) -> FieldName {
        match self {
            FieldValue::FirstName(_) => FieldName::FirstName,
            FieldValue::LastName(_) => FieldName::LastName,
            FieldValue::MiddleName(_) => FieldName::MiddleName,
            FieldValue::Age(_) => FieldName::Age,
            FieldValue::Gender(_) => FieldName::Gender,
            FieldValue::BirthDate(_) => FieldName::BirthDate,
            FieldValue::FavoriteColor(_) => FieldName::FavoriteColor,
            FieldValue::Seasons(_) => FieldName::Seasons,
            FieldValue::FavoriteAnimal(_) => FieldName::FavoriteAnimal,
            FieldValue::Password(_) => FieldName::Password,
            FieldValue::AboutMe(_) => FieldName::AboutMe,
        }
    }

    /// Convert raw widget text into a typed value for `field`.
    ///
    /// Applies only the restriction the matching input widget would: digits
    /// for age, ISO dates, `#RRGGBB` colors, catalogue values for the
    /// pickers. `seasons` is a composite field and cannot be set from text.
    pub fn parse(field: FieldName, raw: &str) -> Result<Self, FormError> {
        let name = field.to_string();
        let value = match field {
            FieldName::FirstName => FieldValue::FirstName(raw.to_string()),
            FieldName::LastName => FieldValue::LastName(raw.to_string()),
            FieldName::MiddleName => FieldValue::MiddleName(raw.to_string()),
            FieldName::Age => {
                if !raw.chars().all(|c| c.is_ascii_digit()) {
                    return Err(FormError::invalid_field(name, "digits only"));
                }
                FieldValue::Age(raw.to_string())
            }
            FieldName::Gender => FieldValue::Gender(
                raw.parse()
                    .map_err(|_| FormError::invalid_field(name, format!("unknown gender {raw:?}")))?,
            ),
            FieldName::BirthDate if raw.is_empty() => FieldValue::BirthDate(None),
            FieldName::BirthDate => FieldValue::BirthDate(Some(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|e| FormError::invalid_field(name, e.to_string()))?,
            )),
            FieldName::FavoriteColor => FieldValue::FavoriteColor(raw.parse()?),
            FieldName::Seasons => {
                return Err(FormError::invalid_field(name, "toggle seasons instead of setting them"));
            }
            FieldName::FavoriteAnimal if raw.is_empty() => FieldValue::FavoriteAnimal(None),
            FieldName::FavoriteAnimal => FieldValue::FavoriteAnimal(Some(
                raw.parse()
                    .map_err(|_| FormError::invalid_field(name, format!("unknown animal {raw:?}")))?,
            )),
            FieldName::Password => FieldValue::Password(Password::new(raw)),
            FieldName::AboutMe => FieldValue::AboutMe(raw.to_string()),
        };
        Ok(value)
    }
}

/// Serde adapter mapping `None` to `""` and `Some(v)` to `v.to_string()`.
mod blank_as_none {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<T: Display, S: Serializer>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.collect_str(v),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some).map_err(de::Error::custom)
    }
}
