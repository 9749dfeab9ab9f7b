//! Model field descriptors.
//!
//! [`ModelFieldDef`] captures the metadata the form glue reads from a model
//! field: its type, whether it may be left blank, its choices, help text,
//! and length/precision constraints. [`ModelFieldType`] enumerates the field
//! types and provides the *family* predicates the field mapper matches
//! against — explicit stand-ins for the subclass relationships the hosting
//! framework's field classes form (an email column *is a* character column,
//! a positive-integer column *is an* integer column, and so on).

use crate::value::Value;

/// The type of a model field.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum ModelFieldType {
    /// Auto-incrementing 32-bit integer primary key.
    Auto,
    /// Auto-incrementing 64-bit integer primary key.
    BigAuto,
    /// Variable-length string with a max length.
    Char,
    /// Unlimited-length text.
    Text,
    /// Comma-separated list of integers stored as a string.
    CommaSeparatedInteger,
    /// URL-friendly string (letters, numbers, hyphens, underscores).
    Slug,
    /// Email address.
    Email,
    /// URL.
    Url,
    /// IP address.
    IpAddress,
    /// File system path, selected from a directory listing.
    FilePath,
    /// Uploaded file.
    File,
    /// Uploaded image.
    Image,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    BigInteger,
    /// 16-bit signed integer.
    SmallInteger,
    /// Non-negative 32-bit integer.
    PositiveInteger,
    /// Non-negative 16-bit integer.
    PositiveSmallInteger,
    /// 64-bit floating-point number.
    Float,
    /// Fixed-precision decimal number.
    Decimal {
        /// Maximum total digits.
        max_digits: u32,
        /// Digits after the decimal point.
        decimal_places: u32,
    },
    /// Boolean (true/false).
    Boolean,
    /// Nullable boolean (true/false/unknown).
    NullBoolean,
    /// Date without time.
    Date,
    /// Date and time.
    DateTime,
    /// Time without date.
    Time,
    /// UUID field.
    Uuid,
    /// JSON data.
    Json,
    /// Many-to-one relationship.
    ForeignKey {
        /// The target model name (e.g. "auth.user").
        to: String,
        /// Whether this key links a child model to its concrete parent.
        parent_link: bool,
    },
    /// One-to-one relationship.
    OneToOne {
        /// The target model name.
        to: String,
        /// Whether this key links a child model to its concrete parent.
        parent_link: bool,
    },
    /// Many-to-many relationship.
    ManyToMany {
        /// The target model name.
        to: String,
    },
}

impl ModelFieldType {
    /// Returns `true` for character-backed types (the framework's string
    /// column family: plain char, text, slug, email, URL, and friends).
    pub const fn is_char_like(&self) -> bool {
        matches!(
            self,
            Self::Char
                | Self::Text
                | Self::CommaSeparatedInteger
                | Self::Slug
                | Self::Email
                | Self::Url
                | Self::IpAddress
                | Self::FilePath
                | Self::Uuid
        )
    }

    /// Returns `true` for integer-backed types, including the auto keys.
    pub const fn is_integer_like(&self) -> bool {
        matches!(
            self,
            Self::Integer
                | Self::BigInteger
                | Self::SmallInteger
                | Self::PositiveInteger
                | Self::PositiveSmallInteger
                | Self::Auto
                | Self::BigAuto
        )
    }

    /// Returns `true` for date-carrying types (a date-time column is also a
    /// date column).
    pub const fn is_date_like(&self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }

    /// Returns `true` for upload types (an image column is also a file
    /// column).
    pub const fn is_file_like(&self) -> bool {
        matches!(self, Self::File | Self::Image)
    }

    /// Returns `true` for the non-negative integer types.
    pub const fn is_positive_integer(&self) -> bool {
        matches!(self, Self::PositiveInteger | Self::PositiveSmallInteger)
    }

    /// Returns `true` for relational types.
    pub const fn is_relation(&self) -> bool {
        matches!(
            self,
            Self::ForeignKey { .. } | Self::OneToOne { .. } | Self::ManyToMany { .. }
        )
    }

    /// Returns `true` for auto-generated key types.
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto | Self::BigAuto)
    }

    /// Returns `true` if this key links a child model to its parent.
    pub const fn is_parent_link(&self) -> bool {
        matches!(
            self,
            Self::ForeignKey {
                parent_link: true,
                ..
            } | Self::OneToOne {
                parent_link: true,
                ..
            }
        )
    }
}

/// Complete definition of a model field, as exposed to the form layer.
#[derive(Debug, Clone)]
pub struct ModelFieldDef {
    /// The attribute name of this field.
    pub name: &'static str,
    /// The type of this field.
    pub field_type: ModelFieldType,
    /// Whether this field is the primary key.
    pub primary_key: bool,
    /// Whether NULL is allowed in storage.
    pub null: bool,
    /// Whether the field may be left blank in forms.
    pub blank: bool,
    /// Whether the field is editable in forms.
    pub editable: bool,
    /// Whether the field was created implicitly by the framework.
    pub auto_created: bool,
    /// Maximum character length (for character-backed fields).
    pub max_length: Option<usize>,
    /// Human-readable help text.
    pub help_text: String,
    /// Human-readable name for the field.
    pub verbose_name: String,
    /// Allowed values as (value, display label) pairs.
    pub choices: Option<Vec<(Value, String)>>,
    /// Default value for new instances.
    pub default: Option<Value>,
}

impl ModelFieldDef {
    /// Creates a new `ModelFieldDef` with sensible defaults.
    pub fn new(name: &'static str, field_type: ModelFieldType) -> Self {
        Self {
            name,
            field_type,
            primary_key: false,
            null: false,
            blank: false,
            editable: true,
            auto_created: false,
            max_length: None,
            help_text: String::new(),
            verbose_name: name.replace('_', " "),
            choices: None,
            default: None,
        }
    }

    /// Marks this field as the primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Allows NULL values in storage.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.null = true;
        self
    }

    /// Allows the field to be left blank in forms.
    #[must_use]
    pub const fn blank(mut self) -> Self {
        self.blank = true;
        self
    }

    /// Marks this field as not editable in forms.
    #[must_use]
    pub const fn not_editable(mut self) -> Self {
        self.editable = false;
        self
    }

    /// Marks this field as implicitly created by the framework.
    #[must_use]
    pub const fn auto_created(mut self) -> Self {
        self.auto_created = true;
        self
    }

    /// Sets the maximum character length.
    #[must_use]
    pub const fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = text.into();
        self
    }

    /// Sets the verbose (human-readable) name.
    #[must_use]
    pub fn verbose_name(mut self, name: impl Into<String>) -> Self {
        self.verbose_name = name.into();
        self
    }

    /// Sets the allowed choices.
    #[must_use]
    pub fn choices(mut self, choices: Vec<(Value, String)>) -> Self {
        self.choices = Some(choices);
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Returns `true` if the field declares a non-empty choice list.
    pub fn has_choices(&self) -> bool {
        self.choices.as_ref().is_some_and(|c| !c.is_empty())
    }
}

/// Model metadata: the field roster the form layer iterates over.
#[derive(Debug, Clone)]
pub struct ModelMeta {
    /// The model name (e.g. "article").
    pub model_name: &'static str,
    /// Human-readable name for the model.
    pub verbose_name: String,
    /// The model's fields, in declaration order.
    pub fields: Vec<ModelFieldDef>,
}

impl ModelMeta {
    /// Returns the primary key field, if one is declared.
    pub fn pk(&self) -> Option<&ModelFieldDef> {
        self.fields.iter().find(|f| f.primary_key)
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&ModelFieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_def_defaults() {
        let f = ModelFieldDef::new("first_name", ModelFieldType::Char);
        assert_eq!(f.name, "first_name");
        assert!(!f.primary_key);
        assert!(!f.null);
        assert!(!f.blank);
        assert!(f.editable);
        assert!(!f.auto_created);
        assert_eq!(f.verbose_name, "first name");
        assert!(f.choices.is_none());
    }

    #[test]
    fn test_field_def_builder() {
        let f = ModelFieldDef::new("email", ModelFieldType::Email)
            .blank()
            .max_length(254)
            .verbose_name("Email Address")
            .help_text("Enter a valid email");
        assert!(f.blank);
        assert_eq!(f.max_length, Some(254));
        assert_eq!(f.verbose_name, "Email Address");
        assert_eq!(f.help_text, "Enter a valid email");
    }

    #[test]
    fn test_char_family() {
        assert!(ModelFieldType::Email.is_char_like());
        assert!(ModelFieldType::Slug.is_char_like());
        assert!(ModelFieldType::Text.is_char_like());
        assert!(!ModelFieldType::Integer.is_char_like());
    }

    #[test]
    fn test_integer_family() {
        assert!(ModelFieldType::PositiveSmallInteger.is_integer_like());
        assert!(ModelFieldType::Auto.is_integer_like());
        assert!(!ModelFieldType::Float.is_integer_like());
    }

    #[test]
    fn test_date_family() {
        assert!(ModelFieldType::DateTime.is_date_like());
        assert!(ModelFieldType::Date.is_date_like());
        assert!(!ModelFieldType::Time.is_date_like());
    }

    #[test]
    fn test_relation_predicates() {
        let fk = ModelFieldType::ForeignKey {
            to: "auth.user".into(),
            parent_link: false,
        };
        assert!(fk.is_relation());
        assert!(!fk.is_parent_link());

        let link = ModelFieldType::OneToOne {
            to: "base.place".into(),
            parent_link: true,
        };
        assert!(link.is_parent_link());
    }

    #[test]
    fn test_has_choices() {
        let plain = ModelFieldDef::new("status", ModelFieldType::Char);
        assert!(!plain.has_choices());

        let with_empty = ModelFieldDef::new("status", ModelFieldType::Char).choices(vec![]);
        assert!(!with_empty.has_choices());

        let with_choices = ModelFieldDef::new("status", ModelFieldType::Char).choices(vec![
            (Value::from("d"), "Draft".to_string()),
            (Value::from("p"), "Published".to_string()),
        ]);
        assert!(with_choices.has_choices());
    }

    #[test]
    fn test_meta_pk_lookup() {
        let meta = ModelMeta {
            model_name: "article",
            verbose_name: "article".to_string(),
            fields: vec![
                ModelFieldDef::new("id", ModelFieldType::Auto)
                    .primary_key()
                    .auto_created(),
                ModelFieldDef::new("title", ModelFieldType::Char).max_length(100),
            ],
        };
        assert_eq!(meta.pk().unwrap().name, "id");
        assert_eq!(meta.field("title").unwrap().max_length, Some(100));
        assert!(meta.field("missing").is_none());
    }
}
