use serde::Serialize;

/// Semantic subtype of a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSubtype {
    /// Free-form text, passed through as-is.
    Basic,
    /// Literal `yes`/`no`, parsed to a boolean.
    YesNo,
    /// Credential material (tokens, passwords); stored redacted.
    LoginInfo,
    /// Channel list whose `->` lines derive the receive-side filter.
    ReceiveFilter,
    /// Channel list whose `->` lines derive the broadcast-side filter.
    BroadcastFilter,
}

/// Description of one recognized configuration key.
///
/// Defined statically per component: the universal table below covers the
/// keys every endpoint accepts, and each connector type contributes its own
/// table through the catalog.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub subtype: FieldSubtype,
    /// Accepts multiple newline-separated values.
    pub multi_value: bool,
    pub required: bool,
    pub default: Option<&'static str>,
}

impl FieldSpec {
    #[must_use]
    pub const fn new(subtype: FieldSubtype) -> Self {
        Self {
            subtype,
            multi_value: false,
            required: false,
            default: None,
        }
    }

    #[must_use]
    pub const fn multi(mut self) -> Self {
        self.multi_value = true;
        self
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub const fn default_value(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }
}

/// Ordered field-spec table; parsing walks it in declaration order.
pub type FieldSpecs = &'static [(&'static str, FieldSpec)];

/// Keys every endpoint section accepts, regardless of connector type.
pub const UNIVERSAL_FIELD_SPECS: FieldSpecs = &[
    ("type", FieldSpec::new(FieldSubtype::Basic).required()),
    (
        "active",
        FieldSpec::new(FieldSubtype::YesNo).default_value("yes"),
    ),
    (
        "receiver",
        FieldSpec::new(FieldSubtype::YesNo).default_value("yes"),
    ),
    (
        "broadcaster",
        FieldSpec::new(FieldSubtype::YesNo).default_value("no"),
    ),
    (
        "hide_channels",
        FieldSpec::new(FieldSubtype::YesNo).default_value("no"),
    ),
];
