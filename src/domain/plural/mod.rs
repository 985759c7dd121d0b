// SPDX-License-Identifier: MPL-2.0
//! Plural form selection for numerus messages.
//!
//! Forms are ordered the way Qt Linguist orders `<numerusform>` elements for
//! each language, so index `i` of [`PluralRule::form_index`] picks the
//! `i`-th `<numerusform>` of a translation.

/// Plural rule families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralRule {
    /// No plural distinction (Japanese, Chinese, Korean, ...).
    Single,
    /// Singular for exactly 1 (English, Danish, German, ...).
    OneOther,
    /// Singular for 0 and 1 (French, Occitan, ...).
    ZeroOneOther,
    /// East Slavic and Serbo-Croatian: 1, 2–4, many.
    Slavic,
    /// Polish: 1, 2–4, many.
    Polish,
    /// Czech and Slovak: 1, 2–4, other.
    CzechSlovak,
    /// Lithuanian.
    Lithuanian,
    /// Latvian: zero form last.
    Latvian,
    /// Romanian.
    Romanian,
    /// Irish: 1, 2, other.
    Irish,
    /// Slovenian: n%100 of 1, 2, 3–4, other.
    Slovenian,
    /// Arabic: six forms.
    Arabic,
}

impl PluralRule {
    /// Picks the rule for a locale string such as `da`, `fr_FR` or `pt-BR`.
    ///
    /// Unknown languages use English rules.
    #[must_use]
    pub fn for_language(locale: &str) -> Self {
        let language = locale
            .split(['_', '-', '.', '@'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "ja" | "zh" | "ko" | "vi" | "th" | "id" | "ms" | "lo" | "my" | "km" => Self::Single,
            "fr" | "oc" | "ti" | "tl" | "fil" | "ln" | "mg" => Self::ZeroOneOther,
            "ru" | "uk" | "be" | "sr" | "hr" | "bs" => Self::Slavic,
            "pl" => Self::Polish,
            "cs" | "sk" => Self::CzechSlovak,
            "lt" => Self::Lithuanian,
            "lv" => Self::Latvian,
            "ro" | "mo" => Self::Romanian,
            "ga" => Self::Irish,
            "sl" => Self::Slovenian,
            "ar" => Self::Arabic,
            _ => Self::OneOther,
        }
    }

    /// Number of `<numerusform>` elements a translation should carry.
    #[must_use]
    pub fn form_count(self) -> usize {
        match self {
            Self::Single => 1,
            Self::OneOther | Self::ZeroOneOther => 2,
            Self::Slavic
            | Self::Polish
            | Self::CzechSlovak
            | Self::Lithuanian
            | Self::Latvian
            | Self::Romanian
            | Self::Irish => 3,
            Self::Slovenian => 4,
            Self::Arabic => 6,
        }
    }

    /// CLDR plural category of each form, in form order.
    #[must_use]
    pub fn cldr_categories(self) -> &'static [&'static str] {
        match self {
            Self::Single => &["other"],
            Self::OneOther | Self::ZeroOneOther => &["one", "other"],
            Self::Slavic | Self::Polish => &["one", "few", "many"],
            Self::CzechSlovak | Self::Lithuanian | Self::Romanian => &["one", "few", "other"],
            Self::Latvian => &["one", "other", "zero"],
            Self::Irish => &["one", "two", "other"],
            Self::Slovenian => &["one", "two", "few", "other"],
            Self::Arabic => &["zero", "one", "two", "few", "many", "other"],
        }
    }

    /// C expression of `n` that gettext evaluates to the form index.
    ///
    /// Gives the same index as [`form_index`](Self::form_index).
    #[must_use]
    pub fn gettext_expr(self) -> &'static str {
        match self {
            Self::Single => "0",
            Self::OneOther => "n != 1",
            Self::ZeroOneOther => "n > 1",
            Self::Slavic => {
                "n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<12 || n%100>14) ? 1 : 2"
            }
            Self::Polish => "n==1 ? 0 : n%10>=2 && n%10<=4 && (n%100<12 || n%100>14) ? 1 : 2",
            Self::CzechSlovak => "n==1 ? 0 : n>=2 && n<=4 ? 1 : 2",
            Self::Lithuanian => {
                "n%10==1 && n%100!=11 ? 0 : n%10>=2 && (n%100<10 || n%100>=20) ? 1 : 2"
            }
            Self::Latvian => "n%10==1 && n%100!=11 ? 0 : n!=0 ? 1 : 2",
            Self::Romanian => "n==1 ? 0 : n==0 || (n%100>0 && n%100<20) ? 1 : 2",
            Self::Irish => "n==1 ? 0 : n==2 ? 1 : 2",
            Self::Slovenian => "n%100==1 ? 0 : n%100==2 ? 1 : n%100==3 || n%100==4 ? 2 : 3",
            Self::Arabic => {
                "n==0 ? 0 : n==1 ? 1 : n==2 ? 2 : n%100>=3 && n%100<=10 ? 3 : n%100>=11 ? 4 : 5"
            }
        }
    }

    /// Value of the PO `Plural-Forms` header field.
    #[must_use]
    pub fn gettext_plural_forms(self) -> String {
        format!("nplurals={}; plural=({});", self.form_count(), self.gettext_expr())
    }

    /// Index of the form to use for quantity `n`.
    #[must_use]
    pub fn form_index(self, n: u64) -> usize {
        let n10 = n % 10;
        let n100 = n % 100;
        match self {
            Self::Single => 0,
            Self::OneOther => usize::from(n != 1),
            Self::ZeroOneOther => usize::from(n > 1),
            Self::Slavic => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Self::Polish => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Self::CzechSlovak => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
            Self::Lithuanian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if n10 >= 2 && !(10..20).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Self::Latvian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if n != 0 {
                    1
                } else {
                    2
                }
            }
            Self::Romanian => {
                if n == 1 {
                    0
                } else if n == 0 || (1..=19).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Self::Irish => match n {
                1 => 0,
                2 => 1,
                _ => 2,
            },
            Self::Slovenian => match n100 {
                1 => 0,
                2 => 1,
                3 | 4 => 2,
                _ => 3,
            },
            Self::Arabic => match n {
                0 => 0,
                1 => 1,
                2 => 2,
                _ if (3..=10).contains(&n100) => 3,
                _ if n100 >= 11 => 4,
                _ => 5,
            },
        }
    }
}
