//! Reconciles raw production-country names with the names the geographic
//! renderer recognizes.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Alternate or historical spelling -> canonical name.
///
/// Keys are unique. "Taiwan" used to appear twice with different targets; the
/// later identity entry is the effective one, so it lives in `CANONICAL`.
const ALIASES: &[(&str, &str)] = &[
    ("United States of America", "United States"),
    ("South Korea", "Korea, Republic of"),
    ("Congo", "Democratic Republic of the Congo"),
    ("Lao People's Democratic Republic", "Laos"),
    ("Syrian Arab Republic", "Syria"),
    ("Russian Federation", "Russia"),
    ("Viet Nam", "Vietnam"),
    ("Palestinian Territory", "Palestine"),
    ("Northern Ireland", "United Kingdom"),
    ("Macedonia", "North Macedonia"),
    ("Brunei Darussalam", "Brunei"),
    ("Micronesia", "Federated States of Micronesia"),
    ("Macao", "Macau"),
    ("St. Helena", "Saint Helena"),
    ("St. Kitts and Nevis", "Saint Kitts and Nevis"),
    ("St. Vincent and the Grenadines", "Saint Vincent and the Grenadines"),
    ("Svalbard & Jan Mayen Islands", "Svalbard and Jan Mayen"),
    ("Cabo Verde", "Cape Verde"),
    ("Czechia", "Czech Republic"),
    ("Eswatini", "Swaziland"),
    ("Gambia, The", "Gambia"),
    ("Burma", "Myanmar"),
    ("Côte d'Ivoire", "Ivory Coast"),
    ("Bahamas, The", "Bahamas"),
];

const CANONICAL: &[&str] = &[
    "Taiwan", "Timor-Leste", "South Georgia and the South Sandwich Islands",
    "Antigua and Barbuda", "Bosnia and Herzegovina", "Guinea-Bissau", "Afghanistan", "Albania",
    "Algeria", "Andorra", "Angola", "Antarctica", "Argentina", "Armenia", "Australia",
    "Austria", "Azerbaijan", "Bahamas", "Bahrain", "Bangladesh", "Barbados", "Belarus",
    "Belgium", "Belize", "Benin", "Bhutan", "Bolivia", "Botswana", "Brazil", "Brunei",
    "Bulgaria", "Burkina Faso", "Burundi", "Cambodia", "Cameroon", "Canada",
    "Central African Republic", "Chad", "Chile", "China", "Colombia", "Comoros", "Costa Rica",
    "Croatia", "Cuba", "Cyprus", "Czech Republic", "Denmark", "Djibouti", "Dominica",
    "Dominican Republic", "Ecuador", "Egypt", "El Salvador", "Equatorial Guinea", "Eritrea",
    "Estonia", "Ethiopia", "Fiji", "Finland", "France", "Gabon", "Gambia", "Georgia", "Germany",
    "Ghana", "Greece", "Grenada", "Guatemala", "Guinea", "Guyana", "Haiti", "Honduras",
    "Hungary", "Iceland", "India", "Indonesia", "Iran", "Iraq", "Ireland", "Israel", "Italy",
    "Jamaica", "Japan", "Jordan", "Kazakhstan", "Kenya", "Kiribati", "Kosovo", "Kuwait",
    "Kyrgyzstan", "Laos", "Latvia", "Lebanon", "Lesotho", "Liberia", "Libya", "Liechtenstein",
    "Lithuania", "Luxembourg", "Madagascar", "Malawi", "Malaysia", "Maldives", "Mali", "Malta",
    "Marshall Islands", "Mauritania", "Mauritius", "Mexico", "Moldova", "Monaco", "Mongolia",
    "Montenegro", "Montserrat", "Morocco", "Mozambique", "Myanmar", "Namibia", "Nauru", "Nepal",
    "Netherlands", "New Zealand", "Nicaragua", "Niger", "Nigeria", "North Macedonia", "Norway",
    "Oman", "Pakistan", "Palau", "Palestine", "Panama", "Papua New Guinea", "Paraguay", "Peru",
    "Philippines", "Poland", "Portugal", "Qatar", "Romania", "Russia", "Rwanda",
    "Saint Kitts and Nevis", "Saint Lucia", "Saint Vincent and the Grenadines", "Samoa",
    "San Marino", "Sao Tome and Principe", "Saudi Arabia", "Senegal", "Serbia", "Seychelles",
    "Sierra Leone", "Singapore", "Slovakia", "Slovenia", "Solomon Islands", "Somalia",
    "South Africa", "South Sudan", "Spain", "Sri Lanka", "Sudan", "Suriname", "Swaziland",
    "Sweden", "Switzerland", "Syria", "Tajikistan", "Tanzania", "Thailand", "Togo", "Tonga",
    "Trinidad and Tobago", "Tunisia", "Turkey", "Turkmenistan", "Tuvalu", "Uganda", "Ukraine",
    "United Arab Emirates", "United Kingdom", "United States", "Uruguay", "Uzbekistan",
    "Vanuatu", "Vatican City", "Venezuela", "Vietnam", "Yemen", "Zambia", "Zimbabwe",
];

static COUNTRY_TABLE: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut table = HashMap::with_capacity(CANONICAL.len() + ALIASES.len());
    for name in CANONICAL {
        table.insert(*name, *name);
    }
    for (alias, canonical) in ALIASES {
        table.insert(*alias, *canonical);
    }
    table
});

/// Map one raw name to its canonical form. Unknown names come back trimmed.
pub fn reconcile(raw: &str) -> String {
    let trimmed = raw.trim();
    COUNTRY_TABLE
        .get(trimmed)
        .map_or_else(|| trimmed.to_string(), |canonical| (*canonical).to_string())
}

/// Reconcile every entry of a normalized country list, keeping length and order.
pub fn reconcile_all(countries: &[String]) -> Vec<String> {
    countries.iter().map(|c| reconcile(c)).collect()
}

/// Whether the trimmed name is a key of the reconciliation table.
pub fn is_known(raw: &str) -> bool {
    COUNTRY_TABLE.contains_key(raw.trim())
}
