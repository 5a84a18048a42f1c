//! Country reference data bundled with the application.
//!
//! Used by the submission wizard's country picker and to sanity check
//! submitted country names. The table is immutable.

use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum Region {
    EastAsia,
    SoutheastAsia,
    SouthAsia,
    MiddleEast,
    CentralAsia,
    NorthAmerica,
    CentralAmerica,
    Caribbean,
    SouthAmerica,
    Europe,
    Africa,
    Oceania,
}

impl Region {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EastAsia => "East Asia",
            Self::SoutheastAsia => "Southeast Asia",
            Self::SouthAsia => "South Asia",
            Self::MiddleEast => "Middle East",
            Self::CentralAsia => "Central Asia",
            Self::NorthAmerica => "North America",
            Self::CentralAmerica => "Central America",
            Self::Caribbean => "Caribbean",
            Self::SouthAmerica => "South America",
            Self::Europe => "Europe",
            Self::Africa => "Africa",
            Self::Oceania => "Oceania",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    /// ISO 3166-1 alpha-2 code.
    pub code: &'static str,
    /// ISO 3166-1 alpha-3 code.
    pub alpha3: &'static str,
    /// English name.
    pub name: &'static str,
    /// Name in the local language, when it differs from the English one.
    pub local_name: Option<&'static str>,
    pub region: Region,
}

const fn country(
    code: &'static str,
    alpha3: &'static str,
    name: &'static str,
    local_name: Option<&'static str>,
    region: Region,
) -> Country {
    Country {
        code,
        alpha3,
        name,
        local_name,
        region,
    }
}

#[must_use]
pub fn all() -> &'static [Country] {
    COUNTRIES
}

/// Looks up a country by its alpha-2 or alpha-3 code, ignoring case.
#[must_use]
pub fn by_code(code: &str) -> Option<&'static Country> {
    let code = code.trim();
    COUNTRIES
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code) || c.alpha3.eq_ignore_ascii_case(code))
}

/// Looks up a country by its English or local name, ignoring case.
#[must_use]
pub fn by_name(name: &str) -> Option<&'static Country> {
    let needle = name.trim().to_lowercase();
    COUNTRIES.iter().find(|c| {
        c.name.to_lowercase() == needle || c.local_name.is_some_and(|l| l.to_lowercase() == needle)
    })
}

#[must_use]
pub fn is_known(name: &str) -> bool {
    by_name(name).is_some()
}

/// Case-insensitive substring search over name, local name and codes,
/// in table order. An empty query matches everything.
#[must_use]
pub fn search(query: &str) -> Vec<&'static Country> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return COUNTRIES.iter().collect();
    }
    COUNTRIES
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&needle)
                || c.local_name.is_some_and(|l| l.to_lowercase().contains(&needle))
                || c.code.eq_ignore_ascii_case(&needle)
                || c.alpha3.eq_ignore_ascii_case(&needle)
        })
        .collect()
}

/// Regions in the order they first appear in the table.
#[must_use]
pub fn regions() -> Vec<Region> {
    let mut regions: Vec<Region> = Vec::new();
    for c in COUNTRIES {
        if !regions.contains(&c.region) {
            regions.push(c.region);
        }
    }
    regions
}

#[must_use]
pub fn in_region(region: Region) -> Vec<&'static Country> {
    COUNTRIES.iter().filter(|c| c.region == region).collect()
}

pub static COUNTRIES: &[Country] = &[
    country("KR", "KOR", "South Korea", Some("대한민국"), Region::EastAsia),
    country("JP", "JPN", "Japan", Some("日本"), Region::EastAsia),
    country("CN", "CHN", "China", Some("中国"), Region::EastAsia),
    country("TW", "TWN", "Taiwan", Some("台灣"), Region::EastAsia),
    country("HK", "HKG", "Hong Kong", Some("香港"), Region::EastAsia),
    country("MO", "MAC", "Macau", Some("澳門"), Region::EastAsia),
    country("MN", "MNG", "Mongolia", Some("Монгол"), Region::EastAsia),
    country("VN", "VNM", "Vietnam", Some("Việt Nam"), Region::SoutheastAsia),
    country("TH", "THA", "Thailand", Some("ประเทศไทย"), Region::SoutheastAsia),
    country("ID", "IDN", "Indonesia", Some("Indonesia"), Region::SoutheastAsia),
    country("MY", "MYS", "Malaysia", Some("Malaysia"), Region::SoutheastAsia),
    country("SG", "SGP", "Singapore", Some("Singapore"), Region::SoutheastAsia),
    country("PH", "PHL", "Philippines", Some("Pilipinas"), Region::SoutheastAsia),
    country("BN", "BRN", "Brunei", Some("Brunei"), Region::SoutheastAsia),
    country("KH", "KHM", "Cambodia", Some("កម្ពុជា"), Region::SoutheastAsia),
    country("LA", "LAO", "Laos", Some("ລາວ"), Region::SoutheastAsia),
    country("MM", "MMR", "Myanmar", Some("မြန်မာ"), Region::SoutheastAsia),
    country("TL", "TLS", "Timor-Leste", Some("Timor-Leste"), Region::SoutheastAsia),
    country("IN", "IND", "India", Some("भारत"), Region::SouthAsia),
    country("PK", "PAK", "Pakistan", Some("پاکستان"), Region::SouthAsia),
    country("BD", "BGD", "Bangladesh", Some("বাংলাদেশ"), Region::SouthAsia),
    country("LK", "LKA", "Sri Lanka", Some("ශ්‍රී ලංකාව"), Region::SouthAsia),
    country("NP", "NPL", "Nepal", Some("नेपाल"), Region::SouthAsia),
    country("BT", "BTN", "Bhutan", Some("འབྲུག་ཡུལ"), Region::SouthAsia),
    country("MV", "MDV", "Maldives", Some("ދިވެހިރާއްޖެ"), Region::SouthAsia),
    country("AE", "ARE", "United Arab Emirates", Some("الإمارات العربية المتحدة"), Region::MiddleEast),
    country("SA", "SAU", "Saudi Arabia", Some("المملكة العربية السعودية"), Region::MiddleEast),
    country("QA", "QAT", "Qatar", Some("قطر"), Region::MiddleEast),
    country("BH", "BHR", "Bahrain", Some("البحرين"), Region::MiddleEast),
    country("KW", "KWT", "Kuwait", Some("الكويت"), Region::MiddleEast),
    country("OM", "OMN", "Oman", Some("عمان"), Region::MiddleEast),
    country("PS", "PSE", "Palestine", Some("فلسطين"), Region::MiddleEast),
    country("TR", "TUR", "Turkey", Some("Türkiye"), Region::MiddleEast),
    country("IR", "IRN", "Iran", Some("ایران"), Region::MiddleEast),
    country("IQ", "IRQ", "Iraq", Some("العراق"), Region::MiddleEast),
    country("JO", "JOR", "Jordan", Some("الأردن"), Region::MiddleEast),
    country("LB", "LBN", "Lebanon", Some("لبنان"), Region::MiddleEast),
    country("SY", "SYR", "Syria", Some("سوريا"), Region::MiddleEast),
    country("YE", "YEM", "Yemen", Some("اليمن"), Region::MiddleEast),
    country("KZ", "KAZ", "Kazakhstan", Some("Қазақстан"), Region::CentralAsia),
    country("UZ", "UZB", "Uzbekistan", Some("O'zbekiston"), Region::CentralAsia),
    country("KG", "KGZ", "Kyrgyzstan", Some("Кыргызстан"), Region::CentralAsia),
    country("TJ", "TJK", "Tajikistan", Some("Тоҷикистон"), Region::CentralAsia),
    country("TM", "TKM", "Turkmenistan", Some("Türkmenistan"), Region::CentralAsia),
    country("US", "USA", "United States", None, Region::NorthAmerica),
    country("CA", "CAN", "Canada", None, Region::NorthAmerica),
    country("MX", "MEX", "Mexico", Some("México"), Region::NorthAmerica),
    country("GT", "GTM", "Guatemala", None, Region::CentralAmerica),
    country("BZ", "BLZ", "Belize", None, Region::CentralAmerica),
    country("HN", "HND", "Honduras", None, Region::CentralAmerica),
    country("SV", "SLV", "El Salvador", None, Region::CentralAmerica),
    country("NI", "NIC", "Nicaragua", None, Region::CentralAmerica),
    country("CR", "CRI", "Costa Rica", None, Region::CentralAmerica),
    country("PA", "PAN", "Panama", None, Region::CentralAmerica),
    country("CU", "CUB", "Cuba", None, Region::Caribbean),
    country("JM", "JAM", "Jamaica", None, Region::Caribbean),
    country("HT", "HTI", "Haiti", None, Region::Caribbean),
    country("DO", "DOM", "Dominican Republic", Some("República Dominicana"), Region::Caribbean),
    country("PR", "PRI", "Puerto Rico", None, Region::Caribbean),
    country("BR", "BRA", "Brazil", Some("Brasil"), Region::SouthAmerica),
    country("AR", "ARG", "Argentina", None, Region::SouthAmerica),
    country("CO", "COL", "Colombia", None, Region::SouthAmerica),
    country("PE", "PER", "Peru", Some("Perú"), Region::SouthAmerica),
    country("VE", "VEN", "Venezuela", None, Region::SouthAmerica),
    country("CL", "CHL", "Chile", None, Region::SouthAmerica),
    country("EC", "ECU", "Ecuador", None, Region::SouthAmerica),
    country("BO", "BOL", "Bolivia", None, Region::SouthAmerica),
    country("PY", "PRY", "Paraguay", None, Region::SouthAmerica),
    country("UY", "URY", "Uruguay", None, Region::SouthAmerica),
    country("GY", "GUY", "Guyana", None, Region::SouthAmerica),
    country("SR", "SUR", "Suriname", None, Region::SouthAmerica),
    country("RU", "RUS", "Russia", Some("Россия"), Region::Europe),
    country("GB", "GBR", "United Kingdom", None, Region::Europe),
    country("FR", "FRA", "France", Some("France"), Region::Europe),
    country("DE", "DEU", "Germany", Some("Deutschland"), Region::Europe),
    country("IT", "ITA", "Italy", Some("Italia"), Region::Europe),
    country("ES", "ESP", "Spain", Some("España"), Region::Europe),
    country("PT", "PRT", "Portugal", Some("Portugal"), Region::Europe),
    country("NL", "NLD", "Netherlands", Some("Nederland"), Region::Europe),
    country("BE", "BEL", "Belgium", Some("België"), Region::Europe),
    country("CH", "CHE", "Switzerland", Some("Schweiz"), Region::Europe),
    country("AT", "AUT", "Austria", Some("Österreich"), Region::Europe),
    country("SE", "SWE", "Sweden", Some("Sverige"), Region::Europe),
    country("NO", "NOR", "Norway", Some("Norge"), Region::Europe),
    country("DK", "DNK", "Denmark", Some("Danmark"), Region::Europe),
    country("FI", "FIN", "Finland", Some("Suomi"), Region::Europe),
    country("IE", "IRL", "Ireland", Some("Éire"), Region::Europe),
    country("PL", "POL", "Poland", Some("Polska"), Region::Europe),
    country("RO", "ROU", "Romania", Some("România"), Region::Europe),
    country("GR", "GRC", "Greece", Some("Ελλάδα"), Region::Europe),
    country("CZ", "CZE", "Czech Republic", Some("Česká republika"), Region::Europe),
    country("HU", "HUN", "Hungary", Some("Magyarország"), Region::Europe),
    country("BG", "BGR", "Bulgaria", Some("България"), Region::Europe),
    country("SK", "SVK", "Slovakia", Some("Slovensko"), Region::Europe),
    country("HR", "HRV", "Croatia", Some("Hrvatska"), Region::Europe),
    country("RS", "SRB", "Serbia", Some("Србија"), Region::Europe),
    country("ZA", "ZAF", "South Africa", None, Region::Africa),
    country("NG", "NGA", "Nigeria", None, Region::Africa),
    country("EG", "EGY", "Egypt", Some("مصر"), Region::Africa),
    country("KE", "KEN", "Kenya", None, Region::Africa),
    country("ET", "ETH", "Ethiopia", Some("ኢትዮጵያ"), Region::Africa),
    country("GH", "GHA", "Ghana", None, Region::Africa),
    country("MA", "MAR", "Morocco", Some("المغرب"), Region::Africa),
    country("TN", "TUN", "Tunisia", Some("تونس"), Region::Africa),
    country("AU", "AUS", "Australia", None, Region::Oceania),
    country("NZ", "NZL", "New Zealand", None, Region::Oceania),
    country("FJ", "FJI", "Fiji", None, Region::Oceania),
    country("PG", "PNG", "Papua New Guinea", None, Region::Oceania),
    country("UA", "UKR", "Ukraine", Some("Україна"), Region::Europe),
    country("LT", "LTU", "Lithuania", Some("Lietuva"), Region::Europe),
    country("LV", "LVA", "Latvia", Some("Latvija"), Region::Europe),
    country("EE", "EST", "Estonia", Some("Eesti"), Region::Europe),
    country("SI", "SVN", "Slovenia", Some("Slovenija"), Region::Europe),
    country("AL", "ALB", "Albania", Some("Shqipëria"), Region::Europe),
    country("BS", "BHS", "Bahamas", None, Region::Caribbean),
    country("BB", "BRB", "Barbados", None, Region::Caribbean),
    country("TT", "TTO", "Trinidad and Tobago", None, Region::Caribbean),
    country("TZ", "TZA", "Tanzania", None, Region::Africa),
    country("UG", "UGA", "Uganda", None, Region::Africa),
    country("SN", "SEN", "Senegal", None, Region::Africa),
    country("CI", "CIV", "Côte d'Ivoire", None, Region::Africa),
    country("CM", "CMR", "Cameroon", Some("Cameroun"), Region::Africa),
    country("DZ", "DZA", "Algeria", Some("الجزائر"), Region::Africa),
    country("SD", "SDN", "Sudan", Some("السودان"), Region::Africa),
    country("ZM", "ZMB", "Zambia", None, Region::Africa),
    country("AO", "AGO", "Angola", None, Region::Africa),
    country("MZ", "MOZ", "Mozambique", Some("Moçambique"), Region::Africa),
    country("RW", "RWA", "Rwanda", None, Region::Africa),
    country("ML", "MLI", "Mali", None, Region::Africa),
    country("SB", "SLB", "Solomon Islands", None, Region::Oceania),
    country("VU", "VUT", "Vanuatu", None, Region::Oceania),
    country("NC", "NCL", "New Caledonia", None, Region::Oceania),
    country("CD", "COD", "Democratic Republic of the Congo", Some("République démocratique du Congo"), Region::Africa),
    country("CG", "COG", "Republic of the Congo", Some("République du Congo"), Region::Africa),
    country("ZW", "ZWE", "Zimbabwe", None, Region::Africa),
    country("MG", "MDG", "Madagascar", Some("Madagasikara"), Region::Africa),
    country("BF", "BFA", "Burkina Faso", None, Region::Africa),
    country("TD", "TCD", "Chad", Some("Tchad"), Region::Africa),
    country("NE", "NER", "Niger", None, Region::Africa),
    country("BJ", "BEN", "Benin", Some("Bénin"), Region::Africa),
    country("BI", "BDI", "Burundi", None, Region::Africa),
    country("SS", "SSD", "South Sudan", None, Region::Africa),
    country("SO", "SOM", "Somalia", Some("Soomaaliya"), Region::Africa),
    country("DJ", "DJI", "Djibouti", None, Region::Africa),
    country("ER", "ERI", "Eritrea", Some("ኤርትራ"), Region::Africa),
    country("LY", "LBY", "Libya", Some("ليبيا"), Region::Africa),
    country("BY", "BLR", "Belarus", Some("Беларусь"), Region::Europe),
    country("MD", "MDA", "Moldova", Some("Moldova"), Region::Europe),
    country("ME", "MNE", "Montenegro", Some("Црна Гора"), Region::Europe),
    country("MK", "MKD", "North Macedonia", Some("Северна Македонија"), Region::Europe),
    country("BA", "BIH", "Bosnia and Herzegovina", Some("Bosna i Hercegovina"), Region::Europe),
    country("IS", "ISL", "Iceland", Some("Ísland"), Region::Europe),
    country("LU", "LUX", "Luxembourg", Some("Luxembourg"), Region::Europe),
    country("MT", "MLT", "Malta", None, Region::Europe),
    country("CY", "CYP", "Cyprus", Some("Κύπρος"), Region::Europe),
    country("AG", "ATG", "Antigua and Barbuda", None, Region::Caribbean),
    country("DM", "DMA", "Dominica", None, Region::Caribbean),
    country("GD", "GRD", "Grenada", None, Region::Caribbean),
    country("LC", "LCA", "Saint Lucia", None, Region::Caribbean),
    country("VC", "VCT", "Saint Vincent and the Grenadines", None, Region::Caribbean),
    country("KN", "KNA", "Saint Kitts and Nevis", None, Region::Caribbean),
    country("WS", "WSM", "Samoa", None, Region::Oceania),
    country("TO", "TON", "Tonga", None, Region::Oceania),
    country("KI", "KIR", "Kiribati", None, Region::Oceania),
    country("FM", "FSM", "Micronesia", None, Region::Oceania),
    country("MH", "MHL", "Marshall Islands", None, Region::Oceania),
    country("PW", "PLW", "Palau", None, Region::Oceania),
    country("TV", "TUV", "Tuvalu", None, Region::Oceania),
    country("NR", "NRU", "Nauru", None, Region::Oceania),
    country("GA", "GAB", "Gabon", None, Region::Africa),
    country("TG", "TGO", "Togo", None, Region::Africa),
    country("SL", "SLE", "Sierra Leone", None, Region::Africa),
    country("LR", "LBR", "Liberia", None, Region::Africa),
    country("GN", "GIN", "Guinea", Some("Guinée"), Region::Africa),
    country("GW", "GNB", "Guinea-Bissau", Some("Guiné-Bissau"), Region::Africa),
    country("GM", "GMB", "Gambia", None, Region::Africa),
    country("MR", "MRT", "Mauritania", Some("موريتانيا"), Region::Africa),
    country("CV", "CPV", "Cape Verde", Some("Cabo Verde"), Region::Africa),
    country("CF", "CAF", "Central African Republic", Some("République centrafricaine"), Region::Africa),
    country("GQ", "GNQ", "Equatorial Guinea", Some("Guinea Ecuatorial"), Region::Africa),
    country("ST", "STP", "São Tomé and Príncipe", Some("São Tomé e Príncipe"), Region::Africa),
    country("KM", "COM", "Comoros", Some("جزر القمر"), Region::Africa),
    country("SC", "SYC", "Seychelles", None, Region::Africa),
    country("MU", "MUS", "Mauritius", None, Region::Africa),
    country("LS", "LSO", "Lesotho", None, Region::Africa),
    country("SZ", "SWZ", "Eswatini", None, Region::Africa),
    country("BW", "BWA", "Botswana", None, Region::Africa),
    country("NA", "NAM", "Namibia", None, Region::Africa),
    country("AD", "AND", "Andorra", Some("Andorra"), Region::Europe),
    country("MC", "MCO", "Monaco", Some("Monaco"), Region::Europe),
    country("LI", "LIE", "Liechtenstein", Some("Liechtenstein"), Region::Europe),
    country("SM", "SMR", "San Marino", Some("San Marino"), Region::Europe),
    country("VA", "VAT", "Vatican City", Some("Città del Vaticano"), Region::Europe),
    country("AI", "AIA", "Anguilla", None, Region::Caribbean),
    country("VG", "VGB", "British Virgin Islands", None, Region::Caribbean),
    country("KY", "CYM", "Cayman Islands", None, Region::Caribbean),
    country("MS", "MSR", "Montserrat", None, Region::Caribbean),
    country("TC", "TCA", "Turks and Caicos Islands", None, Region::Caribbean),
    country("BM", "BMU", "Bermuda", None, Region::Caribbean),
    country("CK", "COK", "Cook Islands", None, Region::Oceania),
    country("PF", "PYF", "French Polynesia", None, Region::Oceania),
    country("GU", "GUM", "Guam", None, Region::Oceania),
    country("MP", "MNP", "Northern Mariana Islands", None, Region::Oceania),
    country("AS", "ASM", "American Samoa", None, Region::Oceania),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<_> = COUNTRIES.iter().map(|c| c.code).collect();
        assert_eq!(codes.len(), COUNTRIES.len());
    }

    #[test]
    fn lookups_ignore_case() {
        assert_eq!(by_code("kr").map(|c| c.name), Some("South Korea"));
        assert_eq!(by_code("jpn").map(|c| c.name), Some("Japan"));
        assert_eq!(by_name("japan").map(|c| c.code), Some("JP"));
        assert_eq!(by_name("日本").map(|c| c.code), Some("JP"));
        assert!(by_code("zz").is_none());
    }

    #[test]
    fn search_matches_substrings() {
        let hits = search("korea");
        assert!(hits.iter().any(|c| c.code == "KR"));
        assert_eq!(search("").len(), COUNTRIES.len());
    }

    #[test]
    fn regions_keep_table_order() {
        let regions = regions();
        assert_eq!(regions.first(), Some(&Region::EastAsia));
        assert_eq!(regions.len(), 12);
        assert!(in_region(Region::Europe).iter().all(|c| c.region == Region::Europe));
    }
}
