//! Per-profile endpoint defaults and product catalogs

use domain::{ProductCatalog, ProductInfo, Profile};

/// Public `hafas-rest-api` instance for a profile, if one exists
///
/// Profiles without a public instance need an endpoint from configuration.
#[must_use]
pub const fn default_base_url(profile: Profile) -> Option<&'static str> {
    match profile {
        Profile::Db => Some("https://v6.db.transport.rest"),
        Profile::Kvb | Profile::Nasa | Profile::Rkrp | Profile::Vsn => None,
    }
}

/// Products offered by a profile, with the recommended default subset
#[must_use]
pub fn catalog(profile: Profile) -> ProductCatalog {
    let entries: &[(&str, &str, bool)] = match profile {
        Profile::Db => &[
            ("nationalExpress", "InterCityExpress", true),
            ("national", "InterCity & EuroCity", true),
            ("regionalExpress", "RegionalExpress & InterRegio", true),
            ("regional", "Regio", true),
            ("suburban", "S-Bahn", true),
            ("bus", "Bus", true),
            ("ferry", "Ferry", true),
            ("subway", "U-Bahn", true),
            ("tram", "Tram", true),
            ("taxi", "Group Taxi", false),
        ],
        Profile::Kvb => &[
            ("s-bahn", "S-Bahn", true),
            ("stadtbahn", "Stadtbahn", true),
            ("bus", "Bus", true),
            ("fernverkehr", "Fernverkehr", true),
            ("regionalverkehr", "Regionalverkehr", true),
            ("taxibus", "Taxibus", false),
        ],
        Profile::Nasa => &[
            ("nationalExpress", "InterCityExpress", true),
            ("national", "InterCity & EuroCity", true),
            ("regional", "Regional", true),
            ("suburban", "S-Bahn", true),
            ("tram", "Tram", true),
            ("bus", "Bus", true),
            ("tourismTrain", "Tourism Train", false),
        ],
        Profile::Rkrp => &[
            ("ic", "InterCity", true),
            ("icl", "InterCityLyn", true),
            ("re", "Regional", true),
            ("s-tog", "S-Tog", true),
            ("metro", "Metro", true),
            ("bus", "Bus", true),
            ("ferry", "Ferry", true),
        ],
        Profile::Vsn => &[
            ("nationalExpress", "InterCityExpress", true),
            ("national", "InterCity & EuroCity", true),
            ("regionalExpress", "RegionalExpress", true),
            ("regional", "Regional", true),
            ("suburban", "S-Bahn", true),
            ("bus", "Bus", true),
            ("ferry", "Ferry", true),
            ("subway", "U-Bahn", true),
            ("tram", "Tram", true),
            ("onCall", "Anruf-Sammel-Taxi", false),
        ],
    };

    ProductCatalog::new(
        entries
            .iter()
            .map(|(id, label, default)| ProductInfo::new(*id, *label, *default))
            .collect(),
    )
}
