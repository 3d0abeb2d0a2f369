//! Compiled-in reference data used whenever the published JSON cannot be
//! loaded.

use rust_decimal::Decimal;

use super::RegionFeeTable;

pub const EMBEDDED_VEHICLES: &[&str] = &[
    "Fiat Panda",
    "Volkswagen Golf 7.5",
    "Volkswagen Golf",
    "Volkswagen Passat B6",
    "Renault Clio",
    "Ford Fiesta",
    "Toyota Yaris",
    "Audi A3",
    "BMW Serie 1",
    "Opel Corsa",
    "Peugeot 208",
    "Citroën C3",
    "Dacia Duster",
    "Nissan Qashqai",
    "Hyundai i20",
    "Kia Sportage",
    "Seat Ibiza",
    "Skoda Octavia",
    "Alfa Romeo Giulietta",
    "Lancia Ypsilon",
];

pub const EMBEDDED_REGIONS: &[(&str, i64)] = &[
    ("Abruzzo", 100),
    ("Basilicata", 95),
    ("Calabria", 90),
    ("Campania", 110),
    ("Emilia-Romagna", 130),
    ("Friuli-Venezia Giulia", 120),
    ("Lazio", 140),
    ("Liguria", 125),
    ("Lombardia", 150),
    ("Marche", 115),
    ("Molise", 85),
    ("Piemonte", 135),
    ("Puglia", 105),
    ("Sardegna", 100),
    ("Sicilia", 100),
    ("Toscana", 145),
    ("Trentino-Alto Adige", 130),
    ("Umbria", 110),
    ("Valle d'Aosta", 125),
    ("Veneto", 140),
];

pub fn embedded_vehicles() -> Vec<String> {
    EMBEDDED_VEHICLES.iter().map(|name| (*name).to_string()).collect()
}

pub fn embedded_regions() -> RegionFeeTable {
    RegionFeeTable::build(
        EMBEDDED_REGIONS.iter().map(|(region, fee)| (*region, Some(Decimal::from(*fee)))),
    )
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{embedded_regions, embedded_vehicles, EMBEDDED_REGIONS};

    #[test]
    fn embedded_tables_are_complete() {
        let regions = embedded_regions();
        assert_eq!(regions.len(), EMBEDDED_REGIONS.len());
        assert_eq!(regions.lookup("valle d’aosta"), Some(Decimal::from(125)));
        assert_eq!(regions.lookup("Lombardia"), Some(Decimal::from(150)));
        assert_eq!(embedded_vehicles().len(), 20);
    }
}
