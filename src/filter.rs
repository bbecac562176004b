use crate::model::Commodity;

/// How many excluded commodities are echoed to the log
pub const EXCLUDED_SAMPLE: usize = 5;

/// Names of commodities that are both visible and available, in upstream order
pub fn filter_commodities(commodities: &[Commodity]) -> Vec<String> {
    commodities
        .iter()
        .filter(|c| c.is_listed())
        .map(|c| c.name.clone())
        .collect()
}

/// Commodities left out by [`filter_commodities`]
pub fn excluded_commodities(commodities: &[Commodity]) -> Vec<&Commodity> {
    commodities.iter().filter(|c| !c.is_listed()).collect()
}

/// Log the fetched/kept/excluded totals and a few excluded examples
pub fn log_commodity_summary(all: &[Commodity], kept: &[String]) {
    let excluded = excluded_commodities(all);
    tracing::info!(
        total = all.len(),
        visible_and_available = kept.len(),
        excluded = excluded.len(),
        "Commodities summary"
    );

    for c in excluded.iter().take(EXCLUDED_SAMPLE) {
        tracing::info!(
            "Excluded {} (visible: {}, available: {})",
            c.name,
            c.is_visible,
            c.is_available
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commodity(name: &str, visible: u8, available: u8) -> Commodity {
        Commodity {
            name: name.to_string(),
            code: name.to_uppercase(),
            is_visible: visible,
            is_available: available,
            is_illegal: 0,
            is_temporary: 0,
        }
    }

    #[test]
    fn test_filter_requires_visible_and_available() {
        let all = vec![
            commodity("Laranite", 1, 1),
            commodity("Hidden", 0, 1),
            commodity("Gone", 1, 0),
            commodity("Agricium", 1, 1),
        ];

        assert_eq!(filter_commodities(&all), vec!["Laranite", "Agricium"]);

        let excluded: Vec<&str> = excluded_commodities(&all)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(excluded, vec!["Hidden", "Gone"]);
    }
}
