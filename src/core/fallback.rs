use crate::domain::model::Partner;

fn sample(id: u32, name: &str, rate: f64, markets: &[&str], hires: u32) -> Partner {
    let seed = name.split_whitespace().next().unwrap_or(name);
    Partner {
        id: id.to_string(),
        name: name.to_string(),
        photo_url: Some(format!(
            "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
            seed
        )),
        rate,
        markets: markets.iter().map(|m| m.to_string()).collect(),
        hires,
        verified: true,
        bio: None,
        expertise: None,
        languages: None,
        created_at: None,
    }
}

/// Example partners shown when the backend is unreachable or empty.
pub fn sample_partners() -> Vec<Partner> {
    vec![
        sample(1, "Carlos Rodriguez", 85.0, &["LATAM", "Mexico", "Colombia"], 12),
        sample(2, "Ana Silva", 95.0, &["Brazil"], 8),
        sample(3, "Miguel Torres", 75.0, &["Mexico", "Central America"], 15),
        sample(4, "Sofia Martinez", 90.0, &["Argentina", "Uruguay", "Chile"], 10),
        sample(5, "Luis Fernandez", 80.0, &["Chile", "Peru"], 7),
        sample(6, "Isabella Costa", 100.0, &["Spain", "Portugal", "Italy", "France"], 20),
    ]
}
