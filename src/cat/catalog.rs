//! Producer catalog: static definitions of every purchasable producer kind.
//!
//! The engine never hardcodes producer identities. Everything goes through a
//! `Catalog`, looked up by id, in display order.

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};

/// Static definition of one producer kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProducerDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    /// Price of the first unit.
    pub base_cost: f64,
    /// Points per second per unit owned.
    pub base_rate: f64,
}

fn default_icon() -> String {
    "🐾".into()
}

impl ProducerDefinition {
    pub fn new(id: &str, name: &str, description: &str, icon: &str, base_cost: f64, base_rate: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            icon: icon.into(),
            base_cost,
            base_rate,
        }
    }
}

/// Ordered, validated list of producer definitions.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    defs: Vec<ProducerDefinition>,
}

impl Catalog {
    /// Validate and wrap a list of definitions.
    pub fn new(defs: Vec<ProducerDefinition>) -> Result<Self> {
        if defs.is_empty() {
            return Err(GameError::InvalidCatalog("no producers defined".into()));
        }
        for (i, def) in defs.iter().enumerate() {
            if def.id.is_empty() {
                return Err(GameError::InvalidCatalog(format!("producer #{} has an empty id", i)));
            }
            if defs[..i].iter().any(|d| d.id == def.id) {
                return Err(GameError::InvalidCatalog(format!("duplicate id: {}", def.id)));
            }
            if !def.base_cost.is_finite() || def.base_cost <= 0.0 {
                return Err(GameError::InvalidCatalog(format!(
                    "{}: base cost must be positive, got {}",
                    def.id, def.base_cost
                )));
            }
            if !def.base_rate.is_finite() || def.base_rate < 0.0 {
                return Err(GameError::InvalidCatalog(format!(
                    "{}: base rate must be non-negative, got {}",
                    def.id, def.base_rate
                )));
            }
        }
        Ok(Self { defs })
    }

    /// Parse a JSON array of definitions (`[{"id": .., "baseCost": ..}, ..]`).
    pub fn from_json(json: &str) -> Result<Self> {
        let defs: Vec<ProducerDefinition> =
            serde_json::from_str(json).map_err(|e| GameError::InvalidCatalog(e.to_string()))?;
        Self::new(defs)
    }

    /// The four producers of the shipped game.
    pub fn reference() -> Self {
        Self {
            defs: vec![
                ProducerDefinition::new("autoPurr", "Auto-Purr", "Small auto purrs", "😺", 10.0, 0.1),
                ProducerDefinition::new("catnipFarm", "Catnip Farm", "Produces cat points", "🌿", 120.0, 1.0),
                ProducerDefinition::new("laserFactory", "Laser Factory", "Laser pointers", "🔦", 1_500.0, 12.0),
                ProducerDefinition::new("meowTeam", "Meow Team", "Team of meowing cats", "🎤", 10_000.0, 80.0),
            ],
        }
    }

    pub fn get(&self, id: &str) -> Option<&ProducerDefinition> {
        self.defs.iter().find(|d| d.id == id)
    }

    /// Definition at a display position (0-based).
    pub fn at(&self, index: usize) -> Option<&ProducerDefinition> {
        self.defs.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProducerDefinition> {
        self.defs.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.defs.iter().map(|d| d.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_has_four_producers_in_order() {
        let catalog = Catalog::reference();
        let ids: Vec<&str> = catalog.ids().collect();
        assert_eq!(ids, ["autoPurr", "catnipFarm", "laserFactory", "meowTeam"]);
    }

    #[test]
    fn reference_passes_validation() {
        let defs: Vec<ProducerDefinition> = Catalog::reference().iter().cloned().collect();
        assert!(Catalog::new(defs).is_ok());
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::reference();
        let def = catalog.get("catnipFarm").unwrap();
        assert!((def.base_cost - 120.0).abs() < 0.001);
        assert!((def.base_rate - 1.0).abs() < 0.001);
        assert!(catalog.get("dogHouse").is_none());
    }

    #[test]
    fn lookup_by_index() {
        let catalog = Catalog::reference();
        assert_eq!(catalog.at(3).unwrap().id, "meowTeam");
        assert!(catalog.at(4).is_none());
    }

    #[test]
    fn rejects_empty_catalog() {
        assert!(matches!(Catalog::new(vec![]), Err(GameError::InvalidCatalog(_))));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let defs = vec![
            ProducerDefinition::new("a", "A", "", "x", 1.0, 1.0),
            ProducerDefinition::new("a", "A2", "", "x", 2.0, 1.0),
        ];
        assert!(matches!(Catalog::new(defs), Err(GameError::InvalidCatalog(_))));
    }

    #[test]
    fn rejects_non_positive_cost() {
        let defs = vec![ProducerDefinition::new("a", "A", "", "x", 0.0, 1.0)];
        assert!(Catalog::new(defs).is_err());
        let defs = vec![ProducerDefinition::new("a", "A", "", "x", f64::NAN, 1.0)];
        assert!(Catalog::new(defs).is_err());
    }

    #[test]
    fn rejects_negative_rate() {
        let defs = vec![ProducerDefinition::new("a", "A", "", "x", 5.0, -0.1)];
        assert!(Catalog::new(defs).is_err());
    }

    #[test]
    fn zero_rate_is_allowed() {
        let defs = vec![ProducerDefinition::new("decor", "Cat Tree", "", "x", 5.0, 0.0)];
        assert!(Catalog::new(defs).is_ok());
    }

    #[test]
    fn from_json_camel_case() {
        let json = r#"[
            {"id": "yarn", "name": "Yarn Ball", "baseCost": 5, "baseRate": 0.05},
            {"id": "box", "name": "Cardboard Box", "description": "Fits", "icon": "📦", "baseCost": 50, "baseRate": 0.5}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        let yarn = catalog.get("yarn").unwrap();
        assert_eq!(yarn.icon, "🐾");
        assert_eq!(yarn.description, "");
        assert_eq!(catalog.get("box").unwrap().icon, "📦");
    }

    #[test]
    fn from_json_rejects_malformed() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(GameError::InvalidCatalog(_))
        ));
        // baseCost missing
        assert!(Catalog::from_json(r#"[{"id": "a", "name": "A", "baseRate": 1}]"#).is_err());
    }
}
