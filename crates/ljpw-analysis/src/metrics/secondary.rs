//! Secondary metrics: means over pairs and triples of axes.

use serde::Serialize;

use ljpw_core::types::LjpwProfile;

/// All six combined metrics of one profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SecondaryMetrics {
    pub secure_connectivity: f64,
    pub service_capacity: f64,
    pub operational_excellence: f64,
    pub security_intelligence: f64,
    pub wise_power: f64,
    pub loving_wisdom: f64,
}

impl SecondaryMetrics {
    pub fn of(p: &LjpwProfile) -> Self {
        Self {
            secure_connectivity: secure_connectivity(p),
            service_capacity: service_capacity(p),
            operational_excellence: operational_excellence(p),
            security_intelligence: security_intelligence(p),
            wise_power: wise_power(p),
            loving_wisdom: loving_wisdom(p),
        }
    }
}

/// (L + J) / 2
pub fn secure_connectivity(p: &LjpwProfile) -> f64 {
    (p.love() + p.justice()) / 2.0
}

/// (L + P) / 2
pub fn service_capacity(p: &LjpwProfile) -> f64 {
    (p.love() + p.power()) / 2.0
}

/// (L + J + P) / 3
pub fn operational_excellence(p: &LjpwProfile) -> f64 {
    (p.love() + p.justice() + p.power()) / 3.0
}

/// (J + W) / 2
pub fn security_intelligence(p: &LjpwProfile) -> f64 {
    (p.justice() + p.wisdom()) / 2.0
}

/// (P + W) / 2
pub fn wise_power(p: &LjpwProfile) -> f64 {
    (p.power() + p.wisdom()) / 2.0
}

/// (L + W) / 2
pub fn loving_wisdom(p: &LjpwProfile) -> f64 {
    (p.love() + p.wisdom()) / 2.0
}
