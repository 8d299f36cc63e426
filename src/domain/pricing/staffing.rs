//! Advisory team sizing. Never billed.

use serde::{Deserialize, Serialize};

use super::catalog::Discipline;

/// Suggested headcount by seniority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamAllocation {
    pub snr: u32,
    pub mid: u32,
    pub jnr: u32,
}

impl TeamAllocation {
    /// Allocation reported when there is nothing to price.
    pub const MINIMAL: TeamAllocation = TeamAllocation { snr: 1, mid: 1, jnr: 2 };

    /// Sizes a team from the site area in hectares.
    ///
    /// One senior always; mid-level staff scale with area for master
    /// planning only; a third junior joins from 300 ha.
    pub fn suggest(discipline: Discipline, hectares: f64) -> Self {
        let mid = match discipline {
            Discipline::Planning => planning_mid_level(hectares),
            _ => 1,
        };
        let jnr = if hectares >= 300.0 { 3 } else { 2 };
        Self { snr: 1, mid, jnr }
    }

    pub fn headcount(&self) -> u32 {
        self.snr + self.mid + self.jnr
    }
}

fn planning_mid_level(hectares: f64) -> u32 {
    if hectares <= 50.0 {
        1
    } else if hectares <= 200.0 {
        2
    } else {
        3
    }
}
