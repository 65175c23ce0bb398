// ── Wire → domain conversions ──

use hoopstat_api::PlayerSummary;

use crate::model::Player;

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<PlayerSummary> for Player {
    fn from(p: PlayerSummary) -> Self {
        Self {
            id: p.id,
            name: p.name.trim().to_owned(),
            position: non_empty(p.position),
            team: non_empty(p.team),
            image_url: non_empty(p.image_url),
            ppg: p.ppg,
            rpg: p.rpg,
            apg: p.apg,
        }
    }
}
