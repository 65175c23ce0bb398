//! Player leaderboard, fetched page by page.

use std::cell::Cell;
use std::collections::HashSet;
use std::sync::Arc;

use tabled::Tabled;
use tracing::{debug, warn};

use hoopstat_core::{FavoriteKind, PageLoader, Player, SortedByPpg};

use crate::cli::PlayersArgs;
use crate::error::CliError;
use crate::output;

use super::{Context, restore_session};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PlayerRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "Pos")]
    position: String,
    #[tabled(rename = "PPG")]
    ppg: String,
    #[tabled(rename = "RPG")]
    rpg: String,
    #[tabled(rename = "APG")]
    apg: String,
    #[tabled(rename = "★")]
    favorite: String,
}

fn stat(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.1}")).unwrap_or_default()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: &PlayersArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let favorites = starred_players(ctx).await;

    let loader = PageLoader::new(SortedByPpg::new(Arc::clone(ctx.session.api())));
    let mut requested = 0u32;
    loop {
        if !args.all && requested >= args.pages {
            break;
        }
        loader.load_next().await;
        requested += 1;

        let state = loader.snapshot();
        if let Some(err) = state.error {
            return Err(CliError::from(err.as_ref()));
        }
        if state.is_exhausted {
            debug!(pages = state.pages_loaded, "player list exhausted");
            break;
        }
    }

    let state = loader.snapshot();
    let players: Vec<Arc<Player>> = state.items.as_ref().clone();
    let rank = Cell::new(0usize);
    let out = output::render_list(
        &ctx.global.output,
        &players,
        |p| {
            rank.set(rank.get() + 1);
            PlayerRow {
                rank: rank.get(),
                id: p.id,
                name: p.name.clone(),
                team: p.team.clone().unwrap_or_default(),
                position: p.position.clone().unwrap_or_default(),
                ppg: stat(p.ppg),
                rpg: stat(p.rpg),
                apg: stat(p.apg),
                favorite: output::favorite_marker(favorites.contains(&p.id)).to_owned(),
            }
        },
        |p| p.id.to_string(),
    );
    output::print_output(&out, ctx.global.quiet);
    Ok(())
}

/// Favorited player IDs for the stored session, or none when signed out.
async fn starred_players(ctx: &Context<'_>) -> HashSet<i64> {
    if restore_session(ctx).is_err() {
        return HashSet::new();
    }
    let Some(store) = ctx.session.favorites() else {
        return HashSet::new();
    };
    match store.load().await {
        Ok(()) => store.favorites(FavoriteKind::Player).into_iter().collect(),
        Err(err) => {
            warn!(error = %err, "could not load favorites; continuing without them");
            HashSet::new()
        }
    }
}
