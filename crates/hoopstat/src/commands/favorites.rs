//! Favorites command handlers.

use tabled::Tabled;

use hoopstat_core::{FavoriteKey, FavoriteKind, FavoritesStore};

use crate::cli::{FavoritesArgs, FavoritesCommand};
use crate::error::CliError;
use crate::output;

use super::{Context, restore_session};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct FavoriteRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "ID")]
    id: i64,
}

impl From<&FavoriteKey> for FavoriteRow {
    fn from(k: &FavoriteKey) -> Self {
        Self {
            kind: k.kind.to_string(),
            id: k.id,
        }
    }
}

/// The loaded favorites store for the stored session.
async fn loaded_store(ctx: &Context<'_>) -> Result<FavoritesStore, CliError> {
    restore_session(ctx)?;
    let store = ctx.session.favorites().ok_or_else(|| CliError::NotLoggedIn {
        profile: ctx.profile.clone(),
    })?;
    store.load().await?;
    Ok(store)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: FavoritesArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let store = loaded_store(ctx).await?;

    match args.command {
        FavoritesCommand::List { kind } => {
            let kinds = kind.map_or_else(|| FavoriteKind::ALL.to_vec(), |k| vec![k]);
            let keys: Vec<FavoriteKey> = kinds
                .into_iter()
                .flat_map(|k| store.favorites(k).into_iter().map(move |id| FavoriteKey::new(k, id)))
                .collect();

            let out = output::render_list(
                &ctx.global.output,
                &keys,
                |k| FavoriteRow::from(k),
                ToString::to_string,
            );
            output::print_output(&out, ctx.global.quiet);
            Ok(())
        }

        FavoritesCommand::Add { kind, id } => {
            store.add_to_favorites(kind, id).await?;
            if !ctx.global.quiet {
                eprintln!("★ {kind} {id} added to favorites");
            }
            Ok(())
        }

        FavoritesCommand::Remove { kind, id } => {
            store.remove_from_favorites(kind, id).await?;
            if !ctx.global.quiet {
                eprintln!("☆ {kind} {id} removed from favorites");
            }
            Ok(())
        }
    }
}
