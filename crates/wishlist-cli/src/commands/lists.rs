use super::{remote_failure, AppContext};
use crate::output::Output;
use crate::render;
use color_eyre::Result;
use serde_json::json;
use wishlist_core::ListViewModel;
use wishlist_gateway::HttpMovieGateway;

async fn load_and_show(list: ListViewModel<HttpMovieGateway>, empty: &str, output: &Output) -> Result<()> {
    let spinner = render::spinner("Loading movies...");
    let result = list.load().await;
    spinner.finish_and_clear();
    if let Err(e) = result {
        return Err(remote_failure(list.error().await, e));
    }

    let movies = list.movies().await;
    if !output.is_human() {
        output.json(&json!({ "movies": movies }));
    } else if movies.is_empty() {
        output.info(empty);
    } else if !output.is_quiet() {
        println!("{}", render::movie_table(&movies));
    }
    Ok(())
}

pub async fn run_all(ctx: &AppContext, output: &Output) -> Result<()> {
    let list = ListViewModel::all(ctx.gateway());
    load_and_show(list, "No movies yet. Try 'wishlist discover' to find something.", output).await
}

pub async fn run_wishlist(ctx: &AppContext, output: &Output) -> Result<()> {
    let list = ListViewModel::wishlist(ctx.gateway());
    load_and_show(list, "Your wishlist is empty. Try 'wishlist discover' to find something.", output).await
}

pub async fn run_watched(ctx: &AppContext, output: &Output) -> Result<()> {
    let list = ListViewModel::watched(ctx.gateway());
    load_and_show(list, "You haven't marked anything as watched yet.", output).await
}

pub async fn run_discover(
    ctx: &AppContext,
    query: Option<String>,
    add: Option<String>,
    output: &Output,
) -> Result<()> {
    let query = query
        .filter(|q| !q.trim().is_empty())
        .unwrap_or_else(|| ctx.config.discover.default_query.clone());
    let list = ListViewModel::discover(ctx.gateway(), query.trim());

    let spinner = render::spinner(format!("Searching for '{}'...", query.trim()));
    let result = list.load().await;
    spinner.finish_and_clear();
    if let Err(e) = result {
        return Err(remote_failure(list.error().await, e));
    }

    if let Some(external_id) = add {
        let movie = match list.add_external_by_id(external_id.trim()).await {
            Ok(movie) => movie,
            Err(e) => return Err(remote_failure(list.error().await, e)),
        };
        output.success(format!("Added '{}' to your wishlist (id {})", movie.title, movie.id));
        return Ok(());
    }

    let candidates = list.candidates().await;
    if !output.is_human() {
        output.json(&json!({ "query": query, "results": candidates }));
    } else if candidates.is_empty() {
        output.info(format!("No movies found for '{}'", query));
    } else if !output.is_quiet() {
        println!("{}", render::candidate_table(&candidates));
        output.info("Add one with: wishlist discover --add <IMDB_ID>");
    }
    Ok(())
}
