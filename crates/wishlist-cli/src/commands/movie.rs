use super::{prompts, remote_failure, AppContext};
use crate::output::Output;
use crate::render;
use crate::MovieFields;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;
use wishlist_core::{DetailViewModel, FormError, ListViewModel, MovieFormViewModel, Navigation};
use wishlist_gateway::HttpMovieGateway;
use wishlist_models::draft::MAX_REVIEW_LEN;
use wishlist_models::{validate_comment, Movie, MovieDraft, MovieStatus};

impl MovieFields {
    /// Overwrite the draft's fields with whatever was passed on the command line.
    fn apply_to(self, draft: &mut MovieDraft) {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if self.genre.is_some() {
            draft.genre = self.genre;
        }
        if self.year.is_some() {
            draft.release_year = self.year;
        }
        if self.runtime.is_some() {
            draft.runtime = self.runtime;
        }
        if self.poster_url.is_some() {
            draft.poster_url = self.poster_url;
        }
        if self.rating.is_some() {
            draft.rating = self.rating;
        }
        if self.review.is_some() {
            draft.review = self.review;
        }
    }
}

async fn load_detail(ctx: &AppContext, id: u64) -> Result<DetailViewModel<HttpMovieGateway>> {
    let detail = DetailViewModel::new(ctx.gateway());
    let spinner = render::spinner("Loading movie...");
    let result = detail.load(id).await;
    spinner.finish_and_clear();
    match result {
        Ok(()) => Ok(detail),
        Err(e) => Err(remote_failure(detail.error().await, e)),
    }
}

async fn held_movie(detail: &DetailViewModel<HttpMovieGateway>) -> Result<Movie> {
    detail
        .movie()
        .await
        .ok_or_else(|| eyre!("Movie is no longer available"))
}

async fn submit_form(
    form: &MovieFormViewModel<HttpMovieGateway>,
    draft: MovieDraft,
) -> Result<u64> {
    match form.submit(draft).await {
        Ok(Navigation::Detail(id)) => Ok(id),
        Ok(other) => Err(eyre!("Unexpected destination after saving: {}", other)),
        Err(FormError::Invalid(e)) => Err(eyre!("Invalid movie: {}", e)),
        Err(FormError::Remote(e)) => Err(remote_failure(form.error().await, e)),
    }
}

pub async fn run_add(
    ctx: &AppContext,
    imdb: Option<String>,
    fields: MovieFields,
    output: &Output,
) -> Result<()> {
    let movie_id = match imdb {
        Some(external_id) => {
            let list = ListViewModel::wishlist(ctx.gateway());
            match list.add_external_by_id(external_id.trim()).await {
                Ok(movie) => movie.id,
                Err(e) => return Err(remote_failure(list.error().await, e)),
            }
        }
        None => {
            let mut draft = MovieDraft::default();
            let title = prompts::value_or_prompt(fields.title.clone(), "Title")?;
            fields.apply_to(&mut draft);
            draft.title = title.trim().to_string();
            let form = MovieFormViewModel::create(ctx.gateway());
            submit_form(&form, draft).await?
        }
    };
    output.success(format!("Movie added (id {})", movie_id));
    Ok(())
}

pub async fn run_edit(ctx: &AppContext, id: u64, fields: MovieFields, output: &Output) -> Result<()> {
    let form = MovieFormViewModel::edit(ctx.gateway(), id);
    if let Err(e) = form.load().await {
        return Err(remote_failure(form.error().await, e));
    }
    let mut draft = form.draft().await;
    fields.apply_to(&mut draft);
    let saved = submit_form(&form, draft).await?;
    output.success(format!("Movie {} updated", saved));
    Ok(())
}

pub async fn run_show(ctx: &AppContext, id: u64, output: &Output) -> Result<()> {
    let detail = load_detail(ctx, id).await?;
    let movie = held_movie(&detail).await?;
    let comments = detail.comments().await;

    if !output.is_human() {
        output.json(&json!({ "movie": movie, "comments": comments }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    println!("{}", render::movie_details(&movie));
    println!();
    if let Some(message) = detail.comment_error().await {
        output.warn(message);
    } else if comments.is_empty() {
        output.info("No comments yet.");
    } else {
        output.info(format!("Comments ({})", movie.comments_count));
        for line in render::comment_lines(&comments) {
            println!("  {}", line);
        }
    }
    Ok(())
}

pub async fn run_like(ctx: &AppContext, id: u64, output: &Output) -> Result<()> {
    let detail = load_detail(ctx, id).await?;
    if let Err(e) = detail.toggle_like().await {
        return Err(remote_failure(Some("Failed to update like.".to_string()), e));
    }
    let movie = held_movie(&detail).await?;
    let verb = if movie.user_liked { "Liked" } else { "Unliked" };
    output.success(format!("{} '{}' ({} likes)", verb, movie.title, movie.likes_count));
    Ok(())
}

pub async fn run_comment(ctx: &AppContext, id: u64, text: Option<String>, output: &Output) -> Result<()> {
    let content = prompts::value_or_prompt(text, "Comment")?;
    validate_comment(&content).map_err(|e| eyre!("Invalid comment: {}", e))?;

    let detail = load_detail(ctx, id).await?;
    match detail.submit_comment(content.trim()).await {
        Ok(Some(_)) => {
            output.success("Comment added");
            Ok(())
        }
        Ok(None) => Err(eyre!("Movie is no longer available")),
        Err(e) => Err(remote_failure(detail.comment_error().await, e)),
    }
}

pub async fn run_watch(
    ctx: &AppContext,
    id: u64,
    rating: Option<u8>,
    review: Option<String>,
    output: &Output,
) -> Result<()> {
    if let Some(review) = &review {
        if review.chars().count() > MAX_REVIEW_LEN {
            return Err(eyre!("Review must be at most {} characters", MAX_REVIEW_LEN));
        }
    }

    let list = ListViewModel::wishlist(ctx.gateway());
    if let Err(e) = list.load().await {
        return Err(remote_failure(list.error().await, e));
    }
    let held = list.movies().await.into_iter().find(|m| m.id == id);
    let rating = rating.or_else(|| held.as_ref().and_then(|m| m.rating));
    let review = review.or_else(|| held.and_then(|m| m.review));

    if let Err(e) = list.mark_watched_with(id, rating, review.as_deref()).await {
        return Err(remote_failure(list.error().await, e));
    }
    output.success(format!("Movie {} marked as watched", id));
    Ok(())
}

pub async fn run_unwatch(ctx: &AppContext, id: u64, output: &Output) -> Result<()> {
    let detail = load_detail(ctx, id).await?;
    let movie = held_movie(&detail).await?;
    if movie.status == MovieStatus::Wishlist {
        output.info(format!("'{}' is already on your wishlist", movie.title));
        return Ok(());
    }
    if let Err(e) = detail.change_status(MovieStatus::Wishlist).await {
        return Err(remote_failure(detail.error().await, e));
    }
    // The held copy is the server's answer, which may not have moved
    let status = detail.movie().await.map(|m| m.status);
    match unwatch_message(&movie.title, status) {
        Ok(message) => output.success(message),
        Err(message) => output.warn(message),
    }
    Ok(())
}

fn unwatch_message(title: &str, status: Option<MovieStatus>) -> Result<String, String> {
    match status {
        Some(MovieStatus::Wishlist) => Ok(format!("'{}' moved back to your wishlist", title)),
        Some(MovieStatus::Watched) => Err(format!(
            "Saved '{}', but the server still lists it as watched",
            title
        )),
        None => Err(format!("'{}' is no longer available", title)),
    }
}

pub async fn run_delete(ctx: &AppContext, id: u64, yes: bool, output: &Output) -> Result<()> {
    let detail = load_detail(ctx, id).await?;
    let movie = held_movie(&detail).await?;

    if !yes && !prompts::prompt_yes_no(&format!("Delete '{}'?", movie.title), false)? {
        output.info("Cancelled");
        return Ok(());
    }

    match detail.delete_movie().await {
        Ok(Some(next)) => {
            output.success(format!("Deleted '{}'", movie.title));
            output.info(format!("Next: {}", next.path()));
            Ok(())
        }
        Ok(None) => Err(eyre!("Movie is no longer available")),
        Err(e) => Err(remote_failure(Some("Failed to delete movie.".to_string()), e)),
    }
}
